//! Error handling for the campus events core
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for campus events operations
#[derive(Error, Debug)]
pub enum CampusEventsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Notification not found: {notification_id}")]
    NotificationNotFound { notification_id: Uuid },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Event is not open for registration")]
    NotOpenForRegistration { event_id: Uuid },

    #[error("Already registered for this event")]
    AlreadyRegistered { event_id: Uuid, student_id: Uuid },

    #[error("Event is full")]
    EventFull { event_id: Uuid, total_seats: i32 },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Translation provider errors
///
/// These never leave the translation adapter; a failed translation degrades
/// to missing language keys instead of failing the event operation.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Translation API timeout")]
    Timeout,

    #[error("Translation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Translation API rate limited")]
    RateLimited,

    #[error("Translation API server error: HTTP {0}")]
    ServerError(u16),

    #[error("Translation API request rejected: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),

    #[error("Translation deadline exceeded")]
    DeadlineExceeded,
}

impl TranslationError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TranslationError::Timeout
                | TranslationError::ServiceUnavailable(_)
                | TranslationError::RateLimited
                | TranslationError::ServerError(_)
        )
    }
}

/// Result type alias for campus events operations
pub type Result<T> = std::result::Result<T, CampusEventsError>;

/// Result type alias for translation operations
pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

/// Stable, caller-facing error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    Authentication,
    InvalidState,
    NotFound,
    Duplicate,
    Capacity,
    ForbiddenState,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Authentication => "authentication",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::Capacity => "capacity",
            ErrorKind::ForbiddenState => "forbidden_state",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CampusEventsError {
    /// Classify the error for callers
    pub fn kind(&self) -> ErrorKind {
        match self {
            CampusEventsError::Validation(_) => ErrorKind::Validation,
            CampusEventsError::PermissionDenied(_) => ErrorKind::Authorization,
            CampusEventsError::Authentication(_) => ErrorKind::Authentication,
            CampusEventsError::InvalidState(_) => ErrorKind::InvalidState,
            CampusEventsError::InvalidStateTransition { .. } => ErrorKind::InvalidState,
            CampusEventsError::EventNotFound { .. } => ErrorKind::NotFound,
            CampusEventsError::NotificationNotFound { .. } => ErrorKind::NotFound,
            CampusEventsError::AlreadyRegistered { .. } => ErrorKind::Duplicate,
            CampusEventsError::EventFull { .. } => ErrorKind::Capacity,
            CampusEventsError::NotOpenForRegistration { .. } => ErrorKind::ForbiddenState,
            _ => ErrorKind::Internal,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampusEventsError::Database(_) => false,
            CampusEventsError::Migration(_) => false,
            CampusEventsError::Config(_) => false,
            CampusEventsError::Validation(_) => false,
            CampusEventsError::PermissionDenied(_) => false,
            CampusEventsError::Authentication(_) => false,
            CampusEventsError::EventNotFound { .. } => false,
            CampusEventsError::NotificationNotFound { .. } => false,
            CampusEventsError::InvalidState(_) => true,
            CampusEventsError::InvalidStateTransition { .. } => false,
            CampusEventsError::NotOpenForRegistration { .. } => false,
            CampusEventsError::AlreadyRegistered { .. } => false,
            CampusEventsError::EventFull { .. } => false,
            CampusEventsError::Redis(_) => true,
            CampusEventsError::Http(_) => true,
            CampusEventsError::Serialization(_) => false,
            CampusEventsError::Io(_) => true,
            CampusEventsError::ChannelUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampusEventsError::Database(_) => ErrorSeverity::Critical,
            CampusEventsError::Migration(_) => ErrorSeverity::Critical,
            CampusEventsError::Config(_) => ErrorSeverity::Critical,
            CampusEventsError::PermissionDenied(_) => ErrorSeverity::Warning,
            CampusEventsError::Authentication(_) => ErrorSeverity::Warning,
            CampusEventsError::ChannelUnavailable(_) => ErrorSeverity::Warning,
            CampusEventsError::Validation(_)
            | CampusEventsError::EventNotFound { .. }
            | CampusEventsError::NotificationNotFound { .. }
            | CampusEventsError::InvalidState(_)
            | CampusEventsError::InvalidStateTransition { .. }
            | CampusEventsError::NotOpenForRegistration { .. }
            | CampusEventsError::AlreadyRegistered { .. }
            | CampusEventsError::EventFull { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
