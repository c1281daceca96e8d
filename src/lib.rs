//! Campus Events
//!
//! Core of a campus event platform: multilingual event content filled in by a
//! third-party translation service, a pending → approved/rejected moderation
//! workflow, capacity-bounded student registration and in-app notifications
//! pushed over per-user real-time channels.
//!
//! The HTTP layer lives outside this crate; every operation takes the acting
//! user explicitly as an [`models::Actor`].

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusEventsError, ErrorKind, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use i18n::{resolve, Language, LocalizedText};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
