//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod moderation;
pub mod notification;
pub mod realtime;
pub mod registration;
pub mod translation;

// Re-export commonly used services
pub use auth::{AuthService, Claims};
pub use event::EventService;
pub use moderation::ModerationService;
pub use notification::NotificationService;
pub use realtime::{LocalChannelHub, NoopSink, NotificationSink, RedisNotificationSink};
pub use registration::RegistrationService;
pub use translation::{DisabledTranslator, HttpTranslator, RetryPolicy, Translator};

use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::config::Settings;
use crate::database::{self, DatabasePool, DatabaseService};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub moderation_service: ModerationService,
    pub registration_service: RegistrationService,
    pub notification_service: NotificationService,
    pub auth_service: AuthService,
    pool: Option<DatabasePool>,
    redis: Option<RedisNotificationSink>,
}

impl ServiceFactory {
    /// Wire all services over the given storage, translator and sink
    pub fn new(
        settings: &Settings,
        db: DatabaseService,
        translator: Arc<dyn Translator>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let notification_service = NotificationService::new(db.notifications.clone(), sink);
        let event_service = EventService::new(
            db.events.clone(),
            db.registrations.clone(),
            translator,
            &settings.events,
        );
        let moderation_service = ModerationService::new(db.events.clone(), notification_service.clone());
        let registration_service = RegistrationService::new(
            db.events.clone(),
            db.registrations.clone(),
            notification_service.clone(),
        );
        let auth_service = AuthService::new(&settings.auth);

        Self {
            event_service,
            moderation_service,
            registration_service,
            notification_service,
            auth_service,
            pool: None,
            redis: None,
        }
    }

    /// Production bootstrap: PostgreSQL pool and migrations, Redis sink and
    /// HTTP translator, each honouring the feature switches
    pub async fn connect(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        info!("Connecting to database...");
        let pool = database::connect(&settings.database).await?;
        database::run_migrations(&pool).await?;

        let redis = if settings.features.realtime {
            info!("Connecting to Redis...");
            Some(RedisNotificationSink::connect(&settings.redis.url, &settings.redis.prefix).await?)
        } else {
            info!("Real-time delivery disabled");
            None
        };
        let sink: Arc<dyn NotificationSink> = match &redis {
            Some(redis) => Arc::new(redis.clone()),
            None => Arc::new(NoopSink),
        };

        let translator: Arc<dyn Translator> = if settings.features.translation {
            let translator = HttpTranslator::new(&settings.translation)?
                .with_targets(settings.i18n.target_languages()?);
            Arc::new(translator)
        } else {
            info!("Translation disabled, events keep canonical text only");
            Arc::new(DisabledTranslator)
        };

        let mut factory = Self::new(settings, DatabaseService::new(pool.clone()), translator, sink);
        factory.pool = Some(pool);
        factory.redis = redis;
        info!("Services initialized");
        Ok(factory)
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = match &self.pool {
            Some(pool) => match database::health_check(pool).await {
                Ok(latency) => {
                    debug!(latency_ms = latency.as_millis() as u64, "Database health check passed");
                    Some(true)
                }
                Err(e) => {
                    warn!(error = %e, "Database health check failed");
                    Some(false)
                }
            },
            None => None,
        };

        let redis_healthy = match &self.redis {
            Some(redis) => Some(redis.health_check().await.unwrap_or(false)),
            None => None,
        };

        ServiceHealthStatus {
            database_healthy,
            redis_healthy,
        }
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("event_service", &self.event_service)
            .field("auth_service", &self.auth_service)
            .finish_non_exhaustive()
    }
}

/// Health status of external dependencies; `None` means not in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceHealthStatus {
    pub database_healthy: Option<bool>,
    pub redis_healthy: Option<bool>,
}

impl ServiceHealthStatus {
    /// Check if every dependency in use is healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy != Some(false) && self.redis_healthy != Some(false)
    }

    /// Get list of unhealthy dependencies
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.database_healthy == Some(false) {
            issues.push("Database connection failed".to_string());
        }
        if self.redis_healthy == Some(false) {
            issues.push("Redis connection failed".to_string());
        }

        issues
    }
}
