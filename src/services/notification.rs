//! Notification service implementation
//!
//! Persists in-app notifications and pushes each one to the recipient's
//! real-time channel. The stored record is the source of truth; the push is
//! fire-and-forget.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::database::repositories::NotificationRepository;
use crate::models::{Actor, Notification, NotificationEnvelope, NotificationType};
use crate::services::realtime::NotificationSink;
use crate::utils::errors::{CampusEventsError, Result};

/// Notification service for persisting and delivering notifications
#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(repository: Arc<dyn NotificationRepository>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { repository, sink }
    }

    /// Persist a notification and publish it to `user_id`'s channel.
    ///
    /// Publish failures are logged and never returned.
    pub async fn emit(
        &self,
        user_id: Uuid,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationType,
    ) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            created_at: Utc::now(),
        };

        let stored = self.repository.create(&notification).await?;
        debug!(notification_id = %stored.id, user_id = %user_id, kind = %kind, "Notification stored");

        let envelope = NotificationEnvelope::new(stored.clone());
        if let Err(e) = self.sink.publish(user_id, &envelope).await {
            warn!(
                notification_id = %stored.id,
                user_id = %user_id,
                error = %e,
                "Failed to publish notification"
            );
        }

        Ok(stored)
    }

    /// Mark one of the actor's notifications as read
    pub async fn mark_read(&self, actor: &Actor, notification_id: Uuid) -> Result<Notification> {
        let mut notification = self
            .repository
            .find_by_id(notification_id)
            .await?
            .ok_or(CampusEventsError::NotificationNotFound { notification_id })?;

        if notification.user_id != actor.id {
            warn!(notification_id = %notification_id, user_id = %actor.id, "Notification ownership check failed");
            return Err(CampusEventsError::PermissionDenied("Not authorized".to_string()));
        }

        if self.repository.mark_read(notification_id).await? {
            debug!(notification_id = %notification_id, "Notification marked read");
        }
        notification.read = true;
        Ok(notification)
    }

    /// Mark every notification of the actor as read, returning how many changed
    pub async fn mark_all_read(&self, actor: &Actor) -> Result<u64> {
        let changed = self.repository.mark_all_read(actor.id).await?;
        info!(user_id = %actor.id, changed = changed, "Marked all notifications read");
        Ok(changed)
    }

    /// The actor's notifications, newest first
    pub async fn list_for_user(&self, actor: &Actor) -> Result<Vec<Notification>> {
        self.repository.list_for_user(actor.id).await
    }

    pub async fn unread_count(&self, actor: &Actor) -> Result<i64> {
        self.repository.count_unread(actor.id).await
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish_non_exhaustive()
    }
}
