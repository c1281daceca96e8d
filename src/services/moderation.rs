//! Moderation workflow
//!
//! Admin decisions on pending events. Each decision is a compare-and-set on
//! the event's status and version, so two racing decisions cannot both win.

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use crate::database::repositories::EventRepository;
use crate::i18n::Language;
use crate::models::{Actor, Event, EventStatus, NotificationType};
use crate::services::notification::NotificationService;
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;

#[derive(Clone)]
pub struct ModerationService {
    events: Arc<dyn EventRepository>,
    notifications: NotificationService,
}

impl ModerationService {
    pub fn new(events: Arc<dyn EventRepository>, notifications: NotificationService) -> Self {
        Self { events, notifications }
    }

    /// Publish a pending event
    pub async fn approve(&self, actor: &Actor, event_id: Uuid) -> Result<Event> {
        let event = self.decide(actor, event_id, EventStatus::Approved, None).await?;
        logging::log_moderation_action(actor.id, "approve", event.id, None);

        let title = event.title.resolve(Language::CANONICAL.code());
        self.notify_organizer(
            &event,
            "Event approved",
            format!("Your event \"{}\" has been approved", title),
            NotificationType::Approval,
        )
        .await;
        Ok(event)
    }

    /// Turn down a pending event; a blank reason is stored as no reason
    pub async fn reject(&self, actor: &Actor, event_id: Uuid, reason: Option<String>) -> Result<Event> {
        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let event = self.decide(actor, event_id, EventStatus::Rejected, reason).await?;
        logging::log_moderation_action(actor.id, "reject", event.id, event.rejection_reason.as_deref());

        let title = event.title.resolve(Language::CANONICAL.code());
        let message = match &event.rejection_reason {
            Some(reason) => format!("Your event \"{}\" was rejected: {}", title, reason),
            None => format!("Your event \"{}\" was rejected", title),
        };
        self.notify_organizer(&event, "Event rejected", message, NotificationType::Rejection)
            .await;
        Ok(event)
    }

    async fn decide(
        &self,
        actor: &Actor,
        event_id: Uuid,
        to: EventStatus,
        rejection_reason: Option<String>,
    ) -> Result<Event> {
        if !actor.is_admin() {
            warn!(user_id = %actor.id, event_id = %event_id, "Moderation attempted without admin role");
            return Err(CampusEventsError::PermissionDenied("Not authorized".to_string()));
        }

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CampusEventsError::EventNotFound { event_id })?;

        if event.status != EventStatus::Pending {
            return Err(CampusEventsError::InvalidStateTransition {
                from: event.status.to_string(),
                to: to.to_string(),
            });
        }

        self.events
            .transition_status(event_id, EventStatus::Pending, event.version, to, rejection_reason)
            .await?
            .ok_or_else(|| CampusEventsError::InvalidState("Event was already decided".to_string()))
    }

    async fn notify_organizer(&self, event: &Event, title: &str, message: String, kind: NotificationType) {
        // The decision is already committed; a failed notification must not undo it
        if let Err(e) = self.notifications.emit(event.organizer_id, title, message, kind).await {
            warn!(event_id = %event.id, error = %e, "Failed to store moderation notification");
        }
    }
}

impl std::fmt::Debug for ModerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationService").finish_non_exhaustive()
    }
}
