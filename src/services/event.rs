//! Event service implementation
//!
//! Owns the event lifecycle on the organizer side: creation with translated
//! content, edits that send the event back to review, and localized reads.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::config::EventsConfig;
use crate::database::repositories::{EventRepository, RegistrationRepository};
use crate::i18n::LocalizedText;
use crate::models::{Actor, Category, Event, EventChanges, EventStatus, EventView, NewEvent, Role};
use crate::services::translation::Translator;
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;

/// Event service for organizer and public event operations
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    translator: Arc<dyn Translator>,
    default_total_seats: i32,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        translator: Arc<dyn Translator>,
        config: &EventsConfig,
    ) -> Self {
        Self {
            events,
            registrations,
            translator,
            default_total_seats: config.default_total_seats,
        }
    }

    /// Create a pending event owned by the actor
    pub async fn create_event(&self, actor: &Actor, new_event: NewEvent) -> Result<Event> {
        actor.require_role(&[Role::Organizer, Role::Admin])?;

        let category = new_event.category.parse::<Category>()?;
        require_text("title", &new_event.title)?;
        require_text("date", &new_event.date)?;
        require_text("time", &new_event.time)?;
        require_text("venue", &new_event.venue)?;
        let total_seats = validate_seats(new_event.total_seats.unwrap_or(self.default_total_seats))?;

        debug!(organizer_id = %actor.id, "Translating new event content");
        let (title_translations, description_translations) = tokio::join!(
            self.translator.translate(&new_event.title),
            self.translator.translate(&new_event.description),
        );

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: LocalizedText::from_canonical(new_event.title, title_translations),
            description: LocalizedText::from_canonical(new_event.description, description_translations),
            category,
            date: new_event.date,
            time: new_event.time,
            venue: new_event.venue,
            organizer_id: actor.id,
            status: EventStatus::Pending,
            rejection_reason: None,
            total_seats,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        let event = self.events.create(&event).await?;
        logging::log_event_action(event.id, "create", actor.id, Some(event.category.as_str()));
        Ok(event)
    }

    /// Apply organizer edits and resubmit the event for review
    pub async fn update_event(&self, actor: &Actor, event_id: Uuid, changes: EventChanges) -> Result<Event> {
        let mut event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CampusEventsError::EventNotFound { event_id })?;

        if event.organizer_id != actor.id {
            warn!(event_id = %event_id, user_id = %actor.id, "Edit attempted by non-owner");
            return Err(CampusEventsError::PermissionDenied("Not authorized".to_string()));
        }
        if event.status == EventStatus::Pending {
            return Err(CampusEventsError::InvalidState(
                "Pending events cannot be edited until reviewed".to_string(),
            ));
        }

        if let Some(category) = &changes.category {
            event.category = category.parse::<Category>()?;
        }
        if let Some(title) = &changes.title {
            require_text("title", title)?;
        }
        if let Some(date) = changes.date {
            require_text("date", &date)?;
            event.date = date;
        }
        if let Some(time) = changes.time {
            require_text("time", &time)?;
            event.time = time;
        }
        if let Some(venue) = changes.venue {
            require_text("venue", &venue)?;
            event.venue = venue;
        }
        if let Some(total_seats) = changes.total_seats {
            event.total_seats = validate_seats(total_seats)?;
        }

        let new_title = changes.title.filter(|title| event.title.canonical() != Some(title.as_str()));
        let new_description = changes
            .description
            .filter(|description| event.description.canonical() != Some(description.as_str()));

        let (title, description) = tokio::join!(
            self.retranslate(new_title),
            self.retranslate(new_description),
        );
        if let Some(title) = title {
            event.title = title;
        }
        if let Some(description) = description {
            event.description = description;
        }

        event.status = EventStatus::Pending;
        event.rejection_reason = None;

        let saved = self.events.save_if_unchanged(&event).await?.ok_or_else(|| {
            CampusEventsError::InvalidState("Event was modified concurrently".to_string())
        })?;

        logging::log_event_action(saved.id, "update", actor.id, Some("resubmitted for review"));
        Ok(saved)
    }

    async fn retranslate(&self, text: Option<String>) -> Option<LocalizedText> {
        let text = text?;
        let translations = self.translator.translate(&text).await;
        Some(LocalizedText::from_canonical(text, translations))
    }

    /// An event resolved for `lang` with live seat counts
    pub async fn get_localized_view(&self, event_id: Uuid, lang: &str) -> Result<EventView> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CampusEventsError::EventNotFound { event_id })?;
        self.localize(&event, lang).await
    }

    /// Approved events, newest first, optionally filtered by category
    pub async fn list_approved(&self, lang: &str, category: Option<Category>) -> Result<Vec<EventView>> {
        let events = self.events.list_by_status(EventStatus::Approved, category).await?;
        self.localize_all(&events, lang).await
    }

    /// Every event the actor organizes, in any status
    pub async fn list_for_organizer(&self, actor: &Actor, lang: &str) -> Result<Vec<EventView>> {
        actor.require_role(&[Role::Organizer, Role::Admin])?;
        let events = self.events.list_by_organizer(actor.id).await?;
        self.localize_all(&events, lang).await
    }

    /// Moderation queue
    pub async fn list_pending(&self, actor: &Actor, lang: &str) -> Result<Vec<EventView>> {
        actor.require_role(&[Role::Admin])?;
        let events = self.events.list_by_status(EventStatus::Pending, None).await?;
        info!(admin_id = %actor.id, pending = events.len(), "Listed pending events");
        self.localize_all(&events, lang).await
    }

    async fn localize(&self, event: &Event, lang: &str) -> Result<EventView> {
        let registered_count = self.registrations.count_registered(event.id).await?;
        Ok(EventView::localize(event, lang, registered_count))
    }

    async fn localize_all(&self, events: &[Event], lang: &str) -> Result<Vec<EventView>> {
        let views = futures::future::try_join_all(events.iter().map(|event| self.localize(event, lang)));
        views.await
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService")
            .field("default_total_seats", &self.default_total_seats)
            .finish_non_exhaustive()
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CampusEventsError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_seats(total_seats: i32) -> Result<i32> {
    if total_seats < 1 {
        return Err(CampusEventsError::Validation("total_seats must be at least 1".to_string()));
    }
    Ok(total_seats)
}
