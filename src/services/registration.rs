//! Registration ledger
//!
//! Students register for approved events with seats left. The capacity and
//! uniqueness checks run inside one storage operation so concurrent
//! registrations cannot overbook an event.

use std::sync::Arc;
use async_stream::try_stream;
use chrono::Utc;
use futures::stream::BoxStream;
use tracing::{debug, warn};
use uuid::Uuid;
use crate::database::repositories::{EventRepository, RegistrationRepository};
use crate::i18n::Language;
use crate::models::{Actor, Event, EventStatus, NotificationType, Registration, RegistrationStatus, RegistrationView, Role};
use crate::services::notification::NotificationService;
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;

#[derive(Clone)]
pub struct RegistrationService {
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    notifications: NotificationService,
}

impl RegistrationService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            events,
            registrations,
            notifications,
        }
    }

    /// Register the acting student for an event
    ///
    /// Failures name the reason: event not found, not open for registration,
    /// already registered, or full.
    pub async fn register(&self, actor: &Actor, event_id: Uuid) -> Result<Registration> {
        actor.require_role(&[Role::Student])?;

        let result = self.try_register(actor.id, event_id).await;
        match &result {
            Ok(_) => logging::log_registration(actor.id, event_id, "registered"),
            Err(e) => logging::log_registration(actor.id, event_id, e.kind().as_str()),
        }
        let (registration, event) = result?;

        let event_title = event.title.resolve(Language::CANONICAL.code());
        if let Err(e) = self
            .notifications
            .emit(
                actor.id,
                "Registration confirmed",
                format!("You are registered for \"{}\"", event_title),
                NotificationType::Registration,
            )
            .await
        {
            warn!(event_id = %event_id, error = %e, "Failed to store registration notification");
        }

        Ok(registration)
    }

    async fn try_register(&self, student_id: Uuid, event_id: Uuid) -> Result<(Registration, Event)> {
        // Cheap pre-checks; insert_if_capacity repeats them atomically
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CampusEventsError::EventNotFound { event_id })?;
        if event.status != EventStatus::Approved {
            return Err(CampusEventsError::NotOpenForRegistration { event_id });
        }
        if self.registrations.find(student_id, event_id).await?.is_some() {
            return Err(CampusEventsError::AlreadyRegistered { event_id, student_id });
        }

        let registration = Registration {
            id: Uuid::new_v4(),
            student_id,
            event_id,
            status: RegistrationStatus::Registered,
            created_at: Utc::now(),
        };
        let registration = self.registrations.insert_if_capacity(&registration).await?;
        Ok((registration, event))
    }

    /// Whether the actor is registered for the event
    pub async fn check_status(&self, actor: &Actor, event_id: Uuid) -> Result<bool> {
        actor.require_role(&[Role::Student])?;
        Ok(self.registrations.find(actor.id, event_id).await?.is_some())
    }

    pub async fn registered_count(&self, event_id: Uuid) -> Result<i64> {
        self.registrations.count_registered(event_id).await
    }

    /// The actor's registrations, newest first, with event details resolved
    /// for `lang` and the live registered count of each event.
    ///
    /// Registrations whose event no longer exists are skipped.
    pub fn list_for_student(&self, actor: &Actor, lang: &str) -> BoxStream<'static, Result<RegistrationView>> {
        let events = self.events.clone();
        let registrations = self.registrations.clone();
        let student_id = actor.id;
        let lang = lang.to_string();

        Box::pin(try_stream! {
            let entries = registrations.list_for_student(student_id).await?;
            debug!(student_id = %student_id, count = entries.len(), "Listing registrations");

            for registration in entries {
                let event = match events.find_by_id(registration.event_id).await? {
                    Some(event) => event,
                    None => continue,
                };
                let registered_count = registrations.count_registered(event.id).await?;

                yield RegistrationView {
                    registration_id: registration.id,
                    status: registration.status,
                    registered_at: registration.created_at,
                    event_id: event.id,
                    title: event.title.resolve(&lang),
                    category: event.category,
                    date: event.date,
                    time: event.time,
                    venue: event.venue,
                    event_status: event.status,
                    total_seats: event.total_seats,
                    registered_count,
                };
            }
        })
    }
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService").finish_non_exhaustive()
    }
}
