//! In-process storage backend
//!
//! Implements every repository trait over a single mutex-guarded state, so each
//! repository call is atomic. Used by tests and by embedders that do not run
//! PostgreSQL.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::models::{Category, Event, EventStatus, Notification, Registration, RegistrationStatus};
use crate::utils::errors::{CampusEventsError, Result};
use super::repositories::{EventRepository, NotificationRepository, RegistrationRepository};

#[derive(Debug, Default)]
struct MemoryState {
    events: Vec<Event>,
    registrations: Vec<Registration>,
    notifications: Vec<Notification>,
}

impl MemoryState {
    fn event_mut(&mut self, id: Uuid) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    fn count_registered(&self, event_id: Uuid) -> i64 {
        self.registrations
            .iter()
            .filter(|r| r.event_id == event_id && r.status == RegistrationStatus::Registered)
            .count() as i64
    }
}

/// Newest first; later insertions win ties on `created_at`
fn newest_first<T: Clone>(items: impl DoubleEndedIterator<Item = T>, created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut items: Vec<T> = items.rev().collect();
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, event: &Event) -> Result<Event> {
        let mut state = self.state.lock().await;
        if state.events.iter().any(|e| e.id == event.id) {
            return Err(CampusEventsError::InvalidState(format!("Event {} already exists", event.id)));
        }
        state.events.push(event.clone());
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let state = self.state.lock().await;
        Ok(state.events.iter().find(|e| e.id == id).cloned())
    }

    async fn save_if_unchanged(&self, event: &Event) -> Result<Option<Event>> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.event_mut(event.id) else {
            return Ok(None);
        };
        if stored.version != event.version {
            return Ok(None);
        }

        *stored = Event {
            organizer_id: stored.organizer_id,
            created_at: stored.created_at,
            version: stored.version + 1,
            updated_at: Utc::now(),
            ..event.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: EventStatus,
        expected_version: i64,
        to: EventStatus,
        rejection_reason: Option<String>,
    ) -> Result<Option<Event>> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.event_mut(id) else {
            return Ok(None);
        };
        if stored.status != from || stored.version != expected_version {
            return Ok(None);
        }

        stored.status = to;
        stored.rejection_reason = rejection_reason;
        stored.version += 1;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn list_by_status(&self, status: EventStatus, category: Option<Category>) -> Result<Vec<Event>> {
        let state = self.state.lock().await;
        let matching = state
            .events
            .iter()
            .filter(|e| e.status == status && category.map_or(true, |c| e.category == c))
            .cloned();
        Ok(newest_first(matching, |e| e.created_at))
    }

    async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>> {
        let state = self.state.lock().await;
        let matching = state.events.iter().filter(|e| e.organizer_id == organizer_id).cloned();
        Ok(newest_first(matching, |e| e.created_at))
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn find(&self, student_id: Uuid, event_id: Uuid) -> Result<Option<Registration>> {
        let state = self.state.lock().await;
        Ok(state
            .registrations
            .iter()
            .find(|r| r.student_id == student_id && r.event_id == event_id)
            .cloned())
    }

    async fn count_registered(&self, event_id: Uuid) -> Result<i64> {
        Ok(self.state.lock().await.count_registered(event_id))
    }

    async fn insert_if_capacity(&self, registration: &Registration) -> Result<Registration> {
        let event_id = registration.event_id;
        let mut state = self.state.lock().await;

        let event = state
            .events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or(CampusEventsError::EventNotFound { event_id })?;
        if event.status != EventStatus::Approved {
            return Err(CampusEventsError::NotOpenForRegistration { event_id });
        }
        let total_seats = event.total_seats;

        if state
            .registrations
            .iter()
            .any(|r| r.student_id == registration.student_id && r.event_id == event_id)
        {
            return Err(CampusEventsError::AlreadyRegistered {
                event_id,
                student_id: registration.student_id,
            });
        }

        if state.count_registered(event_id) >= i64::from(total_seats) {
            return Err(CampusEventsError::EventFull { event_id, total_seats });
        }

        let stored = Registration {
            status: RegistrationStatus::Registered,
            ..registration.clone()
        };
        state.registrations.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<Registration>> {
        let state = self.state.lock().await;
        let matching: Vec<Registration> = state
            .registrations
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        Ok(newest_first(matching.into_iter(), |r| r.created_at))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: &Notification) -> Result<Notification> {
        self.state.lock().await.notifications.push(notification.clone());
        Ok(notification.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>> {
        let state = self.state.lock().await;
        Ok(state.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn mark_read(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.read => {
                notification.read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let mut state = self.state.lock().await;
        let mut changed = 0;
        for notification in state.notifications.iter_mut().filter(|n| n.user_id == user_id && !n.read) {
            notification.read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let state = self.state.lock().await;
        let matching: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(matching.into_iter(), |n| n.created_at))
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<i64> {
        let state = self.state.lock().await;
        Ok(state.notifications.iter().filter(|n| n.user_id == user_id && !n.read).count() as i64)
    }
}
