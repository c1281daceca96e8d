//! Database repositories module
//!
//! Storage seams used by the services, with PostgreSQL implementations.
//! [`crate::database::memory::InMemoryStore`] implements the same traits.

pub mod event;
pub mod registration;
pub mod notification;

use async_trait::async_trait;
use uuid::Uuid;
use crate::models::{Category, Event, EventStatus, Notification, Registration};
use crate::utils::errors::Result;

pub use event::PgEventRepository;
pub use registration::PgRegistrationRepository;
pub use notification::PgNotificationRepository;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a newly created event
    async fn create(&self, event: &Event) -> Result<Event>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// Overwrite an event if its stored version still equals `event.version`.
    ///
    /// Returns the stored event with its version incremented, or `None` when a
    /// concurrent write got there first.
    async fn save_if_unchanged(&self, event: &Event) -> Result<Option<Event>>;

    /// Move an event out of `from` if it is still at `expected_version`.
    ///
    /// Only status and rejection reason are written.
    async fn transition_status(
        &self,
        id: Uuid,
        from: EventStatus,
        expected_version: i64,
        to: EventStatus,
        rejection_reason: Option<String>,
    ) -> Result<Option<Event>>;

    async fn list_by_status(&self, status: EventStatus, category: Option<Category>) -> Result<Vec<Event>>;

    async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find(&self, student_id: Uuid, event_id: Uuid) -> Result<Option<Registration>>;

    /// Number of registrations with status `registered`
    async fn count_registered(&self, event_id: Uuid) -> Result<i64>;

    /// Insert a registration as one atomic step.
    ///
    /// Fails with `EventNotFound`, `NotOpenForRegistration`,
    /// `AlreadyRegistered` or `EventFull`; no two concurrent calls can both
    /// take the last seat.
    async fn insert_if_capacity(&self, registration: &Registration) -> Result<Registration>;

    /// Newest first
    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<Registration>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<Notification>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>>;

    /// Returns whether the notification was previously unread
    async fn mark_read(&self, id: Uuid) -> Result<bool>;

    /// Returns how many notifications changed
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64>;

    /// Newest first
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>>;

    async fn count_unread(&self, user_id: Uuid) -> Result<i64>;
}
