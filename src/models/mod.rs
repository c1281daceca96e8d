//! Data models module
//!
//! This module contains all data structures used throughout the crate

pub mod user;
pub mod event;
pub mod registration;
pub mod notification;

// Re-export commonly used models
pub use user::{Actor, Role};
pub use event::{Event, EventStatus, Category, NewEvent, EventChanges, EventView};
pub use registration::{Registration, RegistrationStatus, RegistrationView};
pub use notification::{Notification, NotificationType, NotificationEnvelope};
