//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, connect, run_migrations, health_check};
pub use memory::InMemoryStore;
pub use repositories::{EventRepository, RegistrationRepository, NotificationRepository};
pub use service::DatabaseService;
