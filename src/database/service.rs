//! Database service layer
//!
//! Bundles the repositories the domain services depend on.

use std::sync::Arc;
use crate::database::{DatabasePool, InMemoryStore};
use crate::database::repositories::{
    EventRepository, NotificationRepository, RegistrationRepository,
    PgEventRepository, PgNotificationRepository, PgRegistrationRepository,
};

#[derive(Clone)]
pub struct DatabaseService {
    pub events: Arc<dyn EventRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl DatabaseService {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: Arc::new(PgEventRepository::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool)),
        }
    }

    /// Repositories backed by one shared in-process store
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    pub fn from_store(store: InMemoryStore) -> Self {
        Self {
            events: Arc::new(store.clone()),
            registrations: Arc::new(store.clone()),
            notifications: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService").finish_non_exhaustive()
    }
}
