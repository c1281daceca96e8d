//! Test context for unified test setup
//!
//! Wires every service over one in-memory store, a scripted translator and a
//! recording notification sink.

use std::sync::{Arc, Mutex, Once};
use async_trait::async_trait;
use uuid::Uuid;
use campus_events::config::Settings;
use campus_events::database::{DatabaseService, InMemoryStore};
use campus_events::i18n::{Language, LanguageMap};
use campus_events::models::{Actor, Event, NotificationEnvelope};
use campus_events::services::{EventService, NotificationSink, ServiceFactory, Translator};
use campus_events::Result;

use super::test_data;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Translates into every target language by prefixing the language code
#[derive(Debug, Default)]
pub struct ScriptedTranslator {
    calls: Mutex<Vec<String>>,
}

impl ScriptedTranslator {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(&self, source: &str) -> LanguageMap {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(source.to_string());
        }
        if source.trim().is_empty() {
            return LanguageMap::new();
        }
        Language::TARGETS
            .iter()
            .map(|lang| (*lang, format!("[{}] {}", lang.code(), source)))
            .collect()
    }
}

/// A provider that is down for every language
#[derive(Debug, Default)]
pub struct UnavailableTranslator;

#[async_trait]
impl Translator for UnavailableTranslator {
    async fn translate(&self, _source: &str) -> LanguageMap {
        LanguageMap::new()
    }
}

/// Records every publish; optionally fails them all
#[derive(Debug, Default)]
pub struct RecordingSink {
    published: Mutex<Vec<(Uuid, NotificationEnvelope)>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<(Uuid, NotificationEnvelope)> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn published_to(&self, user_id: Uuid) -> Vec<NotificationEnvelope> {
        self.published()
            .into_iter()
            .filter(|(recipient, _)| *recipient == user_id)
            .map(|(_, envelope)| envelope)
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn publish(&self, user_id: Uuid, payload: &NotificationEnvelope) -> Result<()> {
        if self.fail {
            return Err(campus_events::CampusEventsError::ChannelUnavailable(
                "sink offline".to_string(),
            ));
        }
        if let Ok(mut published) = self.published.lock() {
            published.push((user_id, payload.clone()));
        }
        Ok(())
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub services: ServiceFactory,
    pub store: InMemoryStore,
    pub translator: Arc<ScriptedTranslator>,
    pub sink: Arc<RecordingSink>,
    pub settings: Settings,
    pub organizer: Actor,
    pub admin: Actor,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(RecordingSink::default()))
    }

    pub fn with_sink(sink: Arc<RecordingSink>) -> Self {
        init_test_logging();

        let settings = Settings::default();
        let store = InMemoryStore::new();
        let translator = Arc::new(ScriptedTranslator::default());
        let services = ServiceFactory::new(
            &settings,
            DatabaseService::from_store(store.clone()),
            translator.clone(),
            sink.clone(),
        );

        Self {
            services,
            store,
            translator,
            sink,
            settings,
            organizer: Actor::organizer(Uuid::new_v4()),
            admin: Actor::admin(Uuid::new_v4()),
        }
    }

    /// An event service over this context's store using another translator
    pub fn event_service_with(&self, translator: Arc<dyn Translator>) -> EventService {
        let store = Arc::new(self.store.clone());
        EventService::new(store.clone(), store, translator, &self.settings.events)
    }

    pub fn student(&self) -> Actor {
        Actor::student(Uuid::new_v4())
    }

    /// Create a pending event owned by `self.organizer`
    pub async fn pending_event(&self, total_seats: i32) -> Event {
        self.services
            .event_service
            .create_event(&self.organizer, test_data::new_event_with_seats("Robotics Meetup", total_seats))
            .await
            .expect("Failed to create event")
    }

    /// Create and approve an event owned by `self.organizer`
    pub async fn approved_event(&self, total_seats: i32) -> Event {
        let event = self.pending_event(total_seats).await;
        self.services
            .moderation_service
            .approve(&self.admin, event.id)
            .await
            .expect("Failed to approve event")
    }
}
