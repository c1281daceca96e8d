//! Event repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use crate::i18n::LocalizedText;
use crate::models::event::{Category, Event, EventStatus};
use crate::utils::errors::{CampusEventsError, Result};
use super::EventRepository;

const EVENT_COLUMNS: &str = "id, title, description, category, event_date, event_time, venue, organizer_id, status, rejection_reason, total_seats, version, created_at, updated_at";

#[derive(Debug, FromRow)]
pub(crate) struct EventRow {
    id: Uuid,
    title: Json<LocalizedText>,
    description: Json<LocalizedText>,
    category: String,
    event_date: String,
    event_time: String,
    venue: String,
    organizer_id: Uuid,
    status: String,
    rejection_reason: Option<String>,
    total_seats: i32,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = CampusEventsError;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Event {
            id: row.id,
            title: row.title.0,
            description: row.description.0,
            category: row.category.parse()?,
            date: row.event_date,
            time: row.event_time,
            venue: row.venue,
            organizer_id: row.organizer_id,
            status: row.status.parse()?,
            rejection_reason: row.rejection_reason,
            total_seats: row.total_seats,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_events(rows: Vec<EventRow>) -> Result<Vec<Event>> {
    rows.into_iter().map(Event::try_from).collect()
}

#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    /// Create a new event
    async fn create(&self, event: &Event) -> Result<Event> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (id, title, description, category, event_date, event_time, venue, organizer_id, status, rejection_reason, total_seats, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(Json(&event.title))
        .bind(Json(&event.description))
        .bind(event.category.as_str())
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.venue)
        .bind(event.organizer_id)
        .bind(event.status.as_str())
        .bind(&event.rejection_reason)
        .bind(event.total_seats)
        .bind(event.version)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Find event by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    async fn save_if_unchanged(&self, event: &Event) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET title = $3,
                description = $4,
                category = $5,
                event_date = $6,
                event_time = $7,
                venue = $8,
                status = $9,
                rejection_reason = $10,
                total_seats = $11,
                version = version + 1,
                updated_at = $12
            WHERE id = $1 AND version = $2
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(event.version)
        .bind(Json(&event.title))
        .bind(Json(&event.description))
        .bind(event.category.as_str())
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.venue)
        .bind(event.status.as_str())
        .bind(&event.rejection_reason)
        .bind(event.total_seats)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: EventStatus,
        expected_version: i64,
        to: EventStatus,
        rejection_reason: Option<String>,
    ) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET status = $4,
                rejection_reason = $5,
                version = version + 1,
                updated_at = $6
            WHERE id = $1 AND status = $2 AND version = $3
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from.as_str())
        .bind(expected_version)
        .bind(to.as_str())
        .bind(rejection_reason)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    async fn list_by_status(&self, status: EventStatus, category: Option<Category>) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE status = $1 AND ($2::TEXT IS NULL OR category = $2) ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?;

        into_events(rows)
    }

    /// Get events created by an organizer
    async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        into_events(rows)
    }
}
