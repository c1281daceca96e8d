//! Registration repository implementation

use std::time::Instant;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use crate::models::event::EventStatus;
use crate::models::registration::{Registration, RegistrationStatus};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging;
use super::RegistrationRepository;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, FromRow)]
struct RegistrationRow {
    id: Uuid,
    student_id: Uuid,
    event_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = CampusEventsError;

    fn try_from(row: RegistrationRow) -> Result<Self> {
        Ok(Registration {
            id: row.id,
            student_id: row.student_id,
            event_id: row.event_id,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn find(&self, student_id: Uuid, event_id: Uuid) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(
            "SELECT id, student_id, event_id, status, created_at FROM registrations WHERE student_id = $1 AND event_id = $2"
        )
        .bind(student_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    async fn count_registered(&self, event_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = 'registered'"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Locks the event row so the seat count cannot change between the
    /// capacity check and the insert.
    async fn insert_if_capacity(&self, registration: &Registration) -> Result<Registration> {
        let event_id = registration.event_id;
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let event: Option<(String, i32)> = sqlx::query_as(
            "SELECT status, total_seats FROM events WHERE id = $1 FOR UPDATE"
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (status, total_seats) = event.ok_or(CampusEventsError::EventNotFound { event_id })?;
        if status.parse::<EventStatus>()? != EventStatus::Approved {
            return Err(CampusEventsError::NotOpenForRegistration { event_id });
        }

        let already: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM registrations WHERE student_id = $1 AND event_id = $2)"
        )
        .bind(registration.student_id)
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;
        if already.0 {
            return Err(CampusEventsError::AlreadyRegistered {
                event_id,
                student_id: registration.student_id,
            });
        }

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = 'registered'"
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;
        if count.0 >= i64::from(total_seats) {
            return Err(CampusEventsError::EventFull { event_id, total_seats });
        }

        let inserted = sqlx::query_as::<_, RegistrationRow>(
            r#"
            INSERT INTO registrations (id, student_id, event_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, event_id, status, created_at
            "#
        )
        .bind(registration.id)
        .bind(registration.student_id)
        .bind(event_id)
        .bind(RegistrationStatus::Registered.as_str())
        .bind(registration.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CampusEventsError::AlreadyRegistered {
                    event_id,
                    student_id: registration.student_id,
                }
            } else {
                CampusEventsError::Database(e)
            }
        })?;

        tx.commit().await?;
        logging::log_database_operation("insert_if_capacity", "registrations", started.elapsed().as_millis() as u64, true);
        inserted.try_into()
    }

    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<Registration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            "SELECT id, student_id, event_id, status, created_at FROM registrations WHERE student_id = $1 ORDER BY created_at DESC"
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Registration::try_from).collect()
    }
}
