//! Registration model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use super::event::{Category, EventStatus};
use crate::utils::errors::CampusEventsError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub id: Uuid,
    pub student_id: Uuid,
    pub event_id: Uuid,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}

/// `Waitlist` is reserved for capacity overflow handling; no current path
/// creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Waitlist,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Waitlist => "waitlist",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(RegistrationStatus::Registered),
            "waitlist" => Ok(RegistrationStatus::Waitlist),
            other => Err(CampusEventsError::Validation(format!("Unknown registration status: {}", other))),
        }
    }
}

/// A student's registration joined with the event's display fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationView {
    pub registration_id: Uuid,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub event_id: Uuid,
    pub title: String,
    pub category: Category,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub event_status: EventStatus,
    pub total_seats: i32,
    pub registered_count: i64,
}
