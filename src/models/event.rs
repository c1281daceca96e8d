//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::i18n::LocalizedText;
use crate::utils::errors::CampusEventsError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub category: Category,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer_id: Uuid,
    pub status: EventStatus,
    pub rejection_reason: Option<String>,
    pub total_seats: i32,
    /// Incremented on every write; guards compare-and-set updates
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Approval state of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EventStatus::Pending),
            "approved" => Ok(EventStatus::Approved),
            "rejected" => Ok(EventStatus::Rejected),
            other => Err(CampusEventsError::Validation(format!("Unknown event status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tech,
    Cultural,
    Sports,
    Workshops,
    Hackathons,
    Clubs,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tech,
        Category::Cultural,
        Category::Sports,
        Category::Workshops,
        Category::Hackathons,
        Category::Clubs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "Tech",
            Category::Cultural => "Cultural",
            Category::Sports => "Sports",
            Category::Workshops => "Workshops",
            Category::Hackathons => "Hackathons",
            Category::Clubs => "Clubs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CampusEventsError::Validation(format!("Invalid category: {}", s)))
    }
}

/// Raw organizer input for a new event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub total_seats: Option<i32>,
}

/// Organizer edits; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub total_seats: Option<i32>,
}

/// An event with its fields resolved for one language
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub organizer_id: Uuid,
    pub status: EventStatus,
    pub rejection_reason: Option<String>,
    pub total_seats: i32,
    pub registered_count: i64,
    pub seats_available: i64,
}

impl EventView {
    pub fn localize(event: &Event, lang: &str, registered_count: i64) -> Self {
        Self {
            id: event.id,
            title: event.title.resolve(lang),
            description: event.description.resolve(lang),
            category: event.category,
            date: event.date.clone(),
            time: event.time.clone(),
            venue: event.venue.clone(),
            organizer_id: event.organizer_id,
            status: event.status,
            rejection_reason: event.rejection_reason.clone(),
            total_seats: event.total_seats,
            registered_count,
            seats_available: (i64::from(event.total_seats) - registered_count).max(0),
        }
    }
}
