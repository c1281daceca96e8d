//! Notification model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::utils::errors::CampusEventsError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Approval,
    Rejection,
    Registration,
    Reminder,
    Other,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Approval => "approval",
            NotificationType::Rejection => "rejection",
            NotificationType::Registration => "registration",
            NotificationType::Reminder => "reminder",
            NotificationType::Other => "other",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approval" => Ok(NotificationType::Approval),
            "rejection" => Ok(NotificationType::Rejection),
            "registration" => Ok(NotificationType::Registration),
            "reminder" => Ok(NotificationType::Reminder),
            "other" => Ok(NotificationType::Other),
            other => Err(CampusEventsError::Validation(format!("Unknown notification type: {}", other))),
        }
    }
}

/// Real-time payload pushed to a user's channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationEnvelope {
    pub event: String,
    pub data: Notification,
}

impl NotificationEnvelope {
    pub const EVENT_NAME: &'static str = "notification";

    pub fn new(notification: Notification) -> Self {
        Self {
            event: Self::EVENT_NAME.to_string(),
            data: notification,
        }
    }
}
