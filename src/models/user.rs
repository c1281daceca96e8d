//! Acting user model
//!
//! Every core operation receives the acting identity explicitly.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::errors::CampusEventsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Organizer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CampusEventsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "organizer" => Ok(Role::Organizer),
            "admin" => Ok(Role::Admin),
            other => Err(CampusEventsError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

/// Identity and role of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn student(id: Uuid) -> Self {
        Self::new(id, Role::Student)
    }

    pub fn organizer(id: Uuid) -> Self {
        Self::new(id, Role::Organizer)
    }

    pub fn admin(id: Uuid) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with a generic authorization error unless the role is one of `allowed`
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), CampusEventsError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(CampusEventsError::PermissionDenied("Not authorized".to_string()))
        }
    }
}
