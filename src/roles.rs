//! Viewer roles and the provider filter each one starts with.

use crate::error::{ScheduleError, ScheduleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Role {
    Patient { id: String },
    Doctor { id: String },
    Admin,
    Corporate { id: String },
}

impl Role {
    /// Build a role from the auth context's role string and identifier.
    pub fn from_parts(role: &str, id: Option<&str>) -> ScheduleResult<Self> {
        let role_name = role.to_lowercase();
        let require_id = |name: &str| -> ScheduleResult<String> {
            match id.map(str::trim) {
                Some(id) if !id.is_empty() => Ok(id.to_string()),
                _ => Err(ScheduleError::MissingIdentifier(name.to_string())),
            }
        };

        match role_name.trim() {
            "patient" => Ok(Role::Patient { id: require_id("patient")? }),
            "doctor" => Ok(Role::Doctor { id: require_id("doctor")? }),
            "admin" => Ok(Role::Admin),
            "corporate" => Ok(Role::Corporate { id: require_id("corporate")? }),
            _ => Err(ScheduleError::InvalidRole(role.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Patient { .. } => "patient",
            Role::Doctor { .. } => "doctor",
            Role::Admin => "admin",
            Role::Corporate { .. } => "corporate",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The person looking at the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub name: String,
    pub role: Role,
}

impl Viewer {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Viewer {
            name: name.into(),
            role,
        }
    }

    pub fn default_provider_filter(&self) -> Option<String> {
        default_provider_filter(&self.role)
    }
}

/// Provider filter a fresh calendar opens with.
///
/// A doctor sees their own schedule; every other role starts unrestricted.
pub fn default_provider_filter(role: &Role) -> Option<String> {
    match role {
        Role::Doctor { id } => Some(id.clone()),
        Role::Patient { .. } | Role::Admin | Role::Corporate { .. } => None,
    }
}
