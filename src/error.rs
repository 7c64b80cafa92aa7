//! Errors raised while turning external input into calendar types.
//!
//! The scheduling operations themselves are total; these only surface at
//! parse boundaries (appointment snapshots, auth tokens, configuration).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time label: '{0}'. Expected hh:mm AM/PM")]
    InvalidTime(String),

    #[error("Invalid status: '{0}'. Must be one of: pending, confirmed, cancelled, completed")]
    InvalidStatus(String),

    #[error("Invalid category: '{0}'. Must be one of: new, follow-up, urgent, routine")]
    InvalidCategory(String),

    #[error("Invalid role: '{0}'. Must be one of: patient, doctor, admin, corporate")]
    InvalidRole(String),

    #[error("Role '{0}' requires an identifier")]
    MissingIdentifier(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load appointments: {0}")]
    Snapshot(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
