//! Data models for the appointment calendar.
//!
//! This module defines the records the calendar consumes:
//! - SlotTime: a minute-precision time of day rendered as "hh:mm AM"
//! - AppointmentStatus / AppointmentCategory: closed classifications
//! - Appointment: a scheduled meeting between a patient and a provider
//! - Provider: the clinician an appointment is booked against

use crate::error::{ScheduleError, ScheduleResult};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A bookable time of day.
///
/// The 12-hour label is the display and wire form; equality and ordering
/// use the underlying clock time, so "9:30 AM" and "09:30 AM" are the same
/// slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Build a slot time from a 24-hour clock reading.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(SlotTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Zero-padded 12-hour label, e.g. "09:30 AM".
    pub fn label(&self) -> String {
        self.0.format("%I:%M %p").to_string()
    }
}

impl From<NaiveTime> for SlotTime {
    fn from(time: NaiveTime) -> Self {
        // Seconds are below the calendar's resolution.
        SlotTime(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SlotTime {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        NaiveTime::parse_from_str(&normalized, "%I:%M %p")
            .map(SlotTime)
            .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn name(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().trim() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            _ => Err(ScheduleError::InvalidStatus(value.to_string())),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Snapshots go through the same case-insensitive parser as typed input.
impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentCategory {
    New,
    FollowUp,
    Urgent,
    Routine,
}

impl AppointmentCategory {
    pub fn name(&self) -> &'static str {
        match self {
            AppointmentCategory::New => "new",
            AppointmentCategory::FollowUp => "follow-up",
            AppointmentCategory::Urgent => "urgent",
            AppointmentCategory::Routine => "routine",
        }
    }
}

impl FromStr for AppointmentCategory {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().trim() {
            "new" => Ok(AppointmentCategory::New),
            "follow-up" | "followup" | "follow_up" => Ok(AppointmentCategory::FollowUp),
            "urgent" => Ok(AppointmentCategory::Urgent),
            "routine" => Ok(AppointmentCategory::Routine),
            _ => Err(ScheduleError::InvalidCategory(value.to_string())),
        }
    }
}

impl fmt::Display for AppointmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<'de> Deserialize<'de> for AppointmentCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A clinician appointments can be filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

/// A scheduled meeting between a patient and a provider.
///
/// Records are read-only to the calendar: it filters and groups them but
/// never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(alias = "doctorName")]
    pub provider_name: String,
    #[serde(default, alias = "doctorId")]
    pub provider_id: Option<String>,
    pub date: NaiveDate,
    pub time: SlotTime,
    #[serde(alias = "duration")]
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    #[serde(alias = "type")]
    pub category: AppointmentCategory,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Create a new appointment with required-field checks.
    pub fn new(
        patient_name: String,
        provider_name: String,
        date: NaiveDate,
        time: SlotTime,
        duration_minutes: u32,
        category: AppointmentCategory,
    ) -> ScheduleResult<Self> {
        if patient_name.trim().is_empty() {
            return Err(ScheduleError::MissingField("patient name"));
        }
        if provider_name.trim().is_empty() {
            return Err(ScheduleError::MissingField("provider name"));
        }
        if duration_minutes == 0 {
            return Err(ScheduleError::MissingField("duration"));
        }

        Ok(Appointment {
            id: Uuid::new_v4().to_string(),
            patient_name,
            patient_id: None,
            provider_name,
            provider_id: None,
            date,
            time,
            duration_minutes,
            status: AppointmentStatus::Pending,
            category,
            notes: None,
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn with_provider(mut self, provider: &Provider) -> Self {
        self.provider_id = Some(provider.id.clone());
        self.provider_name = provider.name.clone();
        self
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// True when the appointment is booked against the given provider.
    pub fn is_for_provider(&self, provider_id: &str) -> bool {
        self.provider_id.as_deref() == Some(provider_id)
    }
}

/// Parse a list of appointments from a JSON array snapshot.
pub fn appointments_from_json(raw: &str) -> ScheduleResult<Vec<Appointment>> {
    serde_json::from_str(raw).map_err(|e| ScheduleError::Snapshot(e.to_string()))
}
