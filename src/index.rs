//! Appointment lookup and filtering.
//!
//! All queries are pure: they borrow the snapshot and return clones, never
//! touching the source collection.

use crate::models::{Appointment, AppointmentStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Appointments scheduled on `date`.
pub fn filter_by_date(appointments: &[Appointment], date: NaiveDate) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|apt| apt.date == date)
        .cloned()
        .collect()
}

/// Appointments booked against `provider_id`; `None` means no restriction.
pub fn filter_by_provider(
    appointments: &[Appointment],
    provider_id: Option<&str>,
) -> Vec<Appointment> {
    match provider_id {
        Some(id) => appointments
            .iter()
            .filter(|apt| apt.is_for_provider(id))
            .cloned()
            .collect(),
        None => appointments.to_vec(),
    }
}

/// Existence check used for calendar-day indicators.
pub fn has_appointments_on_date(appointments: &[Appointment], date: NaiveDate) -> bool {
    appointments.iter().any(|apt| apt.date == date)
}

/// Distinct dates that carry at least one appointment, optionally limited
/// to a single `(year, month)`.
pub fn dates_with_appointments(
    appointments: &[Appointment],
    month: Option<(i32, u32)>,
) -> BTreeSet<NaiveDate> {
    appointments
        .iter()
        .map(|apt| apt.date)
        .filter(|date| match month {
            Some((year, month)) => date.year() == year && date.month() == month,
            None => true,
        })
        .collect()
}

/// Combined criteria for the list views. Every field is optional; an empty
/// query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub date: Option<NaiveDate>,
    pub provider_id: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub search: Option<String>,
}

impl AppointmentQuery {
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn for_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matching(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, apt: &Appointment) -> bool {
        if self.date.is_some_and(|date| apt.date != date) {
            return false;
        }
        if let Some(provider_id) = &self.provider_id {
            if !apt.is_for_provider(provider_id) {
                return false;
            }
        }
        if self.status.is_some_and(|status| apt.status != status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                apt.patient_name.to_lowercase().contains(&term)
                    || apt.provider_name.to_lowercase().contains(&term)
                    || apt
                        .notes
                        .as_deref()
                        .is_some_and(|notes| notes.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

/// A read-only snapshot of appointments supplied by the data source.
#[derive(Debug, Clone, Default)]
pub struct AppointmentIndex {
    appointments: Vec<Appointment>,
}

impl AppointmentIndex {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        AppointmentIndex { appointments }
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Appointments on `date` for the given provider filter.
    pub fn on_date_for_provider(
        &self,
        date: NaiveDate,
        provider_id: Option<&str>,
    ) -> Vec<Appointment> {
        filter_by_provider(&filter_by_date(&self.appointments, date), provider_id)
    }

    /// Indicator dates for a month, honouring the provider filter.
    pub fn marked_dates(
        &self,
        year: i32,
        month: u32,
        provider_id: Option<&str>,
    ) -> BTreeSet<NaiveDate> {
        dates_with_appointments(&filter_by_provider(&self.appointments, provider_id), Some((year, month)))
    }

    pub fn query(&self, query: &AppointmentQuery) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|apt| query.matches(apt))
            .cloned()
            .collect()
    }

    /// Distinct provider identifiers present in the snapshot, sorted.
    pub fn provider_ids(&self) -> Vec<String> {
        self.appointments
            .iter()
            .filter_map(|apt| apt.provider_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
