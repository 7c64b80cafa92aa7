//! Built-in sample clinic used when no appointment file is configured.
//!
//! All names are fictional. Dates are laid out relative to the given anchor
//! so the demo always has something to show around "today".

use crate::error::ScheduleResult;
use crate::models::{Appointment, AppointmentCategory, AppointmentStatus, Provider, SlotTime};
use crate::roles::{Role, Viewer};
use chrono::{Days, NaiveDate};

pub fn providers() -> Vec<Provider> {
    vec![
        Provider {
            id: "1".to_string(),
            name: "Dr. Sarah Johnson".to_string(),
            specialty: "Cardiology".to_string(),
        },
        Provider {
            id: "2".to_string(),
            name: "Dr. Michael Chen".to_string(),
            specialty: "Neurology".to_string(),
        },
        Provider {
            id: "3".to_string(),
            name: "Dr. Emily Rodriguez".to_string(),
            specialty: "Pediatrics".to_string(),
        },
    ]
}

pub fn viewers() -> Vec<Viewer> {
    vec![
        Viewer::new("Admin User", Role::Admin),
        Viewer::new("Dr. Sarah Johnson", Role::Doctor { id: "1".to_string() }),
        Viewer::new("Dr. Michael Chen", Role::Doctor { id: "2".to_string() }),
        Viewer::new("John Smith", Role::Patient { id: "p1".to_string() }),
        Viewer::new("Acme Corp", Role::Corporate { id: "c1".to_string() }),
    ]
}

/// Sample bookings spread over the week starting at `anchor`.
pub fn appointments(anchor: NaiveDate) -> ScheduleResult<Vec<Appointment>> {
    let providers = providers();
    // (id, patient, day offset, time, provider, minutes, status, category, notes)
    let rows = [
        ("a1", "John Smith", 0, "09:30 AM", 0, 30, AppointmentStatus::Confirmed, AppointmentCategory::FollowUp, Some("Blood pressure review")),
        ("a2", "Emily Davis", 0, "11:00 AM", 1, 45, AppointmentStatus::Pending, AppointmentCategory::New, None),
        ("a3", "Robert Wilson", 0, "11:00 AM", 0, 30, AppointmentStatus::Confirmed, AppointmentCategory::Urgent, Some("Chest pain")),
        ("a4", "Maria Garcia", 1, "10:00 AM", 2, 30, AppointmentStatus::Confirmed, AppointmentCategory::Routine, None),
        ("a5", "James Taylor", 1, "02:30 PM", 0, 60, AppointmentStatus::Pending, AppointmentCategory::New, None),
        ("a6", "Linda Martinez", 3, "09:00 AM", 1, 30, AppointmentStatus::Cancelled, AppointmentCategory::FollowUp, Some("Patient requested cancellation")),
        ("a7", "David Anderson", 4, "04:00 PM", 2, 30, AppointmentStatus::Completed, AppointmentCategory::Routine, None),
        ("a8", "Susan Thomas", 4, "09:15 AM", 1, 15, AppointmentStatus::Pending, AppointmentCategory::Urgent, Some("Walk-in")),
    ];

    let mut appointments = Vec::with_capacity(rows.len());
    for (id, patient, offset, time, provider, minutes, status, category, notes) in rows {
        let date = anchor.checked_add_days(Days::new(offset)).unwrap_or(anchor);
        let provider = &providers[provider];
        let mut apt = Appointment::new(
            patient.to_string(),
            provider.name.clone(),
            date,
            time.parse::<SlotTime>()?,
            minutes,
            category,
        )?
        .with_id(id)
        .with_patient_id(format!("p{}", &id[1..]))
        .with_provider(provider)
        .with_status(status);
        if let Some(notes) = notes {
            apt = apt.with_notes(notes);
        }
        appointments.push(apt);
    }
    Ok(appointments)
}
