//! Placing a day's appointments onto its slot grid.

use crate::models::{Appointment, SlotTime};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Whether a slot can still be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "appointments", rename_all = "lowercase")]
pub enum SlotOccupancy {
    Available,
    /// One or more appointments. Double booking is allowed and kept as-is.
    Booked(Vec<Appointment>),
}

impl SlotOccupancy {
    pub fn is_available(&self) -> bool {
        matches!(self, SlotOccupancy::Available)
    }

    pub fn appointments(&self) -> &[Appointment] {
        match self {
            SlotOccupancy::Available => &[],
            SlotOccupancy::Booked(appointments) => appointments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEntry {
    pub time: SlotTime,
    pub occupancy: SlotOccupancy,
}

impl SlotEntry {
    pub fn label(&self) -> String {
        self.time.label()
    }
}

/// A single day broken down by slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub slots: Vec<SlotEntry>,
    /// Appointments whose time does not sit on the slot grid.
    pub off_grid: Vec<Appointment>,
}

impl DaySchedule {
    pub fn slot(&self, label: &str) -> Option<&SlotEntry> {
        let time: SlotTime = label.parse().ok()?;
        self.slots.iter().find(|entry| entry.time == time)
    }

    pub fn available_slots(&self) -> Vec<SlotTime> {
        self.slots
            .iter()
            .filter(|entry| entry.occupancy.is_available())
            .map(|entry| entry.time)
            .collect()
    }

    /// Appointments placed on the grid.
    pub fn booked_count(&self) -> usize {
        self.slots
            .iter()
            .map(|entry| entry.occupancy.appointments().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.booked_count() == 0 && self.off_grid.is_empty()
    }
}

/// Group `appointments` under the slot whose time equals theirs exactly.
///
/// Only appointments dated `date` are considered. Slot order follows
/// `slots`; within a slot, appointments keep their input order. Nothing is
/// checked for overlap: durations that run into the next slot are ignored.
pub fn assign_to_slots(
    date: NaiveDate,
    slots: &[SlotTime],
    appointments: &[Appointment],
) -> DaySchedule {
    let mut entries: Vec<SlotEntry> = slots
        .iter()
        .map(|time| SlotEntry {
            time: *time,
            occupancy: SlotOccupancy::Available,
        })
        .collect();
    let mut off_grid = Vec::new();

    for apt in appointments.iter().filter(|apt| apt.date == date) {
        match entries.iter_mut().find(|entry| entry.time == apt.time) {
            Some(entry) => {
                if let SlotOccupancy::Booked(booked) = &mut entry.occupancy {
                    booked.push(apt.clone());
                } else {
                    entry.occupancy = SlotOccupancy::Booked(vec![apt.clone()]);
                }
            }
            None => {
                debug!("Appointment {} at {} is off the slot grid", apt.id, apt.time);
                off_grid.push(apt.clone());
            }
        }
    }

    DaySchedule {
        date,
        slots: entries,
        off_grid,
    }
}
