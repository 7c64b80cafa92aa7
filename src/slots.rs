//! Time-slot generation for a bookable day.
//!
//! Slots are derived, never stored: the same window always yields the same
//! labels, independent of the wall clock.

use crate::models::SlotTime;
use serde::{Deserialize, Serialize};

/// Generate slot times covering `[start_hour:00, end_hour:00)`.
///
/// Each hour emits minutes `0, interval, 2 * interval, ...` strictly below
/// 60, so an interval that does not divide 60 restarts at the top of every
/// hour (45 minutes gives 09:00, 09:45, 10:00, 10:45). `end_hour <= start_hour`
/// or a zero interval yields no slots. `end_hour` of 24 covers the last hour
/// of the day; larger values are clamped.
pub fn generate_slots(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Vec<SlotTime> {
    let end_hour = end_hour.min(24);
    if end_hour <= start_hour || interval_minutes == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for hour in start_hour..end_hour {
        let mut minute = 0;
        while minute < 60 {
            if let Some(slot) = SlotTime::from_hm(hour, minute) {
                slots.push(slot);
            }
            minute += interval_minutes;
        }
    }
    slots
}

/// The bookable window of a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub interval_minutes: u32,
    #[serde(default)]
    pub break_start: Option<SlotTime>,
    #[serde(default)]
    pub break_end: Option<SlotTime>,
}

impl Default for ScheduleWindow {
    fn default() -> Self {
        ScheduleWindow {
            start_hour: 8,
            end_hour: 18,
            interval_minutes: 30,
            break_start: None,
            break_end: None,
        }
    }
}

impl ScheduleWindow {
    pub fn new(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Self {
        ScheduleWindow {
            start_hour,
            end_hour,
            interval_minutes,
            break_start: None,
            break_end: None,
        }
    }

    pub fn with_break(mut self, break_start: SlotTime, break_end: SlotTime) -> Self {
        self.break_start = Some(break_start);
        self.break_end = Some(break_end);
        self
    }

    /// True when a slot starting at `slot` falls inside the break.
    pub fn is_break(&self, slot: SlotTime) -> bool {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => slot >= start && slot < end,
            _ => false,
        }
    }

    /// The day's slots with any break removed.
    pub fn slots(&self) -> Vec<SlotTime> {
        generate_slots(self.start_hour, self.end_hour, self.interval_minutes)
            .into_iter()
            .filter(|slot| !self.is_break(*slot))
            .collect()
    }
}
