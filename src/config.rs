use crate::dates::parse_weekday;
use crate::models::SlotTime;
use crate::slots::ScheduleWindow;
use chrono::Weekday;
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Calendar settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    pub window: ScheduleWindow,
    pub first_weekday: Weekday,
    pub appointments_file: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            window: ScheduleWindow::default(),
            first_weekday: Weekday::Mon,
            appointments_file: None,
        }
    }
}

impl CalendarConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparsable values fall back to
    /// the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CalendarConfig::default();

        let start_hour = read_or(&lookup, "CALENDAR_START_HOUR", defaults.window.start_hour);
        let end_hour = read_or(&lookup, "CALENDAR_END_HOUR", defaults.window.end_hour);
        let interval_minutes =
            read_or(&lookup, "CALENDAR_SLOT_MINUTES", defaults.window.interval_minutes);

        let mut window = ScheduleWindow::new(start_hour, end_hour, interval_minutes);
        let break_start = read_opt::<SlotTime, _>(&lookup, "CALENDAR_BREAK_START");
        let break_end = read_opt::<SlotTime, _>(&lookup, "CALENDAR_BREAK_END");
        match (break_start, break_end) {
            (Some(start), Some(end)) if start < end => window = window.with_break(start, end),
            (None, None) => {}
            _ => warn!("CALENDAR_BREAK_START/CALENDAR_BREAK_END incomplete or reversed, ignoring break"),
        }

        let first_weekday = match lookup("CALENDAR_WEEK_START") {
            Some(raw) => parse_weekday(&raw).unwrap_or_else(|e| {
                warn!("{}, using {}", e, defaults.first_weekday);
                defaults.first_weekday
            }),
            None => defaults.first_weekday,
        };

        let config = Self {
            window,
            first_weekday,
            appointments_file: lookup("CALENDAR_APPOINTMENTS_FILE").filter(|path| !path.is_empty()),
        };

        if !config.is_valid() {
            warn!(
                "Schedule window {}-{} every {} minutes produces no slots",
                start_hour, end_hour, interval_minutes
            );
        }

        config
    }

    pub fn is_valid(&self) -> bool {
        !self.window.slots().is_empty()
    }
}

fn read_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

fn read_opt<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has invalid value '{}', ignoring", key, raw);
            None
        }
    }
}
