//! Date helpers for the calendar grid.
//!
//! Dates stay `NaiveDate` end to end and only become strings at the ISO
//! boundary, so no timezone ever enters a comparison.

use crate::error::{ScheduleError, ScheduleResult};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso_date(value: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|_| ScheduleError::InvalidDate(value.to_string()))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// The following calendar day. Saturates at the end of chrono's range.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Shift by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The first day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - first_weekday.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(offset as u64)).unwrap_or(date)
}

/// Seven consecutive days of the week containing `date`.
pub fn week_dates(date: NaiveDate, first_weekday: Weekday) -> [NaiveDate; 7] {
    let start = week_start(date, first_weekday);
    let mut days = [start; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = start
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(start);
    }
    days
}

/// Full weeks covering a month, padded with days from the neighbouring
/// months. Returns an empty grid for an invalid year/month.
pub fn month_grid(year: i32, month: u32, first_weekday: Weekday) -> Vec<[NaiveDate; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = add_months(first, 1).pred_opt().unwrap_or(first);

    let mut weeks = Vec::new();
    let mut cursor = week_start(first, first_weekday);
    while cursor <= last {
        let week = week_dates(cursor, first_weekday);
        weeks.push(week);
        match week[6].succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    weeks
}

pub fn parse_weekday(value: &str) -> ScheduleResult<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ScheduleError::Config(format!("unknown weekday '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn iso_dates_parse_and_format() {
        assert_eq!(parse_iso_date("2023-05-22"), Ok(date(2023, 5, 22)));
        assert_eq!(format_iso_date(date(2023, 5, 2)), "2023-05-02");
        assert!(parse_iso_date("2023-02-30").is_err());
        assert!(parse_iso_date("05/22/2023").is_err());
    }

    #[test]
    fn day_steps_cross_month_and_year() {
        assert_eq!(next_day(date(2023, 5, 31)), date(2023, 6, 1));
        assert_eq!(previous_day(date(2024, 1, 1)), date(2023, 12, 31));
        assert_eq!(next_day(date(2024, 2, 28)), date(2024, 2, 29));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months(date(2023, 3, 15), -3), date(2022, 12, 15));
    }

    #[test]
    fn week_start_respects_first_weekday() {
        // 2023-05-24 is a Wednesday.
        assert_eq!(week_start(date(2023, 5, 24), Weekday::Mon), date(2023, 5, 22));
        assert_eq!(week_start(date(2023, 5, 24), Weekday::Sun), date(2023, 5, 21));
        assert_eq!(week_start(date(2023, 5, 22), Weekday::Mon), date(2023, 5, 22));
    }

    #[test]
    fn month_grid_covers_whole_month() {
        let grid = month_grid(2023, 5, Weekday::Mon);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], date(2023, 5, 1));
        assert_eq!(grid[4][6], date(2023, 6, 4));

        let sunday_grid = month_grid(2023, 5, Weekday::Sun);
        assert_eq!(sunday_grid[0][0], date(2023, 4, 30));
        assert!(sunday_grid.iter().flatten().any(|d| *d == date(2023, 5, 31)));
    }

    #[test]
    fn month_grid_rejects_bad_month() {
        assert!(month_grid(2023, 13, Weekday::Mon).is_empty());
    }
}
