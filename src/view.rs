//! View state for the appointment calendar.
//!
//! State changes go through `reduce`, a pure transition function, and the
//! rendered data comes from `derive_view`. `ScheduleController` ties the two
//! together for a single viewer session.

use crate::assignment::{assign_to_slots, DaySchedule};
use crate::config::CalendarConfig;
use crate::dates::{add_months, first_of_month, month_grid, next_day, previous_day, week_dates};
use crate::index::{AppointmentIndex, AppointmentQuery};
use crate::models::{Appointment, AppointmentStatus, SlotTime};
use crate::roles::Viewer;
use crate::slots::ScheduleWindow;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Month grid with per-day indicators.
    Calendar,
    /// Slot breakdown of the active date.
    Day,
    /// Slot breakdown of the seven days around the active date.
    Week,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub active_date: NaiveDate,
    pub provider_filter: Option<String>,
}

impl ViewState {
    pub fn new(today: NaiveDate, provider_filter: Option<String>) -> Self {
        ViewState {
            mode: ViewMode::Calendar,
            active_date: today,
            provider_filter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Open the day view for a date. `None` leaves the state untouched.
    SelectDate(Option<NaiveDate>),
    Back,
    NextDay,
    PreviousDay,
    NextMonth,
    PreviousMonth,
    ShowWeek,
    SetProviderFilter(Option<String>),
}

/// Apply one user action to the view state.
pub fn reduce(state: &ViewState, action: ViewAction) -> ViewState {
    let mut next = state.clone();
    match action {
        ViewAction::SelectDate(Some(date)) => {
            next.mode = ViewMode::Day;
            next.active_date = date;
        }
        ViewAction::SelectDate(None) => {}
        ViewAction::Back => next.mode = ViewMode::Calendar,
        ViewAction::NextDay => {
            if state.mode != ViewMode::Calendar {
                next.active_date = next_day(state.active_date);
            }
        }
        ViewAction::PreviousDay => {
            if state.mode != ViewMode::Calendar {
                next.active_date = previous_day(state.active_date);
            }
        }
        ViewAction::NextMonth => {
            if state.mode == ViewMode::Calendar {
                next.active_date = add_months(state.active_date, 1);
            }
        }
        ViewAction::PreviousMonth => {
            if state.mode == ViewMode::Calendar {
                next.active_date = add_months(state.active_date, -1);
            }
        }
        ViewAction::ShowWeek => next.mode = ViewMode::Week,
        ViewAction::SetProviderFilter(filter) => next.provider_filter = filter,
    }
    next
}

/// Everything besides the state that shapes the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub window: ScheduleWindow,
    pub first_weekday: Weekday,
    pub today: NaiveDate,
}

impl ViewSettings {
    pub fn from_config(config: &CalendarConfig, today: NaiveDate) -> Self {
        ViewSettings {
            window: config.window,
            first_weekday: config.first_weekday,
            today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_active: bool,
    pub is_today: bool,
    pub has_appointments: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarCell>>,
    /// Dates of this month with at least one appointment.
    pub marked_dates: BTreeSet<NaiveDate>,
}

impl CalendarView {
    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.weeks.iter().flatten().find(|cell| cell.date == date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub active_date: NaiveDate,
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ViewModel {
    Calendar(CalendarView),
    Day(DaySchedule),
    Week(WeekView),
}

/// Build the render data for `state` from scratch.
pub fn derive_view(
    state: &ViewState,
    index: &AppointmentIndex,
    settings: &ViewSettings,
) -> ViewModel {
    let provider = state.provider_filter.as_deref();
    match state.mode {
        ViewMode::Calendar => ViewModel::Calendar(calendar_view(state, index, settings)),
        ViewMode::Day => ViewModel::Day(day_schedule(
            state.active_date,
            index,
            provider,
            &settings.window.slots(),
        )),
        ViewMode::Week => {
            let slots = settings.window.slots();
            let dates = week_dates(state.active_date, settings.first_weekday);
            ViewModel::Week(WeekView {
                week_start: dates[0],
                active_date: state.active_date,
                days: dates
                    .iter()
                    .map(|date| day_schedule(*date, index, provider, &slots))
                    .collect(),
            })
        }
    }
}

fn day_schedule(
    date: NaiveDate,
    index: &AppointmentIndex,
    provider: Option<&str>,
    slots: &[SlotTime],
) -> DaySchedule {
    let appointments = index.on_date_for_provider(date, provider);
    assign_to_slots(date, slots, &appointments)
}

fn calendar_view(
    state: &ViewState,
    index: &AppointmentIndex,
    settings: &ViewSettings,
) -> CalendarView {
    let month_start = first_of_month(state.active_date);
    let (year, month) = (month_start.year(), month_start.month());
    let marked_dates =
        index.marked_dates(year, month, state.provider_filter.as_deref());

    let weeks = month_grid(year, month, settings.first_weekday)
        .into_iter()
        .map(|week| {
            week.iter()
                .map(|date| CalendarCell {
                    date: *date,
                    in_month: date.month() == month && date.year() == year,
                    is_active: *date == state.active_date,
                    is_today: *date == settings.today,
                    has_appointments: marked_dates.contains(date),
                })
                .collect()
        })
        .collect();

    CalendarView {
        year,
        month,
        weeks,
        marked_dates,
    }
}

/// One viewer's calendar session.
pub struct ScheduleController {
    index: AppointmentIndex,
    settings: ViewSettings,
    state: ViewState,
    view: ViewModel,
}

impl ScheduleController {
    /// Open the calendar on `today`, filtered the way the viewer's role
    /// expects.
    pub fn new(
        viewer: &Viewer,
        appointments: Vec<Appointment>,
        settings: ViewSettings,
    ) -> Self {
        let index = AppointmentIndex::new(appointments);
        let state = ViewState::new(settings.today, viewer.default_provider_filter());
        let view = derive_view(&state, &index, &settings);
        debug!(
            "Opened calendar for {} ({}) with {} appointments",
            viewer.name,
            viewer.role,
            index.len()
        );

        ScheduleController {
            index,
            settings,
            state,
            view,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn index(&self) -> &AppointmentIndex {
        &self.index
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Appointments visible under the current provider filter that match
    /// `search` (patient, provider or notes) and `status`.
    pub fn search(
        &self,
        search: Option<&str>,
        status: Option<AppointmentStatus>,
    ) -> Vec<Appointment> {
        let mut query = AppointmentQuery::default();
        if let Some(provider) = &self.state.provider_filter {
            query = query.for_provider(provider.clone());
        }
        if let Some(status) = status {
            query = query.with_status(status);
        }
        if let Some(text) = search.map(str::trim).filter(|text| !text.is_empty()) {
            query = query.matching(text);
        }
        self.index.query(&query)
    }

    /// Apply an action and return the refreshed view.
    pub fn dispatch(&mut self, action: ViewAction) -> &ViewModel {
        let next = reduce(&self.state, action);
        if next != self.state {
            debug!(
                "View state {:?} {} -> {:?} {}",
                self.state.mode, self.state.active_date, next.mode, next.active_date
            );
            self.state = next;
            self.refresh();
        }
        &self.view
    }

    /// Swap in a new appointment snapshot from the data source.
    pub fn replace_appointments(&mut self, appointments: Vec<Appointment>) -> &ViewModel {
        self.index = AppointmentIndex::new(appointments);
        self.refresh();
        &self.view
    }

    /// Switch to another viewer; the session state starts over.
    pub fn switch_viewer(&mut self, viewer: &Viewer) -> &ViewModel {
        self.state = ViewState::new(self.settings.today, viewer.default_provider_filter());
        self.refresh();
        &self.view
    }

    fn refresh(&mut self) {
        self.view = derive_view(&self.state, &self.index, &self.settings);
    }
}
