// End-to-end behaviour of the calendar core: slot generation, filtering,
// slot assignment and the view controller working together.

use assert_matches::assert_matches;
use chrono::{NaiveDate, Weekday};

use clinic_calendar::{
    assign_to_slots, filter_by_date, filter_by_provider, generate_slots,
    has_appointments_on_date, Appointment, AppointmentCategory, AppointmentStatus, Role,
    ScheduleController, ScheduleWindow, SlotTime, ViewAction, ViewMode, ViewModel,
    ViewSettings, Viewer,
};

// ==============================================================================
// FIXTURES
// ==============================================================================

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn booking(id: &str, on: &str, time: &str, provider_id: &str) -> Appointment {
    Appointment::new(
        format!("Patient {}", id),
        format!("Provider {}", provider_id),
        on.parse().unwrap(),
        time.parse().unwrap(),
        30,
        AppointmentCategory::Routine,
    )
    .unwrap()
    .with_id(id)
    .with_provider_id(provider_id)
    .with_status(AppointmentStatus::Confirmed)
}

fn clinic() -> Vec<Appointment> {
    vec![
        booking("a1", "2023-05-22", "09:30 AM", "1"),
        booking("a2", "2023-05-22", "11:00 AM", "2"),
        booking("a3", "2023-05-22", "11:00 AM", "1"),
        booking("a4", "2023-05-23", "10:00 AM", "3"),
        booking("a5", "2023-05-25", "02:30 PM", "1"),
    ]
}

fn settings() -> ViewSettings {
    ViewSettings {
        window: ScheduleWindow::new(8, 18, 30),
        first_weekday: Weekday::Mon,
        today: date(2023, 5, 22),
    }
}

fn admin() -> Viewer {
    Viewer::new("Admin User", Role::Admin)
}

fn labels(slots: &[SlotTime]) -> Vec<String> {
    slots.iter().map(SlotTime::label).collect()
}

// ==============================================================================
// SLOT GENERATION
// ==============================================================================

#[test]
fn morning_slots_are_labelled_in_order() {
    assert_eq!(
        labels(&generate_slots(9, 11, 30)),
        vec!["09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM"]
    );
}

#[test]
fn slot_count_for_divisor_intervals() {
    for (start, end) in [(0, 24), (8, 18), (9, 10), (13, 17)] {
        for interval in [1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30, 60] {
            let slots = generate_slots(start, end, interval);
            assert_eq!(slots.len() as u32, (end - start) * (60 / interval));
            let unique: std::collections::BTreeSet<_> = slots.iter().collect();
            assert_eq!(unique.len(), slots.len());
            assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}

#[test]
fn no_slots_when_window_is_empty() {
    assert!(generate_slots(9, 9, 30).is_empty());
    for start in 0..24 {
        for end in 0..=start {
            assert!(generate_slots(start, end, 15).is_empty());
        }
    }
}

// ==============================================================================
// FILTERING
// ==============================================================================

#[test]
fn date_filter_and_existence_check_agree() {
    let all = clinic();
    for day in 1..=31 {
        let d = date(2023, 5, day);
        let on_day = filter_by_date(&all, d);
        assert!(on_day.iter().all(|a| a.date == d));
        assert_eq!(has_appointments_on_date(&all, d), !on_day.is_empty());

        let elsewhere = all.iter().filter(|a| a.date != d).count();
        assert_eq!(on_day.len() + elsewhere, all.len());
    }
}

#[test]
fn indicators_for_booked_and_free_dates() {
    let all = clinic();
    assert!(has_appointments_on_date(&all, date(2023, 5, 23)));
    assert!(!has_appointments_on_date(&all, date(2023, 5, 30)));
}

#[test]
fn filtering_does_not_mutate_input() {
    let all = clinic();
    let snapshot = all.clone();
    let _ = filter_by_provider(&filter_by_date(&all, date(2023, 5, 22)), Some("1"));
    assert_eq!(all, snapshot);
    assert_eq!(filter_by_provider(&all, None), snapshot);
}

// ==============================================================================
// SLOT ASSIGNMENT
// ==============================================================================

#[test]
fn provider_filter_decides_slot_occupancy() {
    let all = vec![booking("a1", "2023-05-22", "09:30 AM", "1")];
    let slots = generate_slots(9, 11, 30);
    let day = date(2023, 5, 22);

    let for_one = filter_by_provider(&filter_by_date(&all, day), Some("1"));
    let schedule = assign_to_slots(day, &slots, &for_one);
    let ids: Vec<_> = schedule
        .slot("09:30 AM")
        .unwrap()
        .occupancy
        .appointments()
        .iter()
        .map(|a| a.id.clone())
        .collect();
    assert_eq!(ids, vec!["a1"]);

    let for_two = filter_by_provider(&filter_by_date(&all, day), Some("2"));
    let schedule = assign_to_slots(day, &slots, &for_two);
    assert!(schedule.slot("09:30 AM").unwrap().occupancy.is_available());
}

#[test]
fn double_booking_is_a_list_not_an_error() {
    let all = vec![
        booking("a1", "2023-05-22", "11:00 AM", "1"),
        booking("a2", "2023-05-22", "11:00 AM", "2"),
    ];
    let schedule = assign_to_slots(date(2023, 5, 22), &generate_slots(8, 18, 30), &all);
    assert_eq!(schedule.slot("11:00 AM").unwrap().occupancy.appointments().len(), 2);
}

#[test]
fn loose_time_labels_still_match_their_slot() {
    let mut apt = booking("a1", "2023-05-22", "09:30 AM", "1");
    apt.time = "9:30 am".parse().unwrap();
    let schedule = assign_to_slots(date(2023, 5, 22), &generate_slots(9, 11, 30), &[apt]);
    assert_eq!(schedule.booked_count(), 1);
    assert!(schedule.off_grid.is_empty());
}

#[test]
fn times_between_slots_surface_as_off_grid() {
    let apt = booking("a1", "2023-05-22", "09:45 AM", "1");
    let schedule = assign_to_slots(date(2023, 5, 22), &generate_slots(9, 11, 30), &[apt]);
    assert_eq!(schedule.booked_count(), 0);
    assert_eq!(schedule.off_grid.len(), 1);
}

// ==============================================================================
// VIEW CONTROLLER
// ==============================================================================

#[test]
fn controller_opens_on_month_of_today() {
    let controller = ScheduleController::new(&admin(), clinic(), settings());
    assert_eq!(controller.state().mode, ViewMode::Calendar);
    assert_eq!(controller.state().active_date, date(2023, 5, 22));

    let calendar = assert_matches!(controller.view(), ViewModel::Calendar(c) => c);
    let marked: Vec<_> = calendar.marked_dates.iter().copied().collect();
    assert_eq!(marked, vec![date(2023, 5, 22), date(2023, 5, 23), date(2023, 5, 25)]);
    assert!(calendar.cell(date(2023, 5, 25)).unwrap().has_appointments);
    assert!(!calendar.cell(date(2023, 5, 24)).unwrap().has_appointments);
}

#[test]
fn select_then_back_round_trip() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());

    let view = controller.dispatch(ViewAction::SelectDate(Some(date(2023, 5, 23))));
    let day = assert_matches!(view, ViewModel::Day(d) => d);
    assert_eq!(day.date, date(2023, 5, 23));
    assert_eq!(day.booked_count(), 1);
    assert_eq!(controller.state().mode, ViewMode::Day);
    assert_eq!(controller.state().active_date, date(2023, 5, 23));

    controller.dispatch(ViewAction::Back);
    assert_eq!(controller.state().mode, ViewMode::Calendar);
    assert_eq!(controller.state().active_date, date(2023, 5, 23));
    assert_matches!(controller.view(), ViewModel::Calendar(_));
}

#[test]
fn selecting_nothing_changes_nothing() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());
    let before_state = controller.state().clone();
    let before_view = controller.view().clone();
    controller.dispatch(ViewAction::SelectDate(None));
    assert_eq!(controller.state(), &before_state);
    assert_eq!(controller.view(), &before_view);
}

#[test]
fn day_navigation_recomputes_slots() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());
    controller.dispatch(ViewAction::SelectDate(Some(date(2023, 5, 22))));

    let day = assert_matches!(controller.dispatch(ViewAction::NextDay), ViewModel::Day(d) => d);
    assert_eq!(day.date, date(2023, 5, 23));
    assert_eq!(day.booked_count(), 1);

    let day = assert_matches!(controller.dispatch(ViewAction::PreviousDay), ViewModel::Day(d) => d);
    assert_eq!(day.date, date(2023, 5, 22));
    assert_eq!(day.booked_count(), 3);
}

#[test]
fn doctor_sees_only_own_schedule_by_default() {
    let doctor = Viewer::new("Dr. One", Role::Doctor { id: "1".to_string() });
    let mut controller = ScheduleController::new(&doctor, clinic(), settings());
    assert_eq!(controller.state().provider_filter.as_deref(), Some("1"));

    let calendar = assert_matches!(controller.view(), ViewModel::Calendar(c) => c);
    assert!(!calendar.marked_dates.contains(&date(2023, 5, 23)));

    let view = controller.dispatch(ViewAction::SelectDate(Some(date(2023, 5, 22))));
    let day = assert_matches!(view, ViewModel::Day(d) => d);
    assert_eq!(day.booked_count(), 2);
    assert_eq!(day.slot("11:00 AM").unwrap().occupancy.appointments()[0].id, "a3");

    let view = controller.dispatch(ViewAction::SetProviderFilter(None));
    let day = assert_matches!(view, ViewModel::Day(d) => d);
    assert_eq!(day.booked_count(), 3);
}

#[test]
fn switching_viewer_resets_session() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());
    controller.dispatch(ViewAction::SelectDate(Some(date(2023, 5, 25))));

    let doctor = Viewer::new("Dr. Two", Role::Doctor { id: "2".to_string() });
    controller.switch_viewer(&doctor);
    assert_eq!(controller.state().mode, ViewMode::Calendar);
    assert_eq!(controller.state().active_date, date(2023, 5, 22));
    assert_eq!(controller.state().provider_filter.as_deref(), Some("2"));
}

#[test]
fn week_view_spans_active_week() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());
    let week = assert_matches!(controller.dispatch(ViewAction::ShowWeek), ViewModel::Week(w) => w);
    assert_eq!(week.week_start, date(2023, 5, 22));
    let booked: Vec<_> = week.days.iter().map(|d| d.booked_count()).collect();
    assert_eq!(booked, vec![3, 1, 0, 1, 0, 0, 0]);
}

#[test]
fn new_snapshot_refreshes_current_view() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());
    controller.dispatch(ViewAction::SelectDate(Some(date(2023, 5, 30))));
    assert_matches!(controller.view(), ViewModel::Day(d) if d.booked_count() == 0);

    let mut refreshed = clinic();
    refreshed.push(booking("a6", "2023-05-30", "08:00 AM", "2"));
    let day = assert_matches!(controller.replace_appointments(refreshed), ViewModel::Day(d) => d);
    assert_eq!(day.booked_count(), 1);
}

#[test]
fn derived_view_is_plain_serializable_data() {
    let mut controller = ScheduleController::new(&admin(), clinic(), settings());
    let json = serde_json::to_value(controller.view()).unwrap();
    assert_eq!(json["mode"], "calendar");
    assert_eq!(json["marked_dates"][0], "2023-05-22");

    let json = serde_json::to_value(
        controller.dispatch(ViewAction::SelectDate(Some(date(2023, 5, 22)))),
    )
    .unwrap();
    assert_eq!(json["mode"], "day");
    assert_eq!(json["slots"][3]["time"], "09:30 AM");
    assert_eq!(json["slots"][3]["occupancy"]["state"], "booked");
}
