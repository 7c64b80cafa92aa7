//! Command-line front end for the appointment calendar.
//!
//! Loads an appointment snapshot (a JSON file or the built-in demo clinic)
//! and lets the user browse it through the month, day and week views.

use chrono::Local;
use clinic_calendar::dates::format_iso_date;
use clinic_calendar::{
    demo, AppointmentStatus, CalendarConfig, CalendarView, DaySchedule, ScheduleController,
    ScheduleResult, SlotOccupancy, Viewer, ViewAction, ViewModel, ViewSettings, WeekView,
};
use dotenv::dotenv;
use std::fs;
use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct CalendarCLI {
    controller: ScheduleController,
    viewers: Vec<Viewer>,
    viewer: usize,
    running: bool,
}

impl CalendarCLI {
    fn new(controller: ScheduleController, viewers: Vec<Viewer>) -> Self {
        CalendarCLI {
            controller,
            viewers,
            viewer: 0,
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       APPOINTMENT CALENDAR");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        let state = self.controller.state();
        println!(
            "\n--- {} | {:?} view | {} | provider: {} ---",
            self.viewers[self.viewer].name,
            state.mode,
            state.active_date.format("%A, %Y-%m-%d"),
            state.provider_filter.as_deref().unwrap_or("all")
        );
        println!("1. Show view");
        println!("2. Select date");
        println!("3. Next day");
        println!("4. Previous day");
        println!("5. Next month");
        println!("6. Previous month");
        println!("7. Week view");
        println!("8. Back to calendar");
        println!("9. Set provider filter");
        println!("10. Switch viewer");
        println!("11. Search appointments");
        println!("12. Exit");
        println!("{}", "-".repeat(20));
    }

    /// Read one line; `None` once stdin is closed.
    fn get_input(&self, prompt: &str, default: Option<&str>) -> Option<String> {
        match default {
            Some(def) => print!("{} [{}]: ", prompt, def),
            None => print!("{}: ", prompt),
        }
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    Some(default.unwrap_or("").to_string())
                } else {
                    Some(input.to_string())
                }
            }
        }
    }

    fn show_view(&self) {
        match self.controller.view() {
            ViewModel::Calendar(calendar) => print_calendar(calendar),
            ViewModel::Day(day) => print_day(day),
            ViewModel::Week(week) => print_week(week),
        }
    }

    fn select_date(&mut self) {
        let Some(raw) = self.get_input("Date (YYYY-MM-DD)", None) else {
            self.running = false;
            return;
        };
        match clinic_calendar::dates::parse_iso_date(&raw) {
            Ok(date) => self.apply(ViewAction::SelectDate(Some(date))),
            Err(e) => println!("{}", e),
        }
    }

    fn set_provider_filter(&mut self) {
        let index = self.controller.index();
        println!("\nProviders:");
        for id in index.provider_ids() {
            let name = index
                .all()
                .iter()
                .find(|apt| apt.is_for_provider(&id))
                .map(|apt| apt.provider_name.as_str())
                .unwrap_or("unknown");
            println!("  {} - {}", id, name);
        }
        let Some(raw) = self.get_input("Provider id (blank for all)", None) else {
            self.running = false;
            return;
        };
        let filter = Some(raw).filter(|id| !id.is_empty());
        self.apply(ViewAction::SetProviderFilter(filter));
    }

    fn search(&mut self) {
        let Some(text) = self.get_input("Search text (patient, provider, notes)", None) else {
            self.running = false;
            return;
        };
        let Some(raw_status) = self.get_input("Status (blank for any)", None) else {
            self.running = false;
            return;
        };
        let status = if raw_status.is_empty() {
            None
        } else {
            match raw_status.parse::<AppointmentStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            }
        };

        let found = self.controller.search(Some(&text), status);
        println!("\n{} appointment(s) found", found.len());
        for apt in &found {
            println!(
                "  {} {}  {} with {} ({})",
                format_iso_date(apt.date),
                apt.time,
                apt.patient_name,
                apt.provider_name,
                apt.status
            );
        }
    }

    fn switch_viewer(&mut self) {
        println!("\nViewers:");
        for (i, viewer) in self.viewers.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, viewer.name, viewer.role);
        }
        let Some(raw) = self.get_input("Select viewer", Some("1")) else {
            self.running = false;
            return;
        };
        match raw.parse::<usize>() {
            Ok(choice) if choice >= 1 && choice <= self.viewers.len() => {
                self.viewer = choice - 1;
                self.controller.switch_viewer(&self.viewers[self.viewer]);
                self.show_view();
            }
            _ => println!("Invalid choice"),
        }
    }

    fn apply(&mut self, action: ViewAction) {
        self.controller.dispatch(action);
        self.show_view();
    }

    fn run(&mut self) {
        self.print_header();
        self.show_view();

        while self.running {
            self.print_menu();

            let Some(choice) = self.get_input("Enter choice", Some("1")) else {
                break;
            };

            match choice.parse::<u32>() {
                Ok(1) => self.show_view(),
                Ok(2) => self.select_date(),
                Ok(3) => self.apply(ViewAction::NextDay),
                Ok(4) => self.apply(ViewAction::PreviousDay),
                Ok(5) => self.apply(ViewAction::NextMonth),
                Ok(6) => self.apply(ViewAction::PreviousMonth),
                Ok(7) => self.apply(ViewAction::ShowWeek),
                Ok(8) => self.apply(ViewAction::Back),
                Ok(9) => self.set_provider_filter(),
                Ok(10) => self.switch_viewer(),
                Ok(11) => self.search(),
                Ok(12) => self.running = false,
                _ => println!("Invalid choice"),
            }
        }
        println!("\nGoodbye!");
    }
}

fn print_calendar(calendar: &CalendarView) {
    println!("\n--- {}-{:02} ---", calendar.year, calendar.month);
    if let Some(week) = calendar.weeks.first() {
        let names: Vec<String> = week
            .iter()
            .map(|cell| format!("{:>4}", cell.date.format("%a")))
            .collect();
        println!("{}", names.join(""));
    }
    for week in &calendar.weeks {
        let row: String = week
            .iter()
            .map(|cell| {
                let day = if cell.in_month {
                    cell.date.format("%e").to_string()
                } else {
                    "  ".to_string()
                };
                let marker = if cell.is_active {
                    '['
                } else if cell.has_appointments {
                    '*'
                } else {
                    ' '
                };
                format!(" {}{}", marker, day)
            })
            .collect();
        println!("{}", row);
    }
    println!(
        "\n{} day(s) with appointments ('*' marks them, '[' the active date)",
        calendar.marked_dates.len()
    );
}

fn print_day(day: &DaySchedule) {
    println!("\n--- {} ---", day.date.format("%A, %Y-%m-%d"));
    for entry in &day.slots {
        match &entry.occupancy {
            SlotOccupancy::Available => println!("  {}  available", entry.label()),
            SlotOccupancy::Booked(appointments) => {
                for apt in appointments {
                    println!(
                        "  {}  {} with {} ({} min, {}, {})",
                        entry.label(),
                        apt.patient_name,
                        apt.provider_name,
                        apt.duration_minutes,
                        apt.category,
                        apt.status
                    );
                }
            }
        }
    }
    if !day.off_grid.is_empty() {
        println!("\nOutside the slot grid:");
        for apt in &day.off_grid {
            println!("  {}  {} with {}", apt.time, apt.patient_name, apt.provider_name);
        }
    }
}

fn print_week(week: &WeekView) {
    println!("\n--- Week of {} ---", week.week_start.format("%Y-%m-%d"));
    for day in &week.days {
        let marker = if day.date == week.active_date { '>' } else { ' ' };
        let booked: Vec<String> = day
            .slots
            .iter()
            .filter(|entry| !entry.occupancy.is_available())
            .map(|entry| {
                format!("{} ({})", entry.label(), entry.occupancy.appointments().len())
            })
            .collect();
        let summary = if booked.is_empty() {
            "no appointments".to_string()
        } else {
            booked.join(", ")
        };
        println!("{} {}  {}", marker, day.date.format("%a %m-%d"), summary);
    }
}

fn load_controller(config: &CalendarConfig) -> ScheduleResult<(ScheduleController, Vec<Viewer>)> {
    let today = Local::now().date_naive();
    let appointments = match &config.appointments_file {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|e| {
                clinic_calendar::ScheduleError::Snapshot(format!("{}: {}", path, e))
            })?;
            let appointments = clinic_calendar::models::appointments_from_json(&raw)?;
            info!("Loaded {} appointments from {}", appointments.len(), path);
            appointments
        }
        None => {
            info!("No appointment file configured, using demo clinic");
            demo::appointments(today)?
        }
    };

    let viewers = demo::viewers();
    let settings = ViewSettings::from_config(config, today);
    let controller = ScheduleController::new(&viewers[0], appointments, settings);
    Ok((controller, viewers))
}

fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,clinic_calendar=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = CalendarConfig::from_env();

    match load_controller(&config) {
        Ok((controller, viewers)) => CalendarCLI::new(controller, viewers).run(),
        Err(e) => {
            error!("Failed to start calendar: {}", e);
            std::process::exit(1);
        }
    }
}
