//! Appointment calendar core.
//!
//! Generates the bookable slots of a day, filters an appointment snapshot by
//! date and provider, places appointments onto slots, and drives the
//! calendar/day/week view state for one viewer.

pub mod assignment;
pub mod config;
pub mod dates;
pub mod demo;
pub mod error;
pub mod index;
pub mod models;
pub mod roles;
pub mod slots;
pub mod view;

pub use assignment::{assign_to_slots, DaySchedule, SlotEntry, SlotOccupancy};
pub use config::CalendarConfig;
pub use error::{ScheduleError, ScheduleResult};
pub use index::{
    dates_with_appointments, filter_by_date, filter_by_provider, has_appointments_on_date,
    AppointmentIndex, AppointmentQuery,
};
pub use models::{Appointment, AppointmentCategory, AppointmentStatus, Provider, SlotTime};
pub use roles::{default_provider_filter, Role, Viewer};
pub use slots::{generate_slots, ScheduleWindow};
pub use view::{
    derive_view, reduce, CalendarView, ScheduleController, ViewAction, ViewMode, ViewModel,
    ViewSettings, ViewState, WeekView,
};
