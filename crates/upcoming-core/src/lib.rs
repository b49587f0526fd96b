//! Upcoming events: load an iCalendar file, normalize every start and end to
//! one reference timezone, expand recurrences over a forward window and
//! list what is left by ISO week.

pub mod config;
pub mod error;
pub mod event;
pub mod filters;
pub mod loader;
pub mod pipeline;
pub mod recurrence;
pub mod report;
pub mod temporal;

pub use config::ReportConfig;
pub use error::{CalendarError, Result};
pub use event::CalendarEvent;
pub use loader::{load_calendar, parse_calendar, LoadedCalendar, SkipReason, SkippedEvent};
pub use pipeline::{build_report, run};
pub use recurrence::RecurrenceRule;
pub use report::{Occurrence, Report};
pub use temporal::{normalize, CalendarValue};
