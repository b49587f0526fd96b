use chrono::{Duration, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use chrono_tz::Tz;

use crate::error::{CalendarError, Result};

pub const DEFAULT_CALENDAR_PATH: &str = "cal.ics";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Berlin;
pub const DEFAULT_MIN_DURATION_HOURS: u32 = 4;
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Everything a report run depends on besides the calendar itself.
///
/// `now` is wall-clock time in `zone` with no offset attached. Tests build
/// this with a fixed instant; the CLI reads the system clock once.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub zone: Tz,
    pub now: NaiveDateTime,
    pub min_duration: Duration,
    pub window: Duration,
}

impl ReportConfig {
    pub fn new(zone: Tz, now: NaiveDateTime) -> Self {
        Self {
            zone,
            now,
            min_duration: Duration::hours(i64::from(DEFAULT_MIN_DURATION_HOURS)),
            window: Duration::days(i64::from(DEFAULT_WINDOW_DAYS)),
        }
    }

    pub fn at_system_time(zone: Tz) -> Self {
        let now = Utc::now().with_timezone(&zone).naive_local().trunc_subsecs(0);
        Self::new(zone, now)
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Inclusive upper bound of the recurrence window.
    pub fn window_end(&self) -> Result<NaiveDateTime> {
        self.now
            .checked_add_signed(self.window)
            .ok_or(CalendarError::WindowOutOfRange {
                now: self.now,
                days: self.window.num_days(),
            })
    }
}
