use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{CalendarError, Result};
use crate::event::{event_summary, CalendarEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingProperty,
    InvalidValue,
    UnknownTimezone,
    InvalidRecurrence,
}

impl SkipReason {
    pub fn for_error(err: &CalendarError) -> Self {
        match err {
            CalendarError::MissingProperty(_) => Self::MissingProperty,
            CalendarError::UnknownTimezone(_) => Self::UnknownTimezone,
            CalendarError::Recurrence(_) => Self::InvalidRecurrence,
            _ => Self::InvalidValue,
        }
    }
}

/// An event left out of the report, with the error that excluded it.
#[derive(Debug, Clone)]
pub struct SkippedEvent {
    pub summary: String,
    pub reason: SkipReason,
    pub message: String,
}

impl SkippedEvent {
    pub fn new(summary: impl Into<String>, err: &CalendarError) -> Self {
        let skipped = Self {
            summary: summary.into(),
            reason: SkipReason::for_error(err),
            message: err.to_string(),
        };
        warn!(summary = %skipped.summary, reason = ?skipped.reason, "Skipping event: {err}");
        skipped
    }
}

#[derive(Debug, Default)]
pub struct LoadedCalendar {
    pub events: Vec<CalendarEvent>,
    pub skipped: Vec<SkippedEvent>,
}

pub fn load_calendar(path: &Path) -> Result<LoadedCalendar> {
    let text = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_calendar(&text)
}

/// Parses every VCALENDAR in `text` and converts its VEVENTs.
///
/// A document the parser rejects fails as a whole. Individual events that
/// cannot be converted are collected in `skipped` instead.
pub fn parse_calendar(text: &str) -> Result<LoadedCalendar> {
    let parser = ical::IcalParser::new(BufReader::new(text.as_bytes()));

    let mut loaded = LoadedCalendar::default();
    let mut calendars = 0usize;
    for calendar in parser {
        let calendar = calendar.map_err(|err| CalendarError::Parse(err.to_string()))?;
        calendars += 1;

        for event in &calendar.events {
            match CalendarEvent::from_ical(event) {
                Ok(parsed) => loaded.events.push(parsed),
                Err(err) => loaded
                    .skipped
                    .push(SkippedEvent::new(event_summary(event), &err)),
            }
        }
    }

    if calendars == 0 {
        return Err(CalendarError::Parse("no VCALENDAR component found".to_string()));
    }

    debug!(
        events = loaded.events.len(),
        skipped = loaded.skipped.len(),
        "Loaded calendar"
    );
    Ok(loaded)
}
