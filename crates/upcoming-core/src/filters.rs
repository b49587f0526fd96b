use chrono::{Duration, NaiveDateTime};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::event::CalendarEvent;
use crate::report::Occurrence;
use crate::temporal::normalize;

/// Normalized end of `event`, or one day after `start` when it has no DTEND.
pub fn resolve_end(event: &CalendarEvent, start: NaiveDateTime, zone: &Tz) -> NaiveDateTime {
    match &event.end {
        Some(end) => normalize(end, zone),
        None => start + Duration::days(1),
    }
}

pub fn meets_min_duration(duration: Duration, config: &ReportConfig) -> bool {
    duration >= config.min_duration
}

/// Compares calendar dates only, so anything starting today still counts.
pub fn is_past(start: NaiveDateTime, config: &ReportConfig) -> bool {
    start.date() < config.today()
}

/// Report entries for a single event; empty when a filter rejects it.
///
/// Recurring events are expanded over `[now, now + window]` and use the
/// defining instance's duration for every occurrence.
pub fn occurrences_for_event(event: &CalendarEvent, config: &ReportConfig) -> Result<Vec<Occurrence>> {
    let start = normalize(&event.start, &config.zone);
    let end = resolve_end(event, start, &config.zone);
    let duration = end - start;

    if !meets_min_duration(duration, config) {
        debug!(summary = %event.summary, minutes = duration.num_minutes(), "Below minimum duration");
        return Ok(Vec::new());
    }

    let Some(rule) = &event.recurrence else {
        if is_past(start, config) {
            debug!(summary = %event.summary, %start, "Event already past");
            return Ok(Vec::new());
        }
        return Ok(vec![Occurrence::new(start, duration, event.summary.as_str())]);
    };

    if rule.has_ended(config) {
        debug!(summary = %event.summary, "Recurrence ended before today");
        return Ok(Vec::new());
    }

    let starts = rule.occurrences_between(start, config.now, config.window_end()?, &config.zone)?;
    if starts.is_empty() {
        debug!(summary = %event.summary, "No occurrence inside the window");
    }

    Ok(starts
        .into_iter()
        .map(|start| Occurrence::new(start, duration, event.summary.as_str()))
        .collect())
}
