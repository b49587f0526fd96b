use std::path::Path;

use tracing::info;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::filters::occurrences_for_event;
use crate::loader::{load_calendar, LoadedCalendar, SkippedEvent};
use crate::report::Report;

/// Loads `path` and builds the sorted report.
pub fn run(path: &Path, config: &ReportConfig) -> Result<Report> {
    config.window_end()?;
    let calendar = load_calendar(path)?;
    Ok(build_report(calendar, config))
}

pub fn build_report(calendar: LoadedCalendar, config: &ReportConfig) -> Report {
    let LoadedCalendar { events, skipped } = calendar;
    let mut report = Report {
        occurrences: Vec::new(),
        skipped,
    };

    for event in &events {
        match occurrences_for_event(event, config) {
            Ok(occurrences) => report.occurrences.extend(occurrences),
            Err(err) => report.skipped.push(SkippedEvent::new(event.summary.as_str(), &err)),
        }
    }

    report.sort();

    info!(
        events = events.len(),
        recurring = events.iter().filter(|event| event.is_recurring()).count(),
        occurrences = report.occurrences.len(),
        skipped = report.skipped.len(),
        now = %config.now,
        zone = %config.zone,
        "Built upcoming events report"
    );
    report
}
