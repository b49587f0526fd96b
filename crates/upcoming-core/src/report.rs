use std::fmt;
use std::io::{self, Write};

use chrono::{Datelike, Duration, NaiveDateTime};

use crate::loader::SkippedEvent;

/// One concrete instance of an event that made it into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub start: NaiveDateTime,
    pub duration: Duration,
    pub summary: String,
    pub iso_week: u32,
}

impl Occurrence {
    pub fn new(start: NaiveDateTime, duration: Duration, summary: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            summary: summary.into(),
            iso_week: start.date().iso_week().week(),
        }
    }

    pub fn week_label(&self) -> String {
        format!("KW{:02}", self.iso_week)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.week_label(),
            self.start.date().format("%Y-%m-%d"),
            self.summary
        )
    }
}

#[derive(Debug, Default)]
pub struct Report {
    pub occurrences: Vec<Occurrence>,
    pub skipped: Vec<SkippedEvent>,
}

impl Report {
    /// Stable sort by start; equal starts keep encounter order.
    pub fn sort(&mut self) {
        self.occurrences.sort_by_key(|occurrence| occurrence.start);
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.occurrences.iter().map(Occurrence::to_string)
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
