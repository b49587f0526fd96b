// crates/upcoming-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Failed to read calendar file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Calendar document could not be parsed: {0}")]
    Parse(String),

    #[error("Event is missing required property {0}")]
    MissingProperty(&'static str),

    #[error("Invalid {property} value '{value}'")]
    InvalidValue { property: &'static str, value: String },

    #[error("Unknown timezone identifier '{0}'")]
    UnknownTimezone(String),

    #[error("Recurrence rule rejected: {0}")]
    Recurrence(String),

    #[error("Window of {days} days from {now} ends outside the supported date range")]
    WindowOutOfRange { now: chrono::NaiveDateTime, days: i64 },
}

pub type Result<T> = std::result::Result<T, CalendarError>;
