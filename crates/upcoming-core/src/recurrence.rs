use std::str::FromStr;

use chrono::{NaiveDateTime, TimeZone as _};
use chrono_tz::Tz;
use rrule::{RRule, Unvalidated};

use crate::config::ReportConfig;
use crate::error::{CalendarError, Result};
use crate::temporal::{normalize, CalendarValue};

/// An RRULE value split into the part the expander enforces itself (UNTIL)
/// and the rest, which is handed to `rrule`.
///
/// Expansion runs on reference wall-clock time: the anchor is fed to `rrule`
/// as if it were UTC and read back the same way, so a weekly 10:00 event
/// stays at 10:00 on both sides of a DST change.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    text: String,
    rule: RRule<Unvalidated>,
    until: Option<CalendarValue>,
}

impl RecurrenceRule {
    /// True when the rule carries an UNTIL whose date is before today.
    pub fn has_ended(&self, config: &ReportConfig) -> bool {
        self.until
            .as_ref()
            .is_some_and(|until| normalize(until, &config.zone).date() < config.today())
    }

    /// All occurrence starts in `[from, to]`, in ascending order.
    pub fn occurrences_between(
        &self,
        anchor: NaiveDateTime,
        from: NaiveDateTime,
        to: NaiveDateTime,
        zone: &Tz,
    ) -> Result<Vec<NaiveDateTime>> {
        let until = self.until.as_ref().map(|until| normalize(until, zone));
        let dt_start = rrule::Tz::UTC.from_utc_datetime(&anchor);
        let set = self
            .rule
            .clone()
            .build(dt_start)
            .map_err(|err| CalendarError::Recurrence(format!("{}: {err}", self.text)))?;

        let mut found = Vec::new();
        for occurrence in &set {
            let start = occurrence.naive_utc();
            if start > to || until.is_some_and(|until| start > until) {
                break;
            }
            if start >= from {
                found.push(start);
            }
        }
        Ok(found)
    }
}

impl FromStr for RecurrenceRule {
    type Err = CalendarError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let body = text.strip_prefix("RRULE:").unwrap_or(text);

        let mut until = None;
        let mut kept = Vec::new();
        for (name, value) in split_parts(body) {
            if name.eq_ignore_ascii_case("UNTIL") {
                until = Some(CalendarValue::parse("UNTIL", value, None)?);
            } else {
                kept.push(format!("{}={value}", name.to_ascii_uppercase()));
            }
        }

        let rule = kept
            .join(";")
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| CalendarError::Recurrence(format!("{text}: {err}")))?;

        Ok(Self {
            text: text.to_string(),
            rule,
            until,
        })
    }
}

fn split_parts(body: &str) -> impl Iterator<Item = (&str, &str)> {
    body.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.split_once('=').unwrap_or((part, "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_parts_skips_empty_segments() {
        let parts: Vec<_> = split_parts("FREQ=WEEKLY;;INTERVAL=2;").collect();
        assert_eq!(parts, vec![("FREQ", "WEEKLY"), ("INTERVAL", "2")]);
    }

    #[test]
    fn until_is_lifted_out_of_the_rule() {
        let rule: RecurrenceRule = "FREQ=DAILY;UNTIL=20240301T120000Z;INTERVAL=3"
            .parse()
            .expect("parse rule");
        assert!(matches!(rule.until.as_ref(), Some(CalendarValue::Zoned(_))));
    }

    #[test]
    fn date_only_until_is_accepted() {
        let rule: RecurrenceRule = "RRULE:FREQ=WEEKLY;UNTIL=20240301".parse().expect("parse rule");
        assert_eq!(
            rule.until.as_ref(),
            Some(&CalendarValue::Date(
                chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
            ))
        );
    }
}
