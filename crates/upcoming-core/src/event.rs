use ical::parser::ical::component::IcalEvent;
use ical::property::Property;

use crate::error::{CalendarError, Result};
use crate::recurrence::RecurrenceRule;
use crate::temporal::CalendarValue;

/// One VEVENT, reduced to the properties the report needs.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: CalendarValue,
    pub end: Option<CalendarValue>,
    pub recurrence: Option<RecurrenceRule>,
}

impl CalendarEvent {
    pub fn from_ical(event: &IcalEvent) -> Result<Self> {
        let summary = event_summary(event);

        let start = find_property(event, "DTSTART")
            .ok_or(CalendarError::MissingProperty("DTSTART"))
            .and_then(|property| CalendarValue::from_property("DTSTART", property))?;

        let end = find_property(event, "DTEND")
            .map(|property| CalendarValue::from_property("DTEND", property))
            .transpose()?;

        let recurrence = find_property(event, "RRULE")
            .and_then(|property| property.value.as_deref())
            .map(str::parse::<RecurrenceRule>)
            .transpose()?;

        Ok(Self {
            summary,
            start,
            end,
            recurrence,
        })
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

/// SUMMARY text with iCalendar escapes removed; empty when absent.
pub fn event_summary(event: &IcalEvent) -> String {
    find_property(event, "SUMMARY")
        .and_then(|property| property.value.as_deref())
        .map(unescape_text)
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn find_property<'a>(event: &'a IcalEvent, name: &str) -> Option<&'a Property> {
    event
        .properties
        .iter()
        .find(|property| property.name.eq_ignore_ascii_case(name))
}

fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
