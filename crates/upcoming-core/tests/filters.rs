use chrono::{Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Europe::Berlin;
use upcoming_core::filters::{is_past, meets_min_duration, occurrences_for_event, resolve_end};
use upcoming_core::{CalendarEvent, CalendarValue, ReportConfig};

fn parse_naive(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").expect("parse timestamp")
}

fn config() -> ReportConfig {
    ReportConfig::new(Berlin, parse_naive("2024-01-10 12:00:00"))
}

fn floating_event(summary: &str, start: &str, end: Option<&str>) -> CalendarEvent {
    CalendarEvent {
        summary: summary.to_string(),
        start: CalendarValue::Floating(parse_naive(start)),
        end: end.map(|end| CalendarValue::Floating(parse_naive(end))),
        recurrence: None,
    }
}

#[test]
fn exactly_four_hours_is_kept() {
    let event = floating_event("Hike", "2024-02-01 08:00:00", Some("2024-02-01 12:00:00"));
    let occurrences = occurrences_for_event(&event, &config()).expect("filter");
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].duration, Duration::hours(4));
}

#[test]
fn just_under_four_hours_is_dropped() {
    let event = floating_event("Coffee", "2024-02-01 08:00:00", Some("2024-02-01 11:59:00"));
    assert!(occurrences_for_event(&event, &config()).expect("filter").is_empty());
    assert!(!meets_min_duration(Duration::minutes(239), &config()));
    assert!(meets_min_duration(Duration::minutes(240), &config()));
}

#[test]
fn missing_end_defaults_to_one_day() {
    let event = CalendarEvent {
        summary: "Holiday".to_string(),
        start: CalendarValue::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
        end: None,
        recurrence: None,
    };
    let start = parse_naive("2024-02-01 00:00:00");
    let end = resolve_end(&event, start, &Berlin);
    assert_eq!(end, parse_naive("2024-02-02 00:00:00"));

    let occurrences = occurrences_for_event(&event, &config()).expect("filter");
    assert_eq!(occurrences[0].duration, Duration::hours(24));
}

#[test]
fn explicit_end_is_normalized_like_the_start() {
    let event = CalendarEvent {
        summary: "Flight".to_string(),
        start: CalendarValue::parse("DTSTART", "20240201T070000Z", None).expect("start"),
        end: Some(CalendarValue::parse("DTEND", "20240201T120000Z", None).expect("end")),
        recurrence: None,
    };
    let start = parse_naive("2024-02-01 08:00:00");
    assert_eq!(resolve_end(&event, start, &Berlin), parse_naive("2024-02-01 13:00:00"));
}

#[test]
fn yesterday_is_excluded() {
    let event = floating_event("Old", "2024-01-09 20:00:00", None);
    assert!(is_past(parse_naive("2024-01-09 20:00:00"), &config()));
    assert!(occurrences_for_event(&event, &config()).expect("filter").is_empty());
}

#[test]
fn earlier_today_is_included() {
    let event = floating_event("Morning shift", "2024-01-10 06:00:00", Some("2024-01-10 11:00:00"));
    assert!(!is_past(parse_naive("2024-01-10 06:00:00"), &config()));

    let occurrences = occurrences_for_event(&event, &config()).expect("filter");
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].start, parse_naive("2024-01-10 06:00:00"));
    assert_eq!(occurrences[0].week_label(), "KW02");
}

#[test]
fn custom_minimum_duration_is_honoured() {
    let config = config().with_min_duration(Duration::hours(1));
    let event = floating_event("Lunch", "2024-02-01 12:00:00", Some("2024-02-01 13:00:00"));
    assert_eq!(occurrences_for_event(&event, &config).expect("filter").len(), 1);
}
