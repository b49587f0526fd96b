use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SubsecRound, TimeZone};
use chrono_tz::Tz;
use ical::property::Property;

use crate::error::{CalendarError, Result};

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A DTSTART/DTEND/UNTIL value as written in the calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarValue {
    /// All-day value (`VALUE=DATE`).
    Date(NaiveDate),
    /// Local time with no zone; read as reference wall clock.
    Floating(NaiveDateTime),
    /// UTC (`Z` suffix) or `TZID=` qualified time.
    Zoned(DateTime<Tz>),
}

impl CalendarValue {
    /// Decodes a raw iCalendar date or date-time string.
    ///
    /// `tzid` is the `TZID` parameter of the property, if any. It is ignored
    /// for UTC and date-only values.
    pub fn parse(property: &'static str, raw: &str, tzid: Option<&str>) -> Result<Self> {
        let raw = raw.trim();
        let invalid = || CalendarError::InvalidValue {
            property,
            value: raw.to_string(),
        };

        if !raw.contains('T') {
            let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;
            return Ok(Self::Date(date));
        }

        if let Some(utc) = raw.strip_suffix('Z') {
            let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).map_err(|_| invalid())?;
            return Ok(Self::Zoned(chrono_tz::UTC.from_utc_datetime(&naive)));
        }

        let naive = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).map_err(|_| invalid())?;
        match tzid {
            Some(tzid) => {
                let zone = parse_tzid(tzid)?;
                let zoned = resolve_local(&zone, naive).ok_or_else(invalid)?;
                Ok(Self::Zoned(zoned))
            }
            None => Ok(Self::Floating(naive)),
        }
    }

    pub fn from_property(name: &'static str, property: &Property) -> Result<Self> {
        let value = property
            .value
            .as_deref()
            .ok_or(CalendarError::MissingProperty(name))?;
        Self::parse(name, value, param(property, "TZID"))
    }
}

/// Canonical reference wall-clock time for a calendar value.
///
/// Zoned values are converted into `zone` and the zone is dropped; date and
/// floating values are taken as already being `zone` wall clock.
pub fn normalize(value: &CalendarValue, zone: &Tz) -> NaiveDateTime {
    let local = match value {
        CalendarValue::Date(date) => date.and_time(chrono::NaiveTime::MIN),
        CalendarValue::Floating(naive) => *naive,
        CalendarValue::Zoned(zoned) => zoned.with_timezone(zone).naive_local(),
    };
    local.trunc_subsecs(0)
}

/// Resolves a TZID parameter to a zone.
///
/// Accepts IANA names and the Windows names Outlook and Exchange write
/// (`W. Europe Standard Time`).
pub fn parse_tzid(tzid: &str) -> Result<Tz> {
    let name = tzid.trim().trim_matches('"');
    name.parse::<Tz>()
        .ok()
        .or_else(|| windows_zone(name))
        .ok_or_else(|| CalendarError::UnknownTimezone(name.to_string()))
}

/// Windows zone name to the IANA zone of its primary territory (CLDR
/// `windowsZones`, territory 001).
fn windows_zone(name: &str) -> Option<Tz> {
    use chrono_tz::{America, Asia, Australia, Europe, Pacific};

    let zone = match name {
        "UTC" | "Coordinated Universal Time" => chrono_tz::UTC,
        "GMT Standard Time" => Europe::London,
        "Greenwich Standard Time" => chrono_tz::Atlantic::Reykjavik,
        "W. Europe Standard Time" => Europe::Berlin,
        "Central Europe Standard Time" => Europe::Budapest,
        "Central European Standard Time" => Europe::Warsaw,
        "Romance Standard Time" => Europe::Paris,
        "E. Europe Standard Time" => Europe::Chisinau,
        "FLE Standard Time" => Europe::Helsinki,
        "GTB Standard Time" => Europe::Bucharest,
        "Turkey Standard Time" => Europe::Istanbul,
        "Russian Standard Time" => Europe::Moscow,
        "Israel Standard Time" => Asia::Jerusalem,
        "Arabian Standard Time" => Asia::Dubai,
        "India Standard Time" => Asia::Kolkata,
        "China Standard Time" => Asia::Shanghai,
        "Singapore Standard Time" => Asia::Singapore,
        "Tokyo Standard Time" => Asia::Tokyo,
        "Korea Standard Time" => Asia::Seoul,
        "AUS Eastern Standard Time" => Australia::Sydney,
        "E. Australia Standard Time" => Australia::Brisbane,
        "Cen. Australia Standard Time" => Australia::Adelaide,
        "W. Australia Standard Time" => Australia::Perth,
        "New Zealand Standard Time" => Pacific::Auckland,
        "Hawaiian Standard Time" => Pacific::Honolulu,
        "Alaskan Standard Time" => America::Anchorage,
        "Pacific Standard Time" => America::Los_Angeles,
        "Mountain Standard Time" => America::Denver,
        "US Mountain Standard Time" => America::Phoenix,
        "Central Standard Time" => America::Chicago,
        "Eastern Standard Time" => America::New_York,
        "Atlantic Standard Time" => America::Halifax,
        "Newfoundland Standard Time" => America::St_Johns,
        "E. South America Standard Time" => America::Sao_Paulo,
        "Argentina Standard Time" => America::Argentina::Buenos_Aires,
        "Pacific SA Standard Time" => America::Santiago,
        "Central Standard Time (Mexico)" => America::Mexico_City,
        _ => return None,
    };
    Some(zone)
}

fn param<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

fn resolve_local(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        // fall-back overlap: keep the first (daylight) reading
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // spring-forward gap: the wall clock has already jumped ahead
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}
