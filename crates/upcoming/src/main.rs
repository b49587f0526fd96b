use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use chrono_tz::Tz;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use upcoming_core::config::{
    ReportConfig, DEFAULT_CALENDAR_PATH, DEFAULT_MIN_DURATION_HOURS, DEFAULT_WINDOW_DAYS,
};
use upcoming_core::temporal::parse_tzid;

const MAX_MIN_HOURS: i64 = 24 * 366;
const MAX_WINDOW_DAYS: i64 = 36_500;

/// List upcoming calendar events of a minimum length, one line per occurrence
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Calendar file in iCalendar (.ics) format
    #[arg(default_value = DEFAULT_CALENDAR_PATH)]
    path: PathBuf,

    /// Reference timezone used to read and print all times
    #[arg(long, default_value = "Europe/Berlin", value_parser = parse_timezone)]
    timezone: Tz,

    /// Shortest event duration to report, in hours
    #[arg(
        long,
        default_value_t = DEFAULT_MIN_DURATION_HOURS,
        value_parser = clap::value_parser!(u32).range(0..=MAX_MIN_HOURS)
    )]
    min_hours: u32,

    /// How far ahead recurring events are expanded, in days
    #[arg(
        long,
        default_value_t = DEFAULT_WINDOW_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=MAX_WINDOW_DAYS)
    )]
    window_days: u32,

    /// Fixed reference wall-clock time instead of the system clock
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        let config = match self.now {
            Some(now) => ReportConfig::new(self.timezone, now),
            None => ReportConfig::at_system_time(self.timezone),
        };
        config
            .with_min_duration(Duration::hours(i64::from(self.min_hours)))
            .with_window(Duration::days(i64::from(self.window_days)))
    }
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    parse_tzid(value).map_err(|err| err.to_string())
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|err| format!("expected YYYY-MM-DDTHH:MM:SS: {err}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.report_config();

    let report = upcoming_core::run(&cli.path, &config)
        .with_context(|| format!("failed to build report from {}", cli.path.display()))?;

    report
        .write_to(std::io::stdout().lock())
        .context("failed to write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_behaviour() {
        let cli = Cli::try_parse_from(["upcoming"]).expect("parse defaults");
        assert_eq!(cli.path, PathBuf::from("cal.ics"));
        assert_eq!(cli.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(cli.min_hours, 4);
        assert_eq!(cli.window_days, 365);
        assert!(cli.now.is_none());
    }

    #[test]
    fn fixed_now_flows_into_config() {
        let cli = Cli::try_parse_from([
            "upcoming",
            "other.ics",
            "--timezone",
            "Europe/London",
            "--min-hours",
            "2",
            "--now",
            "2024-01-10T12:00:00",
        ])
        .expect("parse args");

        let config = cli.report_config();
        assert_eq!(config.zone, chrono_tz::Europe::London);
        assert_eq!(config.min_duration, Duration::hours(2));
        assert_eq!(config.window, Duration::days(365));
        assert_eq!(config.now.to_string(), "2024-01-10 12:00:00");
    }

    #[test]
    fn rejects_unknown_timezone() {
        let err = Cli::try_parse_from(["upcoming", "--timezone", "Mars/Olympus"]).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn rejects_out_of_range_window() {
        assert!(Cli::try_parse_from(["upcoming", "--window-days", "0"]).is_err());
        assert!(Cli::try_parse_from(["upcoming", "--window-days", "36501"]).is_err());
        assert!(Cli::try_parse_from(["upcoming", "--window-days", "4294967295"]).is_err());

        let cli = Cli::try_parse_from(["upcoming", "--window-days", "36500"]).expect("upper bound");
        assert!(cli.report_config().window_end().is_ok());
    }

    #[test]
    fn rejects_out_of_range_min_hours() {
        assert!(Cli::try_parse_from(["upcoming", "--min-hours", "4294967295"]).is_err());
    }
}
