//! Command-line surface and date handling.

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};

use crate::stats::QueryRange;

#[derive(Parser, Debug)]
#[command(name = "netavail")]
#[command(about = "Device availability reports from a LibreNMS-style monitoring API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Exact per-device availability over a date range, from outage windows
    Range {
        /// Start date, DD-MM-YYYY (from 00:00:00 UTC)
        start: String,
        /// End date, DD-MM-YYYY (inclusive through 23:59:59 UTC)
        end: String,
    },
    /// Interactive daily/total report averaged from availability samples
    Daily,
}

/// Parse a DD-MM-YYYY date into a UTC epoch second, at the start or the
/// end (23:59:59) of that day.
pub fn date_to_epoch(s: &str, end_of_day: bool) -> Result<i64, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(s, "%d-%m-%Y")?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time")
    } else {
        NaiveTime::MIN
    };
    Ok(Utc.from_utc_datetime(&date.and_time(time)).timestamp())
}

/// Build the inclusive epoch range for the exact-range mode.
pub fn parse_range(start: &str, end: &str) -> Result<QueryRange, chrono::ParseError> {
    Ok(QueryRange {
        start: date_to_epoch(start, false)?,
        end: date_to_epoch(end, true)?,
    })
}

/// Prompt on stdout and read lines from stdin until a valid YYYY-MM-DD
/// date is entered.
pub fn prompt_date(prompt: &str) -> io::Result<NaiveDate> {
    let stdin = io::stdin();
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }

        match NaiveDate::parse_from_str(line.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => println!("Invalid date format. Use YYYY-MM-DD (e.g. 2024-01-01)"),
        }
    }
}

/// Yes/no prompt; "s" (sí) confirms, anything else declines.
pub fn prompt_continue(prompt: &str) -> io::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("s"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_epoch_start_of_day() {
        // 01-03-2024 00:00:00 UTC
        assert_eq!(date_to_epoch("01-03-2024", false).unwrap(), 1_709_251_200);
    }

    #[test]
    fn test_date_to_epoch_end_of_day() {
        assert_eq!(
            date_to_epoch("01-03-2024", true).unwrap(),
            1_709_251_200 + 86_399
        );
    }

    #[test]
    fn test_date_to_epoch_rejects_wrong_format() {
        assert!(date_to_epoch("2024-03-01", false).is_err());
        assert!(date_to_epoch("32-01-2024", false).is_err());
    }

    #[test]
    fn test_parse_range_spans_full_days() {
        let range = parse_range("01-03-2024", "02-03-2024").unwrap();
        assert_eq!(range.duration(), 2 * 86_400 - 1);
    }
}
