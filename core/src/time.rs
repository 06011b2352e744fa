use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};

use crate::error::PlannerError;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Wall-clock time within a single day, minute precision.
///
/// `24:00` is representable so that a range can end at midnight; it never
/// spills into the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, PlannerError> {
        let valid = minute < 60 && (hour < 24 || (hour == 24 && minute == 0));
        if !valid {
            return Err(PlannerError::InvalidClockTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(ClockTime((hour * 60 + minute) as u16))
    }

    pub fn hour(self) -> u32 {
        (self.0 / MINUTES_PER_HOUR) as u32
    }

    pub fn minute(self) -> u32 {
        (self.0 % MINUTES_PER_HOUR) as u32
    }

    pub fn minute_of_day(self) -> u32 {
        self.0 as u32
    }

    /// Fractional hours since 00:00, e.g. 13:30 -> 13.5.
    pub fn as_hours(self) -> f64 {
        self.0 as f64 / MINUTES_PER_HOUR as f64
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidClockTime(input.to_string());
        let (h, m) = input.trim().split_once(':').ok_or_else(invalid)?;

        // "9:00" is accepted for convenience, minutes are always two digits.
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }

        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        ClockTime::from_hm(hour, minute).map_err(|_| invalid())
    }
}

/// Length of `start..end` in hours. Negative when the range is inverted.
pub fn hours_between(start: ClockTime, end: ClockTime) -> f64 {
    (end.0 as f64 - start.0 as f64) / MINUTES_PER_HOUR as f64
}

/// Resolves a user supplied day relative to `today`.
///
/// Accepts `today`/`tod`, `tomorrow`/`tom`, `yesterday`/`yest`, `+Nd`/`-Nd`,
/// `+Nw`/`-Nw` and ISO `YYYY-MM-DD`.
pub fn parse_human_day(input: &str, today: NaiveDate) -> Result<NaiveDate, anyhow::Error> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if input.starts_with('+') || input.starts_with('-') {
        if let Some(offset) = parse_offset(input) {
            return Ok(today + offset);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Could not parse date: {}", input))
}

fn parse_offset(input: &str) -> Option<Duration> {
    let (sign, rest) = input.split_at(1);
    let unit = rest.chars().last()?;
    let count: i64 = rest[..rest.len() - unit.len_utf8()].parse().ok()?;
    let count = if sign == "-" { -count } else { count };

    match unit.to_ascii_lowercase() {
        'd' => Some(Duration::days(count)),
        'w' => Some(Duration::weeks(count)),
        _ => None,
    }
}
