use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::time::ClockTime;

/// Failures a caller can act on. Each one leaves the stores untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error("end time {end} must be after start time {start}")]
    InvalidRange { start: ClockTime, end: ClockTime },

    #[error("an entry for {start}〜{end} already exists on {date}")]
    DuplicateEntry {
        date: NaiveDate,
        start: ClockTime,
        end: ClockTime,
    },

    #[error("no entry at position {index} on {date} ({len} entries)")]
    IndexOutOfRange {
        date: NaiveDate,
        index: usize,
        len: usize,
    },

    #[error("entry {id} not found on {date}")]
    EntryNotFound { date: NaiveDate, id: Uuid },

    #[error("invalid clock time '{0}', expected HH:MM between 00:00 and 24:00")]
    InvalidClockTime(String),

    #[error("invalid time range '{0}', expected HH:MM-HH:MM")]
    InvalidTimeRange(String),

    #[error("unknown mood '{0}'")]
    UnknownMood(String),

    #[error("media '{path}' is not attached to {date}")]
    MediaNotFound { date: NaiveDate, path: String },

    #[error("unsupported media type '{0}'")]
    UnsupportedMedia(String),

    #[error("minute {minute} is not a multiple of {step}")]
    MinuteStep { minute: u32, step: u32 },
}

impl PlannerError {
    /// Duplicates are reported as warnings rather than hard errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, PlannerError::DuplicateEntry { .. })
    }
}
