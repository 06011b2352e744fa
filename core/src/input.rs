use anyhow::{anyhow, Result};

use crate::error::PlannerError;
use crate::time::ClockTime;

/// Splits a combined `"start-end"` range on its single `-` separator.
pub fn split_range(raw: &str) -> Option<(&str, &str)> {
    let mut parts = raw.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => Some((start.trim(), end.trim())),
        _ => None,
    }
}

/// Parses `"09:00-10:30"` into a pair of clock times. Ordering is not checked.
pub fn parse_time_range(raw: &str) -> Result<(ClockTime, ClockTime), PlannerError> {
    let (start, end) =
        split_range(raw).ok_or_else(|| PlannerError::InvalidTimeRange(raw.to_string()))?;
    Ok((start.parse()?, end.parse()?))
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    let key = key.to_lowercase();

    // 1. Exact match
    if candidates.contains(&key.as_str()) {
        return Ok(key);
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(&key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}
