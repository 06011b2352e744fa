use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::time::{hours_between, ClockTime};

/// Sort key used for records that have no usable start time.
pub const FALLBACK_SORT_KEY: &str = "00:00";

/// On-disk shape: ISO date -> entries, in storage order.
pub type ScheduleBook = BTreeMap<String, Vec<ScheduleEntry>>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    // Persisted data carries no identifier, one is handed out per session.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub activity: String,

    // Kept as raw strings so that legacy and hand-edited records survive a
    // load/save cycle untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Legacy combined `"HH:MM-HH:MM"` range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScheduleEntry {
    pub fn new(activity: &str, start: ClockTime, end: ClockTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            activity: activity.trim().to_string(),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            duration: Some(hours_between(start, end)),
            time_range: None,
            extra: Map::new(),
        }
    }

    pub fn sort_key(&self) -> &str {
        self.start.as_deref().unwrap_or(FALLBACK_SORT_KEY)
    }

    /// Parsed `(start, end)`, if both fields hold valid clock times.
    pub fn clock_range(&self) -> Option<(ClockTime, ClockTime)> {
        let start = self.start.as_deref()?.parse().ok()?;
        let end = self.end.as_deref()?.parse().ok()?;
        Some((start, end))
    }

    pub fn has_range(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start.as_deref() == Some(start.to_string().as_str())
            && self.end.as_deref() == Some(end.to_string().as_str())
    }

    /// Hours derived from the stored range, falling back to the persisted value.
    pub fn duration_hours(&self) -> f64 {
        match self.clock_range() {
            Some((start, end)) => hours_between(start, end),
            None => self.duration.unwrap_or(0.0),
        }
    }

    pub fn needs_migration(&self) -> bool {
        self.time_range.is_some() && (self.start.is_none() || self.end.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_entry_derives_fields() {
        let entry = ScheduleEntry::new("  Study ", "01:30".parse().unwrap(), "02:00".parse().unwrap());
        assert_eq!(entry.activity, "Study");
        assert_eq!(entry.start.as_deref(), Some("01:30"));
        assert_eq!(entry.end.as_deref(), Some("02:00"));
        assert_eq!(entry.duration, Some(0.5));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = ScheduleEntry::new("Run", "06:00".parse().unwrap(), "07:00".parse().unwrap());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({ "activity": "Run", "start": "06:00", "end": "07:00", "duration": 1.0 })
        );
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({ "activity": "Read", "time_range": "garbled", "color": "red" });
        let entry: ScheduleEntry = serde_json::from_value(raw.clone()).unwrap();
        assert!(entry.needs_migration());
        assert_eq!(entry.sort_key(), FALLBACK_SORT_KEY);
        assert_eq!(entry.clock_range(), None);
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }
}
