use serde::Serialize;
use uuid::Uuid;

use crate::model::schedule::ScheduleEntry;

const MISSING_TIME: &str = "--:--";

/// A schedule entry as shown to the user, numbered by its sorted position.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryDto {
    pub id: Uuid,
    /// 1-based position in the day's sorted list.
    pub number: usize,
    pub activity: String,
    pub start: String,
    pub end: String,
    pub duration: f64,
    /// Whether the entry has a readable range and so appears on the chart.
    pub on_chart: bool,
}

impl EntryDto {
    pub fn from_entity(index: usize, entry: &ScheduleEntry) -> Self {
        Self {
            id: entry.id,
            number: index + 1,
            activity: entry.activity.clone(),
            start: entry.start.clone().unwrap_or_else(|| MISSING_TIME.to_string()),
            end: entry.end.clone().unwrap_or_else(|| MISSING_TIME.to_string()),
            duration: entry.duration_hours(),
            on_chart: entry.clock_range().is_some(),
        }
    }

    /// Index to hand back to `remove_at`.
    pub fn sorted_index(&self) -> usize {
        self.number - 1
    }

    pub fn display_line(&self) -> String {
        format!(
            "{}. {} - {}〜{} ({:.2} hours)",
            self.number, self.activity, self.start, self.end, self.duration
        )
    }
}
