//! Geometry for the 24-hour clock-face chart.
//!
//! Angles are in radians with 0 at the top (00:00) and increase clockwise,
//! one full turn per day.

use std::f64::consts::TAU;

use log::debug;
use serde::Serialize;

use crate::model::schedule::ScheduleEntry;
use crate::time::ClockTime;

pub const HOURS_PER_TURN: u32 = 24;

/// Every bar is drawn at unit height; only the angle carries information.
pub const BAR_HEIGHT: f64 = 1.0;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartSegment {
    pub label: String,
    pub start_angle: f64,
    pub angular_width: f64,
    pub radial_height: f64,
}

impl ChartSegment {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.angular_width
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub angle: f64,
    pub label: String,
}

pub fn clock_angle(time: ClockTime) -> f64 {
    (time.hour() as f64 + time.minute() as f64 / 60.0) / HOURS_PER_TURN as f64 * TAU
}

/// One segment per entry, in input order. Entries without a readable
/// start/end are skipped.
pub fn to_chart_segments<'a, I>(entries: I) -> Vec<ChartSegment>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let Some((start, end)) = entry.clock_range() else {
                debug!("no chart segment for '{}': unreadable range", entry.activity);
                return None;
            };
            let start_angle = clock_angle(start);
            Some(ChartSegment {
                label: entry.activity.clone(),
                start_angle,
                angular_width: clock_angle(end) - start_angle,
                radial_height: BAR_HEIGHT,
            })
        })
        .collect()
}

/// Fixed hour ticks: `0:00` at the top through `23:00`.
pub fn axis_ticks() -> Vec<AxisTick> {
    (0..HOURS_PER_TURN)
        .map(|i| AxisTick {
            angle: i as f64 * TAU / HOURS_PER_TURN as f64,
            label: format!("{}:00", i),
        })
        .collect()
}

/// Chart polar coordinates to screen-style x/y (y up, 0 rad pointing up).
pub fn to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn entry(activity: &str, start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry::new(activity, start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn test_segment_from_midnight() {
        let segments = to_chart_segments(&[entry("Sleep", "00:00", "06:00")]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, "Sleep");
        assert_eq!(segments[0].start_angle, 0.0);
        assert_relative_eq!(segments[0].angular_width, FRAC_PI_2);
        assert_relative_eq!(segments[0].angular_width, 1.5708, epsilon = 1e-4);
        assert_eq!(segments[0].radial_height, 1.0);
    }

    #[test]
    fn test_segment_ending_at_midnight() {
        let segments = to_chart_segments(&[entry("Wind down", "23:00", "24:00")]);
        assert_relative_eq!(segments[0].start_angle, 23.0 / 24.0 * TAU, epsilon = 1e-12);
        assert_relative_eq!(segments[0].angular_width, TAU / 24.0, epsilon = 1e-12);
        assert_relative_eq!(segments[0].end_angle(), TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_minutes_contribute_fractionally() {
        let segments = to_chart_segments(&[entry("Tea", "13:30", "13:45")]);
        assert_relative_eq!(segments[0].start_angle, 13.5 / 24.0 * TAU, epsilon = 1e-12);
        assert_relative_eq!(segments[0].angular_width, 0.25 / 24.0 * TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_preserves_input_order_and_skips_unreadable() {
        let mut legacy = entry("Legacy", "00:00", "01:00");
        legacy.start = None;
        legacy.time_range = Some("garbled".to_string());

        let entries = vec![entry("Late", "20:00", "21:00"), legacy, entry("Early", "05:00", "06:00")];
        let labels: Vec<String> = to_chart_segments(&entries)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["Late", "Early"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(to_chart_segments(&Vec::<ScheduleEntry>::new()).is_empty());
    }

    #[test]
    fn test_axis_ticks() {
        let ticks = axis_ticks();
        assert_eq!(ticks.len(), 24);
        assert_eq!(ticks[0].label, "0:00");
        assert_eq!(ticks[0].angle, 0.0);
        assert_eq!(ticks[23].label, "23:00");
        assert_relative_eq!(ticks[6].angle, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_to_cartesian_is_clockwise_from_top() {
        let (x, y) = to_cartesian(0.0, 1.0);
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 1.0);

        // 06:00 points right, 18:00 points left.
        let (x, y) = to_cartesian(FRAC_PI_2, 1.0);
        assert_relative_eq!(x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        let (x, _) = to_cartesian(3.0 * FRAC_PI_2, 1.0);
        assert_relative_eq!(x, -1.0, epsilon = 1e-12);
    }
}
