use planner_core::ChartSegment;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "Activity")]
    label: String,
    #[tabled(rename = "Start (°)")]
    start: String,
    #[tabled(rename = "Width (°)")]
    width: String,
    #[tabled(rename = "Start (rad)")]
    start_rad: String,
    #[tabled(rename = "Width (rad)")]
    width_rad: String,
}

#[derive(Tabled)]
struct MediaRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Path")]
    path: String,
}

/// Chart geometry as a table; degrees are measured clockwise from 00:00 at the top.
pub fn chart_table(segments: &[ChartSegment]) -> String {
    let rows: Vec<SegmentRow> = segments
        .iter()
        .map(|s| SegmentRow {
            label: s.label.clone(),
            start: format!("{:.1}", s.start_angle.to_degrees()),
            width: format!("{:.1}", s.angular_width.to_degrees()),
            start_rad: format!("{:.4}", s.start_angle),
            width_rad: format!("{:.4}", s.angular_width),
        })
        .collect();
    styled(Table::new(rows))
}

pub fn media_table(paths: &[String]) -> String {
    let rows: Vec<MediaRow> = paths
        .iter()
        .enumerate()
        .map(|(i, path)| MediaRow {
            number: i + 1,
            kind: media_kind(path),
            path: path.clone(),
        })
        .collect();
    styled(Table::new(rows))
}

fn media_kind(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if [".png", ".jpg", ".jpeg"].iter().any(|ext| lower.ends_with(ext)) {
        "image"
    } else if [".mp4", ".mov"].iter().any(|ext| lower.ends_with(ext)) {
        "video"
    } else {
        "other"
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table.to_string()
}
