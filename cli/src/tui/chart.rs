use planner_core::{to_cartesian, AxisTick, ChartSegment};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Circle, Line},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

pub const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
];

const TICK_INNER: f64 = 0.92;
const LABEL_RADIUS: f64 = 1.18;
const MARGIN: f64 = 1.35;
// Radians between the spokes that fill a bar.
const FILL_STEP: f64 = 0.004;

pub fn segment_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Polar bar chart: 00:00 at the top, clockwise, every bar at unit radius.
pub fn draw_chart(f: &mut Frame, segments: &[ChartSegment], ticks: &[AxisTick], area: Rect) {
    let block = Block::default()
        .title(" 24h ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if segments.is_empty() {
        let placeholder = Paragraph::new("No schedule for this day yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    // Terminal cells are about twice as tall as wide; widen x so the dial stays round.
    let cols = area.width.saturating_sub(2).max(1) as f64;
    let rows = area.height.saturating_sub(2).max(1) as f64;
    let x_extent = (MARGIN * cols / (rows * 2.0)).max(MARGIN);
    let y_extent = (MARGIN * rows * 2.0 / cols).max(MARGIN);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|ctx| {
            for (i, segment) in segments.iter().enumerate() {
                let color = segment_color(i);
                let steps = (segment.angular_width / FILL_STEP).ceil().max(1.0) as usize;
                for step in 0..=steps {
                    let angle = segment.start_angle + segment.angular_width * step as f64 / steps as f64;
                    let (x, y) = to_cartesian(angle, segment.radial_height);
                    ctx.draw(&Line { x1: 0.0, y1: 0.0, x2: x, y2: y, color });
                }
            }
            ctx.layer();

            ctx.draw(&Circle { x: 0.0, y: 0.0, radius: 1.0, color: Color::DarkGray });
            for (i, tick) in ticks.iter().enumerate() {
                let (x1, y1) = to_cartesian(tick.angle, TICK_INNER);
                let (x2, y2) = to_cartesian(tick.angle, 1.0);
                ctx.draw(&Line { x1, y1, x2, y2, color: Color::Gray });

                // Every tick is drawn; labels every third hour keep the dial legible.
                if i % 3 == 0 {
                    let (x, y) = to_cartesian(tick.angle, LABEL_RADIUS);
                    let x = x - tick.label.len() as f64 * x_extent / cols;
                    ctx.print(x, y, TextLine::from(Span::styled(tick.label.clone(), Style::default().fg(Color::White))));
                }
            }
        });

    f.render_widget(canvas, area);
}
