use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::tui::app::{App, InputMode, MessageLevel};
use crate::tui::chart::{draw_chart, segment_color};

const ACTIVITY_WIDTH: usize = 24;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Header, content, input line, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(55),
        ])
        .split(main_chunks[1]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(7),
        ])
        .split(content_chunks[0]);

    draw_entry_list(f, app, left_chunks[0]);
    draw_journal(f, app, left_chunks[1]);
    draw_chart(f, &app.view.segments, &app.view.ticks, content_chunks[1]);
    draw_input(f, app, main_chunks[2]);

    let footer = Paragraph::new("h/l: Day | [/]: Booked day | t: Today | j/k: Select | a: Add | d: Delete | m: Mood | e: Diary | f: Fortune | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mood = app.view.mood.map(|m| m.stamp()).unwrap_or("·");
    let title = format!(
        "PLANNER  {} ({})  {}  {:.2} hours booked",
        app.view.date.format("%Y-%m-%d"),
        app.view.date.format("%a"),
        mood,
        app.view.total_hours,
    );
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_entry_list(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().title(" Schedule ").borders(Borders::ALL).border_type(BorderType::Rounded);

    if app.view.entries.is_empty() {
        let empty = Paragraph::new("No schedule for this day yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Chart colors follow list order since both come sorted by start.
    let mut color_index = 0;
    let rows: Vec<Row> = app.view.entries.iter().map(|entry| {
        let style = if entry.on_chart {
            let style = Style::default().fg(segment_color(color_index));
            color_index += 1;
            style
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Row::new(vec![
            Span::raw(format!("{}.", entry.number)),
            Span::styled(truncate_to_width(&entry.activity, ACTIVITY_WIDTH), style.add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}〜{}", entry.start, entry.end)),
            Span::raw(format!("{:.2}h", entry.duration)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),  // Number
            Constraint::Min(10),    // Activity
            Constraint::Length(12), // Range
            Constraint::Length(7),  // Hours
        ]
    )
    .header(Row::new(vec!["#", "Activity", "Time", "Hours"]).style(Style::default().fg(Color::Yellow)))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_journal(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled("Mood: ", Style::default().fg(Color::Blue)),
        Span::raw(app.view.mood.map(|m| m.to_string()).unwrap_or_else(|| "not set".to_string())),
    ])];

    if app.view.diary.is_empty() {
        lines.push(Line::from(Span::styled("No diary entry yet.", Style::default().fg(Color::DarkGray))));
    } else {
        lines.push(Line::from(app.view.diary.as_str()));
    }

    if !app.view.media.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} media attached", app.view.media.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let journal = Paragraph::new(lines)
        .block(Block::default().title(" Diary ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .wrap(Wrap { trim: true });
    f.render_widget(journal, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, text, style) = match app.input_mode {
        InputMode::Adding => (" Add: HH:MM-HH:MM Activity ", app.input.clone(), Style::default().fg(Color::Yellow)),
        InputMode::Diary => (" Diary ", app.input.clone(), Style::default().fg(Color::Yellow)),
        InputMode::Normal => {
            let (text, color) = match &app.message {
                Some((MessageLevel::Info, text)) => (text.clone(), Color::Green),
                Some((MessageLevel::Warning, text)) => (format!("⚠ {}", text), Color::Yellow),
                Some((MessageLevel::Error, text)) => (text.clone(), Color::Red),
                None => (String::new(), Color::White),
            };
            (" Status ", text, Style::default().fg(color))
        }
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if !matches!(app.input_mode, InputMode::Normal) {
        let offset: usize = app.input.chars().take(app.cursor_position).map(|c| c.width().unwrap_or(0)).sum();
        f.set_cursor_position(Position::new(area.x + 1 + offset as u16, area.y + 1));
    }
}

/// Cuts `text` to at most `max` terminal columns, marking the cut with `…`.
fn truncate_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
