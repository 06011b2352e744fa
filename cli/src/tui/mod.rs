pub mod app;
pub mod chart;
pub mod ui;

use std::io;
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use planner_core::{
    FileJournalRepository, FileScheduleRepository, JournalService, ScheduleService, Settings,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::{App, InputMode};

pub fn run(
    schedule: ScheduleService<FileScheduleRepository>,
    journal: JournalService<FileJournalRepository>,
    settings: Settings,
    date: NaiveDate,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(schedule, journal, settings, date);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                        KeyCode::Char('t') => app.today(),
                        KeyCode::Char(']') => app.next_booked_day(),
                        KeyCode::Char('[') => app.previous_booked_day(),
                        KeyCode::Char('a') => app.enter_add_mode(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_entry(),
                        KeyCode::Char('m') => app.cycle_mood(),
                        KeyCode::Char('e') => app.enter_diary_mode(),
                        KeyCode::Char('f') => app.draw_fortune(),
                        _ => {}
                    },
                    InputMode::Adding | InputMode::Diary => match key.code {
                        KeyCode::Enter => app.submit(),
                        KeyCode::Esc => app.exit_input_mode(),
                        KeyCode::Char(c) => app.input_char(c),
                        KeyCode::Backspace => app.delete_char(),
                        KeyCode::Left => app.move_cursor_left(),
                        KeyCode::Right => app.move_cursor_right(),
                        _ => {}
                    },
                }
            }
        }
    }
}
