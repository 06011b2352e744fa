use chrono::{Duration, Local, NaiveDate};
use planner_core::{
    parse_time_range, DayView, DayViewUseCase, FileJournalRepository, FileScheduleRepository,
    Fortune, JournalService, Mood, PlannerError, ScheduleService, Settings,
};
use ratatui::widgets::TableState;

pub enum InputMode {
    Normal,
    Adding,
    Diary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

pub struct App {
    pub schedule: ScheduleService<FileScheduleRepository>,
    pub journal: JournalService<FileJournalRepository>,
    pub settings: Settings,
    pub view: DayView,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub message: Option<(MessageLevel, String)>,
}

impl App {
    pub fn new(
        schedule: ScheduleService<FileScheduleRepository>,
        journal: JournalService<FileJournalRepository>,
        settings: Settings,
        date: NaiveDate,
    ) -> App {
        let view = DayViewUseCase::new(&schedule, &journal).day(date);
        let mut state = TableState::default();
        if !view.is_empty() {
            state.select(Some(0));
        }
        App {
            schedule,
            journal,
            settings,
            view,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            message: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.view.date
    }

    pub fn next(&mut self) {
        if self.view.entries.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.view.entries.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.view.entries.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.view.entries.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn next_day(&mut self) {
        self.go_to(self.date() + Duration::days(1));
    }

    pub fn previous_day(&mut self) {
        self.go_to(self.date() - Duration::days(1));
    }

    pub fn today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    /// Jumps to the nearest later date that has entries.
    pub fn next_booked_day(&mut self) {
        let date = self.date();
        match self.schedule.dates().into_iter().find(|d| *d > date) {
            Some(next) => self.go_to(next),
            None => self.info("No later booked day".to_string()),
        }
    }

    pub fn previous_booked_day(&mut self) {
        let date = self.date();
        match self.schedule.dates().into_iter().rev().find(|d| *d < date) {
            Some(prev) => self.go_to(prev),
            None => self.info("No earlier booked day".to_string()),
        }
    }

    fn go_to(&mut self, date: NaiveDate) {
        self.message = None;
        self.reload(date);
        self.state.select(if self.view.is_empty() { None } else { Some(0) });
    }

    fn reload(&mut self, date: NaiveDate) {
        self.view = DayViewUseCase::new(&self.schedule, &self.journal).day(date);
    }

    pub fn delete_entry(&mut self) {
        let Some(i) = self.state.selected() else { return };
        let date = self.date();
        match self.schedule.remove_at(date, i) {
            Ok(removed) => self.info(format!("Removed: {}", removed.activity)),
            Err(e) => self.report(e),
        }
        self.reload(date);

        // Adjust selection after reload
        if self.view.is_empty() {
            self.state.select(None);
        } else if i >= self.view.entries.len() {
            self.state.select(Some(self.view.entries.len() - 1));
        }
    }

    pub fn cycle_mood(&mut self) {
        let next = match self.view.mood {
            Some(current) => {
                let pos = Mood::ALL.iter().position(|m| *m == current).unwrap_or(0);
                Mood::ALL[(pos + 1) % Mood::ALL.len()]
            }
            None => Mood::ALL[0],
        };
        let date = self.date();
        match self.journal.set_mood(date, next) {
            Ok(()) => self.info(format!("Mood: {}", next)),
            Err(e) => self.report(e),
        }
        self.reload(date);
    }

    pub fn draw_fortune(&mut self) {
        self.info(format!("Your fortune today is... {}!", Fortune::draw_random()));
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_diary_mode(&mut self) {
        self.input_mode = InputMode::Diary;
        self.input = self.view.diary.clone();
        self.cursor_position = self.input.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit(&mut self) {
        match self.input_mode {
            InputMode::Adding => {
                if !self.input.trim().is_empty() {
                    self.submit_add();
                }
            }
            InputMode::Diary => self.submit_diary(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    /// Input looks like `09:00-10:30 Activity name`.
    fn submit_add(&mut self) {
        let (range, activity) = match self.input.trim().split_once(char::is_whitespace) {
            Some((range, activity)) => (range.to_string(), activity.trim().to_string()),
            None => (self.input.trim().to_string(), String::new()),
        };

        let parsed = parse_time_range(&range).and_then(|(start, end)| {
            self.settings.check_minute(start)?;
            self.settings.check_minute(end)?;
            Ok((start, end))
        });
        let (start, end) = match parsed {
            Ok(times) => times,
            Err(e) => return self.report(e.into()),
        };

        let date = self.date();
        match self.schedule.add_entry(date, &activity, start, end) {
            Ok(entry) => {
                self.info(format!("Added: {}", entry.display_line()));
                self.reload(date);
                self.state.select(Some(entry.sorted_index()));
            }
            Err(e) => self.report(e),
        }
    }

    fn submit_diary(&mut self) {
        let date = self.date();
        match self.journal.write_diary(date, &self.input) {
            Ok(()) => self.info("Diary saved".to_string()),
            Err(e) => self.report(e),
        }
        self.reload(date);
    }

    fn info(&mut self, text: String) {
        self.message = Some((MessageLevel::Info, text));
    }

    fn report(&mut self, err: anyhow::Error) {
        let level = match err.downcast_ref::<PlannerError>() {
            Some(e) if e.is_warning() => MessageLevel::Warning,
            _ => MessageLevel::Error,
        };
        self.message = Some((level, err.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_in(dir: &std::path::Path) -> App {
        let data_dir = Some(dir.to_path_buf());
        let schedule =
            ScheduleService::new(FileScheduleRepository::new(data_dir.clone()).unwrap()).unwrap();
        let journal = JournalService::new(
            FileJournalRepository::new(data_dir).unwrap(),
            dir.join("media"),
            Settings::default(),
        )
        .unwrap();
        App::new(schedule, journal, Settings::default(), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
    }

    #[test]
    fn test_cycle_mood_starts_at_first_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        assert_eq!(app.view.mood, None);

        app.cycle_mood();
        assert_eq!(app.view.mood, Some(Mood::Great));
        app.cycle_mood();
        assert_eq!(app.view.mood, Some(Mood::Good));
    }

    #[test]
    fn test_jump_between_booked_days() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let later = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
        app.schedule
            .add_entry(later, "Trip", "08:00".parse().unwrap(), "09:00".parse().unwrap())
            .unwrap();

        app.next_booked_day();
        assert_eq!(app.date(), later);
        assert_eq!(app.state.selected(), Some(0));

        // Nothing later: stay put.
        app.next_booked_day();
        assert_eq!(app.date(), later);
        assert!(app.message.is_some());

        // Apr 8 has nothing before it either.
        app.previous_day();
        app.previous_booked_day();
        assert_eq!(app.date(), later - Duration::days(1));
    }
}

