use chrono::NaiveDate;

use crate::chart::{axis_ticks, AxisTick, ChartSegment};
use crate::model::journal::Mood;
use crate::repository::{JournalRepository, ScheduleRepository};
use crate::service::dto::EntryDto;
use crate::service::journal_service::JournalService;
use crate::service::schedule_service::ScheduleService;

/// Everything the presentation layer shows for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub entries: Vec<EntryDto>,
    pub segments: Vec<ChartSegment>,
    pub ticks: Vec<AxisTick>,
    pub mood: Option<Mood>,
    pub diary: String,
    pub media: Vec<String>,
    pub total_hours: f64,
}

impl DayView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct DayViewUseCase<'a, S: ScheduleRepository, J: JournalRepository> {
    schedule: &'a ScheduleService<S>,
    journal: &'a JournalService<J>,
}

impl<'a, S: ScheduleRepository, J: JournalRepository> DayViewUseCase<'a, S, J> {
    pub fn new(schedule: &'a ScheduleService<S>, journal: &'a JournalService<J>) -> Self {
        Self { schedule, journal }
    }

    pub fn day(&self, date: NaiveDate) -> DayView {
        let entries = self.schedule.list_entries(date);
        // Overlaps are allowed, so this is booked time, not covered time.
        let total_hours = entries.iter().map(|e| e.duration).sum();

        DayView {
            date,
            segments: self.schedule.chart(date),
            ticks: axis_ticks(),
            entries,
            mood: self.journal.mood(date),
            diary: self.journal.diary(date),
            media: self.journal.media(date),
            total_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::model::journal::{DiaryBook, JournalBook, MoodBook};
    use crate::model::schedule::ScheduleBook;
    use anyhow::Result;

    struct MemorySchedule;

    impl ScheduleRepository for MemorySchedule {
        fn load(&self) -> Result<ScheduleBook> {
            Ok(ScheduleBook::new())
        }
        fn save(&self, _book: &ScheduleBook) -> Result<()> {
            Ok(())
        }
    }

    struct MemoryJournal;

    impl JournalRepository for MemoryJournal {
        fn load(&self) -> Result<JournalBook> {
            Ok(JournalBook::default())
        }
        fn save_moods(&self, _moods: &MoodBook) -> Result<()> {
            Ok(())
        }
        fn save_diary(&self, _diary: &DiaryBook) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_day_view_combines_schedule_and_journal() {
        let dir = tempfile::tempdir().unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

        let mut schedule = ScheduleService::new(MemorySchedule).unwrap();
        schedule.add_entry(day, "Focus", "13:00".parse().unwrap(), "15:30".parse().unwrap()).unwrap();
        schedule.add_entry(day, "Run", "06:00".parse().unwrap(), "07:00".parse().unwrap()).unwrap();

        let mut journal =
            JournalService::new(MemoryJournal, dir.path().to_path_buf(), Settings::default()).unwrap();
        journal.set_mood(day, Mood::Good).unwrap();

        let usecase = DayViewUseCase::new(&schedule, &journal);
        let view = usecase.day(day);

        assert_eq!(view.entries[0].activity, "Run");
        assert_eq!(view.segments[1].label, "Focus");
        assert_eq!(view.ticks.len(), 24);
        assert_eq!(view.mood, Some(Mood::Good));
        assert_eq!(view.total_hours, 3.5);

        let empty = usecase.day(day.succ_opt().unwrap());
        assert!(empty.is_empty());
        assert!(empty.segments.is_empty());
        assert_eq!(empty.total_hours, 0.0);
    }
}
