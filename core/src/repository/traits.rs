use anyhow::Result;

use crate::model::journal::{DiaryBook, JournalBook, MoodBook};
use crate::model::schedule::ScheduleBook;

pub trait ScheduleRepository {
    fn load(&self) -> Result<ScheduleBook>;
    fn save(&self, book: &ScheduleBook) -> Result<()>;
}

/// Moods and diary are stored apart, so a change to one never rewrites the other.
pub trait JournalRepository {
    fn load(&self) -> Result<JournalBook>;
    fn save_moods(&self, moods: &MoodBook) -> Result<()>;
    fn save_diary(&self, diary: &DiaryBook) -> Result<()>;
}
