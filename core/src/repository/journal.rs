use std::path::PathBuf;

use anyhow::Result;

use crate::config::resolve_data_dir;
use crate::model::journal::{DiaryBook, JournalBook, MoodBook};
use crate::repository::file::{read_json_or_default, write_json_atomic};
use crate::repository::traits::JournalRepository;

const MOOD_FILE_NAME: &str = "mood.json";
const DIARY_FILE_NAME: &str = "diary.json";

/// Moods and diary text live in separate files, one JSON object each.
#[derive(Clone)]
pub struct FileJournalRepository {
    mood_path: PathBuf,
    diary_path: PathBuf,
}

impl FileJournalRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = resolve_data_dir(base_dir)?;
        Ok(FileJournalRepository {
            mood_path: dir.join(MOOD_FILE_NAME),
            diary_path: dir.join(DIARY_FILE_NAME),
        })
    }
}

impl JournalRepository for FileJournalRepository {
    fn load(&self) -> Result<JournalBook> {
        Ok(JournalBook {
            moods: read_json_or_default::<MoodBook>(&self.mood_path)?,
            diary: read_json_or_default::<DiaryBook>(&self.diary_path)?,
        })
    }

    fn save_moods(&self, moods: &MoodBook) -> Result<()> {
        write_json_atomic(&self.mood_path, moods)
    }

    fn save_diary(&self, diary: &DiaryBook) -> Result<()> {
        write_json_atomic(&self.diary_path, diary)
    }
}
