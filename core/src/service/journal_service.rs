use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{info, warn};

use crate::config::Settings;
use crate::error::PlannerError;
use crate::model::journal::{media_key, DiaryBook, DiaryValue, JournalBook, Mood};
use crate::repository::JournalRepository;
use crate::service::schedule_store::date_key;

/// Mood stamps, diary text and media attachments, keyed by the same ISO date
/// as the schedule but independent of it.
pub struct JournalService<R: JournalRepository> {
    repo: R,
    book: JournalBook,
    media_dir: PathBuf,
    settings: Settings,
}

impl<R: JournalRepository> JournalService<R> {
    pub fn new(repo: R, media_dir: PathBuf, settings: Settings) -> Result<Self> {
        fs::create_dir_all(&media_dir)?;
        let book = repo.load()?;
        Ok(Self {
            repo,
            book,
            media_dir,
            settings,
        })
    }

    pub fn mood(&self, date: NaiveDate) -> Option<Mood> {
        self.book
            .moods
            .get(&date_key(date))
            .and_then(|stamp| Mood::from_stamp(stamp))
    }

    pub fn set_mood(&mut self, date: NaiveDate, mood: Mood) -> Result<()> {
        let mut moods = self.book.moods.clone();
        moods.insert(date_key(date), mood.stamp().to_string());
        self.repo.save_moods(&moods)?;
        self.book.moods = moods;
        Ok(())
    }

    pub fn diary(&self, date: NaiveDate) -> String {
        match self.book.diary.get(&date_key(date)) {
            Some(DiaryValue::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    pub fn write_diary(&mut self, date: NaiveDate, text: &str) -> Result<()> {
        let mut diary = self.book.diary.clone();
        diary.insert(date_key(date), DiaryValue::Text(text.to_string()));
        self.commit_diary(diary)
    }

    pub fn media(&self, date: NaiveDate) -> Vec<String> {
        match self.book.diary.get(&media_key(&date_key(date))) {
            Some(DiaryValue::Media(paths)) => paths.clone(),
            _ => Vec::new(),
        }
    }

    /// Copies `source` into the media directory as `{date}_{name}` and records
    /// it. Attaching the same name twice replaces the stored file. A copy that
    /// could not be recorded is deleted again.
    pub fn attach_media(&mut self, date: NaiveDate, source: &Path) -> Result<String> {
        if !self.settings.is_media_allowed(source) {
            return Err(PlannerError::UnsupportedMedia(source.display().to_string()).into());
        }
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Invalid media file name: {}", source.display()))?;

        let key = date_key(date);
        let target = self.media_dir.join(format!("{}_{}", key, name));
        fs::copy(source, &target)?;
        let stored = target.display().to_string();

        let mut paths = self.media(date);
        if paths.contains(&stored) {
            // Already recorded, nothing to save.
            info!("replaced {}", stored);
            return Ok(stored);
        }
        paths.push(stored.clone());

        let mut diary = self.book.diary.clone();
        diary.insert(media_key(&key), DiaryValue::Media(paths));
        if let Err(e) = self.commit_diary(diary) {
            if let Err(cleanup) = fs::remove_file(&target) {
                warn!("could not delete unrecorded copy {}: {}", stored, cleanup);
            }
            return Err(e);
        }
        info!("attached {} to {}", stored, key);
        Ok(stored)
    }

    /// Deletes the stored file and forgets it. A file that is already gone
    /// is only logged.
    pub fn remove_media(&mut self, date: NaiveDate, path: &str) -> Result<()> {
        let mut paths = self.media(date);
        let pos = paths
            .iter()
            .position(|p| p == path)
            .ok_or_else(|| PlannerError::MediaNotFound {
                date,
                path: path.to_string(),
            })?;

        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("media file {} was already missing", path);
            }
            Err(e) => return Err(e.into()),
        }

        paths.remove(pos);
        let mut diary = self.book.diary.clone();
        diary.insert(media_key(&date_key(date)), DiaryValue::Media(paths));
        self.commit_diary(diary)
    }

    fn commit_diary(&mut self, diary: DiaryBook) -> Result<()> {
        self.repo.save_diary(&diary)?;
        self.book.diary = diary;
        Ok(())
    }
}
