use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json;
use tempfile::NamedTempFile;

use crate::config::resolve_data_dir;
use crate::model::schedule::ScheduleBook;
use crate::repository::traits::ScheduleRepository;

const SCHEDULE_FILE_NAME: &str = "schedule.json";

#[derive(Clone)]
pub struct FileScheduleRepository {
    file_path: PathBuf,
}

impl FileScheduleRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = resolve_data_dir(base_dir)?.join(SCHEDULE_FILE_NAME);
        Ok(FileScheduleRepository { file_path: path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ScheduleRepository for FileScheduleRepository {
    fn load(&self) -> Result<ScheduleBook> {
        read_json_or_default(&self.file_path)
    }

    fn save(&self, book: &ScheduleBook) -> Result<()> {
        write_json_atomic(&self.file_path, book)
    }
}

/// Missing files read as the type's default; anything else must parse.
pub(crate) fn read_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!("{} does not exist yet", path.display());
        return Ok(T::default());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

/// Writes to a sibling temp file and renames it over `path`, so a crash
/// mid-write leaves the previous file intact.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", path.display()))?;
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| anyhow!("Failed to replace {}: {}", path.display(), e.error))?;
    debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::ScheduleEntry;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(repo.load().unwrap().is_empty());
        assert!(!repo.file_path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();

        let mut book = ScheduleBook::new();
        book.insert(
            "2025-04-01".to_string(),
            vec![ScheduleEntry::new("勉強", "09:00".parse().unwrap(), "10:30".parse().unwrap())],
        );
        repo.save(&book).unwrap();

        let raw = fs::read_to_string(repo.file_path()).unwrap();
        assert!(raw.contains("勉強"), "non-ASCII text is written as is");

        let loaded = repo.load().unwrap();
        let entry = &loaded["2025-04-01"][0];
        assert_eq!(entry.activity, "勉強");
        assert_eq!(entry.duration, Some(1.5));
    }

    #[test]
    fn test_foreign_fields_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let on_disk = json!({
            "2024-01-01": [ { "activity": "Old", "time_range": "garbled", "note": 3 } ]
        });
        fs::write(repo.file_path(), on_disk.to_string()).unwrap();

        let book = repo.load().unwrap();
        repo.save(&book).unwrap();

        let reread: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.file_path()).unwrap()).unwrap();
        assert_eq!(reread, on_disk);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.file_path(), "{ not json").unwrap();
        assert!(repo.load().is_err());
    }
}
