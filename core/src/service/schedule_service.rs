use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use uuid::Uuid;

use crate::chart::{to_chart_segments, ChartSegment};
use crate::model::schedule::ScheduleEntry;
use crate::repository::ScheduleRepository;
use crate::service::dto::EntryDto;
use crate::service::schedule_store::ScheduleStore;
use crate::time::ClockTime;

/// Schedule store bound to its persistence. Every successful mutation is
/// flushed before returning; a failed flush undoes the mutation.
pub struct ScheduleService<R: ScheduleRepository> {
    repo: R,
    store: ScheduleStore,
}

impl<R: ScheduleRepository> ScheduleService<R> {
    /// Loads the book and migrates legacy records, saving if anything changed.
    pub fn new(repo: R) -> Result<Self> {
        let mut store = ScheduleStore::from_book(repo.load()?);
        let migrated = store.migrate_legacy_format();
        if migrated > 0 {
            info!("migrated {} legacy schedule entries", migrated);
            repo.save(store.book())?;
        }
        Ok(Self { repo, store })
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn add_entry(
        &mut self,
        date: NaiveDate,
        activity: &str,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<EntryDto> {
        let created = self.store.add(date, activity, start, end)?;
        if let Err(e) = self.repo.save(self.store.book()) {
            if let Err(undo) = self.store.remove(date, created.id) {
                warn!("could not undo unsaved add of '{}': {}", created.activity, undo);
            }
            return Err(e);
        }

        let position = self
            .store
            .list(date)
            .iter()
            .position(|e| e.id == created.id)
            .unwrap_or_default();
        Ok(EntryDto::from_entity(position, &created))
    }

    pub fn list_entries(&self, date: NaiveDate) -> Vec<EntryDto> {
        self.store
            .list(date)
            .into_iter()
            .enumerate()
            .map(|(i, e)| EntryDto::from_entity(i, e))
            .collect()
    }

    pub fn remove_at(&mut self, date: NaiveDate, sorted_index: usize) -> Result<EntryDto> {
        let (storage_index, removed) = self.store.take_at(date, sorted_index)?;
        self.flush_removal(date, sorted_index, storage_index, removed)
    }

    pub fn remove_entry(&mut self, date: NaiveDate, id: Uuid) -> Result<EntryDto> {
        let index = self
            .store
            .list(date)
            .iter()
            .position(|e| e.id == id)
            .unwrap_or_default();
        let (storage_index, removed) = self.store.take(date, id)?;
        self.flush_removal(date, index, storage_index, removed)
    }

    pub fn chart(&self, date: NaiveDate) -> Vec<ChartSegment> {
        to_chart_segments(self.store.list(date))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.store.dates()
    }

    fn flush_removal(
        &mut self,
        date: NaiveDate,
        index: usize,
        storage_index: usize,
        removed: ScheduleEntry,
    ) -> Result<EntryDto> {
        let dto = EntryDto::from_entity(index, &removed);
        if let Err(e) = self.repo.save(self.store.book()) {
            warn!("restoring '{}' after failed save", removed.activity);
            self.store.restore(date, storage_index, removed);
            return Err(e);
        }
        Ok(dto)
    }
}
