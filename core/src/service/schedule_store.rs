use chrono::NaiveDate;
use log::{debug, warn};
use uuid::Uuid;

use crate::error::PlannerError;
use crate::input::parse_time_range;
use crate::model::schedule::{ScheduleBook, ScheduleEntry};
use crate::time::{hours_between, ClockTime};

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// In-memory date -> entries mapping. Owns validation; knows nothing about disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleStore {
    book: ScheduleBook,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_book(book: ScheduleBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &ScheduleBook {
        &self.book
    }

    pub fn add(
        &mut self,
        date: NaiveDate,
        activity: &str,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<ScheduleEntry, PlannerError> {
        if end <= start {
            return Err(PlannerError::InvalidRange { start, end });
        }
        debug_assert!(hours_between(start, end) > 0.0);

        let key = date_key(date);
        let duplicate = self
            .book
            .get(&key)
            .is_some_and(|entries| entries.iter().any(|e| e.has_range(start, end)));
        if duplicate {
            return Err(PlannerError::DuplicateEntry { date, start, end });
        }

        let entry = ScheduleEntry::new(activity, start, end);
        self.book.entry(key).or_default().push(entry.clone());
        debug!("added '{}' {}-{} on {}", entry.activity, start, end, date);
        Ok(entry)
    }

    /// Entries for `date` ordered by start time. Ties keep storage order.
    pub fn list(&self, date: NaiveDate) -> Vec<&ScheduleEntry> {
        let Some(entries) = self.book.get(&date_key(date)) else {
            return Vec::new();
        };
        sorted_positions(entries)
            .into_iter()
            .map(|pos| &entries[pos])
            .collect()
    }

    pub fn remove_at(
        &mut self,
        date: NaiveDate,
        sorted_index: usize,
    ) -> Result<ScheduleEntry, PlannerError> {
        self.take_at(date, sorted_index).map(|(_, entry)| entry)
    }

    pub fn remove(&mut self, date: NaiveDate, id: Uuid) -> Result<ScheduleEntry, PlannerError> {
        self.take(date, id).map(|(_, entry)| entry)
    }

    /// Like `remove_at`, also returning the storage position for `restore`.
    pub(crate) fn take_at(
        &mut self,
        date: NaiveDate,
        sorted_index: usize,
    ) -> Result<(usize, ScheduleEntry), PlannerError> {
        let entries = self.book.get_mut(&date_key(date));
        let len = entries.as_ref().map_or(0, |e| e.len());
        let out_of_range = PlannerError::IndexOutOfRange {
            date,
            index: sorted_index,
            len,
        };

        let entries = entries.ok_or(out_of_range.clone())?;
        let storage_index = *sorted_positions(&entries[..])
            .get(sorted_index)
            .ok_or(out_of_range)?;
        Ok((storage_index, entries.remove(storage_index)))
    }

    pub(crate) fn take(
        &mut self,
        date: NaiveDate,
        id: Uuid,
    ) -> Result<(usize, ScheduleEntry), PlannerError> {
        let entries = self
            .book
            .get_mut(&date_key(date))
            .ok_or(PlannerError::EntryNotFound { date, id })?;
        let pos = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(PlannerError::EntryNotFound { date, id })?;
        Ok((pos, entries.remove(pos)))
    }

    /// Puts an entry taken by `take` or `take_at` back at its storage position,
    /// so ties in `list` keep their order.
    pub(crate) fn restore(&mut self, date: NaiveDate, storage_index: usize, entry: ScheduleEntry) {
        let entries = self.book.entry(date_key(date)).or_default();
        let at = storage_index.min(entries.len());
        entries.insert(at, entry);
    }

    /// Dates holding at least one entry, ascending. Keys that are not ISO
    /// dates are ignored.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.book
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .filter_map(|(key, _)| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
            .collect()
    }

    /// Splits legacy `time_range` records into `start`/`end`. Records that
    /// cannot be parsed are left as they are. Returns how many were migrated.
    pub fn migrate_legacy_format(&mut self) -> usize {
        let mut migrated = 0;
        for (date, entries) in self.book.iter_mut() {
            for entry in entries.iter_mut().filter(|e| e.needs_migration()) {
                if migrate_entry(entry) {
                    migrated += 1;
                } else {
                    warn!(
                        "leaving legacy entry '{}' on {} as is: unreadable range {:?}",
                        entry.activity, date, entry.time_range
                    );
                }
            }
        }
        migrated
    }
}

fn migrate_entry(entry: &mut ScheduleEntry) -> bool {
    let Some(raw) = entry.time_range.as_deref() else {
        return false;
    };
    let Ok((start, end)) = parse_time_range(raw) else {
        return false;
    };

    entry.start = Some(start.to_string());
    entry.end = Some(end.to_string());
    if end > start {
        entry.duration = Some(hours_between(start, end));
    }
    entry.time_range = None;
    true
}

/// Storage positions in display order. `sort_by` is stable.
fn sorted_positions(entries: &[ScheduleEntry]) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..entries.len()).collect();
    positions.sort_by(|&a, &b| entries[a].sort_key().cmp(entries[b].sort_key()));
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn starts(store: &ScheduleStore) -> Vec<String> {
        store
            .list(day())
            .iter()
            .map(|e| e.start.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_add_derives_duration() {
        let mut store = ScheduleStore::new();
        let entry = store.add(day(), " Study ", t("01:30"), t("02:00")).unwrap();
        assert_eq!(entry.activity, "Study");
        assert_relative_eq!(entry.duration.unwrap(), 0.5);

        let entry = store.add(day(), "Late", t("22:10"), t("24:00")).unwrap();
        assert_relative_eq!(entry.duration.unwrap(), 110.0 / 60.0);
    }

    #[test]
    fn test_add_rejects_inverted_range() {
        let mut store = ScheduleStore::new();
        let err = store.add(day(), "Gym", t("10:00"), t("09:00")).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRange { .. }));

        let err = store.add(day(), "Gym", t("10:00"), t("10:00")).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRange { .. }));
        assert_eq!(store, ScheduleStore::new());
    }

    #[test]
    fn test_add_rejects_duplicate_range_regardless_of_activity() {
        let mut store = ScheduleStore::new();
        store.add(day(), "Work", t("09:00"), t("10:00")).unwrap();
        let err = store.add(day(), "Lunch", t("09:00"), t("10:00")).unwrap_err();
        assert!(err.is_warning());
        assert!(matches!(err, PlannerError::DuplicateEntry { .. }));
        assert_eq!(store.list(day()).len(), 1);

        // Same range on another day is fine.
        let other = day().succ_opt().unwrap();
        store.add(other, "Work", t("09:00"), t("10:00")).unwrap();
    }

    #[test]
    fn test_add_allows_partial_overlap() {
        let mut store = ScheduleStore::new();
        store.add(day(), "Work", t("09:00"), t("10:00")).unwrap();
        store.add(day(), "Call", t("09:30"), t("10:30")).unwrap();
        store.add(day(), "Focus", t("09:00"), t("11:00")).unwrap();
        assert_eq!(store.list(day()).len(), 3);
    }

    #[test]
    fn test_list_sorted_and_stable() {
        let mut store = ScheduleStore::new();
        store.add(day(), "C", t("15:00"), t("16:00")).unwrap();
        store.add(day(), "A", t("08:00"), t("09:00")).unwrap();
        store.add(day(), "B1", t("12:00"), t("13:00")).unwrap();
        store.add(day(), "B2", t("12:00"), t("12:30")).unwrap();

        let names: Vec<&str> = store.list(day()).iter().map(|e| e.activity.as_str()).collect();
        assert_eq!(names, vec!["A", "B1", "B2", "C"]);
        assert_eq!(starts(&store), vec!["08:00", "12:00", "12:00", "15:00"]);
    }

    #[test]
    fn test_list_unknown_date_is_empty() {
        let store = ScheduleStore::new();
        assert!(store.list(day()).is_empty());
        assert!(store.dates().is_empty());
    }

    #[test]
    fn test_remove_at_uses_sorted_position() {
        let mut store = ScheduleStore::new();
        store.add(day(), "Evening", t("18:00"), t("19:00")).unwrap();
        store.add(day(), "Morning", t("07:00"), t("08:00")).unwrap();
        store.add(day(), "Noon", t("12:00"), t("13:00")).unwrap();

        // Storage order is Evening, Morning, Noon; sorted position 1 is Noon.
        let removed = store.remove_at(day(), 1).unwrap();
        assert_eq!(removed.activity, "Noon");
        assert_eq!(starts(&store), vec!["07:00", "18:00"]);

        let removed = store.remove_at(day(), 0).unwrap();
        assert_eq!(removed.activity, "Morning");
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = ScheduleStore::new();
        assert!(matches!(
            store.remove_at(day(), 0),
            Err(PlannerError::IndexOutOfRange { len: 0, .. })
        ));

        store.add(day(), "Only", t("07:00"), t("08:00")).unwrap();
        assert!(matches!(
            store.remove_at(day(), 1),
            Err(PlannerError::IndexOutOfRange { index: 1, len: 1, .. })
        ));
        assert_eq!(store.list(day()).len(), 1);
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = ScheduleStore::new();
        let keep = store.add(day(), "Keep", t("07:00"), t("08:00")).unwrap();
        let drop = store.add(day(), "Drop", t("06:00"), t("07:00")).unwrap();

        assert_eq!(store.remove(day(), drop.id).unwrap().activity, "Drop");
        assert!(matches!(
            store.remove(day(), drop.id),
            Err(PlannerError::EntryNotFound { .. })
        ));
        assert_eq!(store.list(day())[0].id, keep.id);
    }

    #[test]
    fn test_restore_keeps_tie_order() {
        let mut store = ScheduleStore::new();
        store.add(day(), "A", t("08:00"), t("09:00")).unwrap();
        store.add(day(), "B", t("08:00"), t("10:00")).unwrap();
        store.add(day(), "C", t("07:00"), t("08:00")).unwrap();

        let (pos, entry) = store.take_at(day(), 1).unwrap();
        assert_eq!((pos, entry.activity.as_str()), (0, "A"));
        store.restore(day(), pos, entry);

        let names: Vec<&str> = store.list(day()).iter().map(|e| e.activity.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_migrate_legacy_format() {
        let book: ScheduleBook = serde_json::from_value(json!({
            "2025-04-01": [
                { "activity": "Old", "time_range": "13:00-14:30" },
                { "activity": "Broken", "time_range": "garbled" },
                { "activity": "New", "start": "09:00", "end": "10:00", "duration": 1.0 }
            ]
        }))
        .unwrap();
        let mut store = ScheduleStore::from_book(book);

        assert_eq!(store.migrate_legacy_format(), 1);

        let entries = &store.book()["2025-04-01"];
        assert_eq!(entries[0].start.as_deref(), Some("13:00"));
        assert_eq!(entries[0].end.as_deref(), Some("14:30"));
        assert_eq!(entries[0].duration, Some(1.5));
        assert_eq!(entries[0].time_range, None);

        assert_eq!(entries[1].start, None);
        assert_eq!(entries[1].time_range.as_deref(), Some("garbled"));

        // The broken record sorts first and is still removable.
        let sorted: Vec<&str> = store.list(day()).iter().map(|e| e.activity.as_str()).collect();
        assert_eq!(sorted, vec!["Broken", "New", "Old"]);
        assert_eq!(store.remove_at(day(), 0).unwrap().activity, "Broken");

        assert_eq!(store.migrate_legacy_format(), 0);
    }

    #[test]
    fn test_dates_skips_empty_and_foreign_keys() {
        let mut store = ScheduleStore::new();
        store.add(day(), "A", t("08:00"), t("09:00")).unwrap();
        let later = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
        store.add(later, "B", t("08:00"), t("09:00")).unwrap();
        store.remove_at(later, 0).unwrap();

        assert_eq!(store.dates(), vec![day()]);
    }
}
