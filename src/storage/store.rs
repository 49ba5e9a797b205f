use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::{
    analytics::{self, AnalyticsConfig},
    models::{ClassificationRecord, NewClassification, Statistics},
    utils::dates,
};

use super::{medium::StorageMedium, seed};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

pub const DEFAULT_STORAGE_KEY: &str = "litterly-classification-history";
pub const MAX_ITEMS: usize = 1000;
const PROBE_KEY: &str = "__litterly_storage_probe__";

struct HistoryInner {
    medium: Arc<dyn StorageMedium>,
    key: String,
    max_items: usize,
    revision: watch::Sender<u64>,
}

/// Newest-first, size-bounded log of classification records kept in a single
/// slot of a [`StorageMedium`].
///
/// Medium failures never reach callers: reads degrade to an empty history and
/// writes become logged no-ops. The medium is a best-effort local cache, so
/// what is persisted may lag what a caller believes it wrote.
#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<HistoryInner>,
}

impl HistoryStore {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self::with_options(medium, DEFAULT_STORAGE_KEY, MAX_ITEMS)
    }

    pub fn with_options(
        medium: Arc<dyn StorageMedium>,
        key: impl Into<String>,
        max_items: usize,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(HistoryInner {
                medium,
                key: key.into(),
                max_items,
                revision,
            }),
        }
    }

    pub fn max_items(&self) -> usize {
        self.inner.max_items
    }

    /// Revision counter bumped after every write attempt.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    fn notify(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }

    /// Raw entries of the stored array. Entries are kept as JSON so that ones
    /// this version cannot decode survive a read-modify-write.
    fn read_entries(&self) -> Result<Vec<Value>> {
        let Some(raw) = self
            .inner
            .medium
            .get_item(&self.inner.key)
            .context("failed to read classification history")?
        else {
            return Ok(Vec::new());
        };

        let parsed: Value =
            serde_json::from_str(&raw).context("stored classification history is not JSON")?;
        match parsed {
            Value::Array(entries) => Ok(entries),
            _ => {
                log_warn!("stored classification history is not an array; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn entries_or_empty(&self) -> Vec<Value> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                log_error!("Error reading classification history: {err:#}");
                Vec::new()
            }
        }
    }

    fn write_items<T: Serialize>(&self, items: &[T]) -> Result<usize> {
        let limited = &items[..items.len().min(self.inner.max_items)];
        let serialized =
            serde_json::to_string(limited).context("failed to serialize classification history")?;
        self.inner
            .medium
            .set_item(&self.inner.key, &serialized)
            .context("failed to write classification history")?;
        Ok(limited.len())
    }

    /// Writes `items`, logs the outcome and notifies subscribers. Returns
    /// whether the medium accepted the write.
    fn persist<T: Serialize>(&self, items: &[T]) -> bool {
        let saved = match self.write_items(items) {
            Ok(count) => {
                log_info!("Saved {count} classifications");
                true
            }
            Err(err) => {
                log_error!("Error saving classification history: {err:#}");
                false
            }
        };
        self.notify();
        saved
    }

    /// Every stored record, newest first. Empty when the medium is empty,
    /// unreadable or holds something other than an array. Entries that do not
    /// decode as records are skipped here but stay in the medium.
    pub fn get_all(&self) -> Vec<ClassificationRecord> {
        let entries = self.entries_or_empty();
        let total = entries.len();
        let records: Vec<ClassificationRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if records.len() != total {
            log_warn!(
                "skipped {} malformed classification entries",
                total - records.len()
            );
        }
        records
    }

    /// Persists the first `max_items` records of `records`.
    pub fn save_all(&self, records: &[ClassificationRecord]) {
        self.persist(records);
    }

    /// Assigns an id, puts the record at the head of the history and persists.
    ///
    /// The id is the current time in milliseconds, bumped past the largest
    /// stored id so rapid inserts stay unique and increasing.
    pub fn add(&self, classification: NewClassification) -> ClassificationRecord {
        let mut entries = self.entries_or_empty();
        let now_ms = Local::now().timestamp_millis();
        let id = entries
            .iter()
            .filter_map(entry_id)
            .map(|existing| existing.saturating_add(1))
            .max()
            .map_or(now_ms, |next| next.max(now_ms));

        let record = classification.into_record(id);
        match serde_json::to_value(&record) {
            Ok(entry) => {
                entries.insert(0, entry);
                self.persist(&entries);
            }
            Err(err) => log_error!("Error encoding classification {id}: {err}"),
        }
        record
    }

    /// Drops every entry with `id`, leaving all others (decodable or not)
    /// untouched.
    pub fn remove(&self, id: i64) {
        let mut entries = self.entries_or_empty();
        entries.retain(|entry| entry_id(entry) != Some(id));
        self.persist(&entries);
    }

    pub fn clear(&self) {
        if let Err(err) = self.inner.medium.remove_item(&self.inner.key) {
            log_error!("Error clearing classification history: {err:#}");
        }
        self.notify();
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    pub fn get_by_date(&self, date: &str) -> Vec<ClassificationRecord> {
        self.get_all()
            .into_iter()
            .filter(|record| record.date == date)
            .collect()
    }

    pub fn get_today(&self) -> Vec<ClassificationRecord> {
        self.get_by_date(&dates::today())
    }

    pub fn get_by_type(&self, waste_type: &str) -> Vec<ClassificationRecord> {
        self.get_all()
            .into_iter()
            .filter(|record| record.is_type(waste_type))
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics_at(Local::now().naive_local())
    }

    pub fn statistics_at(&self, now: NaiveDateTime) -> Statistics {
        analytics::compute_statistics(&self.get_all(), now, &AnalyticsConfig::default())
    }

    /// Probes the medium with a throwaway write, read and delete.
    pub fn is_available(&self) -> bool {
        let medium = &self.inner.medium;
        let probe = || -> Result<bool> {
            medium.set_item(PROBE_KEY, PROBE_KEY)?;
            let read_back = medium.get_item(PROBE_KEY)?;
            medium.remove_item(PROBE_KEY)?;
            Ok(read_back.as_deref() == Some(PROBE_KEY))
        };

        match probe() {
            Ok(available) => available,
            Err(err) => {
                log_warn!("storage medium unavailable: {err:#}");
                false
            }
        }
    }

    /// Writes the illustrative history if the store is empty. Returns whether
    /// the medium accepted the seed.
    pub fn ensure_seeded(&self) -> bool {
        if !self.entries_or_empty().is_empty() {
            return false;
        }

        let now = Local::now();
        let records = seed::default_records(now.date_naive(), now.timestamp_millis());
        let saved = self.persist(&records);
        if saved {
            log_info!("Initialized history with {} sample records", records.len());
        }
        saved
    }
}

fn entry_id(entry: &Value) -> Option<i64> {
    entry.get("id").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analytics::test_support::record,
        storage::{MemoryMedium, StorageMedium},
    };

    fn new_item(item: &str, waste_type: &str) -> NewClassification {
        NewClassification {
            item: item.to_string(),
            waste_type: waste_type.to_string(),
            confidence: 95.0,
            date: dates::today(),
            time: "10:30 AM".to_string(),
            image: None,
            description: None,
            location: Some("Home".to_string()),
            disposal_method: None,
        }
    }

    fn memory_store() -> (Arc<MemoryMedium>, HistoryStore) {
        let medium = Arc::new(MemoryMedium::new());
        let store = HistoryStore::new(medium.clone());
        (medium, store)
    }

    #[test]
    fn adds_are_newest_first_with_increasing_ids() {
        let (_, store) = memory_store();
        let a = store.add(new_item("a", "Plastic"));
        let b = store.add(new_item("b", "Paper"));
        let c = store.add(new_item("c", "Glass"));

        let all = store.get_all();
        let items: Vec<&str> = all.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, ["c", "b", "a"]);
        assert!(c.id > b.id && b.id > a.id);
    }

    #[test]
    fn add_then_remove_restores_length() {
        let (_, store) = memory_store();
        store.add(new_item("kept", "Metal"));
        let before = store.count();

        let added = store.add(new_item("temp", "Metal"));
        store.remove(added.id);

        assert_eq!(store.count(), before);
        assert!(store.get_all().iter().all(|r| r.id != added.id));
    }

    #[test]
    fn evicts_oldest_beyond_bound() {
        let medium = Arc::new(MemoryMedium::new());
        let store = HistoryStore::with_options(medium, "history", 3);
        for i in 0..5 {
            store.add(new_item(&format!("item-{i}"), "Paper"));
        }

        let all = store.get_all();
        let items: Vec<&str> = all.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, ["item-4", "item-3", "item-2"]);
    }

    #[test]
    fn save_then_get_round_trips() {
        let (_, store) = memory_store();
        let records = vec![
            record(3, "Glass", "10/19/2026"),
            record(2, "Metal", "10/18/2026"),
            record(1, "Organic", "10/17/2026"),
        ];
        store.save_all(&records);
        assert_eq!(store.get_all(), records);
    }

    #[test]
    fn corrupt_or_non_array_data_reads_as_empty_and_is_left_in_place() {
        let (medium, store) = memory_store();

        medium.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        assert!(store.get_all().is_empty());
        assert_eq!(
            medium.get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("{not json")
        );

        medium.set_item(DEFAULT_STORAGE_KEY, r#"{"id":1}"#).unwrap();
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let (medium, store) = memory_store();
        let raw = r#"[
            {"id":2,"item":"Can","type":"Metal","confidence":94,"date":"1/5/2026","time":"11:20 AM"},
            {"id":"oops"},
            {"id":1,"item":"Jar","type":"Glass","confidence":90,"date":"1/4/2026","time":"09:00 AM"}
        ]"#;
        medium.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();

        let ids: Vec<i64> = store.get_all().iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn undecodable_entries_survive_writes() {
        let (medium, store) = memory_store();
        let raw = r#"[
            {"id":2,"item":"Can","type":"Metal","confidence":"94","date":"1/5/2026","time":"11:20 AM"},
            {"id":1,"item":"Jar","type":"Glass","confidence":90,"date":"1/4/2026","time":"09:00 AM"}
        ]"#;
        medium.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();

        store.remove(999);
        store.remove(1);
        let added = store.add(new_item("fresh", "Paper"));

        let stored: Vec<Value> =
            serde_json::from_str(&medium.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap()).unwrap();
        let ids: Vec<i64> = stored.iter().filter_map(entry_id).collect();
        assert_eq!(ids, [added.id, 2]);
        assert_eq!(stored[1]["confidence"], "94");
        assert_eq!(store.get_all(), vec![added]);
    }

    #[test]
    fn undecodable_entries_block_seeding() {
        let (medium, store) = memory_store();
        medium
            .set_item(DEFAULT_STORAGE_KEY, r#"[{"id":"legacy"}]"#)
            .unwrap();

        assert!(!store.ensure_seeded());
        assert_eq!(
            medium.get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"legacy"}]"#)
        );
    }

    #[test]
    fn add_after_max_id_does_not_overflow() {
        let (_, store) = memory_store();
        store.save_all(&[record(i64::MAX, "Glass", "10/19/2026")]);

        let added = store.add(new_item("next", "Glass"));
        assert_eq!(added.id, i64::MAX);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn seeding_reports_failed_writes() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::unavailable()));
        assert!(!store.ensure_seeded());

        let tight = HistoryStore::new(Arc::new(MemoryMedium::with_quota(64)));
        assert!(!tight.ensure_seeded());
        assert!(tight.get_all().is_empty());
    }

    #[test]
    fn unavailable_medium_degrades_silently() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::unavailable()));
        assert!(!store.is_available());
        assert!(store.get_all().is_empty());

        let added = store.add(new_item("lost", "Plastic"));
        assert_eq!(added.item, "lost");
        assert!(store.get_all().is_empty());

        store.remove(added.id);
        store.clear();
        assert_eq!(store.statistics().total, 0);
    }

    #[test]
    fn quota_exceeded_keeps_previous_contents() {
        let medium = Arc::new(MemoryMedium::with_quota(220));
        let store = HistoryStore::new(medium);

        store.add(new_item("first", "Plastic"));
        assert_eq!(store.count(), 1);

        let second = store.add(new_item("second", "Plastic"));
        assert_eq!(second.item, "second");

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].item, "first");
    }

    #[test]
    fn type_filter_ignores_case() {
        let (_, store) = memory_store();
        store.add(new_item("lower", "plastic"));
        store.add(new_item("title", "Plastic"));
        store.add(new_item("other", "Glass"));

        assert_eq!(store.get_by_type("Plastic").len(), 2);
        assert_eq!(store.get_by_type("PLASTIC").len(), 2);
    }

    #[test]
    fn date_filters() {
        let (_, store) = memory_store();
        store.save_all(&[
            record(2, "Glass", &dates::today()),
            record(1, "Glass", "1/1/2000"),
        ]);

        assert_eq!(store.get_today().len(), 1);
        assert_eq!(store.get_by_date("1/1/2000").len(), 1);
        assert!(store.get_by_date("1/2/2000").is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let (medium, store) = memory_store();
        store.add(new_item("a", "Paper"));
        store.clear();
        assert!(store.get_all().is_empty());
        assert_eq!(medium.get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn seeding_is_idempotent_and_matches_expected_mix() {
        let (_, store) = memory_store();
        assert!(store.ensure_seeded());
        assert!(!store.ensure_seeded());

        let all = store.get_all();
        assert_eq!(all.len(), 5);

        let stats = store.statistics();
        assert_eq!(stats.type_breakdown.len(), 5);
        assert!(stats.type_breakdown.values().all(|count| *count == 1));
        assert_eq!(stats.recycling_rate, 80);
        assert_eq!(stats.classifications_today, 1);
    }

    #[test]
    fn seeding_skips_non_empty_store() {
        let (_, store) = memory_store();
        store.add(new_item("mine", "Metal"));
        assert!(!store.ensure_seeded());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn writes_bump_revision() {
        let (_, store) = memory_store();
        let rx = store.subscribe();
        let before = *rx.borrow();

        store.add(new_item("a", "Paper"));
        store.clear();

        assert_eq!(*rx.borrow(), before + 2);
    }
}
