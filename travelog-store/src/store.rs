use crate::persist;
use chrono::Utc;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use travelog_core::config::StoreConfig;
use travelog_core::entry::{LogEntry, ValidEntry};
use travelog_core::error::TravelogError;

/// Document store for travel-log entries.
///
/// Entries live in an in-memory map keyed by id; every mutation snapshots
/// the collection to the JSON state file so data survives restarts. The
/// store is the single owner of persisted records — callers get clones.
#[derive(Clone)]
pub struct EntryStore {
    collection: String,
    entries: Arc<DashMap<String, LogEntry>>,
    state_file: Option<PathBuf>,
}

impl EntryStore {
    /// Open a store and restore any previously persisted state.
    pub fn open(config: &StoreConfig) -> Self {
        let store = Self {
            collection: config.collection.clone(),
            entries: Arc::new(DashMap::new()),
            state_file: Some(config.state_file.clone()),
        };
        persist::load_state(&config.state_file, &store.collection, &store.entries);
        store
    }

    /// Open a store with no backing file. Used by tests.
    pub fn in_memory(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            entries: Arc::new(DashMap::new()),
            state_file: None,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn state_file(&self) -> Option<&PathBuf> {
        self.state_file.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a validated entry, assigning id and timestamps.
    pub fn insert(&self, valid: ValidEntry) -> Result<LogEntry, TravelogError> {
        let now = Utc::now();
        let entry = LogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            title: valid.title,
            description: valid.description,
            comments: valid.comments,
            image: valid.image,
            rating: valid.rating,
            latitude: valid.latitude,
            longitude: valid.longitude,
            visit_date: valid.visit_date,
            created_at: now,
            updated_at: now,
        };

        self.entries.insert(entry.id.clone(), entry.clone());
        self.save()?;

        debug!(collection = %self.collection, id = %entry.id, "entry inserted");
        Ok(entry)
    }

    /// Fetch a single entry by id.
    pub fn find(&self, id: &str) -> Result<LogEntry, TravelogError> {
        self.entries
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| TravelogError::EntryNotFound(id.to_string()))
    }

    /// All entries in the collection, oldest first.
    pub fn find_all(&self) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        entries
    }

    /// Overwrite an existing entry's mutable fields, refreshing updated_at.
    /// id and created_at are kept. The mutation happens in place under the
    /// entry's lock, so a concurrent delete cannot be undone.
    pub fn update(&self, id: &str, valid: ValidEntry) -> Result<LogEntry, TravelogError> {
        // Guard dropped before save(), which iterates the map.
        let updated = {
            let mut entry = self
                .entries
                .get_mut(id)
                .ok_or_else(|| TravelogError::EntryNotFound(id.to_string()))?;

            entry.title = valid.title;
            entry.description = valid.description;
            entry.comments = valid.comments;
            entry.image = valid.image;
            entry.rating = valid.rating;
            entry.latitude = valid.latitude;
            entry.longitude = valid.longitude;
            entry.visit_date = valid.visit_date;
            entry.updated_at = Utc::now();
            entry.clone()
        };

        self.save()?;

        debug!(collection = %self.collection, id = %id, "entry updated");
        Ok(updated)
    }

    /// Hard delete. A missing id reports not-found, every time.
    pub fn delete(&self, id: &str) -> Result<(), TravelogError> {
        if self.entries.remove(id).is_none() {
            return Err(TravelogError::EntryNotFound(id.to_string()));
        }
        self.save()?;

        debug!(collection = %self.collection, id = %id, "entry deleted");
        Ok(())
    }

    fn save(&self) -> Result<(), TravelogError> {
        match &self.state_file {
            Some(path) => persist::save_state(path, &self.collection, &self.entries),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use travelog_core::entry::EntryDraft;

    fn valid_entry(title: &str) -> ValidEntry {
        ValidEntry {
            title: title.to_string(),
            description: None,
            comments: None,
            image: None,
            rating: 0,
            latitude: 48.85,
            longitude: 2.35,
            visit_date: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn insert_assigns_id_and_timestamps() {
        let store = EntryStore::in_memory("log_entries");
        let entry = store.insert(valid_entry("Paris")).unwrap();
        assert!(!entry.id.is_empty());
        assert_eq!(entry.created_at, entry.updated_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_then_find_round_trips() {
        let store = EntryStore::in_memory("log_entries");
        let created = store.insert(valid_entry("Paris")).unwrap();
        let found = store.find(&created.id).unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn find_missing_id_is_not_found() {
        let store = EntryStore::in_memory("log_entries");
        let err = store.find("no-such-id").unwrap_err();
        assert!(matches!(err, TravelogError::EntryNotFound(_)));
    }

    #[test]
    fn find_all_on_empty_store_is_empty() {
        let store = EntryStore::in_memory("log_entries");
        assert!(store.find_all().is_empty());
    }

    #[test]
    fn find_all_returns_every_insert() {
        let store = EntryStore::in_memory("log_entries");
        for title in ["Paris", "Lyon", "Nice"] {
            store.insert(valid_entry(title)).unwrap();
        }
        assert_eq!(store.find_all().len(), 3);
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let store = EntryStore::in_memory("log_entries");
        let created = store.insert(valid_entry("Paris")).unwrap();

        let mut changed = valid_entry("Paris, revisited");
        changed.rating = 9;
        let updated = store.update(&created.id, changed).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.title, "Paris, revisited");
        assert_eq!(updated.rating, 9);
    }

    #[test]
    fn update_missing_id_leaves_store_unchanged() {
        let store = EntryStore::in_memory("log_entries");
        store.insert(valid_entry("Paris")).unwrap();

        let err = store.update("ghost", valid_entry("Ghost")).unwrap_err();
        assert!(matches!(err, TravelogError::EntryNotFound(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_all()[0].title, "Paris");
    }

    #[test]
    fn update_after_delete_does_not_resurrect_the_entry() {
        let store = EntryStore::in_memory("log_entries");
        let created = store.insert(valid_entry("Paris")).unwrap();
        store.delete(&created.id).unwrap();

        let err = store
            .update(&created.id, valid_entry("Paris, revisited"))
            .unwrap_err();
        assert!(matches!(err, TravelogError::EntryNotFound(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_removes_the_entry() {
        let store = EntryStore::in_memory("log_entries");
        let created = store.insert(valid_entry("Paris")).unwrap();
        store.delete(&created.id).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn repeated_delete_reports_not_found_every_time() {
        let store = EntryStore::in_memory("log_entries");
        let created = store.insert(valid_entry("Paris")).unwrap();
        store.delete(&created.id).unwrap();

        for _ in 0..2 {
            let err = store.delete(&created.id).unwrap_err();
            assert!(matches!(err, TravelogError::EntryNotFound(_)));
        }
    }

    #[test]
    fn validated_draft_flows_into_store() {
        let store = EntryStore::in_memory("log_entries");
        let draft = EntryDraft {
            title: Some("Paris".to_string()),
            latitude: Some(48.85),
            longitude: Some(2.35),
            visit_date: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let entry = store.insert(draft.validate().unwrap()).unwrap();
        assert_eq!(entry.rating, 0);
    }

    #[test]
    fn mutations_survive_reopen_from_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            state_file: dir.path().join("state.json"),
            collection: "log_entries".to_string(),
        };

        let store = EntryStore::open(&config);
        let created = store.insert(valid_entry("Paris")).unwrap();
        store.insert(valid_entry("Lyon")).unwrap();

        let reopened = EntryStore::open(&config);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.find(&created.id).unwrap().title, "Paris");
    }

    #[test]
    fn delete_is_persisted_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            state_file: dir.path().join("state.json"),
            collection: "log_entries".to_string(),
        };

        let store = EntryStore::open(&config);
        let created = store.insert(valid_entry("Paris")).unwrap();
        store.delete(&created.id).unwrap();

        let reopened = EntryStore::open(&config);
        assert!(reopened.is_empty());
    }
}
