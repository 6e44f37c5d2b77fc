//! Append-only, role-scoped session history.
//!
//! The ledger is a single JSON array under `<history key>_<role>`. Appends
//! are read-modify-write and assume one active session per scope.

use serde_json::Value;
use tracing::{debug, warn};

use super::HistoryRecord;
use crate::error::Result;
use crate::store::{HISTORY_KEY, KeyValueStore};
use crate::types::{Role, scoped_key};

/// Chronological list of completed sessions for one role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
}

impl HistoryLedger {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn key(role: Role) -> String {
        scoped_key(HISTORY_KEY, Some(role))
    }

    /// Load the ledger for `role`.
    ///
    /// A missing or unreadable ledger is empty. Entries that fail to decode
    /// are skipped.
    pub async fn load(store: &dyn KeyValueStore, role: Role) -> Result<Self> {
        let key = Self::key(role);
        let Some(raw) = store.get(&key).await? else {
            return Ok(Self::default());
        };

        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(%key, error = %e, "history ledger unreadable, starting empty");
                return Ok(Self::default());
            }
        };

        let total = entries.len();
        let records: Vec<HistoryRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if records.len() < total {
            warn!(%key, skipped = total - records.len(), "skipped malformed history entries");
        }
        Ok(Self { records })
    }

    /// Append `record` to the stored ledger for `role` and return the
    /// updated ledger.
    pub async fn append(
        store: &dyn KeyValueStore,
        role: Role,
        record: HistoryRecord,
    ) -> Result<Self> {
        let mut ledger = Self::load(store, role).await?;
        ledger.records.push(record);
        store
            .set(&Self::key(role), serde_json::to_string(&ledger.records)?)
            .await?;
        debug!(%role, len = ledger.records.len(), "appended history record");
        Ok(ledger)
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// PAI of the second-to-last session, when there are at least two.
    pub fn previous_pai(&self) -> Option<u8> {
        let n = self.records.len();
        (n >= 2).then(|| self.records[n - 2].pai)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::store::InMemoryStore;

    fn record(pai: u8) -> HistoryRecord {
        HistoryRecord {
            date: Utc::now(),
            pai,
            accuracy: 70,
            avg_time: 8.0,
            training_time_limit: 180.0,
            era: "Stable performance".into(),
        }
    }

    #[tokio::test]
    async fn ledger_append_is_role_scoped() {
        let store = InMemoryStore::new();
        HistoryLedger::append(&store, Role::Student, record(60)).await.unwrap();
        let ledger = HistoryLedger::append(&store, Role::Student, record(70)).await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.previous_pai(), Some(60));

        let teacher = HistoryLedger::load(&store, Role::Teacher).await.unwrap();
        assert!(teacher.is_empty());
        assert!(store.get("mathforce_training_history_student").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn ledger_corrupt_data_is_empty() {
        let store = InMemoryStore::new();
        store
            .set(&HistoryLedger::key(Role::Student), "{not json".into())
            .await
            .unwrap();
        let ledger = HistoryLedger::load(&store, Role::Student).await.unwrap();
        assert!(ledger.is_empty());

        // appending replaces the unreadable value
        let ledger = HistoryLedger::append(&store, Role::Student, record(50)).await.unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn ledger_non_utf8_file_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = crate::store::JsonFileStore::new(tmp.path());
        let path = tmp.path().join(format!("{}.json", HistoryLedger::key(Role::Student)));
        std::fs::write(&path, [0xc3, 0x28]).unwrap();

        let ledger = HistoryLedger::load(&store, Role::Student).await.unwrap();
        assert!(ledger.is_empty());

        let ledger = HistoryLedger::append(&store, Role::Student, record(70)).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(HistoryLedger::load(&store, Role::Student).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ledger_skips_malformed_entries() {
        let store = InMemoryStore::new();
        let raw = r#"[{"date":"2025-01-01T00:00:00Z","PAI":40,"accuracy":50,"avgTime":9,"trainingTimeLimit":180,"ERA":"Stable performance"},{"oops":true}]"#;
        store
            .set(&HistoryLedger::key(Role::Student), raw.into())
            .await
            .unwrap();
        let ledger = HistoryLedger::load(&store, Role::Student).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.latest().map(|r| r.pai), Some(40));
    }

    #[test]
    fn test_previous_pai_needs_two_entries() {
        assert_eq!(HistoryLedger::default().previous_pai(), None);
        assert_eq!(HistoryLedger::new(vec![record(10)]).previous_pai(), None);
    }
}
