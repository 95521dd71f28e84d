use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::domain::{Collection, Donation, RecordId};

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record already exists")]
    DuplicateId,
    #[error("record not found")]
    MissingRecord,
    #[error("record changed since it was read")]
    VersionConflict,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A stored record stamped with its optimistic-concurrency version.
#[derive(Debug, Clone)]
pub struct Versioned<R> {
    pub version: u64,
    pub record: R,
}

/// Records the store can hold. Gives the store access to identity and creation
/// time without knowing the record shape.
pub trait StoredRecord: Clone + Send + Sync {
    fn id(&self) -> &RecordId;
    fn created_at(&self) -> DateTime<Utc>;
}

impl StoredRecord for Collection {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StoredRecord for Donation {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Storage abstraction for one record type. Mutations go exclusively through
/// `compare_and_update`, a single conditional write: the update lands only if
/// the stored version still matches the version the caller read. This is what
/// makes the donation reservation race resolve to at most one winner.
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    fn insert(&self, record: R) -> Result<Versioned<R>, StorageError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<Versioned<R>>, StorageError>;
    /// Snapshot of every record, newest first.
    fn all(&self) -> Result<Vec<Versioned<R>>, StorageError>;
    fn compare_and_update(
        &self,
        expected_version: u64,
        record: R,
    ) -> Result<Versioned<R>, StorageError>;
}

/// Mutex-guarded in-memory store. The reference implementation for the service
/// shell and for tests; the version check happens under the same lock as the
/// write, so `compare_and_update` is atomic.
pub struct InMemoryStore<R> {
    records: Arc<Mutex<HashMap<RecordId, Versioned<R>>>>,
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<R> Clone for InMemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: StoredRecord> RecordStore<R> for InMemoryStore<R> {
    fn insert(&self, record: R) -> Result<Versioned<R>, StorageError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(record.id()) {
            return Err(StorageError::DuplicateId);
        }
        let stored = Versioned { version: 1, record };
        guard.insert(stored.record.id().clone(), stored.clone());
        Ok(stored)
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<Versioned<R>>, StorageError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Versioned<R>>, StorageError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<Versioned<R>> = guard.values().cloned().collect();
        records.sort_by(|a, b| {
            b.record
                .created_at()
                .cmp(&a.record.created_at())
                .then_with(|| b.record.id().0.cmp(&a.record.id().0))
        });
        Ok(records)
    }

    fn compare_and_update(
        &self,
        expected_version: u64,
        record: R,
    ) -> Result<Versioned<R>, StorageError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let current = guard
            .get(record.id())
            .ok_or(StorageError::MissingRecord)?;
        if current.version != expected_version {
            return Err(StorageError::VersionConflict);
        }
        let stored = Versioned {
            version: expected_version + 1,
            record,
        };
        guard.insert(stored.record.id().clone(), stored.clone());
        Ok(stored)
    }
}
