use std::sync::atomic::{AtomicU64, Ordering};

use super::domain::RecordId;
use super::draft::ValidationErrors;
use super::store::StorageError;

/// Error raised by the lifecycle services. The four recoverable categories the
/// transport shell maps to status codes, plus opaque storage failures.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("record not found")]
    NotFound,
    #[error("access denied")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("storage failure")]
    Storage(#[source] StorageError),
}

impl LifecycleError {
    pub fn conflict(reason: impl Into<String>) -> Self {
        LifecycleError::Conflict(reason.into())
    }
}

static COLLECTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DONATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_collection_id() -> RecordId {
    let id = COLLECTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("col-{id:06}"))
}

pub(crate) fn next_donation_id() -> RecordId {
    let id = DONATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("don-{id:06}"))
}
