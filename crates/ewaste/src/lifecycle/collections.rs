use std::sync::Arc;

use chrono::Utc;

use super::domain::{Collection, CollectionStatus, Principal, RecordId};
use super::draft::CollectionDraft;
use super::policy::{can_act, AccessTarget, Action};
use super::service::{next_collection_id, LifecycleError};
use super::store::{RecordStore, StorageError, Versioned};
use super::valuation::estimated_total;

/// Lifecycle operations for collection requests: `pending → scheduled →
/// in_progress → completed`, with `cancelled` reachable from any
/// non-completed state.
pub struct CollectionService {
    store: Arc<dyn RecordStore<Collection>>,
}

impl CollectionService {
    pub fn new(store: Arc<dyn RecordStore<Collection>>) -> Self {
        Self { store }
    }

    /// Create a collection request owned by the caller. Reports every violated
    /// payload field together on failure.
    pub fn create(
        &self,
        principal: &Principal,
        draft: &CollectionDraft,
    ) -> Result<Collection, LifecycleError> {
        if !can_act(principal, AccessTarget::New, Action::Create) {
            return Err(LifecycleError::Forbidden);
        }

        let attributes = draft.validate()?;
        let now = Utc::now();
        let record = Collection {
            id: next_collection_id(),
            owner_id: principal.id.clone(),
            total_estimated_value: estimated_total(&attributes.items),
            items: attributes.items,
            pickup_address: attributes.pickup_address,
            preferred_date: attributes.preferred_date,
            preferred_time_slot: attributes.preferred_time_slot,
            status: CollectionStatus::Pending,
            assigned_collector_id: None,
            notes: attributes.notes,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(record).map_err(LifecycleError::Storage)?;
        Ok(stored.record)
    }

    /// Fetch one collection, visible to its owner and to collector/admin roles.
    pub fn get(&self, principal: &Principal, id: &RecordId) -> Result<Collection, LifecycleError> {
        let stored = self.load(id)?;
        if !can_act(principal, AccessTarget::Collection(&stored.record), Action::Read) {
            return Err(LifecycleError::Forbidden);
        }
        Ok(stored.record)
    }

    /// List collections newest first. Plain users see only their own.
    pub fn list(&self, principal: &Principal) -> Result<Vec<Collection>, LifecycleError> {
        let records = self.store.all().map_err(LifecycleError::Storage)?;
        Ok(records
            .into_iter()
            .map(|stored| stored.record)
            .filter(|record| can_act(principal, AccessTarget::Collection(record), Action::Read))
            .collect())
    }

    /// Set the status of a collection. Collector/admin only. The new status is
    /// written as given with no forward-only check, matching the reference
    /// behavior; `scheduled` and `in_progress` claim the record for the
    /// acting collector.
    pub fn transition_status(
        &self,
        principal: &Principal,
        id: &RecordId,
        status: CollectionStatus,
        notes: Option<String>,
    ) -> Result<Collection, LifecycleError> {
        let Versioned {
            version,
            mut record,
        } = self.load(id)?;
        if !can_act(
            principal,
            AccessTarget::Collection(&record),
            Action::TransitionStatus,
        ) {
            return Err(LifecycleError::Forbidden);
        }

        record.status = status;
        if let Some(notes) = notes {
            record.notes = Some(notes);
        }
        if status.claims_collector() {
            record.assigned_collector_id = Some(principal.id.clone());
        }
        record.updated_at = Utc::now();

        self.commit(version, record)
    }

    /// Cancel a collection. Owner or collector/admin; completed collections
    /// cannot be cancelled.
    pub fn cancel(&self, principal: &Principal, id: &RecordId) -> Result<Collection, LifecycleError> {
        let Versioned {
            version,
            mut record,
        } = self.load(id)?;
        if !can_act(principal, AccessTarget::Collection(&record), Action::Cancel) {
            return Err(LifecycleError::Forbidden);
        }
        if record.status == CollectionStatus::Completed {
            return Err(LifecycleError::conflict("cannot cancel completed collection"));
        }

        record.status = CollectionStatus::Cancelled;
        record.updated_at = Utc::now();

        self.commit(version, record)
    }

    fn load(&self, id: &RecordId) -> Result<Versioned<Collection>, LifecycleError> {
        self.store
            .fetch(id)
            .map_err(LifecycleError::Storage)?
            .ok_or(LifecycleError::NotFound)
    }

    fn commit(&self, version: u64, record: Collection) -> Result<Collection, LifecycleError> {
        match self.store.compare_and_update(version, record) {
            Ok(stored) => Ok(stored.record),
            Err(StorageError::VersionConflict) => Err(LifecycleError::conflict(
                "collection changed concurrently, retry",
            )),
            Err(StorageError::MissingRecord) => Err(LifecycleError::NotFound),
            Err(other) => Err(LifecycleError::Storage(other)),
        }
    }
}
