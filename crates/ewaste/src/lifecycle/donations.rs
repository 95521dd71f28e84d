use std::sync::Arc;

use chrono::Utc;

use super::domain::{Donation, DonationStatus, Principal, RecordId};
use super::draft::DonationDraft;
use super::policy::{can_act, AccessTarget, Action};
use super::service::{next_donation_id, LifecycleError};
use super::store::{RecordStore, StorageError, Versioned};
use super::valuation::estimated_total;

/// Lifecycle operations for donations: `available → reserved → picked_up →
/// delivered`, with `cancelled` reachable until delivery. Reservation is the
/// one contended transition; it resolves through the store's conditional
/// update so at most one claimant ever wins.
pub struct DonationService {
    store: Arc<dyn RecordStore<Donation>>,
}

impl DonationService {
    pub fn new(store: Arc<dyn RecordStore<Donation>>) -> Self {
        Self { store }
    }

    /// Create a donation owned by the caller, starting in the shared pool.
    pub fn create(
        &self,
        principal: &Principal,
        draft: &DonationDraft,
    ) -> Result<Donation, LifecycleError> {
        if !can_act(principal, AccessTarget::New, Action::Create) {
            return Err(LifecycleError::Forbidden);
        }

        let attributes = draft.validate()?;
        let now = Utc::now();
        let record = Donation {
            id: next_donation_id(),
            donor_id: principal.id.clone(),
            recipient_id: None,
            total_estimated_value: estimated_total(&attributes.items),
            items: attributes.items,
            pickup_address: attributes.pickup_address,
            preferred_date: attributes.preferred_date,
            preferred_time_slot: attributes.preferred_time_slot,
            status: DonationStatus::Available,
            assigned_collector_id: None,
            donation_purpose: attributes.donation_purpose,
            notes: attributes.notes,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(record).map_err(LifecycleError::Storage)?;
        Ok(stored.record)
    }

    /// Fetch one donation: visible to the donor, to collector/admin roles, and
    /// to anyone while it is still available.
    pub fn get(&self, principal: &Principal, id: &RecordId) -> Result<Donation, LifecycleError> {
        let stored = self.load(id)?;
        if !can_act(principal, AccessTarget::Donation(&stored.record), Action::Read) {
            return Err(LifecycleError::Forbidden);
        }
        Ok(stored.record)
    }

    /// List donations newest first. Plain users see the shared pool plus their
    /// own donations; collector/admin roles see everything.
    pub fn list(&self, principal: &Principal) -> Result<Vec<Donation>, LifecycleError> {
        let records = self.store.all().map_err(LifecycleError::Storage)?;
        Ok(records
            .into_iter()
            .map(|stored| stored.record)
            .filter(|record| can_act(principal, AccessTarget::Donation(record), Action::Read))
            .collect())
    }

    /// Claim an available donation for the caller. First claim wins: the
    /// status guard plus the store's version check make this a compare-and-set,
    /// so concurrent claimants race to a single winner and the rest conflict.
    pub fn reserve(&self, principal: &Principal, id: &RecordId) -> Result<Donation, LifecycleError> {
        let Versioned {
            version,
            mut record,
        } = self.load(id)?;
        if !can_act(principal, AccessTarget::Donation(&record), Action::Reserve) {
            return Err(LifecycleError::Forbidden);
        }
        if record.status != DonationStatus::Available {
            return Err(LifecycleError::conflict(
                "donation is not available for reservation",
            ));
        }

        record.status = DonationStatus::Reserved;
        record.recipient_id = Some(principal.id.clone());
        record.updated_at = Utc::now();

        match self.store.compare_and_update(version, record) {
            Ok(stored) => Ok(stored.record),
            Err(StorageError::VersionConflict) => Err(LifecycleError::conflict(
                "donation is not available for reservation",
            )),
            Err(StorageError::MissingRecord) => Err(LifecycleError::NotFound),
            Err(other) => Err(LifecycleError::Storage(other)),
        }
    }

    /// Set the status of a donation. Collector/admin only; written as given
    /// with no forward-only check, matching the reference behavior.
    /// `picked_up` and `delivered` claim the record for the acting collector.
    pub fn transition_status(
        &self,
        principal: &Principal,
        id: &RecordId,
        status: DonationStatus,
        notes: Option<String>,
    ) -> Result<Donation, LifecycleError> {
        let Versioned {
            version,
            mut record,
        } = self.load(id)?;
        if !can_act(
            principal,
            AccessTarget::Donation(&record),
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
        // A recipient reference only makes sense on the reserved-to-delivered
        // chain; overwriting the status back out of it drops the reference.
        if !status.carries_recipient() {
            record.recipient_id = None;
        }
        record.updated_at = Utc::now();

        self.commit(version, record)
    }

    /// Cancel a donation. Donor or collector/admin; delivered donations cannot
    /// be cancelled.
    pub fn cancel(&self, principal: &Principal, id: &RecordId) -> Result<Donation, LifecycleError> {
        let Versioned {
            version,
            mut record,
        } = self.load(id)?;
        if !can_act(principal, AccessTarget::Donation(&record), Action::Cancel) {
            return Err(LifecycleError::Forbidden);
        }
        if record.status == DonationStatus::Delivered {
            return Err(LifecycleError::conflict("cannot cancel delivered donation"));
        }

        record.status = DonationStatus::Cancelled;
        record.recipient_id = None;
        record.updated_at = Utc::now();

        self.commit(version, record)
    }

    fn load(&self, id: &RecordId) -> Result<Versioned<Donation>, LifecycleError> {
        self.store
            .fetch(id)
            .map_err(LifecycleError::Storage)?
            .ok_or(LifecycleError::NotFound)
    }

    fn commit(&self, version: u64, record: Donation) -> Result<Donation, LifecycleError> {
        match self.store.compare_and_update(version, record) {
            Ok(stored) => Ok(stored.record),
            Err(StorageError::VersionConflict) => Err(LifecycleError::conflict(
                "donation changed concurrently, retry",
            )),
            Err(StorageError::MissingRecord) => Err(LifecycleError::NotFound),
            Err(other) => Err(LifecycleError::Storage(other)),
        }
    }
}
