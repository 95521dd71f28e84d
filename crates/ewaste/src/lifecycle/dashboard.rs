use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{Collection, CollectionStatus, Donation, DonationStatus, Principal};
use super::service::LifecycleError;
use super::store::RecordStore;

const RECENT_LIMIT: usize = 5;

/// Per-owner activity summary feeding the dashboard UI. Read-only; reflects
/// whatever is currently persisted.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub recent_collections: Vec<Collection>,
    pub recent_donations: Vec<Donation>,
    pub collection_counts_by_status: BTreeMap<CollectionStatus, u64>,
    pub donation_counts_by_status: BTreeMap<DonationStatus, u64>,
}

pub struct DashboardService {
    collections: Arc<dyn RecordStore<Collection>>,
    donations: Arc<dyn RecordStore<Donation>>,
}

impl DashboardService {
    pub fn new(
        collections: Arc<dyn RecordStore<Collection>>,
        donations: Arc<dyn RecordStore<Donation>>,
    ) -> Self {
        Self {
            collections,
            donations,
        }
    }

    /// Summarize the caller's own records: the five most recent of each type
    /// and counts grouped by status. Only statuses with at least one record
    /// appear in the count maps.
    pub fn summarize(&self, principal: &Principal) -> Result<DashboardSummary, LifecycleError> {
        let collections: Vec<Collection> = self
            .collections
            .all()
            .map_err(LifecycleError::Storage)?
            .into_iter()
            .map(|stored| stored.record)
            .filter(|record| record.owner_id == principal.id)
            .collect();

        let donations: Vec<Donation> = self
            .donations
            .all()
            .map_err(LifecycleError::Storage)?
            .into_iter()
            .map(|stored| stored.record)
            .filter(|record| record.donor_id == principal.id)
            .collect();

        let mut collection_counts_by_status = BTreeMap::new();
        for record in &collections {
            *collection_counts_by_status.entry(record.status).or_insert(0) += 1;
        }
        let mut donation_counts_by_status = BTreeMap::new();
        for record in &donations {
            *donation_counts_by_status.entry(record.status).or_insert(0) += 1;
        }

        Ok(DashboardSummary {
            recent_collections: collections.into_iter().take(RECENT_LIMIT).collect(),
            recent_donations: donations.into_iter().take(RECENT_LIMIT).collect(),
            collection_counts_by_status,
            donation_counts_by_status,
        })
    }
}
