use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::dashboard::DashboardSummary;
use super::domain::{
    Address, Collection, CollectionCondition, CollectionStatus, Donation, DonationCondition,
    DonationPurpose, DonationStatus, Item, PrincipalId, RecordId, TimeSlot,
};

/// Public projection of a referenced principal. Supplied by the external
/// identity collaborator; substituted for owner/recipient/collector ids in
/// every serialized record so callers never see bare foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalSummary {
    pub id: PrincipalId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PrincipalSummary {
    /// Fallback for ids the directory cannot resolve.
    pub fn unresolved(id: PrincipalId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            phone: None,
        }
    }
}

/// Lookup surface over the external identity collaborator's public fields.
pub trait PrincipalDirectory: Send + Sync {
    fn lookup(&self, id: &PrincipalId) -> Option<PrincipalSummary>;
}

fn resolve(directory: &dyn PrincipalDirectory, id: &PrincipalId) -> PrincipalSummary {
    directory
        .lookup(id)
        .unwrap_or_else(|| PrincipalSummary::unresolved(id.clone()))
}

fn resolve_optional(
    directory: &dyn PrincipalDirectory,
    id: Option<&PrincipalId>,
) -> Option<PrincipalSummary> {
    id.map(|id| resolve(directory, id))
}

/// Serialized collection with principal references resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionView {
    pub id: RecordId,
    pub owner: PrincipalSummary,
    pub items: Vec<Item<CollectionCondition>>,
    pub pickup_address: Address,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub status: CollectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_collector: Option<PrincipalSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub total_estimated_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionView {
    pub fn build(record: &Collection, directory: &dyn PrincipalDirectory) -> Self {
        Self {
            id: record.id.clone(),
            owner: resolve(directory, &record.owner_id),
            items: record.items.clone(),
            pickup_address: record.pickup_address.clone(),
            preferred_date: record.preferred_date,
            preferred_time_slot: record.preferred_time_slot,
            status: record.status,
            assigned_collector: resolve_optional(directory, record.assigned_collector_id.as_ref()),
            notes: record.notes.clone(),
            total_estimated_value: record.total_estimated_value,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Serialized donation with principal references resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    pub id: RecordId,
    pub donor: PrincipalSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<PrincipalSummary>,
    pub items: Vec<Item<DonationCondition>>,
    pub pickup_address: Address,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_collector: Option<PrincipalSummary>,
    pub donation_purpose: DonationPurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub total_estimated_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DonationView {
    pub fn build(record: &Donation, directory: &dyn PrincipalDirectory) -> Self {
        Self {
            id: record.id.clone(),
            donor: resolve(directory, &record.donor_id),
            recipient: resolve_optional(directory, record.recipient_id.as_ref()),
            items: record.items.clone(),
            pickup_address: record.pickup_address.clone(),
            preferred_date: record.preferred_date,
            preferred_time_slot: record.preferred_time_slot,
            status: record.status,
            assigned_collector: resolve_optional(directory, record.assigned_collector_id.as_ref()),
            donation_purpose: record.donation_purpose,
            notes: record.notes.clone(),
            total_estimated_value: record.total_estimated_value,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Serialized dashboard summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub recent_collections: Vec<CollectionView>,
    pub recent_donations: Vec<DonationView>,
    pub collection_counts_by_status: BTreeMap<CollectionStatus, u64>,
    pub donation_counts_by_status: BTreeMap<DonationStatus, u64>,
}

impl DashboardView {
    pub fn build(summary: &DashboardSummary, directory: &dyn PrincipalDirectory) -> Self {
        Self {
            recent_collections: summary
                .recent_collections
                .iter()
                .map(|record| CollectionView::build(record, directory))
                .collect(),
            recent_donations: summary
                .recent_donations
                .iter()
                .map(|record| DonationView::build(record, directory))
                .collect(),
            collection_counts_by_status: summary.collection_counts_by_status.clone(),
            donation_counts_by_status: summary.donation_counts_by_status.clone(),
        }
    }
}
