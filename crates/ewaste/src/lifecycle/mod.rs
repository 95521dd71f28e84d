//! Resource lifecycle and access-control core.
//!
//! Two parallel record types, collections and donations, share one behavioral
//! shape: an owner submits an item list and a pickup window, the record moves
//! through a bounded status set, and collector/admin roles drive it forward.
//! Donations add a first-claim-wins reservation step. Everything here is
//! transport-agnostic; the router module adapts the services to HTTP for the
//! service shell.

pub mod collections;
pub mod dashboard;
pub mod domain;
pub mod donations;
pub mod draft;
pub mod policy;
pub mod router;
pub mod service;
pub mod store;
pub mod valuation;
pub mod views;

#[cfg(test)]
mod tests;

pub use collections::CollectionService;
pub use dashboard::{DashboardService, DashboardSummary};
pub use domain::{
    Address, Collection, CollectionCondition, CollectionStatus, Donation, DonationCondition,
    DonationPurpose, DonationStatus, Item, ItemCategory, Principal, PrincipalId, RecordId, Role,
    TimeSlot,
};
pub use donations::DonationService;
pub use draft::{
    AddressDraft, CollectionDraft, DonationDraft, FieldViolation, ItemDraft, ValidationErrors,
};
pub use policy::{can_act, AccessTarget, Action};
pub use router::{lifecycle_router, LifecycleState, PRINCIPAL_ID_HEADER, PRINCIPAL_ROLE_HEADER};
pub use service::LifecycleError;
pub use store::{InMemoryStore, RecordStore, StorageError, StoredRecord, Versioned};
pub use valuation::estimated_total;
pub use views::{
    CollectionView, DashboardView, DonationView, PrincipalDirectory, PrincipalSummary,
};
