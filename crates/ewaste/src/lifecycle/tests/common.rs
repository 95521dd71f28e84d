use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::lifecycle::collections::CollectionService;
use crate::lifecycle::dashboard::DashboardService;
use crate::lifecycle::domain::{Collection, Donation, Principal, PrincipalId, Role};
use crate::lifecycle::donations::DonationService;
use crate::lifecycle::draft::{AddressDraft, CollectionDraft, DonationDraft, ItemDraft};
use crate::lifecycle::router::{lifecycle_router, LifecycleState};
use crate::lifecycle::store::InMemoryStore;
use crate::lifecycle::views::{PrincipalDirectory, PrincipalSummary};

pub(super) fn user(id: &str) -> Principal {
    Principal {
        id: PrincipalId(id.to_string()),
        role: Role::User,
    }
}

pub(super) fn collector(id: &str) -> Principal {
    Principal {
        id: PrincipalId(id.to_string()),
        role: Role::Collector,
    }
}

pub(super) fn admin(id: &str) -> Principal {
    Principal {
        id: PrincipalId(id.to_string()),
        role: Role::Admin,
    }
}

pub(super) fn address_draft() -> AddressDraft {
    AddressDraft {
        street: Some("14 MG Road".to_string()),
        city: Some("Bengaluru".to_string()),
        state: Some("Karnataka".to_string()),
        zip_code: Some("560001".to_string()),
        country: None,
        landmark: Some("Opposite metro station".to_string()),
    }
}

pub(super) fn laptop_item(quantity: u32, estimated_value: Option<f64>) -> ItemDraft {
    ItemDraft {
        category: Some("laptop".to_string()),
        brand: Some("ThinkPad".to_string()),
        model: Some("T480".to_string()),
        condition: Some("working".to_string()),
        quantity: Some(quantity),
        description: None,
        estimated_value,
    }
}

pub(super) fn collection_draft() -> CollectionDraft {
    CollectionDraft {
        items: vec![laptop_item(1, Some(250.0))],
        pickup_address: Some(address_draft()),
        preferred_date: Some("2026-09-15".to_string()),
        preferred_time_slot: Some("morning".to_string()),
        notes: None,
    }
}

pub(super) fn donation_item() -> ItemDraft {
    ItemDraft {
        category: Some("mobile".to_string()),
        brand: Some("Pixel".to_string()),
        model: Some("6a".to_string()),
        condition: Some("good".to_string()),
        quantity: Some(1),
        description: Some("Lightly used".to_string()),
        estimated_value: Some(120.0),
    }
}

pub(super) fn donation_draft() -> DonationDraft {
    DonationDraft {
        items: vec![donation_item()],
        pickup_address: Some(address_draft()),
        preferred_date: Some("2026-09-20".to_string()),
        preferred_time_slot: Some("evening".to_string()),
        donation_purpose: Some("education".to_string()),
        notes: None,
    }
}

pub(super) fn collection_setup() -> (Arc<InMemoryStore<Collection>>, CollectionService) {
    let store: Arc<InMemoryStore<Collection>> = Arc::new(InMemoryStore::default());
    (store.clone(), CollectionService::new(store))
}

pub(super) fn donation_setup() -> (Arc<InMemoryStore<Donation>>, DonationService) {
    let store: Arc<InMemoryStore<Donation>> = Arc::new(InMemoryStore::default());
    (store.clone(), DonationService::new(store))
}

/// Directory fixture with a handful of registered principals.
#[derive(Default)]
pub(super) struct StaticDirectory {
    entries: Mutex<HashMap<PrincipalId, PrincipalSummary>>,
}

impl StaticDirectory {
    pub(super) fn register(&self, id: &str, name: &str) {
        let id = PrincipalId(id.to_string());
        let summary = PrincipalSummary {
            id: id.clone(),
            name: Some(name.to_string()),
            email: Some(format!("{}@example.org", id.0)),
            phone: None,
        };
        self.entries
            .lock()
            .expect("directory mutex poisoned")
            .insert(id, summary);
    }
}

impl PrincipalDirectory for StaticDirectory {
    fn lookup(&self, id: &PrincipalId) -> Option<PrincipalSummary> {
        self.entries
            .lock()
            .expect("directory mutex poisoned")
            .get(id)
            .cloned()
    }
}

pub(super) fn router_setup() -> (axum::Router, Arc<StaticDirectory>) {
    let collections: Arc<InMemoryStore<Collection>> = Arc::new(InMemoryStore::default());
    let donations: Arc<InMemoryStore<Donation>> = Arc::new(InMemoryStore::default());
    let directory = Arc::new(StaticDirectory::default());

    let state = LifecycleState {
        collections: Arc::new(CollectionService::new(collections.clone())),
        donations: Arc::new(DonationService::new(donations.clone())),
        dashboard: Arc::new(DashboardService::new(collections, donations)),
        directory: directory.clone(),
    };

    (lifecycle_router(state), directory)
}
