use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use ewaste::lifecycle::{
    Collection, CollectionService, DashboardService, Donation, DonationService, InMemoryStore,
    LifecycleState, PrincipalDirectory, PrincipalId, PrincipalSummary,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory backed by a mutable map. Stands in for the external identity
/// service; deployments register principal summaries as the auth layer
/// resolves them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPrincipalDirectory {
    entries: Arc<Mutex<HashMap<PrincipalId, PrincipalSummary>>>,
}

impl InMemoryPrincipalDirectory {
    pub(crate) fn register(&self, summary: PrincipalSummary) {
        let mut guard = self.entries.lock().expect("directory mutex poisoned");
        guard.insert(summary.id.clone(), summary);
    }
}

impl PrincipalDirectory for InMemoryPrincipalDirectory {
    fn lookup(&self, id: &PrincipalId) -> Option<PrincipalSummary> {
        let guard = self.entries.lock().expect("directory mutex poisoned");
        guard.get(id).cloned()
    }
}

/// Wire the lifecycle services over fresh in-memory stores.
pub(crate) fn lifecycle_state(directory: Arc<InMemoryPrincipalDirectory>) -> LifecycleState {
    let collections: Arc<InMemoryStore<Collection>> = Arc::new(InMemoryStore::default());
    let donations: Arc<InMemoryStore<Donation>> = Arc::new(InMemoryStore::default());

    LifecycleState {
        collections: Arc::new(CollectionService::new(collections.clone())),
        donations: Arc::new(DonationService::new(donations.clone())),
        dashboard: Arc::new(DashboardService::new(collections, donations)),
        directory,
    }
}
