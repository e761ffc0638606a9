use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tenancy::seed::{SeedError, SeedFile};
use tenancy::store::InMemoryStore;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fresh store, optionally filled from a seed file.
pub(crate) fn build_store(seed_path: Option<&Path>) -> Result<Arc<InMemoryStore>, SeedError> {
    let store = Arc::new(InMemoryStore::new());
    match seed_path {
        Some(path) => {
            let summary = SeedFile::load(path)?.apply(store.as_ref())?;
            info!(path = %path.display(), %summary, "store seeded");
        }
        None => info!("starting with an empty store"),
    }
    Ok(store)
}
