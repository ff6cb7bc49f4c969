use std::sync::Arc;

use crate::config::Config;
use crate::identity::IdentityProvider;
use crate::router::Dispatcher;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    /// Same store the dispatcher writes to; used directly by the account routes.
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// Memory-backed state around the given gateway and identity provider.
    pub(crate) fn for_tests(
        gateway: Arc<dyn crate::llm_client::ContentGateway>,
        identity: Arc<dyn IdentityProvider>,
        config: Config,
    ) -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(crate::store::MemoryDocumentStore::new());
        let dispatcher = Dispatcher::new(
            store.clone(),
            gateway,
            crate::models::job::static_jobs(),
        );
        Self {
            dispatcher: Arc::new(dispatcher),
            store,
            identity,
            config,
        }
    }
}
