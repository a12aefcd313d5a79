use std::sync::Arc;

use mtx_sdk::{IngestConfig, InMemoryTableStore, MatrixService, WorkflowGate};
use mtx_store::FsTableStore;

use crate::auth::{AuthProvider, TokenAuth};
use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared application state: the service plus the authentication seam.
pub struct AppState {
    pub service: MatrixService,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Assemble state from a server configuration.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Arc<Self>> {
        let store: Arc<dyn mtx_sdk::TableStore> = match &config.tables_root {
            Some(root) => Arc::new(FsTableStore::open(root).map_err(|e| {
                crate::error::ServerError::Config(format!(
                    "cannot open table store at {}: {e}",
                    root.display()
                ))
            })?),
            None => Arc::new(InMemoryTableStore::new()),
        };
        let service = MatrixService::new(WorkflowGate::new(), store, config.ingest);
        let auth = Arc::new(TokenAuth::new(config.superusers.clone()));
        Ok(Arc::new(Self { service, auth }))
    }

    /// Fully in-memory state with open token auth. Used by tests.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self {
            service: MatrixService::new(
                WorkflowGate::new(),
                Arc::new(InMemoryTableStore::new()),
                IngestConfig::default(),
            ),
            auth: Arc::new(TokenAuth::new(vec!["root".into()])),
        })
    }
}
