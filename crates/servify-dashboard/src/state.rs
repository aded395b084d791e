use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use servify_core::analytics::{CredentialStore, SalesBackend};
use servify_core::config::{Config, StoreKind};
use servify_duckdb::DuckDbBackend;
use servify_mysql::MySqlBackend;

use crate::gate::AuthGate;
use crate::service::AggregationService;

/// Process-wide handles shared by every session: the configured store and
/// the parsed configuration. Holds no per-user state.
pub struct AppState {
    pub sales: Arc<dyn SalesBackend>,
    pub credentials: Arc<dyn CredentialStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wrap one backend that serves both sales aggregates and credentials.
    pub fn new<B>(backend: Arc<B>, config: Config) -> Self
    where
        B: SalesBackend + CredentialStore,
    {
        Self {
            sales: backend.clone(),
            credentials: backend,
            config: Arc::new(config),
        }
    }

    /// Open the store selected by `config.store`.
    pub async fn open(config: Config) -> Result<Self> {
        match config.store {
            StoreKind::MySql => {
                let backend = MySqlBackend::connect_lazy(&config.db, config.max_connections);
                Ok(Self::new(Arc::new(backend), config))
            }
            StoreKind::DuckDb => {
                if let Some(parent) = Path::new(&config.duckdb_path).parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let backend =
                    DuckDbBackend::open(&config.duckdb_path, &config.duckdb_memory_limit)?;
                info!(path = %config.duckdb_path, "Using embedded DuckDB store");
                Ok(Self::new(Arc::new(backend), config))
            }
        }
    }

    pub fn service(&self) -> AggregationService {
        AggregationService::new(Arc::clone(&self.sales))
    }

    pub fn gate(&self) -> AuthGate {
        AuthGate::new(Arc::clone(&self.credentials))
    }
}
