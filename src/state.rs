use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::store::{seed::builtin_catalog, DiversityStore, MemoryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DiversityStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let catalog = builtin_catalog()?;

        let store = match config.store {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL")?;
                let pg = PgStore::connect(url, config.db_max_connections).await?;
                pg.migrate().await?;
                Arc::new(pg) as Arc<dyn DiversityStore>
            }
            StoreBackend::Memory => Arc::new(MemoryStore::new()) as Arc<dyn DiversityStore>,
        };

        let added = store.seed_catalog(&catalog).await?;
        info!(backend = ?config.store, added, total = catalog.len(), "food catalog ready");

        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn DiversityStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}
