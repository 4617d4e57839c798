use std::sync::Arc;

use common::{BackendClient, Config};
use levels::{InMemoryLevelRepository, LevelRepository};
use rankings::RankingService;

pub struct AppState {
    pub config: Config,
    pub rankings: RankingService,
    pub levels: Arc<dyn LevelRepository>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let levels: Arc<dyn LevelRepository> = Arc::new(InMemoryLevelRepository::with_defaults());
        Self::with_levels(config, levels)
    }

    pub fn with_levels(config: Config, levels: Arc<dyn LevelRepository>) -> anyhow::Result<Arc<Self>> {
        let backend = BackendClient::new(&config.backend)?;
        let rankings = RankingService::new(Arc::new(backend), config.rankings.failure_policy);

        Ok(Arc::new(Self {
            config,
            rankings,
            levels,
        }))
    }
}
