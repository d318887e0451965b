use std::sync::Arc;

use crate::config::Config;
use crate::providers::ProviderClient;
use crate::store::{HistoryStore, SettingsStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub providers: ProviderClient,
    pub settings: Arc<SettingsStore>,
    pub history: Arc<HistoryStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        providers: ProviderClient,
        settings: Arc<SettingsStore>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            providers,
            settings,
            history,
        }
    }
}
