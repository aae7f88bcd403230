use std::sync::Arc;
use ticketdesk_core::{
    Config, Dataset, DatasetSummary, Dispatcher, IntentResolver, SanitizedConfig,
};

/// Shared application state
pub struct AppState {
    config: Config,
    dispatcher: Dispatcher,
    resolver: Option<Arc<dyn IntentResolver>>,
}

impl AppState {
    pub fn new(
        config: Config,
        dataset: Arc<Dataset>,
        resolver: Option<Arc<dyn IntentResolver>>,
    ) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(dataset),
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dataset_summary(&self) -> DatasetSummary {
        self.dispatcher.dataset().summary()
    }

    /// The configured intent resolver, if any.
    pub fn resolver(&self) -> Option<&Arc<dyn IntentResolver>> {
        self.resolver.as_ref()
    }
}
