use vidhook_core::{Config, Ingestor};

/// Shared application state
pub struct AppState {
    config: Config,
    ingestor: Ingestor,
}

impl AppState {
    pub fn new(config: Config, ingestor: Ingestor) -> Self {
        Self { config, ingestor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ingestor(&self) -> &Ingestor {
        &self.ingestor
    }
}
