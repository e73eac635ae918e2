use std::sync::Arc;

use adapters::{RestBackend, RestClient};

use crate::config::Config;
use crate::errors::AppError;
use crate::services::{AppContext, RestGateway};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub context: Arc<AppContext>,
    pub gateway: RestGateway,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = RestClient::new(&config.api_base_url, config.request_timeout)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Builds the state around an arbitrary REST backend.
    pub fn with_backend(config: Config, backend: Arc<dyn RestBackend>) -> Self {
        Self {
            config: Arc::new(config),
            context: Arc::new(AppContext::new()),
            gateway: RestGateway::new(backend),
        }
    }
}
