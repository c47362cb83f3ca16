use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tracing::info;
use wayfarer_agent::llm::LlmClient;
use wayfarer_amadeus::{AmadeusClient, AmadeusError};
use wayfarer_core::config::{AppConfig, ConfigError, LoadOptions};
use wayfarer_core::provider::TravelProvider;
use wayfarer_llm::{GeminiClient, LlmError};

use crate::chat::{self, ChatState};
use crate::health;

/// Process-scoped service handles, constructed once at startup and injected
/// into the request-handling path.
pub struct Application {
    pub config: AppConfig,
    pub llm: Arc<dyn LlmClient>,
    pub travel: Arc<dyn TravelProvider>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("llm client initialization failed: {0}")]
    Llm(#[from] LlmError),
    #[error("travel-data client initialization failed: {0}")]
    Amadeus(#[from] AmadeusError),
}

#[allow(dead_code)]
pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::from_config(&config.llm)?);
    info!(
        event_name = "system.bootstrap.llm_ready",
        correlation_id = "bootstrap",
        model = %config.llm.model,
        "llm client initialized"
    );

    let travel: Arc<dyn TravelProvider> = Arc::new(AmadeusClient::from_config(&config.amadeus)?);
    info!(
        event_name = "system.bootstrap.amadeus_ready",
        correlation_id = "bootstrap",
        "travel-data client initialized"
    );

    Ok(Application { config, llm, travel })
}

impl Application {
    pub fn router(&self) -> Router {
        let state = ChatState { llm: self.llm.clone(), travel: self.travel.clone() };
        health::router()
            .merge(chat::router(state))
            .layer(chat::cors_layer(&self.config.server.allowed_origins))
    }
}
