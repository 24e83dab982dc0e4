//! Application state.

use std::sync::Arc;
use std::time::Duration;

use airtime_store::Database;

use crate::config::ServiceConfig;
use crate::provider::ProviderClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub db: Database,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Top-up provider client (absent until a retailer id is configured).
    pub provider: Option<Arc<ProviderClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(db: Database, config: ServiceConfig) -> Self {
        let provider = config.provider_retailer.as_ref().and_then(|retailer| {
            let timeout = Duration::from_secs(config.provider_timeout_seconds);
            match ProviderClient::new(&config.provider_base_url, retailer, timeout) {
                Ok(client) => {
                    tracing::info!(
                        provider_url = %config.provider_base_url,
                        "Top-up provider configured"
                    );
                    Some(Arc::new(client.with_credentials(
                        config.provider_api_key.clone(),
                        config.provider_api_secret.clone(),
                    )))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create provider client");
                    None
                }
            }
        });

        if config.simulate_provider() {
            tracing::info!(
                environment = %config.environment,
                "Non-production environment - top-ups will be simulated"
            );
        } else if provider.is_none() {
            tracing::warn!("Provider not configured - top-up requests will fail");
        }

        Self {
            db,
            config,
            provider,
        }
    }

    /// Check if the provider client is configured.
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }
}
