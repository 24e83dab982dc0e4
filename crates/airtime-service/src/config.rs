//! Service configuration.

use std::path::Path;

use serde::Deserialize;

/// Default base URL of the top-up provider API.
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://tppgh.myone4all.com/api/TopUpApi";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to the SQLite database file (default: "./data/airtime.db").
    pub database_path: String,

    /// Deployment environment (default: "development"). Anything other than
    /// "production" simulates provider calls instead of spending real money.
    pub environment: String,

    /// Base URL of the top-up provider API.
    pub provider_base_url: String,

    /// Retailer id sent with every top-up (optional; provider calls fail
    /// until configured).
    pub provider_retailer: Option<String>,

    /// Provider API key (optional).
    pub provider_api_key: Option<String>,

    /// Provider API secret (optional).
    pub provider_api_secret: Option<String>,

    /// Timeout for the external provider call, in seconds.
    pub provider_timeout_seconds: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Provider secrets file structure.
#[derive(Debug, Deserialize)]
struct ProviderSecrets {
    retailer: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_secret: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and the secrets file.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load provider secrets from file first, then fall back to
        // env vars.
        let (provider_retailer, provider_api_key, provider_api_secret) = load_provider_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/airtime.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            provider_base_url: std::env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.into()),
            provider_retailer,
            provider_api_key,
            provider_api_secret,
            provider_timeout_seconds: std::env::var("PROVIDER_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Whether provider calls are simulated instead of issued.
    ///
    /// Only the "production" environment spends real airtime; everywhere
    /// else the handler fabricates an immediate success with a
    /// deterministic reference.
    #[must_use]
    pub fn simulate_provider(&self) -> bool {
        self.environment != "production"
    }
}

/// Load provider secrets from file or environment.
fn load_provider_secrets() -> (Option<String>, Option<String>, Option<String>) {
    let secret_paths = [
        ".secrets/provider.json",
        "airtime/.secrets/provider.json",
        "../.secrets/provider.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<ProviderSecrets>(path) {
            tracing::info!(path = %path, "Loaded provider secrets from file");
            return (Some(secrets.retailer), secrets.api_key, secrets.api_secret);
        }
    }

    tracing::debug!("Provider secrets file not found, using environment variables");
    (
        std::env::var("PROVIDER_RETAILER").ok(),
        std::env::var("PROVIDER_API_KEY").ok(),
        std::env::var("PROVIDER_API_SECRET").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_path: "./data/airtime.db".into(),
            environment: "development".into(),
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.into(),
            provider_retailer: None,
            provider_api_key: None,
            provider_api_secret: None,
            provider_timeout_seconds: 10,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
