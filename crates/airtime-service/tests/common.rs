//! Common test utilities for airtime service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::TestServer;

use airtime_service::{create_router, AppState, ServiceConfig};
use airtime_store::{Database, DbConfig};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Handle onto the same in-memory database the server uses.
    pub db: Database,
}

impl TestHarness {
    /// Harness wired to a provider double at `provider_url`, with provider
    /// calls live (production environment).
    pub async fn with_provider(provider_url: &str) -> Self {
        Self::build(test_config(Some(provider_url))).await
    }

    /// Harness whose provider endpoint refuses connections.
    pub async fn with_unreachable_provider() -> Self {
        Self::build(test_config(None)).await
    }

    /// Harness running in a non-production environment, so provider calls
    /// are simulated without any network I/O.
    pub async fn simulated() -> Self {
        let config = ServiceConfig {
            environment: "development".into(),
            ..test_config(None)
        };
        Self::build(config).await
    }

    /// Harness whose database never had the schema applied.
    pub async fn without_schema() -> Self {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .expect("open in-memory database");
        Self::assemble(db, test_config(None))
    }

    async fn build(config: ServiceConfig) -> Self {
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("open in-memory database");
        Self::assemble(db, config)
    }

    fn assemble(db: Database, config: ServiceConfig) -> Self {
        let state = AppState::new(db.clone(), config);
        let router: Router = create_router(state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, db }
    }
}

/// Service configuration for tests.
///
/// Defaults to the production environment so the provider path is exercised;
/// with no `provider_url` the endpoint points at a port that refuses
/// connections.
pub fn test_config(provider_url: Option<&str>) -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        database_path: ":memory:".into(),
        environment: "production".into(),
        provider_base_url: provider_url.unwrap_or("http://127.0.0.1:1").into(),
        provider_retailer: Some("TEST-RETAILER".into()),
        provider_api_key: Some("test-key".into()),
        provider_api_secret: Some("test-secret".into()),
        provider_timeout_seconds: 2,
        cors_origins: vec!["*".into()],
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 30,
    }
}
