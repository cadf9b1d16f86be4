#![allow(dead_code)]

use product_service::config::{MongoConfig, ProductConfig};
use product_service::services::MongoDb;
use product_service::startup::{build_router, AppState, Application};
use service_core::axum::Router;
use service_core::config::Config as CoreConfig;
use std::time::Duration;
use uuid::Uuid;

pub const TEST_MONGODB_URI: &str = "mongodb://localhost:27017";

pub fn test_config(db_name: &str) -> ProductConfig {
    ProductConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: std::env::var("MONGODB_URI").unwrap_or_else(|_| TEST_MONGODB_URI.to_string()),
            database: db_name.to_string(),
            timeout_secs: 10,
        },
    }
}

/// Router over a client that is never contacted. Only for requests that are
/// rejected before reaching the store.
pub async fn router_without_store() -> Router {
    let config = test_config("product_unused");
    let db = MongoDb::connect(
        &config.mongodb.uri,
        &config.mongodb.database,
        Duration::from_secs(1),
    )
    .await
    .expect("Failed to build MongoDB client");

    build_router(AppState { config, db })
}

/// Router whose store never answers: nothing listens on port 1, so every
/// store call runs until the one-second operation timeout.
pub async fn router_with_unreachable_store() -> Router {
    let mut config = test_config("product_unreachable");
    config.mongodb.uri = "mongodb://127.0.0.1:1".to_string();
    config.mongodb.timeout_secs = 1;

    let db = MongoDb::connect(
        &config.mongodb.uri,
        &config.mongodb.database,
        config.mongodb.op_timeout(),
    )
    .await
    .expect("Failed to build MongoDB client");

    build_router(AppState { config, db })
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("product_test_{}", Uuid::new_v4());

        let app = Application::build(test_config(&db_name))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub async fn post_product(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/product", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_product(&self, store_id: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .put(format!("{}/product/{}", self.address, store_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_product(&self, store_id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/product/{}", self.address, store_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_product(&self, store_id: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/product/{}", self.address, store_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Creates a product and returns its store identifier.
    pub async fn create_product(&self, body: &serde_json::Value) -> String {
        let response = self.post_product(body).await;
        assert_eq!(response.status().as_u16(), 200);

        let envelope: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        envelope["data"]["inserted_id"]
            .as_str()
            .expect("Missing inserted_id")
            .to_string()
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
