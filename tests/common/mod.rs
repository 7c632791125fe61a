#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use productos_api::database::models::{Product, ProductDocument, ProductUpdate};
use productos_api::database::{MemoryProductStore, ProductStore, StoreError};
use productos_api::filter::Filter;
use productos_api::{router, AppState};

/// Router over a fresh in-memory store.
pub fn memory_app() -> Router {
    router(AppState::new(MemoryProductStore::new()))
}

/// Router whose store fails every call.
pub fn failing_app() -> Router {
    router(AppState::new(FailingStore))
}

pub async fn api_call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    send(router, builder.body(body).unwrap()).await
}

/// Sends `body` verbatim as JSON, for payloads `serde_json::Value` cannot express.
pub async fn api_call_raw(router: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, req).await
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap_or(json!(null))
    };
    (status, json)
}

/// Creates a product through the API and returns the stored record.
pub async fn create(router: &Router, identifier: i64, name: &str, amount: f64, category: &str) -> Value {
    let (status, body) = api_call(
        router,
        "POST",
        "/productos",
        Some(json!({ "identifier": identifier, "name": name, "amount": amount, "category": category })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

pub fn key_of(record: &Value) -> String {
    record["_id"].as_str().expect("record has _id").to_string()
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub struct FailingStore;

#[async_trait]
impl ProductStore for FailingStore {
    async fn find_many(&self, _filter: &Filter) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Query("connection reset".into()))
    }

    async fn find_by_key(&self, _key: Uuid) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Query("connection reset".into()))
    }

    async fn insert(&self, _document: ProductDocument) -> Result<Product, StoreError> {
        Err(StoreError::Query("connection reset".into()))
    }

    async fn update_by_key(&self, _key: Uuid, _update: ProductUpdate) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Query("connection reset".into()))
    }

    async fn delete_by_key(&self, _key: Uuid) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Query("connection reset".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Query("connection reset".into()))
    }
}

/// A spawned server binary, for tests that need a real database.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Assumes debug profile; adjust if you run tests with --release
        let child = Command::new("target/debug/productos-api")
            .env("PORT", port.to_string())
            .env("HOST", "127.0.0.1")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
