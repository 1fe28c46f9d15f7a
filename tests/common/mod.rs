#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use superhero_api::auth::{generate_jwt, Claims, JwtAuthenticator};
use superhero_api::config::AppConfig;
use superhero_api::database::{MemoryStore, StoreError, SuperheroStore};
use superhero_api::models::{NewSuperhero, Superhero, SuperheroPatch};
use superhero_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

/// Memory store that counts every call made against it
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SuperheroStore for CountingStore {
    async fn find_all(&self) -> Result<Vec<Superhero>, StoreError> {
        self.hit();
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Superhero>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn create(&self, new: NewSuperhero) -> Result<Superhero, StoreError> {
        self.hit();
        self.inner.create(new).await
    }

    async fn update_by_id(&self, id: Uuid, patch: SuperheroPatch) -> Result<(), StoreError> {
        self.hit();
        self.inner.update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.hit();
        self.inner.delete_by_id(id).await
    }
}

/// Store whose backend can never be reached
pub struct UnreachableStore;

#[async_trait]
impl SuperheroStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<Superhero>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Superhero>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create(&self, _new: NewSuperhero) -> Result<Superhero, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update_by_id(&self, _id: Uuid, _patch: SuperheroPatch) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the app on an ephemeral port inside the current test runtime
    pub async fn spawn(store: Arc<dyn SuperheroStore>) -> Result<Self> {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;

        let authenticator = JwtAuthenticator::new(SECRET).context("test authenticator")?;
        let app = superhero_api::app(AppState::new(store, Arc::new(authenticator)), &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a superhero as `user` and return the stored record
    pub async fn create_hero(&self, user: &TestUser, name: &str, alias: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/superheroes"))
            .bearer_auth(&user.token)
            .json(&json!({ "superhero": { "name": name, "alias": alias } }))
            .send()
            .await?;

        anyhow::ensure!(res.status() == reqwest::StatusCode::CREATED, "create failed: {}", res.status());
        let body = res.json::<Value>().await?;
        Ok(body["superhero"].clone())
    }

    pub async fn get_hero(&self, user: &TestUser, id: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url(&format!("/superheroes/{}", id)))
            .bearer_auth(&user.token)
            .send()
            .await?)
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let token = generate_jwt(SECRET, &Claims::new(id, 1).expect("test claims")).expect("test token");
        Self { id, token }
    }
}

pub async fn spawn_counting() -> Result<(TestServer, Arc<CountingStore>)> {
    let store = Arc::new(CountingStore::default());
    let server = TestServer::spawn(store.clone()).await?;
    Ok((server, store))
}
