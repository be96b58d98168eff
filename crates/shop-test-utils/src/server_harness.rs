//! Test server harness for end-to-end testing.
//!
//! Spawns the real router over in-memory stores on a random loopback port,
//! so tests exercise the full HTTP pipeline (interceptor, access decision
//! point, handlers, envelopes) without a database.

use crate::fixtures::test_config;
use crate::memory_stores::{InMemorySweetStore, InMemoryUserStore};
use serde_json::json;
use shop_service::routes::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Running test instance of the shop service.
///
/// Keeps direct handles on the in-memory stores so tests can seed data or
/// mutate accounts mid-flight (role changes, deletions) while the server is
/// up.
///
/// # Example
/// ```rust,ignore
/// let server = TestShopServer::spawn().await?;
/// let token = server.register_and_login("alice", "pw", None).await?;
/// ```
pub struct TestShopServer {
    addr: SocketAddr,
    users: Arc<InMemoryUserStore>,
    sweets: Arc<InMemorySweetStore>,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestShopServer {
    /// Spawn a server on a random loopback port with empty in-memory stores.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let users = Arc::new(InMemoryUserStore::new());
        let sweets = Arc::new(InMemorySweetStore::new());

        let state = Arc::new(AppState {
            users: users.clone(),
            sweets: sweets.clone(),
            config: test_config(),
        });
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            users,
            sweets,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Base URL of the running server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Direct handle on the user store for seeding and mutation mid-test.
    pub fn users(&self) -> &InMemoryUserStore {
        &self.users
    }

    /// Direct handle on the sweet store.
    pub fn sweets(&self) -> &InMemorySweetStore {
        &self.sweets
    }

    /// Register an account over HTTP. Returns the raw response.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        admin_key: Option<&str>,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let mut body = json!({ "username": username, "password": password });
        if let Some(key) = admin_key {
            body["adminKey"] = json!(key);
        }

        Ok(self
            .client
            .post(format!("{}/api/auth/register", self.url()))
            .json(&body)
            .send()
            .await?)
    }

    /// Login over HTTP and extract the issued credential.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.url()))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        anyhow::ensure!(
            response.status().is_success(),
            "login failed with status {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await?;
        body["data"]["token"]
            .as_str()
            .map(|t| t.to_string())
            .ok_or_else(|| anyhow::anyhow!("login response carried no token"))
    }

    /// Register then login, returning a usable credential.
    pub async fn register_and_login(
        &self,
        username: &str,
        password: &str,
        admin_key: Option<&str>,
    ) -> Result<String, anyhow::Error> {
        let response = self.register(username, password, admin_key).await?;
        anyhow::ensure!(
            response.status().is_success(),
            "registration failed with status {}",
            response.status()
        );
        self.login(username, password).await
    }
}
