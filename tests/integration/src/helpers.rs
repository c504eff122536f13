//! Test helpers for integration tests
//!
//! Provides the spawned test server, token minting and response assertions.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use forum_api::{create_app, create_app_state, serve};
use forum_common::{AppConfig, JwtService};
use forum_core::UserId;
use forum_db::PgPool;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret used when `JWT_SECRET` is not set
const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            pool,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Insert a user row the way the identity system would
    pub async fn seed_user(&self) -> Result<UserId> {
        let id = UserId::generate();
        sqlx::query("INSERT INTO users (id, username) VALUES ($1, $2)")
            .bind(id.into_inner())
            .bind(format!("user_{id}"))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    /// Poll the stored view count until it reaches `expected` or a second passes
    pub async fn wait_for_view_count(&self, thread_id: uuid::Uuid, expected: i64) -> Result<i64> {
        let mut current = 0;
        for _ in 0..50 {
            current = sqlx::query_scalar("SELECT view_count FROM forum_threads WHERE id = $1")
                .bind(thread_id)
                .fetch_one(&self.pool)
                .await?;
            if current >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        Ok(current)
    }

    /// Mint a bearer token for `user_id`
    pub fn token(&self, user_id: UserId, moderator: bool) -> Result<String> {
        Ok(self.jwt.issue_access_token(user_id, moderator)?)
    }

    /// A fresh member with a token
    pub async fn member(&self) -> Result<TestUser> {
        let id = self.seed_user().await?;
        Ok(TestUser {
            id,
            token: self.token(id, false)?,
        })
    }

    /// A fresh moderator with a token
    pub async fn moderator(&self) -> Result<TestUser> {
        let id = self.seed_user().await?;
        Ok(TestUser {
            id,
            token: self.token(id, true)?,
        })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.get(self.url(path)).bearer_auth(token)).await
    }

    /// Make a POST request with JSON body and no token
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        send(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        send(self.client.post(self.url(path)).bearer_auth(token).json(body)).await
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.post(self.url(path)).bearer_auth(token)).await
    }

    /// Make a POST request with a raw, possibly malformed, JSON body
    pub async fn post_raw(&self, path: &str, token: &str, body: &'static str) -> Result<Response> {
        send(
            self.client
                .post(self.url(path))
                .bearer_auth(token)
                .header("Content-Type", "application/json")
                .body(body),
        )
        .await
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        send(self.client.patch(self.url(path)).bearer_auth(token).json(body)).await
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.delete(self.url(path)).bearer_auth(token)).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    Ok(request.send().await?)
}

/// A seeded user and its bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub token: String,
}

/// Create a test configuration
///
/// Reads the environment, binding to an ephemeral port and falling back to a
/// fixed secret when `JWT_SECRET` is absent.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    AppConfig::from_lookup(|key| match key {
        "API_PORT" => Some("0".to_string()),
        "JWT_SECRET" => std::env::var(key)
            .ok()
            .or_else(|| Some(TEST_JWT_SECRET.to_string())),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error status and return the stable error code from the envelope
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("missing error code in {body}"))
}
