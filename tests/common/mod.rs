#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use bloglist_api::config::AppConfig;
use bloglist_api::database::MemoryStore;
use bloglist_api::AppState;

pub const PASSWORD: &str = "sekret";

/// A running server with its own empty in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let state = AppState::new(AppConfig::test(), Arc::new(MemoryStore::new()));

        tokio::spawn(async move {
            axum::serve(listener, bloglist_api::app(state))
                .await
                .expect("test server crashed");
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /api/users and return the created user's id
    pub async fn create_user(&self, username: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/users"))
            .json(&json!({ "username": username, "name": "Test User", "password": PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "user creation failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["id"]
            .as_str()
            .map(str::to_string)
            .context("created user has no id")
    }

    /// POST /api/login and return the bearer token
    pub async fn login(&self, username: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    /// Register and log in, returning `(user_id, token)`
    pub async fn user_with_token(&self, username: &str) -> Result<(String, String)> {
        let id = self.create_user(username).await?;
        let token = self.login(username).await?;
        Ok((id, token))
    }

    /// POST /api/blogs as the token's owner and return the created blog
    pub async fn create_blog(&self, token: &str, blog: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/blogs"))
            .bearer_auth(token)
            .json(&blog)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "blog creation failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }

    pub async fn blogs(&self) -> Result<Vec<Value>> {
        let res = self.client.get(self.url("/api/blogs")).send().await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "listing blogs failed: {}", res.status());
        Ok(res.json::<Vec<Value>>().await?)
    }

    /// Blogs listed under the given user by GET /api/users
    pub async fn blogs_of_user(&self, user_id: &str) -> Result<Vec<Value>> {
        let res = self.client.get(self.url("/api/users")).send().await?;
        let users = res.json::<Vec<Value>>().await?;
        let user = users
            .into_iter()
            .find(|u| u["id"] == user_id)
            .context("user not listed")?;
        Ok(user["blogs"].as_array().cloned().unwrap_or_default())
    }

    /// A user "root" owning the two initial blogs; returns `(user_id, token)`
    pub async fn seeded(&self) -> Result<(String, String)> {
        let (id, token) = self.user_with_token("root").await?;
        for blog in initial_blogs() {
            self.create_blog(&token, blog).await?;
        }
        Ok((id, token))
    }
}

pub fn initial_blogs() -> Vec<Value> {
    vec![
        json!({ "title": "React patterns", "author": "Michael Chan", "url": "https://reactpatterns.com/", "likes": 7 }),
        json!({ "title": "Go To Statement Considered Harmful", "author": "Edsger W. Dijkstra", "url": "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf", "likes": 5 }),
    ]
}

pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
