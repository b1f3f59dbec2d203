#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use partnership_api::config::AppConfig;
use partnership_api::database::models::User;
use partnership_api::database::{Stores, UserStore};
use partnership_api::types::{Role, UserStatus};
use partnership_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Passw0rd!";

/// In-process server over fresh in-memory stores; one per test for isolation
pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
    client: reqwest::Client,
}

pub struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl Reply {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::for_tests(SECRET)).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(config, Stores::memory())?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        let router = app(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { base_url, state, client: reqwest::Client::new() })
    }

    /// Inserts straight into the store with `PASSWORD` as the credential
    pub async fn seed_user(&self, email: &str, role: Role, campus: Option<&str>, status: UserStatus) -> Result<User> {
        let hash = self.state.passwords.hash(PASSWORD).await?;
        let user = User::new(
            "Test".into(),
            "User".into(),
            email.into(),
            hash,
            role,
            campus.map(String::from),
            status,
        );
        self.state.stores.users.insert(&user).await?;
        Ok(user)
    }

    /// Seeds an active account and returns it with a signed session token
    pub async fn seed_session(&self, email: &str, role: Role, campus: Option<&str>) -> Result<(User, String)> {
        let user = self.seed_user(email, role, campus, UserStatus::Active).await?;
        let token = self.state.issuer.issue(&user)?;
        Ok((user, token))
    }

    pub async fn send(&self, method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> Result<Reply> {
        let mut req = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        reply(req.send().await?).await
    }

    pub async fn send_with_cookie(&self, method: Method, path: &str, cookie: &str) -> Result<Reply> {
        let res = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await?;
        reply(res).await
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<Reply> {
        self.send(Method::GET, path, Some(token), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> Result<Reply> {
        self.send(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> Result<Reply> {
        self.send(Method::PUT, path, Some(token), Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<Reply> {
        self.send(Method::DELETE, path, Some(token), None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Reply> {
        self.send(Method::POST, "/login", None, Some(json!({ "email": email, "password": password })))
            .await
    }

    /// Creates a partnership and returns its id
    pub async fn create_partnership(&self, token: &str, body: Value) -> Result<String> {
        let reply = self.post("/partnerships", token, body).await?;
        anyhow::ensure!(
            reply.status == StatusCode::CREATED,
            "create failed: {} {}",
            reply.status,
            reply.body
        );
        reply.data()["id"].as_str().map(String::from).context("created record has no id")
    }
}

async fn reply(res: reqwest::Response) -> Result<Reply> {
    let status = res.status();
    let set_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    Ok(Reply { status, set_cookie, body })
}

/// Minimal valid partnership body
pub fn partnership(name: &str) -> Value {
    json!({
        "partnerInstitution": {
            "name": name,
            "country": "Ethiopia",
            "typeOfOrganization": "University"
        },
        "aauContact": { "interestedCollegeOrDepartment": "College of Natural Sciences" },
        "potentialAreasOfCollaboration": ["Research"],
        "potentialStartDate": "2025-09-01",
        "durationOfPartnership": "3 years",
        "partnerContactPerson": { "name": "Partner Contact", "institutionalEmail": "contact@partner.edu" },
        "aauContactPerson": { "name": "Local Contact" }
    })
}

/// Returns `base` with the top-level fields of `patch` overwritten
pub fn with(mut base: Value, patch: Value) -> Value {
    if let (Some(target), Value::Object(fields)) = (base.as_object_mut(), patch) {
        target.extend(fields);
    }
    base
}
