#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use hrdocs_api::config::AppConfig;
use hrdocs_api::database::models::{NewDocument, NewEmployee};
use hrdocs_api::database::{service, Database};
use hrdocs_api::{app, AppState};

/// An in-process server on a free port, backed by a throwaway SQLite file.
/// Lives as long as the test's runtime.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub db: Database,
    pub client: Client,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;
        let db_path = dir.path().join("hrdocs-test.sqlite3");
        let mut config = AppConfig::for_testing(format!("sqlite://{}?mode=rwc", db_path.display()));

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        config.api.host = "127.0.0.1".to_string();
        config.api.port = port;

        let db = Database::connect(&config.database).await?;
        db.init_schema().await?;

        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
        let router = app(AppState::new(db.clone(), config));
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            db,
            client: Client::new(),
            _dir: dir,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
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

    pub async fn signup(&self, name: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/v1/SignUp"))
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await?)
    }

    pub async fn signin(&self, name: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/v1/SignIn"))
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await?)
    }

    /// Sign up and sign in, returning the bearer token
    pub async fn token_for(&self, name: &str, password: &str) -> Result<String> {
        let resp = self.signup(name, password).await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "signup failed: {}", resp.status());

        let body: Value = self.signin(name, password).await?.json().await?;
        body["token"]
            .as_str()
            .map(str::to_owned)
            .context("signin response has no token")
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?)
    }

    /// Seed one position, one department and one employee per name, in order.
    /// Employee ids therefore match their 1-based index.
    pub async fn seed_staff(&self, names: &[&str]) -> Result<SeedIds> {
        let pool = self.db.pool();
        let position_id = service::insert_position(pool, "Engineer").await?;
        let department_id = service::insert_department(pool, "R&D", Some("Research")).await?;

        let mut employee_ids = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let id = service::insert_employee(pool, &employee(name, department_id, position_id, i)).await?;
            employee_ids.push(id);
        }

        Ok(SeedIds {
            position_id,
            department_id,
            employee_ids,
        })
    }

    pub async fn seed_document(&self, title: &str) -> Result<i64> {
        Ok(service::insert_document(
            self.db.pool(),
            &NewDocument {
                title: title.to_string(),
                category: "policy".to_string(),
            },
        )
        .await?)
    }
}

pub struct SeedIds {
    pub position_id: i64,
    pub department_id: i64,
    pub employee_ids: Vec<i64>,
}

pub fn employee(fullname: &str, department_id: i64, position_id: i64, n: usize) -> NewEmployee {
    NewEmployee {
        fullname: fullname.to_string(),
        work_phone_number: format!("+1 555 01{:02}", n),
        phone_number: None,
        office_number: format!("{}A", n + 1),
        email: format!("staff{}@example.com", n),
        birth_day: None,
        department_id,
        position_id,
        manager_id: None,
        assistant_id: None,
        other: None,
    }
}

/// Assert the error envelope and return its message
pub async fn expect_error(resp: Response, status: StatusCode, code: &str) -> Result<String> {
    assert_eq!(resp.status(), status);
    let body: Value = resp.json().await?;
    assert_eq!(body["errorCode"], code, "unexpected body: {}", body);
    assert!(body["timestamp"].is_i64());
    Ok(body["message"].as_str().unwrap_or_default().to_string())
}
