use serde::{Deserialize, Serialize};
use std::env;

use crate::auth::MAX_EXPIRY_MINUTES;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, e.g. `sqlite://db.sqlite3?mode=rwc`
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Fixed signing secret. When unset a random secret is generated per process.
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    pub jwt_expiry_minutes: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("HRDOCS_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("HRDOCS_DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Ok(v) = env::var("HRDOCS_HOST") {
            self.api.host = v;
        }
        if let Some(port) = env::var("HRDOCS_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("HRDOCS_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("HRDOCS_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("HRDOCS_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("HRDOCS_JWT_SECRET") {
            if !v.is_empty() {
                self.security.jwt_secret = Some(v);
            }
        }
        if let Ok(v) = env::var("HRDOCS_JWT_EXPIRY_MINUTES") {
            match parse_expiry_minutes(&v) {
                Some(minutes) => self.security.jwt_expiry_minutes = minutes,
                None => tracing::warn!(
                    "Ignoring HRDOCS_JWT_EXPIRY_MINUTES={}: expected 1..={}",
                    v,
                    MAX_EXPIRY_MINUTES
                ),
            }
        }
        if let Ok(v) = env::var("HRDOCS_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite://db.sqlite3?mode=rwc".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: None,
                jwt_expiry_minutes: 15,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "sqlite://db.sqlite3?mode=rwc".to_string(),
                max_connections: 10,
                connection_timeout: 10,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                enable_request_logging: true,
                max_request_size_bytes: 512 * 1024,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: None,
                jwt_expiry_minutes: 15,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "sqlite://db.sqlite3?mode=rwc".to_string(),
                max_connections: 20,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                enable_request_logging: false,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                enable_cors: false,
                jwt_secret: None,
                jwt_expiry_minutes: 15,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    /// Configuration for tests: a given database, cheap hashing, fixed secret.
    pub fn for_testing(database_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.database.url = database_url.into();
        config.api.enable_request_logging = false;
        config.security.bcrypt_cost = 4;
        config.security.jwt_secret = Some("hrdocs-test-secret".to_string());
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Token lifetime in whole minutes, at least one and at most a year
fn parse_expiry_minutes(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|m| (1..=MAX_EXPIRY_MINUTES).contains(m))
}
