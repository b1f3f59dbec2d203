use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub security: SecurityConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. When absent the API runs on the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
}

/// Optional SuperAdmin created at startup when no account with that email exists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub super_admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub super_admin_password: Option<String>,
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
        // Server overrides
        if let Some(port) = env::var("PARTNERSHIP_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Pagination overrides; the hard ceiling of 100 is not configurable
        if let Ok(v) = env::var("PAGINATION_DEFAULT_LIMIT") {
            let limit = v.parse().unwrap_or(self.pagination.default_limit);
            self.pagination.default_limit = limit.clamp(1, self.pagination.max_limit);
        }

        // Security overrides
        if let Some(secret) = env::var("JWT_SECRET")
            .ok()
            .or_else(|| env::var("PRIVATE_KEY").ok())
        {
            self.security.jwt_secret = secret;
        }
        if let Ok(v) = env::var("SECURITY_COOKIE_SECURE") {
            self.security.cookie_secure = v.parse().unwrap_or(self.security.cookie_secure);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_HASH_MEMORY_KIB") {
            self.security.hash_memory_kib = v.parse().unwrap_or(self.security.hash_memory_kib);
        }
        if let Ok(v) = env::var("SECURITY_HASH_ITERATIONS") {
            self.security.hash_iterations = v.parse().unwrap_or(self.security.hash_iterations);
        }

        // Bootstrap account
        if let Ok(v) = env::var("BOOTSTRAP_SUPER_ADMIN_EMAIL") {
            self.bootstrap.super_admin_email = Some(v.trim().to_string()).filter(|e| !e.is_empty());
        }
        if let Ok(v) = env::var("BOOTSTRAP_SUPER_ADMIN_PASSWORD") {
            self.bootstrap.super_admin_password = Some(v).filter(|p| !p.is_empty());
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            pagination: PaginationConfig {
                default_limit: 10,
                max_limit: 100,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                cookie_secure: false,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                hash_memory_kib: 19 * 1024,
                hash_iterations: 2,
            },
            bootstrap: BootstrapConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            pagination: PaginationConfig {
                default_limit: 10,
                max_limit: 100,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                cookie_secure: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                hash_memory_kib: 19 * 1024,
                hash_iterations: 2,
            },
            bootstrap: BootstrapConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            pagination: PaginationConfig {
                default_limit: 10,
                max_limit: 100,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                cookie_secure: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                hash_memory_kib: 19 * 1024,
                hash_iterations: 2,
            },
            bootstrap: BootstrapConfig::default(),
        }
    }

    /// Minimal configuration for in-process tests: fixed secret and cheap hashing.
    pub fn for_tests(secret: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.security.jwt_secret = secret.into();
        config.security.hash_memory_kib = 1024;
        config.security.hash_iterations = 1;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.security.cookie_secure);
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.pagination.max_limit, 100);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.cookie_secure);
        assert!(config.is_production());
        assert_eq!(config.pagination.max_limit, 100);
    }

    #[test]
    fn test_config_never_serializes_secret() {
        let mut config = AppConfig::for_tests("super-secret-value");
        config.bootstrap.super_admin_password = Some("bootstrap-password".into());
        let rendered = serde_json::to_string(&config).unwrap();
        assert!(!rendered.contains("super-secret-value"));
        assert!(!rendered.contains("bootstrap-password"));
    }
}
