use anyhow::{bail, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(StorageBackend::Postgres),
            "memory" | "in-memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub storage_backend: StorageBackend,
    /// How long an imported plan stays valid
    pub plan_validity_days: i64,
    pub min_logs_for_recommendations: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            jwt_secret: "your-secret-key-change-in-production".to_string(),
            storage_backend: StorageBackend::Postgres,
            plan_validity_days: 60,
            min_logs_for_recommendations: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(defaults.port);
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
        let jwt_secret = env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret);

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => match StorageBackend::parse(&value) {
                Some(backend) => backend,
                None => bail!("Unknown STORAGE_BACKEND '{}'", value),
            },
            Err(_) => defaults.storage_backend,
        };

        let plan_validity_days = env::var("PLAN_VALIDITY_DAYS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(defaults.plan_validity_days);

        let min_logs_for_recommendations = env::var("MIN_LOGS_FOR_RECOMMENDATIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(defaults.min_logs_for_recommendations);

        let config = AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
            storage_backend,
            plan_validity_days,
            min_logs_for_recommendations,
        };

        if config.is_production() && config.jwt_secret == AppConfig::default().jwt_secret {
            bail!("JWT_SECRET must be set in production");
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
