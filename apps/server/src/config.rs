use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::{decode_secret_key, AuthConfig};

const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 12;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `None` disables authentication; every request then acts as an anonymous admin.
    pub auth: Option<AuthConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("ECC_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid ECC_LISTEN_ADDR")?;
        let db_path = std::env::var("ECC_DB_PATH").unwrap_or_else(|_| "./db/ecclesia.db".into());
        let cors_allow = parse_origins(
            &std::env::var("ECC_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = match std::env::var("ECC_REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("ECC_REQUEST_TIMEOUT_MS must be a number of milliseconds")?,
            Err(_) => 30_000,
        };
        let auth = match std::env::var("ECC_JWT_SECRET") {
            Ok(raw) => Some(AuthConfig {
                jwt_secret: decode_secret_key(&raw).context("Invalid ECC_JWT_SECRET")?,
                access_token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            }),
            Err(_) => None,
        };
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            auth,
        })
    }

    /// Defaults for an embedded or test server backed by `db_path`.
    pub fn with_db_path(db_path: impl Into<String>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            db_path: db_path.into(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            auth: None,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
