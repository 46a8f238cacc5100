use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Directory holding the per-language FAQ datasets (`<lang>.jsonl`).
    pub faq_dir: PathBuf,
    pub default_language: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "careernav".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "careernav-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let faq_dir = std::env::var("FAQ_DATA_DIR")
            .unwrap_or_else(|_| "data/faq".into())
            .into();
        let default_language = std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".into());
        Ok(Self {
            database_url,
            jwt,
            faq_dir,
            default_language,
        })
    }
}
