use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("TRANSLATE_API_KEY not set; required for the remote service")]
    ApiKeyNotSet,

    #[error("translation API rate limit exceeded")]
    RateLimited,

    #[error("translation API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("translation API returned no text")]
    EmptyTranslation,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Abstraction over the translation backend. Implemented by
/// `HttpTranslator` for both the cloud service and a locally hosted
/// translation server; test doubles implement it directly.
pub trait Translator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// LibreTranslate-style `/translate` client. The same wire format serves the
/// hosted cloud API (with an API key) and an offline local server (without).
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    http: Client,
    base_url: String,
    api_key: Option<ApiKey>,
    source: String,
}

impl HttpTranslator {
    /// Remote mode: API key comes from `TRANSLATE_API_KEY`.
    pub fn remote(http: Client, base_url: &str) -> Result<Self, TranslateError> {
        let api_key = env::var("TRANSLATE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(TranslateError::ApiKeyNotSet)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: Some(ApiKey(api_key)),
            source: "en".into(),
        })
    }

    /// Local mode: a translation server on this machine, no key needed.
    pub fn local(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            source: "en".into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_key(mut self, key: &str) -> Self {
        self.api_key = Some(ApiKey(key.to_string()));
        self
    }
}

impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate", self.base_url);
        let request = TranslateRequest {
            q: text,
            source: &self.source,
            target,
            format: "text",
            api_key: self.api_key.as_ref().map(|k| k.0.as_str()),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("translation API rate limited");
            return Err(TranslateError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TranslateResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    let snippet: String = text.chars().take(200).collect();
                    format!("HTTP {status}: {snippet}")
                });
            warn!(status = %status, %message, "translation API error");
            return Err(TranslateError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = response.json().await?;
        if let Some(error) = body.error {
            warn!(%error, "translation API error in 200 response");
            return Err(TranslateError::Api {
                code: status.as_u16(),
                message: error,
            });
        }

        let translated = body
            .translated_text
            .filter(|t| !t.is_empty())
            .ok_or(TranslateError::EmptyTranslation)?;
        debug!(target, chars = translated.chars().count(), "translated");
        Ok(translated)
    }
}
