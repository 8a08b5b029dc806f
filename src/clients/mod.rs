//! Thin HTTP clients for the external catalogs.
//!
//! Each client returns the raw JSON document served by its API. Mapping into
//! catalog rows belongs to the caller.

pub mod bangumi;
pub mod jikan;
pub mod mal;
pub mod vndb;

use crate::config::CollectorsConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use bangumi::{BangumiClient, SubjectSearch, SubjectSearchFilter};
pub use jikan::JikanClient;
pub use mal::MalClient;
pub use vndb::VndbClient;

#[derive(Debug, Error)]
pub enum CollectorError {
    /// Connect, timeout or other request-level failure; nothing was received.
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{service} has no record for {id}")]
    NotFound { service: &'static str, id: String },

    #[error("{service} sent an undecodable response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} is not configured: {message}")]
    Config {
        service: &'static str,
        message: String,
    },
}

impl CollectorError {
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::NotFound { service, .. }
            | Self::Decode { service, .. }
            | Self::Config { service, .. } => service,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::NotFound { .. } => "not_found",
            Self::Decode { .. } => "decode",
            Self::Config { .. } => "config",
        }
    }
}

/// A source of raw catalog documents.
#[async_trait]
pub trait Collector: Send + Sync {
    fn service(&self) -> &'static str;

    /// Fetches the primary document for `id` in the source's own id scheme.
    async fn fetch(&self, id: &str) -> Result<Value, CollectorError>;
}

/// Builds the shared HTTP client with the configured user agent and timeout.
pub fn http_client(config: &CollectorsConfig) -> Result<Client, CollectorError> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| CollectorError::Config {
            service: "http",
            message: e.to_string(),
        })
}

/// Builds every configured collector. MAL is skipped without a client id.
pub fn from_config(config: &CollectorsConfig) -> Result<Vec<Box<dyn Collector>>, CollectorError> {
    let http = http_client(config)?;
    let mut collectors: Vec<Box<dyn Collector>> = vec![
        Box::new(BangumiClient::new(
            http.clone(),
            &config.bangumi.base_url,
            config.bangumi.resolved_token(),
        )),
        Box::new(JikanClient::new(http.clone(), &config.jikan.base_url)),
        Box::new(VndbClient::new(http.clone(), &config.vndb.base_url)),
    ];

    if let Some(client_id) = config.mal.resolved_client_id() {
        collectors.push(Box::new(MalClient::new(http, &config.mal.base_url, client_id)));
    }
    Ok(collectors)
}

pub(crate) fn parse_numeric_id(service: &'static str, id: &str) -> Result<u64, CollectorError> {
    id.trim().parse().map_err(|_| CollectorError::NotFound {
        service,
        id: id.to_string(),
    })
}

/// Sends the request and decodes a JSON body, classifying every failure.
pub(crate) async fn send_json(
    service: &'static str,
    id: &str,
    request: RequestBuilder,
) -> Result<Value, CollectorError> {
    metrics::counter!("collector_requests_total", "service" => service).increment(1);

    let result = execute(service, id, request).await;
    if let Err(err) = &result {
        metrics::counter!(
            "collector_failures_total",
            "service" => service,
            "kind" => err.kind()
        )
        .increment(1);
    }
    result
}

async fn execute(
    service: &'static str,
    id: &str,
    request: RequestBuilder,
) -> Result<Value, CollectorError> {
    let response = request
        .send()
        .await
        .map_err(|source| CollectorError::Transport { service, source })?;

    let status = response.status();
    debug!(service, id, status = status.as_u16(), "Collector response");

    if status == StatusCode::NOT_FOUND {
        return Err(CollectorError::NotFound {
            service,
            id: id.to_string(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CollectorError::Status {
            service,
            status,
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| CollectorError::Transport { service, source })?;
    serde_json::from_slice(&bytes).map_err(|source| CollectorError::Decode { service, source })
}

pub(crate) fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_lose_trailing_slashes() {
        assert_eq!(trim_base("https://api.bgm.tv/v0/"), "https://api.bgm.tv/v0");
        assert_eq!(trim_base("https://api.bgm.tv/v0"), "https://api.bgm.tv/v0");
    }

    #[test]
    fn non_numeric_ids_are_unknown_records() {
        let err = parse_numeric_id("bangumi", "abc").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.service(), "bangumi");
        assert_eq!(parse_numeric_id("bangumi", " 42 ").unwrap(), 42);
    }

    #[test]
    fn http_client_builds_from_defaults() {
        let config = CollectorsConfig::default();
        assert!(http_client(&config).is_ok());
    }
}
