use super::{parse_numeric_id, send_json, trim_base, Collector, CollectorError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub const JIKAN_API: &str = "https://api.jikan.moe/v4";
const SERVICE: &str = "jikan";

/// Unofficial MyAnimeList mirror; no credentials, MAL anime ids.
#[derive(Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
}

impl JikanClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }

    async fn get(&self, mal_id: u64, path: &str) -> Result<Value, CollectorError> {
        let url = format!("{}/anime/{}{}", self.base_url, mal_id, path);
        send_json(SERVICE, &mal_id.to_string(), self.client.get(&url)).await
    }

    pub async fn fetch_anime(&self, mal_id: u64) -> Result<Value, CollectorError> {
        self.get(mal_id, "/full").await
    }

    pub async fn fetch_characters(&self, mal_id: u64) -> Result<Value, CollectorError> {
        self.get(mal_id, "/characters").await
    }

    pub async fn fetch_staff(&self, mal_id: u64) -> Result<Value, CollectorError> {
        self.get(mal_id, "/staff").await
    }

    /// One page of the episode list. Pages start at 1; the document's
    /// `pagination.has_next_page` tells whether to continue.
    pub async fn fetch_episodes(&self, mal_id: u64, page: u32) -> Result<Value, CollectorError> {
        let mut url = Url::parse(&format!("{}/anime/{}/episodes", self.base_url, mal_id))
            .map_err(|e| CollectorError::Config {
                service: SERVICE,
                message: format!("invalid base url: {e}"),
            })?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string());

        send_json(SERVICE, &mal_id.to_string(), self.client.get(url)).await
    }
}

#[async_trait]
impl Collector for JikanClient {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn fetch(&self, id: &str) -> Result<Value, CollectorError> {
        self.fetch_anime(parse_numeric_id(SERVICE, id)?).await
    }
}
