use super::{parse_numeric_id, send_json, trim_base, Collector, CollectorError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub const MAL_API: &str = "https://api.myanimelist.net/v2";
const SERVICE: &str = "mal";
const CLIENT_ID_HEADER: &str = "X-MAL-CLIENT-ID";

/// Fields requested for anime details; MAL only returns `id`, `title` and
/// `main_picture` unless asked.
const ANIME_FIELDS: &str = "id,title,main_picture,alternative_titles,start_date,end_date,\
synopsis,mean,rank,popularity,nsfw,media_type,status,genres,num_episodes,start_season,\
broadcast,source,average_episode_duration,rating,pictures,background,related_anime,studios";

#[derive(Clone)]
pub struct MalClient {
    client: Client,
    base_url: String,
    client_id: String,
}

impl MalClient {
    pub fn new(client: Client, base_url: &str, client_id: String) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            client_id,
        }
    }

    pub async fn fetch_anime(&self, anime_id: u64) -> Result<Value, CollectorError> {
        if self.client_id.trim().is_empty() {
            return Err(CollectorError::Config {
                service: SERVICE,
                message: "missing client id".to_string(),
            });
        }

        let mut url = Url::parse(&format!("{}/anime/{anime_id}", self.base_url)).map_err(|e| {
            CollectorError::Config {
                service: SERVICE,
                message: format!("invalid base url: {e}"),
            }
        })?;
        url.query_pairs_mut().append_pair("fields", ANIME_FIELDS);

        let request = self
            .client
            .get(url)
            .header(CLIENT_ID_HEADER, &self.client_id);
        send_json(SERVICE, &anime_id.to_string(), request).await
    }
}

#[async_trait]
impl Collector for MalClient {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn fetch(&self, id: &str) -> Result<Value, CollectorError> {
        self.fetch_anime(parse_numeric_id(SERVICE, id)?).await
    }
}
