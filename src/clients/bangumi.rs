use super::{parse_numeric_id, send_json, trim_base, Collector, CollectorError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub const BANGUMI_API: &str = "https://api.bgm.tv/v0";
const SERVICE: &str = "bangumi";

/// Body of `POST /search/subjects`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubjectSearch {
    pub keyword: String,
    /// `match`, `heat`, `rank` or `score`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "SubjectSearchFilter::is_empty")]
    pub filter: SubjectSearchFilter,
    #[serde(skip)]
    pub limit: Option<u32>,
    #[serde(skip)]
    pub offset: Option<u32>,
}

impl SubjectSearch {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }
}

/// Range filters use Bangumi's comparison strings, e.g. `">=2020-07-01"`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubjectSearchFilter {
    /// Bangumi subject type codes: 1 book, 2 anime, 3 music, 4 game, 6 real.
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub subject_type: Vec<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub air_date: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rating: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rank: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
}

impl SubjectSearchFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subject_type.is_empty()
            && self.meta_tags.is_empty()
            && self.tag.is_empty()
            && self.air_date.is_empty()
            && self.rating.is_empty()
            && self.rank.is_empty()
            && self.nsfw.is_none()
    }
}

#[derive(Clone)]
pub struct BangumiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BangumiClient {
    pub fn new(client: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            token,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn fetch_subject(&self, subject_id: u64) -> Result<Value, CollectorError> {
        send_json(
            SERVICE,
            &subject_id.to_string(),
            self.get(&format!("/subjects/{subject_id}")),
        )
        .await
    }

    pub async fn fetch_subject_persons(&self, subject_id: u64) -> Result<Value, CollectorError> {
        send_json(
            SERVICE,
            &subject_id.to_string(),
            self.get(&format!("/subjects/{subject_id}/persons")),
        )
        .await
    }

    pub async fn fetch_subject_characters(&self, subject_id: u64) -> Result<Value, CollectorError> {
        send_json(
            SERVICE,
            &subject_id.to_string(),
            self.get(&format!("/subjects/{subject_id}/characters")),
        )
        .await
    }

    pub async fn search_subjects(&self, search: &SubjectSearch) -> Result<Value, CollectorError> {
        let mut url = Url::parse(&format!("{}/search/subjects", self.base_url)).map_err(|e| {
            CollectorError::Config {
                service: SERVICE,
                message: format!("invalid base url: {e}"),
            }
        })?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(limit) = search.limit {
                query.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = search.offset {
                query.append_pair("offset", &offset.to_string());
            }
        }

        let mut request = self.client.post(url).json(search);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        send_json(SERVICE, &search.keyword, request).await
    }
}

#[async_trait]
impl Collector for BangumiClient {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn fetch(&self, id: &str) -> Result<Value, CollectorError> {
        self.fetch_subject(parse_numeric_id(SERVICE, id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_omitted_from_search_body() {
        let body = serde_json::to_value(SubjectSearch::new("Frieren")).unwrap();
        assert_eq!(body, serde_json::json!({ "keyword": "Frieren" }));
    }

    #[test]
    fn filter_serializes_type_key() {
        let mut search = SubjectSearch::new("Clannad");
        search.sort = Some("rank".to_string());
        search.filter.subject_type = vec![2];
        search.filter.nsfw = Some(false);
        search.limit = Some(5);

        let body = serde_json::to_value(&search).unwrap();
        assert_eq!(body["filter"]["type"], serde_json::json!([2]));
        assert_eq!(body["filter"]["nsfw"], serde_json::json!(false));
        assert!(body.get("limit").is_none());
    }
}
