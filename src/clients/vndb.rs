use super::{send_json, trim_base, Collector, CollectorError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub const VNDB_API: &str = "https://api.vndb.org/kana";
const SERVICE: &str = "vndb";

const VN_FIELDS: &str = "id, title, alttitle, titles.title, titles.lang, aliases, released, \
languages, platforms, image.url, image.thumbnail, image.sexual, length_minutes, description, \
screenshots.url, screenshots.thumbnail, tags.name, tags.rating, developers.id, developers.name, \
staff.id, staff.name, staff.role, extlinks.url, extlinks.label";

const CHARACTER_FIELDS: &str = "id, name, original, aliases, description, image.url, blood_type, \
height, weight, bust, waist, hips, age, birthday, sex, traits.id, traits.name, vns.id, vns.role";

/// VNDB's kana API. Every query is a `POST` with a filter expression.
#[derive(Clone)]
pub struct VndbClient {
    client: Client,
    base_url: String,
}

/// Accepts `17` as well as `v17`.
fn normalize_vn_id(id: &str) -> String {
    let id = id.trim();
    if id.starts_with('v') {
        id.to_string()
    } else {
        format!("v{id}")
    }
}

/// The first element of `results`, or `NotFound` for an empty result set.
fn first_result(service: &'static str, id: &str, mut document: Value) -> Result<Value, CollectorError> {
    document
        .get_mut("results")
        .and_then(Value::as_array_mut)
        .filter(|results| !results.is_empty())
        .map(|results| results.swap_remove(0))
        .ok_or_else(|| CollectorError::NotFound {
            service,
            id: id.to_string(),
        })
}

impl VndbClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }

    async fn query(&self, endpoint: &str, id: &str, body: &Value) -> Result<Value, CollectorError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        send_json(SERVICE, id, self.client.post(&url).json(body)).await
    }

    /// The visual novel document for `id`.
    pub async fn fetch_vn(&self, id: &str) -> Result<Value, CollectorError> {
        let vn_id = normalize_vn_id(id);
        let body = json!({
            "filters": ["id", "=", vn_id],
            "fields": VN_FIELDS,
        });
        let document = self.query("vn", &vn_id, &body).await?;
        first_result(SERVICE, &vn_id, document)
    }

    /// Every character appearing in the visual novel, as the raw result page.
    pub async fn fetch_characters(&self, id: &str) -> Result<Value, CollectorError> {
        let vn_id = normalize_vn_id(id);
        let body = json!({
            "filters": ["vn", "=", ["id", "=", vn_id]],
            "fields": CHARACTER_FIELDS,
            "results": 100,
        });
        self.query("character", &vn_id, &body).await
    }
}

#[async_trait]
impl Collector for VndbClient {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn fetch(&self, id: &str) -> Result<Value, CollectorError> {
        self.fetch_vn(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vn_ids_gain_prefix() {
        assert_eq!(normalize_vn_id("17"), "v17");
        assert_eq!(normalize_vn_id(" v17 "), "v17");
    }

    #[test]
    fn empty_results_are_not_found() {
        let err = first_result(SERVICE, "v1", json!({ "results": [], "more": false })).unwrap_err();
        assert!(err.is_not_found());

        let hit = first_result(SERVICE, "v1", json!({ "results": [{ "id": "v1" }] })).unwrap();
        assert_eq!(hit["id"], "v1");
    }
}
