//! Collector clients against a local stand-in server.

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use noshiro::clients::{
    BangumiClient, Collector, CollectorError, JikanClient, MalClient, SubjectSearch, VndbClient,
    http_client,
};
use noshiro::config::CollectorsConfig;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn http() -> reqwest::Client {
    http_client(&CollectorsConfig::default()).unwrap()
}

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, |v| Value::String(v.to_string()))
}

async fn echo_subject(Path(id): Path<u64>, headers: HeaderMap) -> impl IntoResponse {
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({ "title": "Not Found" })));
    }
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("upstream exploded")));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": id,
            "authorization": header(&headers, "authorization"),
            "user_agent": header(&headers, "user-agent"),
        })),
    )
}

fn bangumi_app() -> Router {
    Router::new()
        .route("/subjects/{id}", get(echo_subject))
        .route("/broken/subjects/{id}", get(|| async { "{not json" }))
        .route(
            "/search/subjects",
            post(
                |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                    Json(json!({ "query": query, "body": body }))
                },
            ),
        )
}

#[tokio::test]
async fn test_bangumi_sends_bearer_token() {
    let base = spawn_server(bangumi_app()).await;

    let client = BangumiClient::new(http(), &base, Some("secret".to_string()));
    let subject = client.fetch_subject(400_602).await.unwrap();
    assert_eq!(subject["id"], 400_602);
    assert_eq!(subject["authorization"], "Bearer secret");
    assert!(subject["user_agent"].as_str().unwrap().starts_with("noshiro"));

    let anonymous = BangumiClient::new(http(), &base, None);
    let subject = anonymous.fetch("400602").await.unwrap();
    assert_eq!(subject["authorization"], Value::Null);
}

#[tokio::test]
async fn test_failures_are_classified() {
    let base = spawn_server(bangumi_app()).await;
    let client = BangumiClient::new(http(), &base, None);

    let err = client.fetch_subject(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.service(), "bangumi");

    let err = client.fetch_subject(500).await.unwrap_err();
    match err {
        CollectorError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("upstream exploded"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let broken = BangumiClient::new(http(), &format!("{base}/broken"), None);
    let err = broken.fetch_subject(1).await.unwrap_err();
    assert!(matches!(err, CollectorError::Decode { .. }), "got {err:?}");

    let err = client.fetch("not-a-number").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);

    let client = JikanClient::new(http(), &format!("http://{addr}"));
    let err = client.fetch_anime(1).await.unwrap_err();
    assert!(err.is_transport(), "got {err:?}");
}

#[tokio::test]
async fn test_bangumi_search_posts_filter() {
    let base = spawn_server(bangumi_app()).await;
    let client = BangumiClient::new(http(), &base, None);

    let mut search = SubjectSearch::new("frieren");
    search.filter.subject_type = vec![2];
    search.limit = Some(5);
    let echoed = client.search_subjects(&search).await.unwrap();

    assert_eq!(echoed["query"]["limit"], "5");
    assert_eq!(echoed["query"].get("offset"), None);
    assert_eq!(echoed["body"]["keyword"], "frieren");
    assert_eq!(echoed["body"]["filter"]["type"], json!([2]));
    assert_eq!(echoed["body"].get("limit"), None);
}

#[tokio::test]
async fn test_mal_sends_client_id() {
    let app = Router::new().route(
        "/anime/{id}",
        get(
            |Path(id): Path<u64>,
             Query(query): Query<HashMap<String, String>>,
             headers: HeaderMap| async move {
                Json(json!({
                    "id": id,
                    "client_id": header(&headers, "x-mal-client-id"),
                    "fields": query.get("fields"),
                }))
            },
        ),
    );
    let base = spawn_server(app).await;

    let client = MalClient::new(http(), &base, "abc123".to_string());
    let anime = client.fetch("52991").await.unwrap();
    assert_eq!(anime["id"], 52991);
    assert_eq!(anime["client_id"], "abc123");
    assert!(anime["fields"].as_str().unwrap().contains("num_episodes"));

    let unconfigured = MalClient::new(http(), &base, String::new());
    let err = unconfigured.fetch_anime(52991).await.unwrap_err();
    assert!(matches!(err, CollectorError::Config { .. }));
}

#[tokio::test]
async fn test_jikan_episode_pages() {
    let app = Router::new()
        .route(
            "/anime/{id}/episodes",
            get(
                |Path(id): Path<u64>, Query(query): Query<HashMap<String, String>>| async move {
                    Json(json!({
                        "mal_id": id,
                        "page": query.get("page"),
                        "pagination": { "has_next_page": false },
                    }))
                },
            ),
        )
        .route(
            "/anime/{id}/full",
            get(|Path(id): Path<u64>| async move { Json(json!({ "data": { "mal_id": id } })) }),
        );
    let base = spawn_server(app).await;
    let client = JikanClient::new(http(), &format!("{base}/"));

    let page = client.fetch_episodes(52991, 2).await.unwrap();
    assert_eq!(page["page"], "2");
    let page = client.fetch_episodes(52991, 0).await.unwrap();
    assert_eq!(page["page"], "1");

    let anime = client.fetch("52991").await.unwrap();
    assert_eq!(anime["data"]["mal_id"], 52991);
}

#[tokio::test]
async fn test_vndb_posts_filters() {
    let app = Router::new()
        .route(
            "/vn",
            post(|Json(body): Json<Value>| async move {
                let id = body["filters"][2].clone();
                if id == "v404" {
                    return Json(json!({ "results": [], "more": false }));
                }
                Json(json!({
                    "results": [{ "id": id, "fields": body["fields"] }],
                    "more": false,
                }))
            }),
        )
        .route(
            "/character",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "results": [{ "filters": body["filters"] }], "more": false }))
            }),
        );
    let base = spawn_server(app).await;
    let client = VndbClient::new(http(), &base);

    let vn = client.fetch("17").await.unwrap();
    assert_eq!(vn["id"], "v17");
    assert!(vn["fields"].as_str().unwrap().contains("developers.name"));

    let err = client.fetch_vn("v404").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.service(), "vndb");

    let characters = client.fetch_characters("v17").await.unwrap();
    assert_eq!(
        characters["results"][0]["filters"],
        json!(["vn", "=", ["id", "=", "v17"]])
    );
}
