use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{TimeZone, Utc};
use scorelens_core::{
    ClientSettings, LangfuseClient, Observation, ScoreFilter, ScoreLensError, ScoreSource,
    TimeRange,
};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

const TOTAL_SCORES: usize = 5;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Basic "))
        .unwrap_or(false)
}

async fn list_scores(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing credentials").into_response();
    }

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(50);
    let name = params.get("name").cloned().unwrap_or_else(|| "accuracy".to_string());

    let start = (page - 1) * limit;
    let end = (start + limit).min(TOTAL_SCORES);
    let data: Vec<_> = (start..end)
        .map(|i| {
            // every third score is categorical and carries no numeric value
            let (value, data_type) = if i % 3 == 2 {
                (json!(null), "CATEGORICAL")
            } else {
                (json!(i as f64), "NUMERIC")
            };
            json!({
                "id": format!("score-{}", i),
                "traceId": format!("trace-{}", i),
                "name": name.clone(),
                "value": value,
                "dataType": data_type,
                "timestamp": format!("2024-03-0{}T10:00:00.000Z", i + 1),
            })
        })
        .collect();

    let total_pages = (TOTAL_SCORES + limit - 1) / limit;
    Json(json!({
        "data": data,
        "meta": { "page": page, "limit": limit, "totalItems": TOTAL_SCORES, "totalPages": total_pages }
    }))
    .into_response()
}

async fn get_trace(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": id,
        "name": "chat",
        "release": "v1.2.0",
        "metadata": { "environment": "production" }
    }))
    .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "version": "2.0.0" }))
}

async fn spawn_fake_api() -> String {
    let app = Router::new()
        .route("/api/public/scores", get(list_scores))
        .route("/api/public/traces/:id", get(get_trace))
        .route("/api/public/health", get(health));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

fn client(host: String, page_size: usize) -> LangfuseClient {
    LangfuseClient::new(&ClientSettings {
        host,
        public_key: "pk-lf-test".to_string(),
        secret_key: "sk-lf-test".to_string(),
        timeout: Duration::from_secs(5),
        page_size,
    })
    .unwrap()
}

fn filter(max_results: usize) -> ScoreFilter {
    let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
    ScoreFilter::named("accuracy", TimeRange::last_days(now, 30).unwrap(), max_results)
}

#[tokio::test]
async fn test_list_scores_follows_pages() {
    let host = spawn_fake_api().await;
    let client = client(host, 2);

    let records = client.list_scores(&filter(100)).await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["score-0", "score-1", "score-2", "score-3", "score-4"]);
}

#[tokio::test]
async fn test_list_scores_respects_cap() {
    let host = spawn_fake_api().await;
    let client = client(host, 2);

    let records = client.list_scores(&filter(3)).await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].id, "score-2");
}

#[tokio::test]
async fn test_fetch_values_skips_non_numeric() {
    let host = spawn_fake_api().await;
    let client = client(host, 10);

    let observations = client.fetch_values(&filter(100)).await.unwrap();
    assert_eq!(Observation::values(&observations), vec![0.0, 1.0, 3.0, 4.0]);
    assert!(observations.iter().all(|o| o.timestamp.is_some()));
}

#[tokio::test]
async fn test_get_trace_and_not_found() {
    let host = spawn_fake_api().await;
    let client = client(host, 10);

    let trace = client.get_trace("trace-1").await.unwrap();
    assert_eq!(trace.release.as_deref(), Some("v1.2.0"));

    let err = client.get_trace("missing").await.unwrap_err();
    assert!(matches!(err, ScoreLensError::NotFound(_)));
}

#[tokio::test]
async fn test_get_trace_escapes_id() {
    let host = spawn_fake_api().await;
    let client = client(host, 10);

    let trace = client.get_trace("run/42").await.unwrap();
    assert_eq!(trace.id, "run/42");
}

#[tokio::test]
async fn test_health() {
    let host = spawn_fake_api().await;
    let client = client(host, 10);

    let status = client.health().await.unwrap();
    assert_eq!(status.status, "OK");
    assert_eq!(status.version.as_deref(), Some("2.0.0"));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}", addr), 10);
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ScoreLensError::Http(_)));
    assert!(err.is_remote());
}
