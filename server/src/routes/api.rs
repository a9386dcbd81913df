use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::state::AppState;

/// Clients revalidate on every load; unchanged data costs a 304.
const DATASET_CACHE_CONTROL: &str = "no-cache";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.dataset.read().await;
    Json(serde_json::json!({
        "status": "ok",
        "revision": snapshot.revision,
        "loaded_at": snapshot.loaded_at.map(|at| at.to_rfc3339()),
        "cities": snapshot.city_count,
        "properties": snapshot.property_count,
    }))
}

pub async fn get_dataset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (etag, json) = {
        let snapshot = state.dataset.read().await;
        (snapshot.etag.clone(), snapshot.json.clone())
    };

    if if_none_match_matches(&headers, &etag) {
        return not_modified_response(DATASET_CACHE_CONTROL, Some(etag.as_str()));
    }

    json_bytes_response((*json).clone(), DATASET_CACHE_CONTROL, Some(etag.as_str()))
}

fn json_bytes_response(body: Bytes, cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn not_modified_response(cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::http::Request;
    use bytes::Bytes;
    use tower::ServiceExt;

    use super::*;
    use crate::state::{DatasetSnapshot, content_etag};

    const BODY_LIMIT: usize = 1 << 20;

    async fn state_with(json: &'static [u8], revision: u64) -> AppState {
        let state = AppState::new(PathBuf::from("unused.json"), PathBuf::from("client/dist"));
        {
            let mut snapshot = state.dataset.write().await;
            *snapshot = DatasetSnapshot {
                revision,
                loaded_at: Some(chrono::Utc::now()),
                city_count: 1,
                property_count: 0,
                json: Arc::new(Bytes::from_static(json)),
                etag: content_etag(json),
            };
        }
        state
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request")
    }

    #[test]
    fn if_none_match_supports_weak_and_multiple_etags() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_NONE_MATCH,
            HeaderValue::from_static("W/\"other\", \"dataset-42\""),
        );
        assert!(if_none_match_matches(&headers, "\"dataset-42\""));
        assert!(!if_none_match_matches(&headers, "\"dataset-43\""));
        assert!(!if_none_match_matches(&HeaderMap::new(), "\"dataset-42\""));
    }

    #[tokio::test]
    async fn dataset_endpoint_serves_snapshot_with_etag() {
        const BODY: &[u8] =
            br#"{"cities":[{"title":"Lyon","lat":1.0,"lng":2.0}],"properties":[]}"#;
        let state = state_with(BODY, 3).await;
        let app = crate::app::build_app(state);

        let response = app.oneshot(get("/db.json")).await.expect("db.json request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ETAG)
                .and_then(|value| value.to_str().ok()),
            Some(content_etag(BODY).as_str())
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        let body = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read body");
        let dataset = estate_map_shared::Dataset::from_json(
            std::str::from_utf8(&body).expect("utf-8 body"),
        )
        .expect("body parses as a dataset");
        assert_eq!(dataset.cities[0].title, "Lyon");
    }

    #[tokio::test]
    async fn dataset_endpoint_returns_not_modified_when_etag_matches() {
        const BODY: &[u8] = br#"{"cities":[],"properties":[]}"#;
        let state = state_with(BODY, 9).await;
        let app = crate::app::build_app(state);

        let request = Request::builder()
            .uri("/db.json")
            .header(header::IF_NONE_MATCH, content_etag(BODY))
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("conditional request");

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some(DATASET_CACHE_CONTROL)
        );
    }

    #[tokio::test]
    async fn etag_from_other_content_at_same_revision_gets_full_body() {
        // Data edited while the server was down: same revision, new bytes.
        let before = content_etag(br#"{"cities":[{"title":"Lyon","lat":1.0,"lng":2.0}]}"#);
        let state = state_with(br#"{"cities":[{"title":"Nice","lat":3.0,"lng":4.0}]}"#, 1)
            .await;
        let app = crate::app::build_app(state);

        let request = Request::builder()
            .uri("/db.json")
            .header(header::IF_NONE_MATCH, before)
            .body(Body::empty())
            .expect("build request");
        let response = app.oneshot(request).await.expect("conditional request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read body");
        assert!(std::str::from_utf8(&body).expect("utf-8 body").contains("Nice"));
    }

    #[tokio::test]
    async fn health_reports_loaded_counts() {
        let state = state_with(br#"{"cities":[{"title":"Lyon","lat":1.0,"lng":2.0}]}"#, 4)
            .await;
        let app = crate::app::build_app(state);

        let response = app.oneshot(get("/api/health")).await.expect("health request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read body");
        let health: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(health["status"], "ok");
        assert_eq!(health["revision"], 4);
        assert_eq!(health["cities"], 1);
        assert_eq!(health["properties"], 0);
        assert!(health["loaded_at"].is_string());
    }
}
