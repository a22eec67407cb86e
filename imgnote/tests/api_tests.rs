//! HTTP API integration tests
//!
//! Exercises the router end to end with tower's oneshot, backed by a temp
//! images root and ledger per test.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use imgnote::config::{AnnotatorConfig, TagMode};
use imgnote::{build_router, AppState};

/// Temp images root with two places and a dark frame, plus app state.
fn test_state(tag_mode: TagMode) -> (TempDir, AppState) {
    let dir = tempdir().unwrap();
    for (place, files) in [
        ("kitchen", vec!["cam1_20240924_120431.jpg", "cam1_20240924_120431_Dark.jpg"]),
        ("porch", vec!["cam2_20240924_130512.png"]),
    ] {
        let place_dir = dir.path().join(place);
        std::fs::create_dir(&place_dir).unwrap();
        for file in files {
            std::fs::write(place_dir.join(file), b"img").unwrap();
        }
    }

    let config = AnnotatorConfig {
        images_root: dir.path().to_path_buf(),
        ledger_path: dir.path().join("data.json"),
        exclude_marker: "Dark".to_string(),
        image_extensions: vec!["jpg".to_string(), "png".to_string()],
        tag_mode,
        port: 5780,
    };
    let state = AppState::new(config);
    state.ledger.ensure_exists().unwrap();
    (dir, state)
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, state) = test_state(TagMode::Raw);
    let (status, body) = get_json(state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "imgnote");
}

#[tokio::test]
async fn test_candidates_listing_excludes_dark_frames() {
    let (_dir, state) = test_state(TagMode::Raw);
    let (status, body) = get_json(state, "/candidates").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["all_annotated"], false);
    let candidates = body["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 2);
    let paths: Vec<&str> = candidates
        .iter()
        .map(|c| c["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"kitchen/cam1_20240924_120431.jpg"));
    assert!(paths.contains(&"porch/cam2_20240924_130512.png"));
}

#[tokio::test]
async fn test_submission_removes_candidate_without_restart() {
    let (_dir, state) = test_state(TagMode::Raw);

    let (status, body) = post_json(
        state.clone(),
        "/annotations",
        json!({
            "data_name": "kitchen/cam1_20240924_120431.jpg",
            "tags": ["sink", "faucet"],
            "place": "kitchen"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["records_written"], 1);

    let (_, body) = get_json(state, "/candidates").await;
    let paths: Vec<&str> = body["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["porch/cam2_20240924_130512.png"]);
}

#[tokio::test]
async fn test_all_annotated_terminal_message() {
    let (_dir, state) = test_state(TagMode::Raw);

    for data_name in [
        "kitchen/cam1_20240924_120431.jpg",
        "porch/cam2_20240924_130512.png",
    ] {
        let (status, _) = post_json(
            state.clone(),
            "/annotations",
            json!({ "data_name": data_name, "tags": ["x"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get_json(state, "/candidates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["all_annotated"], true);
    assert!(body["candidates"].as_array().unwrap().is_empty());
    assert!(body["message"].as_str().unwrap().contains("annotated"));
}

#[tokio::test]
async fn test_structured_submission_fans_out() {
    let (_dir, state) = test_state(TagMode::Structured);

    let (status, body) = post_json(
        state.clone(),
        "/annotations",
        json!({
            "data_name": "kitchen/cam1_20240924_120431.jpg",
            "tags": [
                "category: Indoor, sub-category: Kitchen, tag: Sink",
                "not-a-kv-pair",
                "category: Indoor, sub-category: Kitchen, tag: Faucet"
            ],
            "place": "kitchen"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records_written"], 2);

    let records = state.ledger.load();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.tags.is_none()));
    assert_eq!(records[0].scene_tags.as_ref().unwrap().tag, "Sink");
    assert_eq!(records[0].datetime.as_deref(), Some("20240924"));
    assert_eq!(records[0].id.as_deref(), Some("20240924_120431"));
}

#[tokio::test]
async fn test_structured_submission_with_no_valid_tags_succeeds_with_zero() {
    let (_dir, state) = test_state(TagMode::Structured);

    let (status, body) = post_json(
        state.clone(),
        "/annotations",
        json!({
            "data_name": "kitchen/cam1_20240924_120431.jpg",
            "tags": ["category: Indoor"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records_written"], 0);
    assert!(state.ledger.load().is_empty());
}

#[tokio::test]
async fn test_raw_submission_persists_verbatim_tags() {
    let (_dir, state) = test_state(TagMode::Raw);

    post_json(
        state.clone(),
        "/annotations",
        json!({
            "data_name": "porch/cam2_20240924_130512.png",
            "tags": ["night", "rain"],
            "place": "porch",
            "status": "not review"
        }),
    )
    .await;

    let records = state.ledger.load();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].tags.as_deref(),
        Some(&["night".to_string(), "rain".to_string()][..])
    );
    assert!(records[0].scene_tags.is_none());
    assert_eq!(records[0].status.as_deref(), Some("not review"));
}

#[tokio::test]
async fn test_empty_data_name_rejected() {
    let (_dir, state) = test_state(TagMode::Raw);

    let (status, body) = post_json(
        state,
        "/annotations",
        json!({ "data_name": "  ", "tags": ["x"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_write_failure_surfaces_as_submission_failure() {
    let (_dir, state) = test_state(TagMode::Raw);

    // Replace the ledger file with a directory so the rewrite fails.
    std::fs::remove_file(&state.config.ledger_path).unwrap();
    std::fs::create_dir(&state.config.ledger_path).unwrap();

    let (status, body) = post_json(
        state,
        "/annotations",
        json!({ "data_name": "kitchen/cam1_20240924_120431.jpg", "tags": ["x"] }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "LEDGER_ERROR");
}
