//! Route tests via axum's oneshot pattern (tower::ServiceExt), no TCP bind.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use dicebox_core::{FaceCounts, RollBatch};
use dicebox_server::{create_router, AppState};
use dicebox_store::RollStore;

// Single-connection pool so every request sees the same :memory: database.
async fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = RollStore::from_pool(pool);
    store.init().await.unwrap();
    AppState { store }
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = create_router(state.clone())
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn random_default_range() {
    let state = test_state().await;
    let (status, json) = get(&state, "/random").await;
    assert_eq!(status, StatusCode::OK);
    let n = json["number"].as_i64().unwrap();
    assert!((1..=6).contains(&n));
}

#[tokio::test]
async fn random_degenerate_range_is_constant() {
    let state = test_state().await;
    for _ in 0..10 {
        let (status, json) = get(&state, "/random?min=2&max=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["number"], 2);
    }
}

#[tokio::test]
async fn random_malformed_params_fall_back_to_defaults() {
    let state = test_state().await;
    let (status, json) = get(&state, "/random?min=abc&max=").await;
    assert_eq!(status, StatusCode::OK);
    let n = json["number"].as_i64().unwrap();
    assert!((1..=6).contains(&n));
}

#[tokio::test]
async fn random_inverted_range_falls_back_to_defaults() {
    let state = test_state().await;
    let (status, json) = get(&state, "/random?min=9&max=3").await;
    assert_eq!(status, StatusCode::OK);
    let n = json["number"].as_i64().unwrap();
    assert!((1..=6).contains(&n));
}

#[tokio::test]
async fn roll_returns_tally_and_final() {
    let state = test_state().await;
    let (status, json) = get(&state, "/roll/3").await;
    assert_eq!(status, StatusCode::OK);

    let mut sum = 0;
    for face in 1..=6 {
        sum += json[face.to_string()].as_u64().unwrap();
    }
    assert_eq!(sum, 3);

    let final_face = json["final"].as_u64().unwrap();
    assert!((1..=6).contains(&final_face));
}

#[tokio::test]
async fn roll_zero_is_a_validation_error() {
    let state = test_state().await;
    let (status, json) = get(&state, "/roll/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "count must be positive");
}

#[tokio::test]
async fn roll_negative_is_a_validation_error() {
    let state = test_state().await;
    let (status, _) = get(&state, "/roll/-5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_empty_store_has_six_zero_faces() {
    let state = test_state().await;
    let (status, json) = get(&state, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    for face in 1..=6 {
        assert_eq!(json[face.to_string()], 0);
    }
}

#[tokio::test]
async fn stats_reflect_persisted_rolls() {
    let state = test_state().await;
    let faces = FaceCounts::from_array([2, 1, 0, 0, 0, 0]);
    state
        .store
        .append(&RollBatch { count: 3, faces })
        .await
        .unwrap();

    let (_, before) = get(&state, "/stats").await;
    assert_eq!(before["1"], 2);
    assert_eq!(before["2"], 1);

    // a roll through the API adds to the stored totals
    get(&state, "/roll/4").await;
    let (_, after) = get(&state, "/stats").await;
    let total: u64 = (1..=6)
        .map(|f| after[f.to_string()].as_u64().unwrap())
        .sum();
    assert_eq!(total, 7);
}
