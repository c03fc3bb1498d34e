use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use life_core::{Command, Grid};
use life_http::{router, AppState, ResetResponse, ServerConfig};
use life_world::{self as world, query, World};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn config_in(dir: &Path) -> ServerConfig {
    ServerConfig {
        height: 6,
        width: 8,
        fill: 40,
        rng_seed: 11,
        fill_file: dir.join("state.cfg"),
    }
}

fn app(config: &ServerConfig) -> Router {
    let state = AppState::new(config).expect("valid configuration");
    router(Arc::new(state))
}

async fn call(app: Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder()
        .uri(path)
        .method(method)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => builder
            .body(Body::from(serde_json::to_vec(&json).expect("encode body")))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.oneshot(request).await.expect("infallible service");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, bytes.to_vec())
}

#[tokio::test]
async fn next_state_returns_a_full_matrix() {
    let dir = TempDir::new().expect("temp dir");
    let (status, body) = call(app(&config_in(dir.path())), "GET", "/nextstate", None).await;

    assert_eq!(status, StatusCode::OK);
    let grid: Grid = serde_json::from_slice(&body).expect("grid json");
    assert_eq!(grid.height(), 6);
    assert_eq!(grid.width(), 8);
}

#[tokio::test]
async fn successive_requests_share_one_session() {
    let dir = TempDir::new().expect("temp dir");
    let app = app(&config_in(dir.path()));

    let (_, first) = call(app.clone(), "POST", "/nextstate", None).await;
    let (_, second) = call(app.clone(), "POST", "/nextstate", None).await;
    let first: Grid = serde_json::from_slice(&first).expect("grid json");
    let second: Grid = serde_json::from_slice(&second).expect("grid json");

    let mut world = World::from_grid(first);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Advance, &mut events);

    assert_eq!(
        &second,
        query::current(&world),
        "second request must continue the first"
    );
}

#[tokio::test]
async fn set_state_rejects_out_of_range_fill() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_in(dir.path());

    for fill in [-1, 101] {
        let (status, _) = call(
            app(&config),
            "POST",
            "/setstate",
            Some(json!({ "fill": fill })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "fill {fill}");
    }
    assert!(!config.fill_file.exists(), "rejected fill must not be stored");
}

#[tokio::test]
async fn set_state_persists_fill_and_returns_next_generation() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_in(dir.path());

    let (status, body) = call(
        app(&config),
        "POST",
        "/setstate",
        Some(json!({ "fill": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let grid: Grid = serde_json::from_slice(&body).expect("grid json");
    assert_eq!(grid.live_cells(), 0, "empty seed stays empty");
    assert_eq!(
        std::fs::read_to_string(&config.fill_file).expect("fill file"),
        "0%"
    );
}

#[tokio::test]
async fn reset_reports_the_stored_fill() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_in(dir.path());
    let app = app(&config);

    let (status, _) = call(
        app.clone(),
        "POST",
        "/setstate",
        Some(json!({ "fill": 75 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(app, "GET", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let response: ResetResponse = serde_json::from_slice(&body).expect("reset json");
    assert_eq!(response, ResetResponse { fill: 75 });
}

#[tokio::test]
async fn reset_without_a_fill_file_uses_the_configured_fill() {
    let dir = TempDir::new().expect("temp dir");
    let (status, body) = call(app(&config_in(dir.path())), "POST", "/reset", None).await;

    assert_eq!(status, StatusCode::OK);
    let response: ResetResponse = serde_json::from_slice(&body).expect("reset json");
    assert_eq!(response.fill, 40);
}

#[tokio::test]
async fn reset_with_a_corrupt_fill_file_is_a_server_error() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_in(dir.path());
    std::fs::write(&config.fill_file, "plenty").expect("write fixture");

    let (status, _) = call(app(&config), "GET", "/reset", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn loaded_grid_is_served_without_reseeding() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_in(dir.path());
    let mut blinker = Grid::new(5, 5).expect("valid dimensions");
    for x in 1..4 {
        blinker.set(x, 2, true);
    }
    let app = router(Arc::new(AppState::with_grid(&config, blinker.clone())));

    let (_, _) = call(app.clone(), "GET", "/nextstate", None).await;
    let (_, body) = call(app, "GET", "/nextstate", None).await;
    let grid: Grid = serde_json::from_slice(&body).expect("grid json");
    assert_eq!(grid, blinker);
}

#[tokio::test]
async fn reset_with_an_out_of_range_fill_file_keeps_the_session() {
    let dir = TempDir::new().expect("temp dir");
    let config = config_in(dir.path());
    std::fs::write(&config.fill_file, "250%").expect("write fixture");
    let mut blinker = Grid::new(5, 5).expect("valid dimensions");
    for x in 1..4 {
        blinker.set(x, 2, true);
    }
    let app = router(Arc::new(AppState::with_grid(&config, blinker.clone())));

    let (status, _) = call(app.clone(), "GET", "/reset", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, _) = call(app.clone(), "GET", "/nextstate", None).await;
    let (_, body) = call(app, "GET", "/nextstate", None).await;
    let grid: Grid = serde_json::from_slice(&body).expect("grid json");
    assert_eq!(grid, blinker, "rejected reset must not reseed");
}
