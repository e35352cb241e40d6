use super::*;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct BackendState {
    analyze_bodies: Arc<Mutex<Vec<Value>>>,
    download_bodies: Arc<Mutex<Vec<Value>>>,
    requested_files: Arc<Mutex<Vec<String>>>,
}

async fn handle_analyze(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let url = body["url"].as_str().unwrap_or_default().to_string();
    state.analyze_bodies.lock().await.push(body);

    if url.contains("blocked") {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "YouTube is temporarily blocking automated access. Please try again in a few minutes."})),
        )
            .into_response();
    }
    if url.contains("silent") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if url.contains("garbled") {
        return (StatusCode::OK, "not json at all").into_response();
    }

    Json(json!({
        "title": "Ferris explains ownership",
        "thumbnail": "https://img.example/ferris.jpg",
        "duration": 61,
        "platform": "youtube",
        "formats": [
            {"format_id": "18", "ext": "mp4", "resolution": "640x360", "quality": 1, "filesize": 5242880},
            {"format_id": "22", "ext": "mp4", "resolution": "1280x720", "quality": 2, "filesize": 0}
        ]
    }))
    .into_response()
}

async fn handle_download(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let format_id = body["format_id"].as_str().unwrap_or_default().to_string();
    state.download_bodies.lock().await.push(body);

    match format_id.as_str() {
        "missing" => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "format unavailable"})),
        )
            .into_response(),
        "nameless" => Json(json!({"success": true})).into_response(),
        "bare-error" => (StatusCode::BAD_GATEWAY, Json(json!({}))).into_response(),
        _ => Json(json!({
            "success": true,
            "filename": "clip one.mp4",
            "filepath": "/tmp/downloads/clip one.mp4",
            "title": "Ferris explains ownership"
        }))
        .into_response(),
    }
}

async fn handle_download_file(
    State(state): State<BackendState>,
    AxumPath(filename): AxumPath<String>,
) -> impl IntoResponse {
    state.requested_files.lock().await.push(filename.clone());
    if filename == "gone.mp4" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "File not found"})),
        )
            .into_response();
    }
    (StatusCode::OK, b"fake-video-bytes".to_vec()).into_response()
}

async fn spawn_backend() -> anyhow::Result<(String, BackendState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = BackendState::default();
    let app = Router::new()
        .route("/api/analyze", post(handle_analyze))
        .route("/api/download", post(handle_download))
        .route("/api/download-file/:filename", get(handle_download_file))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn client_for(server_url: &str) -> VideoApiClient {
    VideoApiClient::new(server_url, Some(Duration::from_secs(5))).expect("build client")
}

fn video_url(raw: &str) -> Url {
    validate_video_url(raw).expect("valid url")
}

#[test]
fn rejects_empty_and_malformed_urls() {
    let err = validate_video_url("   ").expect_err("empty input");
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Please enter a video URL");

    for raw in ["not a url", "youtube.com/watch?v=1", "mailto:someone@example.com"] {
        let err = validate_video_url(raw).expect_err("malformed input");
        assert!(err.is_validation(), "{raw} should fail validation");
        assert_eq!(err.to_string(), "Please enter a valid URL");
    }
}

#[test]
fn accepts_and_trims_absolute_urls() {
    let url = validate_video_url("  https://www.youtube.com/watch?v=abc  ").expect("valid");
    assert_eq!(url.host_str(), Some("www.youtube.com"));
    assert_eq!(url.query(), Some("v=abc"));
}

#[test]
fn trailing_slash_on_server_url_is_ignored() {
    let client = client_for("http://127.0.0.1:9/ ");
    assert_eq!(client.server_url(), "http://127.0.0.1:9");
}

#[tokio::test]
async fn analyze_returns_video_info_and_posts_url() {
    let (server_url, state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);

    let info = client
        .analyze(&video_url("https://youtu.be/ferris"))
        .await
        .expect("analyze");

    assert_eq!(info.title.as_deref(), Some("Ferris explains ownership"));
    assert_eq!(info.formats.len(), 2);
    assert_eq!(info.formats[0].filesize, Some(5_242_880));
    let bodies = state.analyze_bodies.lock().await;
    assert_eq!(bodies.as_slice(), &[json!({"url": "https://youtu.be/ferris"})]);
}

#[tokio::test]
async fn analyze_surfaces_server_error_message() {
    let (server_url, _state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);

    let err = client
        .analyze(&video_url("https://youtube.com/blocked"))
        .await
        .expect_err("must fail");

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().starts_with("YouTube is temporarily blocking"));
}

#[tokio::test]
async fn analyze_falls_back_when_error_body_is_not_json() {
    let (server_url, _state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);

    let err = client
        .analyze(&video_url("https://youtube.com/silent"))
        .await
        .expect_err("must fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to analyze video");
}

#[tokio::test]
async fn analyze_undecodable_success_body_is_a_network_error() {
    let (server_url, _state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);

    let err = client
        .analyze(&video_url("https://youtube.com/garbled"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Network { .. }));
    assert_eq!(err.to_string(), "An error occurred. Please try again.");
}

#[tokio::test]
async fn unreachable_backend_yields_network_fallback() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = client_for(&format!("http://{addr}"));

    let err = client
        .request_download(&video_url("https://youtu.be/ferris"), &FormatId::new("18"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Network { source: Some(_), .. }));
    assert_eq!(err.to_string(), "Download failed. Please try again.");
}

#[tokio::test]
async fn request_download_returns_filename() {
    let (server_url, state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);

    let filename = client
        .request_download(&video_url("https://youtu.be/ferris"), &FormatId::new("22"))
        .await
        .expect("download");

    assert_eq!(filename, "clip one.mp4");
    let bodies = state.download_bodies.lock().await;
    assert_eq!(
        bodies.as_slice(),
        &[json!({"url": "https://youtu.be/ferris", "format_id": "22"})]
    );
}

#[tokio::test]
async fn request_download_maps_rejections() {
    let (server_url, _state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);
    let url = video_url("https://youtu.be/ferris");

    let err = client
        .request_download(&url, &FormatId::new("missing"))
        .await
        .expect_err("rejected format");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "format unavailable");

    let err = client
        .request_download(&url, &FormatId::new("bare-error"))
        .await
        .expect_err("empty error body");
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Download failed");

    let err = client
        .request_download(&url, &FormatId::new("nameless"))
        .await
        .expect_err("no filename");
    assert_eq!(err.status(), Some(200));
    assert_eq!(err.to_string(), "Download failed - file not found");
}

#[tokio::test]
async fn save_file_streams_into_destination() {
    let (server_url, state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dest_dir = std::env::temp_dir().join(format!("web_client_save_test_{suffix}"));

    let path = client
        .save_file("clip one.mp4", &dest_dir)
        .await
        .expect("save file");

    assert_eq!(path, dest_dir.join("clip one.mp4"));
    assert_eq!(
        std::fs::read(&path).expect("read saved file"),
        b"fake-video-bytes"
    );
    assert_eq!(
        state.requested_files.lock().await.as_slice(),
        &["clip one.mp4".to_string()]
    );

    std::fs::remove_dir_all(dest_dir).expect("cleanup");
}

#[tokio::test]
async fn save_file_reports_missing_file() {
    let (server_url, _state) = spawn_backend().await.expect("spawn backend");
    let client = client_for(&server_url);

    let err = client
        .save_file("gone.mp4", &std::env::temp_dir())
        .await
        .expect_err("missing file");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "File not found");
}
