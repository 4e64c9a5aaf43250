// HTTP integration tests
//
// These tests drive the router in-process with `oneshot`, covering login,
// the session guard, upload/convert, status and delete.

mod common;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use prompt_recorder::{
    create_router, AppState, InMemorySessionStore, PromptLoader, SymphoniaTranscoder,
    UserFileStore,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "----prompt-recorder-test-boundary";

struct TestApp {
    _temp_dir: TempDir,
    uploads: PathBuf,
    prompts: PathBuf,
    router: Router,
}

impl TestApp {
    fn new(prompts: &[&str]) -> Self {
        Self::with_upload_limit(prompts, 10 * 1024 * 1024)
    }

    fn with_upload_limit(prompts: &[&str], max_upload_bytes: usize) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let uploads = temp_dir.path().join("uploads");
        let prompts_path = temp_dir.path().join("prompts.csv");
        common::write_prompts(&prompts_path, prompts);

        let state = AppState::new(
            Arc::new(InMemorySessionStore::new()),
            UserFileStore::new(&uploads, "webm"),
            PromptLoader::new(&prompts_path),
            Arc::new(SymphoniaTranscoder::new()),
            max_upload_bytes,
        );

        Self {
            _temp_dir: temp_dir,
            uploads,
            prompts: prompts_path,
            router: create_router(state),
        }
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in and return the `Cookie` header value for the session
    async fn login(&self, username: &str) -> String {
        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("username={}", username)))
                    .unwrap(),
            )
            .await;

        assert!(response.status().is_redirection());
        assert_eq!(location(&response), "/");

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login sets a cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn status(&self, cookie: &str) -> Vec<bool> {
        let response = self
            .send(
                Request::builder()
                    .uri("/status")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        body["status"]
            .as_array()
            .expect("status array")
            .iter()
            .map(|v| v.as_bool().unwrap())
            .collect()
    }

    async fn upload(
        &self,
        cookie: &str,
        filename: Option<&str>,
        audio: Option<&[u8]>,
    ) -> (StatusCode, String) {
        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(header::COOKIE, cookie)
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={}", BOUNDARY),
                    )
                    .body(Body::from(multipart_body(filename, audio)))
                    .unwrap(),
            )
            .await;

        let status = response.status();
        (status, text_body(response).await)
    }

    async fn delete(&self, cookie: &str, body: Value) -> Value {
        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/delete")
                    .header(header::COOKIE, cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }
}

fn multipart_body(filename: Option<&str>, audio: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(audio) = audio {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"audio_data\"; filename=\"blob\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: audio/webm\r\n\r\n");
        body.extend_from_slice(audio);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(filename) = filename {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"filename\"\r\n\r\n");
        body.extend_from_slice(filename.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
}

async fn text_body(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Session guard
// ============================================================================

#[tokio::test]
async fn test_protected_routes_redirect_without_session() {
    let app = TestApp::new(&["one", "two"]);

    let requests = vec![
        Request::builder().uri("/").body(Body::empty()).unwrap(),
        Request::builder().uri("/status").body(Body::empty()).unwrap(),
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(Some("001.wav"), Some(&b"x"[..]))))
            .unwrap(),
        Request::builder()
            .method("POST")
            .uri("/delete")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"filename":"001.wav"}"#))
            .unwrap(),
        Request::builder()
            .uri("/status")
            .header(header::COOKIE, "prompt_recorder_session=not-a-real-token")
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let uri = request.uri().clone();
        let response = app.send(request).await;
        assert!(
            response.status().is_redirection(),
            "{} should redirect, got {}",
            uri,
            response.status()
        );
        assert_eq!(location(&response), "/login");
    }

    // Nothing was written for the rejected upload
    assert!(!app.uploads.exists());
}

#[tokio::test]
async fn test_public_routes_need_no_session() {
    let app = TestApp::new(&["one"]);

    let response = app
        .send(Request::builder().uri("/login").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text_body(response).await.contains("name=\"username\""));

    let response = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(Request::builder().uri("/static/recorder.js").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_blank_username() {
    let app = TestApp::new(&["one"]);

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=+++"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(text_body(response).await, "Please enter a username");
}

#[tokio::test]
async fn test_login_rejects_path_like_username() {
    let app = TestApp::new(&["one"]);

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=..%2Fetc"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text_body(response).await, "Invalid username");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new(&["one"]);
    let cookie = app.login("alice").await;

    let response = app
        .send(
            Request::builder()
                .uri("/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");

    let response = app
        .send(
            Request::builder()
                .uri("/status")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");
}

// ============================================================================
// Index
// ============================================================================

#[tokio::test]
async fn test_index_renders_prompts_and_username() {
    let app = TestApp::new(&["Read this <first>", "Then this"]);
    let cookie = app.login("alice").await;

    let response = app
        .send(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().contains("text/html"));

    let page = text_body(response).await;
    assert!(page.contains("alice"));
    assert!(page.contains("Read this &lt;first&gt;"));
    assert!(page.contains("Then this"));
}

#[tokio::test]
async fn test_index_fails_when_prompts_missing() {
    let app = TestApp::new(&["one"]);
    let cookie = app.login("alice").await;
    std::fs::remove_file(&app.prompts).unwrap();

    let response = app
        .send(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Upload / status / delete
// ============================================================================

#[tokio::test]
async fn test_fresh_user_status_matches_prompt_count() {
    let app = TestApp::new(&["one", "two"]);
    let cookie = app.login("alice").await;

    assert_eq!(app.status(&cookie).await, vec![false, false]);
}

#[tokio::test]
async fn test_upload_then_status_then_delete() {
    let app = TestApp::new(&["one", "two"]);
    let cookie = app.login("alice").await;
    let audio = common::sine_wav_bytes(16000, 1, 4000);

    let (status, body) = app.upload(&cookie, Some("001.wav"), Some(audio.as_slice())).await;
    assert_eq!(status, StatusCode::OK, "upload failed: {}", body);
    assert_eq!(body, "Uploaded successfully");

    let user_dir = app.uploads.join("alice");
    assert!(user_dir.join("001.wav").is_file());
    assert!(!user_dir.join("001.wav.webm").exists(), "raw file removed");

    assert_eq!(app.status(&cookie).await, vec![true, false]);

    let first = app.delete(&cookie, json!({"filename": "001.wav"})).await;
    assert_eq!(first, json!({"success": true}));

    let second = app.delete(&cookie, json!({"filename": "001.wav"})).await;
    assert_eq!(second, json!({"success": false, "message": "File not found"}));

    assert_eq!(app.status(&cookie).await, vec![false, false]);
}

#[tokio::test]
async fn test_upload_conversion_failure_keeps_raw_file() {
    let app = TestApp::new(&["one", "two"]);
    let cookie = app.login("alice").await;

    let (status, body) = app
        .upload(&cookie, Some("002.wav"), Some(&b"not audio at all"[..]))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Conversion failed:"), "body: {}", body);

    let user_dir = app.uploads.join("alice");
    assert!(user_dir.join("002.wav.webm").is_file(), "raw file kept");
    assert!(!user_dir.join("002.wav").exists(), "no canonical file");

    assert_eq!(app.status(&cookie).await, vec![false, false]);
}

#[tokio::test]
async fn test_upload_over_size_limit_is_rejected() {
    let app = TestApp::with_upload_limit(&["one"], 1024);
    let cookie = app.login("alice").await;
    let audio = vec![0u8; 4096];

    let (status, _) = app
        .upload(&cookie, Some("001.wav"), Some(audio.as_slice()))
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!app.uploads.join("alice").exists(), "nothing written");
}

#[tokio::test]
async fn test_upload_missing_data() {
    let app = TestApp::new(&["one"]);
    let cookie = app.login("alice").await;

    let (status, body) = app.upload(&cookie, None, Some(&b"audio"[..])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing data");

    let (status, body) = app.upload(&cookie, Some("001.wav"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing data");

    let (status, _) = app.upload(&cookie, Some(""), Some(&b"audio"[..])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_traversal_filename() {
    let app = TestApp::new(&["one"]);
    let cookie = app.login("alice").await;

    let (status, body) = app
        .upload(&cookie, Some("../../escape.wav"), Some(&b"audio"[..]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid filename");
    assert!(!app.uploads.join("escape.wav.webm").exists());
}

#[tokio::test]
async fn test_delete_failures_are_reported_in_json() {
    let app = TestApp::new(&["one"]);
    let cookie = app.login("alice").await;

    let body = app.delete(&cookie, json!({"filename": "001.wav"})).await;
    assert_eq!(body, json!({"success": false, "message": "File not found"}));

    let body = app.delete(&cookie, json!({})).await;
    assert_eq!(body, json!({"success": false, "message": "Missing filename"}));

    let body = app.delete(&cookie, json!({"filename": "../bob/001.wav"})).await;
    assert_eq!(body, json!({"success": false, "message": "Invalid filename"}));
}

#[tokio::test]
async fn test_recordings_are_per_user() {
    let app = TestApp::new(&["one", "two"]);
    let alice = app.login("alice").await;
    let bob = app.login("bob").await;
    let audio = common::sine_wav_bytes(8000, 1, 800);

    let (status, _) = app.upload(&alice, Some("002.wav"), Some(audio.as_slice())).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.status(&alice).await, vec![false, true]);
    assert_eq!(app.status(&bob).await, vec![false, false]);

    let body = app.delete(&bob, json!({"filename": "002.wav"})).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(app.status(&alice).await, vec![false, true]);
}

#[tokio::test]
async fn test_status_follows_prompt_file_edits() {
    let app = TestApp::new(&["one"]);
    let cookie = app.login("alice").await;
    assert_eq!(app.status(&cookie).await.len(), 1);

    common::write_prompts(&app.prompts, &["one", "two", "three"]);
    assert_eq!(app.status(&cookie).await, vec![false, false, false]);
}
