use super::auth::{expired_session_cookie, session_cookie, session_token, CurrentUser};
use super::pages;
use super::state::AppState;
use crate::error::{RecorderError, RecorderResult};
use crate::prompts::compute_status;
use crate::storage::{validate_name, StorageError};
use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    Extension, Form,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub filename: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteResponse {
    fn deleted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Vec<bool>,
}

// ============================================================================
// Session
// ============================================================================

/// GET /login
pub async fn login_page() -> Html<String> {
    Html(pages::login_page())
}

/// POST /login
/// Start a session for the submitted username
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> RecorderResult<Response> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err(RecorderError::bad_request("Please enter a username"));
    }
    validate_name("username", username)?;

    // Re-login replaces the previous session
    if let Some(previous) = session_token(&headers) {
        state.sessions.remove(&previous).await;
    }

    let record = state.sessions.create(username).await;

    Ok((
        [(header::SET_COOKIE, session_cookie(&record.token))],
        Redirect::to("/"),
    )
        .into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token).await;
    }

    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

// ============================================================================
// Recordings
// ============================================================================

/// GET /
/// Prompt list and recorder UI
pub async fn index(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> RecorderResult<Html<String>> {
    let prompts = state.prompts.load()?;
    Ok(Html(pages::index_page(&username, &prompts)))
}

/// POST /upload
/// Store the raw recording, convert it to WAV, then drop the raw file
pub async fn upload(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> RecorderResult<(StatusCode, &'static str)> {
    let mut audio = None;
    let mut filename = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio_data" => audio = Some(field.bytes().await?),
            "filename" => filename = Some(field.text().await?),
            _ => {}
        }
    }

    let (Some(audio), Some(filename)) = (audio, filename.filter(|f| !f.is_empty())) else {
        return Err(RecorderError::bad_request("Missing data"));
    };

    let raw_path = state.files.save_raw(&username, &filename, &audio).await?;
    let canonical_path = state.files.canonical_path(&username, &filename)?;

    match state.transcoder.convert(&raw_path, &canonical_path).await {
        Ok(report) => {
            state.files.remove_raw(&raw_path).await?;
            info!(
                "Upload from {} stored as {} ({:.1}s)",
                username, filename, report.duration_seconds
            );
            Ok((StatusCode::OK, "Uploaded successfully"))
        }
        Err(e) => {
            warn!(
                "Keeping raw upload {} after failed conversion",
                raw_path.display()
            );
            Err(e.into())
        }
    }
}

/// POST /delete
/// Remove one of the current user's recordings
pub async fn delete_recording(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Json(req): Json<DeleteRequest>,
) -> RecorderResult<Json<DeleteResponse>> {
    let Some(filename) = req.filename.filter(|f| !f.is_empty()) else {
        return Ok(Json(DeleteResponse::failed("Missing filename")));
    };

    match state.files.delete(&username, &filename).await {
        Ok(true) => Ok(Json(DeleteResponse::deleted())),
        Ok(false) => Ok(Json(DeleteResponse::failed("File not found"))),
        Err(StorageError::InvalidName { .. }) => {
            Ok(Json(DeleteResponse::failed("Invalid filename")))
        }
        Err(e) => {
            error!("Failed to delete {} for {}: {}", filename, username, e);
            Err(e.into())
        }
    }
}

/// GET /status
/// Which prompts the current user has recorded, in prompt order
pub async fn get_status(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> RecorderResult<Json<StatusResponse>> {
    let status = compute_status(&state.prompts, &state.files, &username).await?;
    Ok(Json(StatusResponse { status }))
}

// ============================================================================
// Misc
// ============================================================================

/// GET /static/recorder.js
pub async fn recorder_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        pages::RECORDER_JS,
    )
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
