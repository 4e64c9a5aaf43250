use super::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "prompt_recorder_session";

/// Username resolved from the session, inserted by [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Extract the session token from the request's cookies
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Guard for protected routes
///
/// Resolves the session cookie to a username and hands it to the handler as
/// [`CurrentUser`]. Without a valid session the request never reaches the
/// handler and the client is redirected to /login.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match session_token(request.headers()) {
        Some(token) => state.sessions.resolve(&token).await,
        None => None,
    };

    match session {
        Some(record) => {
            request.extensions_mut().insert(CurrentUser(record.username));
            next.run(request).await
        }
        None => {
            debug!("No session for {}, redirecting to /login", request.uri().path());
            Redirect::to("/login").into_response()
        }
    }
}
