//! HTTP surface for the browser client
//!
//! - GET/POST /login - Login form / start a session
//! - GET /logout - End the session
//! - GET / - Prompt list and recorder UI
//! - POST /upload - Upload and convert a recording
//! - POST /delete - Delete a recording
//! - GET /status - Per-prompt completion flags
//! - GET /health - Health check
//!
//! Everything except login, logout, health and static assets requires a
//! session; requests without one are redirected to /login.

mod auth;
mod handlers;
mod pages;
mod routes;
mod state;

pub use auth::{session_token, CurrentUser, SESSION_COOKIE};
pub use routes::create_router;
pub use state::AppState;
