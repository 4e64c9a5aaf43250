//! Login sessions
//!
//! A session binds an opaque token, carried in a cookie, to a username.
//! Sessions are created by login, removed by logout and never expire.

mod record;
mod store;

pub use record::SessionRecord;
pub use store::{InMemorySessionStore, SessionStore};
