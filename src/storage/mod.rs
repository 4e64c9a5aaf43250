//! Per-user recording storage
//!
//! Layout: `<uploads>/<username>/<filename>` for canonical recordings and
//! `<uploads>/<username>/<filename>.<raw-ext>` while an upload is converted.

mod name;
mod store;

pub use name::{validate_name, StorageError};
pub use store::UserFileStore;
