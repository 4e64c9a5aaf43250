//! Prompt list and per-user completion status
//!
//! Prompts are read from a CSV file on every call, so edits take effect on the
//! next request. The i-th prompt (0-based) is recorded as `00{i+1}.wav`.

mod loader;
mod status;

pub use loader::{PromptError, PromptLoader};
pub use status::{canonical_filename, compute_status, status_vector};
