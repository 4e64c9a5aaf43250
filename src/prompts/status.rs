use super::loader::PromptLoader;
use crate::error::RecorderError;
use crate::storage::UserFileStore;
use std::collections::BTreeSet;

/// Canonical recording name for the prompt at `index` (0-based).
///
/// The name is a literal `00` followed by the 1-based position, so prompt 10
/// maps to `0010.wav`. The browser client builds names the same way.
pub fn canonical_filename(index: usize) -> String {
    format!("00{}.wav", index + 1)
}

/// Completion flags in prompt order, one per prompt.
pub fn status_vector(prompt_count: usize, listing: &BTreeSet<String>) -> Vec<bool> {
    (0..prompt_count)
        .map(|i| listing.contains(&canonical_filename(i)))
        .collect()
}

/// Load the prompts and check which of them `username` has recorded.
pub async fn compute_status(
    prompts: &PromptLoader,
    files: &UserFileStore,
    username: &str,
) -> Result<Vec<bool>, RecorderError> {
    let prompt_count = prompts.load()?.len();
    let listing = files.list_filenames(username).await?;

    Ok(status_vector(prompt_count, &listing))
}
