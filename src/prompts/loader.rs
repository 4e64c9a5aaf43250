use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read prompts from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reads the ordered prompt list from a headerless CSV file.
///
/// Only the first field of each row is used. Blank rows are skipped.
#[derive(Debug, Clone)]
pub struct PromptLoader {
    path: PathBuf,
}

impl PromptLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Re-read the prompt file. No caching.
    pub fn load(&self) -> Result<Vec<String>, PromptError> {
        let read_err = |source| PromptError::Read {
            path: self.path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(read_err)?;

        let mut prompts = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_err)?;
            if let Some(first) = record.get(0) {
                prompts.push(first.to_string());
            }
        }

        debug!("Loaded {} prompts from {}", prompts.len(), self.path.display());

        Ok(prompts)
    }
}
