use crate::audio::{Transcoder, TranscoderFactory};
use crate::config::Config;
use crate::prompts::PromptLoader;
use crate::session::{InMemorySessionStore, SessionStore};
use crate::storage::UserFileStore;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Login sessions (token → username)
    pub sessions: Arc<dyn SessionStore>,

    /// Per-user recordings on disk
    pub files: Arc<UserFileStore>,

    /// Prompt list source, re-read on every request
    pub prompts: Arc<PromptLoader>,

    /// Raw upload → canonical WAV conversion
    pub transcoder: Arc<dyn Transcoder>,

    /// Body limit for POST /upload
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        files: UserFileStore,
        prompts: PromptLoader,
        transcoder: Arc<dyn Transcoder>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            sessions,
            files: Arc::new(files),
            prompts: Arc::new(prompts),
            transcoder,
            max_upload_bytes,
        }
    }

    /// Build state from configuration with an in-memory session store
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(InMemorySessionStore::new()),
            UserFileStore::new(
                config.storage.uploads_path.clone(),
                config.storage.raw_extension.clone(),
            ),
            PromptLoader::new(config.prompts.path.clone()),
            Arc::from(TranscoderFactory::create(&config.conversion)),
            config.storage.max_upload_bytes,
        )
    }
}
