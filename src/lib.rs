pub mod audio;
pub mod config;
pub mod error;
pub mod http;
pub mod prompts;
pub mod session;
pub mod storage;

pub use audio::{
    AudioFile, ConversionError, ConversionReport, FfmpegTranscoder, SymphoniaTranscoder,
    Transcoder, TranscoderFactory,
};
pub use config::Config;
pub use error::{RecorderError, RecorderResult};
pub use http::{create_router, AppState};
pub use prompts::{canonical_filename, compute_status, status_vector, PromptError, PromptLoader};
pub use session::{InMemorySessionStore, SessionRecord, SessionStore};
pub use storage::{StorageError, UserFileStore};
