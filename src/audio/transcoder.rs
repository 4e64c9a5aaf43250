use super::{FfmpegTranscoder, SymphoniaTranscoder};
use crate::config::{ConversionBackend, ConversionConfig};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Why a raw upload could not be turned into a canonical recording
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unsupported or unrecognized input: {0}")]
    Unsupported(String),

    #[error("no decodable audio track")]
    NoAudioTrack,

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("input contained no audio samples")]
    Empty,

    #[error("WAV encoding failed: {0}")]
    Encode(#[from] hound::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg { status: String, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("conversion task failed: {0}")]
    Task(String),
}

/// Properties of a freshly written canonical recording
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Samples per channel
    pub frames: u64,
    pub duration_seconds: f64,
}

impl ConversionReport {
    pub fn new(sample_rate: u32, channels: u16, frames: u64) -> Self {
        let duration_seconds = if sample_rate == 0 {
            0.0
        } else {
            frames as f64 / sample_rate as f64
        };

        Self {
            sample_rate,
            channels,
            frames,
            duration_seconds,
        }
    }
}

/// Converts a raw container into the canonical WAV container
///
/// Implementations:
/// - symphonia: in-process decode, hound encode
/// - ffmpeg: external process
#[async_trait::async_trait]
pub trait Transcoder: Send + Sync {
    /// Decode `raw` and write a WAV file at `canonical`.
    ///
    /// On error `canonical` is left untouched and `raw` is kept.
    async fn convert(&self, raw: &Path, canonical: &Path)
        -> Result<ConversionReport, ConversionError>;

    /// Get transcoder name for logging
    fn name(&self) -> &str;
}

/// Transcoder factory
pub struct TranscoderFactory;

impl TranscoderFactory {
    /// Create the transcoder selected in configuration
    pub fn create(config: &ConversionConfig) -> Box<dyn Transcoder> {
        let transcoder: Box<dyn Transcoder> = match config.backend {
            ConversionBackend::Symphonia => Box::new(SymphoniaTranscoder::new()),
            ConversionBackend::Ffmpeg => Box::new(FfmpegTranscoder::new(&config.ffmpeg_path)),
        };

        info!("Using {} transcoder", transcoder.name());

        transcoder
    }
}
