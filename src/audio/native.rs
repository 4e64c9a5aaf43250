use super::decode::decode_file;
use super::transcoder::{ConversionError, ConversionReport, Transcoder};
use super::wav::write_wav_atomic;
use std::path::Path;
use tracing::info;

/// In-process transcoder: symphonia decodes, hound encodes.
///
/// The whole input is decoded before anything is written, so a corrupt upload
/// never produces an output file.
#[derive(Debug, Clone, Default)]
pub struct SymphoniaTranscoder;

impl SymphoniaTranscoder {
    pub fn new() -> Self {
        Self
    }

    /// Blocking conversion, used from the blocking thread pool
    pub fn convert_blocking(
        raw: &Path,
        canonical: &Path,
    ) -> Result<ConversionReport, ConversionError> {
        let audio = decode_file(raw)?;
        let report = write_wav_atomic(canonical, &audio)?;

        info!(
            "Converted {} -> {} ({:.1}s, {}Hz, {} channels)",
            raw.display(),
            canonical.display(),
            report.duration_seconds,
            report.sample_rate,
            report.channels
        );

        Ok(report)
    }
}

#[async_trait::async_trait]
impl Transcoder for SymphoniaTranscoder {
    async fn convert(
        &self,
        raw: &Path,
        canonical: &Path,
    ) -> Result<ConversionReport, ConversionError> {
        let raw = raw.to_path_buf();
        let canonical = canonical.to_path_buf();

        tokio::task::spawn_blocking(move || Self::convert_blocking(&raw, &canonical))
            .await
            .map_err(|e| ConversionError::Task(e.to_string()))?
    }

    fn name(&self) -> &str {
        "symphonia"
    }
}
