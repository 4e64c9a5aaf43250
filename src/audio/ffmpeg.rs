use super::file::AudioFile;
use super::transcoder::{ConversionError, ConversionReport, Transcoder};
use super::wav::{discard_staging, staging_path};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Transcoder that shells out to an `ffmpeg` binary.
///
/// Handles codecs symphonia lacks (Opus in particular). ffmpeg writes to a
/// staging file which is checked with hound before being renamed into place.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: String,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, raw: &Path, staging: &Path) -> Result<ConversionReport, ConversionError> {
        debug!("Running {} on {}", self.binary, raw.display());

        let output = Command::new(&self.binary)
            .arg("-y")
            .arg("-hide_banner")
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(raw)
            .args(["-f", "wav", "-acodec", "pcm_s16le"])
            .arg(staging)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ConversionError::Ffmpeg {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let wav = AudioFile::open(staging)
            .map_err(|e| ConversionError::Decode(format!("{:#}", e)))?;
        if wav.frames == 0 {
            return Err(ConversionError::Empty);
        }

        Ok(ConversionReport::new(wav.sample_rate, wav.channels, wav.frames))
    }
}

#[async_trait::async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn convert(
        &self,
        raw: &Path,
        canonical: &Path,
    ) -> Result<ConversionReport, ConversionError> {
        let staging = staging_path(canonical);

        let result = match self.run(raw, &staging).await {
            Ok(report) => tokio::fs::rename(&staging, canonical)
                .await
                .map(|()| report)
                .map_err(ConversionError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => {
                info!(
                    "Converted {} -> {} with ffmpeg ({:.1}s, {}Hz, {} channels)",
                    raw.display(),
                    canonical.display(),
                    report.duration_seconds,
                    report.sample_rate,
                    report.channels
                );
                Ok(report)
            }
            Err(e) => {
                discard_staging(&staging);
                Err(e)
            }
        }
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}
