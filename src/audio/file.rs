use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use tracing::debug;

/// Header-level view of a canonical WAV recording
pub struct AudioFile {
    pub path: String,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Samples per channel
    pub frames: u64,
}

impl AudioFile {
    /// Open a WAV file and read its format without loading the samples.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

        let spec = reader.spec();
        let frames = u64::from(reader.duration());
        let duration_seconds = if spec.sample_rate == 0 {
            0.0
        } else {
            frames as f64 / spec.sample_rate as f64
        };

        debug!(
            "WAV file {}: {:.1}s, {}Hz, {} channels, {} bits",
            path.display(),
            duration_seconds,
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        );

        Ok(Self {
            path: path.display().to_string(),
            duration_seconds,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            frames,
        })
    }

    /// Read all samples as 16-bit integers
    pub fn read_samples(&self) -> Result<Vec<i16>> {
        let reader = WavReader::open(&self.path).context("Failed to open WAV file")?;
        reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")
    }
}
