use super::decode::DecodedAudio;
use super::transcoder::{ConversionError, ConversionReport};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Hidden sibling that a canonical file is written to before being renamed
/// into place. Hidden names are never listed as recordings.
///
/// Each call yields a fresh name, so concurrent conversions of the same
/// recording never share a staging file.
pub fn staging_path(canonical: &Path) -> PathBuf {
    let name = canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    canonical.with_file_name(format!(".{}.{}.part", name, uuid::Uuid::new_v4().simple()))
}

/// Best-effort removal of a staging file after a failed conversion
pub fn discard_staging(staging: &Path) {
    if let Err(e) = fs::remove_file(staging) {
        if e.kind() != ErrorKind::NotFound {
            warn!("Failed to remove staging file {}: {}", staging.display(), e);
        }
    }
}

/// Encode `audio` as 16-bit PCM WAV at `path`.
pub fn write_wav(path: &Path, audio: &DecodedAudio) -> Result<(), ConversionError> {
    let spec = hound::WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Write `audio` to a staging file and rename it over `canonical`.
///
/// Either the complete WAV appears at `canonical` or nothing does.
pub fn write_wav_atomic(
    canonical: &Path,
    audio: &DecodedAudio,
) -> Result<ConversionReport, ConversionError> {
    let staging = staging_path(canonical);

    let result = write_wav(&staging, audio)
        .and_then(|()| fs::rename(&staging, canonical).map_err(ConversionError::from));

    if let Err(e) = result {
        discard_staging(&staging);
        return Err(e);
    }

    Ok(ConversionReport::new(
        audio.sample_rate,
        audio.channels,
        audio.frames(),
    ))
}
