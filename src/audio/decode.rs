use super::transcoder::ConversionError;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Fully decoded audio (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved samples [L, R, L, R, ...] for stereo
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
}

impl DecodedAudio {
    /// Samples per channel
    pub fn frames(&self) -> u64 {
        if self.channels == 0 {
            0
        } else {
            (self.samples.len() / self.channels as usize) as u64
        }
    }
}

/// Decode the first audio track of `path` into memory.
///
/// The container is detected from the file contents, with the extension used
/// as a hint. Packets the codec rejects are skipped; anything else is fatal.
pub fn decode_file(path: &Path) -> Result<DecodedAudio, ConversionError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| ConversionError::Unsupported(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(ConversionError::NoAudioTrack)?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| ConversionError::Unsupported(e.to_string()))?;

    let mut samples: Vec<i16> = Vec::new();
    let mut layout: Option<(u32, u16)> = None;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(ConversionError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                skipped_packets += 1;
                warn!("Skipping undecodable packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(ConversionError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count() as u16;
        match layout {
            None => layout = Some((spec.rate, channels)),
            Some(expected) if expected != (spec.rate, channels) => {
                return Err(ConversionError::Decode(format!(
                    "stream changed from {}Hz/{}ch to {}Hz/{}ch",
                    expected.0, expected.1, spec.rate, channels
                )));
            }
            Some(_) => {}
        }

        let mut buffer = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buffer.samples());
    }

    let (sample_rate, channels) = match layout {
        Some(layout) if !samples.is_empty() => layout,
        _ => return Err(ConversionError::Empty),
    };

    debug!(
        "Decoded {}: {}Hz, {} channels, {} samples ({} packets skipped)",
        path.display(),
        sample_rate,
        channels,
        samples.len(),
        skipped_packets
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}
