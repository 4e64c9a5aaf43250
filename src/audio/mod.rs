//! Conversion of uploaded recordings to canonical WAV
//!
//! Browser recordings arrive in whatever container `MediaRecorder` produced
//! (usually WebM). A [`Transcoder`] turns that raw file into a 16-bit PCM WAV.
//! Transcoders never delete their input and never leave a partial output at
//! the canonical path.

pub mod decode;
pub mod ffmpeg;
pub mod file;
pub mod native;
pub mod transcoder;
pub mod wav;

pub use decode::DecodedAudio;
pub use ffmpeg::FfmpegTranscoder;
pub use file::AudioFile;
pub use native::SymphoniaTranscoder;
pub use transcoder::{ConversionError, ConversionReport, Transcoder, TranscoderFactory};
