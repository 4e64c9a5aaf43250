// Shared helpers for integration tests

#![allow(dead_code)]

use std::path::Path;

/// Write a 16-bit PCM sine wave WAV file
pub fn write_sine_wav(path: &Path, sample_rate: u32, channels: u16, frames: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let sample = ((t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 8000.0) as i16;
        for _ in 0..channels {
            writer.write_sample(sample).unwrap();
        }
    }
    writer.finalize().unwrap();
}

/// Bytes of a 16-bit PCM sine wave WAV file
pub fn sine_wav_bytes(sample_rate: u32, channels: u16, frames: u32) -> Vec<u8> {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("sine.wav");
    write_sine_wav(&path, sample_rate, channels, frames);
    std::fs::read(&path).unwrap()
}

/// Write a prompts CSV with one prompt per row
pub fn write_prompts(path: &Path, prompts: &[&str]) {
    let mut contents = String::new();
    for prompt in prompts {
        contents.push_str(prompt);
        contents.push('\n');
    }
    std::fs::write(path, contents).unwrap();
}
