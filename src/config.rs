use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default bind port when neither the config file nor `PORT` provide one
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub prompts: PromptsConfig,
    pub conversion: ConversionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one sub-directory per user
    pub uploads_path: PathBuf,
    /// Extension given to uploads before conversion (browser recordings are WebM)
    pub raw_extension: String,
    /// Upper bound on a single multipart upload body
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    pub backend: ConversionBackend,
    /// Binary used by the ffmpeg backend
    pub ffmpeg_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionBackend {
    /// In-process decoding with symphonia, encoding with hound
    Symphonia,
    /// External ffmpeg process
    Ffmpeg,
}

impl Config {
    /// Load configuration from defaults, an optional file, `RECORDER__*`
    /// environment variables and finally `PORT`.
    pub fn load(path: &str) -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid PORT value: {:?}", raw))?,
            ),
            Err(_) => None,
        };

        let settings = Self::builder()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RECORDER").separator("__"))
            .set_override_option("service.http.port", port.map(i64::from))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("service.name", "prompt-recorder")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", i64::from(DEFAULT_PORT))?
            .set_default("storage.uploads_path", "uploads")?
            .set_default("storage.raw_extension", "webm")?
            .set_default("storage.max_upload_bytes", 50_i64 * 1024 * 1024)?
            .set_default("prompts.path", "prompts.csv")?
            .set_default("conversion.backend", "symphonia")?
            .set_default("conversion.ffmpeg_path", "ffmpeg")?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "prompt-recorder".to_string(),
                http: HttpConfig {
                    bind: "0.0.0.0".to_string(),
                    port: DEFAULT_PORT,
                },
            },
            storage: StorageConfig {
                uploads_path: PathBuf::from("uploads"),
                raw_extension: "webm".to_string(),
                max_upload_bytes: 50 * 1024 * 1024,
            },
            prompts: PromptsConfig {
                path: PathBuf::from("prompts.csv"),
            },
            conversion: ConversionConfig {
                backend: ConversionBackend::Symphonia,
                ffmpeg_path: "ffmpeg".to_string(),
            },
        }
    }
}
