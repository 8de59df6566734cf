//! Configuration types for the podcast generator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Podcast generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastConfig {
    /// Directory where finished audio files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Filename prefix for generated audio files
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Model used to write the dialogue script
    #[serde(default = "default_script_model")]
    pub script_model: String,

    /// Sampling temperature for script generation
    #[serde(default = "default_script_temperature")]
    pub script_temperature: f32,

    /// Model used for speech synthesis
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Sampling temperature for speech synthesis
    #[serde(default = "default_tts_temperature")]
    pub tts_temperature: f32,

    /// Prebuilt voice used for synthesis
    #[serde(default = "default_voice")]
    pub voice: String,
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            script_model: default_script_model(),
            script_temperature: default_script_temperature(),
            tts_model: default_tts_model(),
            tts_temperature: default_tts_temperature(),
            voice: default_voice(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("podcasts")
}

fn default_file_prefix() -> String {
    "podcast".to_string()
}

fn default_script_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_script_temperature() -> f32 {
    0.3
}

fn default_tts_model() -> String {
    "gemini-2.5-pro-preview-tts".to_string()
}

fn default_tts_temperature() -> f32 {
    1.0
}

fn default_voice() -> String {
    "Zephyr".to_string()
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_cors_enabled(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_enabled() -> bool {
    true
}
