//! Balado Core - podcast audio generation pipeline
//!
//! This crate turns free-form analysis text into a playable podcast audio
//! file via the Gemini API:
//!
//! 1. The [`script::ScriptGenerator`] writes a two-speaker dialogue script,
//!    retrying transient service failures with exponential backoff.
//! 2. The script is synthesized over a streaming response; chunks are
//!    aggregated in arrival order by [`audio::aggregate`].
//! 3. The [`audio::AudioWriter`] persists the result: payloads already in
//!    a recognized container format are written verbatim, raw PCM gets a
//!    canonical WAV header built from the stream's format label.
//!
//! # Example
//!
//! ```ignore
//! use balado_core::{GeminiClient, PodcastConfig, PodcastGenerator};
//!
//! let client = GeminiClient::from_env()?;
//! let generator = PodcastGenerator::new(client, PodcastConfig::default());
//! let artifact = generator.generate("Spending rises 4% in 2026...").await?;
//! println!("saved {}", artifact.path.display());
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod gemini;
pub mod podcast;
pub mod script;

pub use audio::{AggregatedAudio, AudioChunk, AudioWriter, FileArtifact, PcmFormat};
pub use config::{PodcastConfig, ServerConfig};
pub use error::{Error, Result};
pub use gemini::GeminiClient;
pub use podcast::PodcastGenerator;
pub use script::{ScriptGenerator, ScriptState};
