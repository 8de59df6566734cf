//! Error types for the podcast generation pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The synthesis stream ended without ever delivering audio bytes.
    #[error("synthesis stream ended without delivering any audio")]
    EmptyStream,

    /// The generation service rejected or failed a request. Not retried
    /// for synthesis streams; the Script Generator retries it with
    /// backoff before giving up.
    #[error("generation service error: {0}")]
    Generation(String),

    /// Script generation exhausted its retry budget.
    #[error("script generation failed after {attempts} attempts: {reason}")]
    ScriptExhausted { attempts: u32, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("audio payload decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
