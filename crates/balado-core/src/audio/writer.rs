//! Finalizes aggregated audio into a single playable file

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use super::format::{self, PcmFormat};
use super::stream::AggregatedAudio;
use super::wav;
use crate::error::Result;

/// A finished audio file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArtifact {
    pub path: PathBuf,
    pub extension: String,
}

/// Writes aggregated audio under an output directory.
///
/// Filenames are `{prefix}-{unix-millis}-{counter}.{ext}`; the per-writer
/// counter keeps rapid successive writes from colliding.
pub struct AudioWriter {
    output_dir: PathBuf,
    prefix: String,
    counter: AtomicU64,
}

impl AudioWriter {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Persist one aggregated payload as a playable file.
    ///
    /// A payload labeled with a recognized container format is written
    /// verbatim. Anything else is treated as raw linear PCM and wrapped
    /// with a WAV header built from the label (or the fixed fallback
    /// descriptor when the stream carried no label at all).
    pub fn finalize(&self, audio: AggregatedAudio) -> Result<FileArtifact> {
        let label = audio.mime_type.as_deref().unwrap_or("");

        let (bytes, extension) = match format::container_extension(label) {
            Some(extension) => (audio.data, extension),
            None => {
                let pcm_format = if label.is_empty() {
                    PcmFormat::FALLBACK
                } else {
                    PcmFormat::from_mime(label)
                };
                debug!(?pcm_format, "wrapping raw PCM payload");
                (wav::wrap_pcm(&audio.data, &pcm_format), "wav")
            }
        };

        fs::create_dir_all(&self.output_dir)?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let index = self.counter.fetch_add(1, Ordering::Relaxed);
        let file_name = format!("{}-{}-{}.{}", self.prefix, millis, index, extension);
        let path = self.output_dir.join(file_name);

        fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "saved audio file");

        Ok(FileArtifact {
            path,
            extension: extension.to_string(),
        })
    }
}
