//! Audio stream assembly and container encoding

mod format;
mod stream;
pub mod wav;
mod writer;

pub use format::{container_extension, PcmFormat};
pub use stream::{aggregate, AggregatedAudio, AudioChunk};
pub use writer::{AudioWriter, FileArtifact};
