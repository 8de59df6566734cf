//! End-to-end podcast generation
//!
//! Script Generator produces a dialogue script, the synthesis stream is
//! aggregated in arrival order, and the finalizer persists one playable
//! file. One logical flow per request, no internal parallelism.

use std::sync::Arc;
use tracing::info;

use crate::audio::{aggregate, AudioWriter, FileArtifact};
use crate::config::PodcastConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::script::{GeminiScriptModel, ScriptGenerator, TokioDelay};

/// Generates podcast audio from analysis text.
pub struct PodcastGenerator {
    client: Arc<GeminiClient>,
    config: PodcastConfig,
    writer: AudioWriter,
}

impl PodcastGenerator {
    pub fn new(client: GeminiClient, config: PodcastConfig) -> Self {
        let writer = AudioWriter::new(config.output_dir.clone(), config.file_prefix.clone());
        Self {
            client: Arc::new(client),
            config,
            writer,
        }
    }

    /// Full pipeline: dialogue script, then synthesis, then one file.
    pub async fn generate(&self, analysis: &str) -> Result<FileArtifact> {
        let script = self.script(analysis).await?;
        self.synthesize(&script).await
    }

    /// Generate only the dialogue script.
    pub async fn script(&self, analysis: &str) -> Result<String> {
        let model = GeminiScriptModel::new(
            self.client.clone(),
            self.config.script_model.clone(),
            self.config.script_temperature,
        );
        ScriptGenerator::new(model, TokioDelay).generate(analysis).await
    }

    /// Synthesize a finished script into a playable audio file.
    pub async fn synthesize(&self, script: &str) -> Result<FileArtifact> {
        info!(chars = script.len(), "synthesizing podcast audio");
        let chunks = self.client.stream_synthesize(
            &self.config.tts_model,
            script,
            &self.config.voice,
            self.config.tts_temperature,
        );
        let audio = aggregate(chunks).await?;
        self.writer.finalize(audio)
    }
}
