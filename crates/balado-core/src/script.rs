//! Dialogue script generation with bounded retry
//!
//! Script generation is the flakiest step of the pipeline (quota, transient
//! network errors, occasional empty completions), so it runs as an explicit
//! attempt state machine with exponential backoff. The delay source is
//! injected so the backoff schedule is testable without real time.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::gemini::GeminiClient;

/// Total attempts before giving up
pub const MAX_ATTEMPTS: u32 = 3;

/// Base backoff; attempt `n` waits `2^n` of these before the next try
pub const BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// First speaker tag of the dialogue vocabulary
pub const SPEAKER_ONE: &str = "Speaker1";
/// Second speaker tag of the dialogue vocabulary
pub const SPEAKER_TWO: &str = "Speaker2";

const SYSTEM_INSTRUCTION: &str = "You are a scriptwriter for a two-host audio podcast. \
You turn written analysis into a lively, clear spoken dialogue between exactly two speakers.";

/// Text-generation capability consumed by the generator
#[async_trait]
pub trait ScriptModel {
    /// One generation attempt. `Ok(None)` means the service answered but
    /// produced no text content; the generator treats it as a failure.
    async fn generate_script(&self, system: &str, prompt: &str) -> Result<Option<String>>;
}

/// Delay source for backoff between attempts
#[async_trait]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

/// Real delay backed by the tokio timer
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// [`ScriptModel`] backed by a Gemini text model
pub struct GeminiScriptModel {
    client: Arc<GeminiClient>,
    model: String,
    temperature: f32,
}

impl GeminiScriptModel {
    pub fn new(client: Arc<GeminiClient>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }
}

#[async_trait]
impl ScriptModel for GeminiScriptModel {
    async fn generate_script(&self, system: &str, prompt: &str) -> Result<Option<String>> {
        self.client
            .generate_content(&self.model, Some(system), prompt, self.temperature)
            .await
    }
}

/// Attempt state of one script generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptState {
    Attempting(u32),
    Succeeded(String),
    Failed { attempts: u32, reason: String },
}

/// Generates a two-speaker dialogue script from analysis text.
pub struct ScriptGenerator<M, D = TokioDelay> {
    model: M,
    delay: D,
}

impl<M: ScriptModel + Sync, D: Delay + Sync> ScriptGenerator<M, D> {
    pub fn new(model: M, delay: D) -> Self {
        Self { model, delay }
    }

    /// Run the attempt state machine to completion.
    ///
    /// Each failed attempt (call error or empty content) backs off for
    /// `2^attempt` time units; after [`MAX_ATTEMPTS`] total attempts the
    /// failure is permanent and surfaces as [`Error::ScriptExhausted`].
    pub async fn generate(&self, analysis: &str) -> Result<String> {
        let prompt = build_prompt(analysis);
        let mut state = ScriptState::Attempting(0);
        loop {
            state = match state {
                ScriptState::Attempting(attempt) => {
                    debug!(attempt, "requesting dialogue script");
                    match self.model.generate_script(SYSTEM_INSTRUCTION, &prompt).await {
                        Ok(Some(script)) if !script.trim().is_empty() => {
                            ScriptState::Succeeded(script)
                        }
                        Ok(_) => {
                            self.retry_or_fail(attempt, "response carried no text content".into())
                                .await
                        }
                        Err(error) => self.retry_or_fail(attempt, error.to_string()).await,
                    }
                }
                ScriptState::Succeeded(script) => return Ok(script),
                ScriptState::Failed { attempts, reason } => {
                    return Err(Error::ScriptExhausted { attempts, reason })
                }
            };
        }
    }

    async fn retry_or_fail(&self, attempt: u32, reason: String) -> ScriptState {
        let completed = attempt + 1;
        if completed >= MAX_ATTEMPTS {
            ScriptState::Failed {
                attempts: completed,
                reason,
            }
        } else {
            let wait = BACKOFF_UNIT * 2u32.pow(attempt);
            warn!(attempt, ?wait, %reason, "script attempt failed, backing off");
            self.delay.sleep(wait).await;
            ScriptState::Attempting(completed)
        }
    }
}

/// Wrap the analysis text with the strict formatting directive.
pub fn build_prompt(analysis: &str) -> String {
    format!(
        "Write a podcast dialogue between exactly two speakers discussing the analysis below. \
Wrap every utterance in paired tags naming the speaker: \
<{one}>...</{one}> and <{two}>...</{two}>. \
Use only these two tags. Output nothing before the first tag and nothing after the last.\n\n{analysis}",
        one = SPEAKER_ONE,
        two = SPEAKER_TWO,
    )
}
