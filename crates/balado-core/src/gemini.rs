//! Gemini API client for text generation and speech synthesis
//!
//! A plain capability object: construct one handle and pass it to the
//! components that need it. The client is stateless with respect to
//! in-flight requests and safe to reuse across sequential calls.

use async_stream::try_stream;
use base64::{engine::general_purpose, Engine as _};
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::audio::AudioChunk;
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the generative-language API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Config("GEMINI_API_KEY is not set".to_string()))?;
        Self::new(api_key)
    }

    /// Override the API base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Unary text generation. Returns the joined text parts of the first
    /// candidate, or `None` when the response carried no text.
    pub async fn generate_content(
        &self,
        model: &str,
        system_instruction: Option<&str>,
        prompt: &str,
        temperature: f32,
    ) -> Result<Option<String>> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": temperature },
        });
        if let Some(system) = system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        debug!(model, "sending generateContent request");
        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Generation(format!(
                "generateContent failed ({status}): {text}"
            )));
        }

        let value: Value = serde_json::from_str(&text)?;
        if let Some(error) = value.get("error") {
            return Err(Error::Generation(error.to_string()));
        }

        Ok(extract_text(&value))
    }

    /// Streaming speech synthesis via `streamGenerateContent` with SSE
    /// framing. Yields one [`AudioChunk`] per stream event, in delivery
    /// order; events without inline audio surface as `AudioChunk::Empty`.
    pub fn stream_synthesize(
        &self,
        model: &str,
        text: &str,
        voice: &str,
        temperature: f32,
    ) -> impl Stream<Item = Result<AudioChunk>> + Send + 'static {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, model, self.api_key
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": {
                "temperature": temperature,
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": voice }
                    }
                }
            }
        });
        let http = self.http.clone();
        let model = model.to_string();

        try_stream! {
            debug!(model, "opening synthesis stream");
            let response = http.post(&url).json(&body).send().await?;
            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                Err(Error::Generation(format!(
                    "streamGenerateContent failed ({status}): {detail}"
                )))?;
                return;
            }

            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();
            while let Some(piece) = bytes.next().await {
                let piece = piece?;
                buffer.push_str(&String::from_utf8_lossy(&piece));
                while let Some(end) = buffer.find('\n') {
                    let line = buffer[..end].trim_end_matches('\r').to_string();
                    buffer.drain(..=end);
                    if let Some(chunk) = parse_sse_line(&line)? {
                        yield chunk;
                    }
                }
            }
            // SSE payloads are newline-terminated, but flush a trailing
            // fragment in case the stream closed without one.
            let tail = buffer.trim().to_string();
            if !tail.is_empty() {
                if let Some(chunk) = parse_sse_line(&tail)? {
                    yield chunk;
                }
            }
        }
    }
}

/// Parse one SSE line into an audio chunk.
///
/// Comments, blank lines, `event:` fields, and the `[DONE]` sentinel all
/// map to `None`. A `data:` payload with an `error` object is fatal.
fn parse_sse_line(line: &str) -> Result<Option<AudioChunk>> {
    if line.is_empty() || line.starts_with(':') {
        return Ok(None);
    }
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }

    let value: Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };

    if let Some(error) = value.get("error") {
        return Err(Error::Generation(error.to_string()));
    }

    let part = value
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0));
    let Some(part) = part else {
        return Ok(Some(AudioChunk::Empty));
    };

    match part.get("inlineData") {
        Some(inline) => {
            let mime_type = inline
                .get("mimeType")
                .and_then(|m| m.as_str())
                .map(str::to_owned);
            let encoded = inline.get("data").and_then(|d| d.as_str()).unwrap_or("");
            let data = general_purpose::STANDARD.decode(encoded)?;
            Ok(Some(AudioChunk::Inline { data, mime_type }))
        }
        None => Ok(Some(AudioChunk::Empty)),
    }
}

fn extract_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_audio_data() {
        let payload = general_purpose::STANDARD.encode([0u8, 1, 2, 3]);
        let line = format!(
            r#"data: {{"candidates":[{{"content":{{"parts":[{{"inlineData":{{"mimeType":"audio/L16; rate=24000","data":"{payload}"}}}}]}}}}]}}"#
        );

        let chunk = parse_sse_line(&line).unwrap().unwrap();
        assert_eq!(
            chunk,
            AudioChunk::Inline {
                data: vec![0, 1, 2, 3],
                mime_type: Some("audio/L16; rate=24000".to_string()),
            }
        );
    }

    #[test]
    fn text_only_part_is_empty_chunk() {
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#;
        assert_eq!(parse_sse_line(line).unwrap(), Some(AudioChunk::Empty));
    }

    #[test]
    fn candidate_without_parts_is_empty_chunk() {
        let line = r#"data: {"candidates":[{"finishReason":"STOP"}]}"#;
        assert_eq!(parse_sse_line(line).unwrap(), Some(AudioChunk::Empty));
    }

    #[test]
    fn error_payload_is_fatal() {
        let line = r#"data: {"error":{"code":429,"message":"quota exceeded"}}"#;
        assert!(matches!(
            parse_sse_line(line),
            Err(Error::Generation(message)) if message.contains("quota exceeded")
        ));
    }

    #[test]
    fn framing_lines_are_skipped() {
        assert_eq!(parse_sse_line("").unwrap(), None);
        assert_eq!(parse_sse_line(": keep-alive").unwrap(), None);
        assert_eq!(parse_sse_line("event: message").unwrap(), None);
        assert_eq!(parse_sse_line("data:").unwrap(), None);
        assert_eq!(parse_sse_line("data: [DONE]").unwrap(), None);
    }

    #[test]
    fn extracts_joined_text_parts() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello" }, { "text": " world" }] }
            }]
        });
        assert_eq!(extract_text(&response), Some("Hello world".to_string()));
    }

    #[test]
    fn missing_or_empty_text_is_none() {
        assert_eq!(extract_text(&json!({})), None);
        let empty = json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] });
        assert_eq!(extract_text(&empty), None);
    }
}
