use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};
use voxtrade_models::{AudioFormat, Transcription, TranscriptionModel};

use crate::error::ClientError;
use crate::http::join_url;

/// An uploaded audio clip, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }

    /// File name sent to the service; only the extension matters to it.
    pub fn upload_name(&self) -> String {
        format!("audio.{}", self.format.extension())
    }
}

/// Speech-to-text collaborator. Mockable for testing.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        clip: AudioClip,
        model: TranscriptionModel,
    ) -> Result<Transcription, ClientError>;
}

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint (Groq by default).
pub struct WhisperApiTranscriber {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl WhisperApiTranscriber {
    pub fn new(client: Client, base_url: &str, api_key: String, language: String) -> Self {
        Self {
            client,
            endpoint: join_url(base_url, "audio/transcriptions"),
            api_key,
            language,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(
        &self,
        clip: AudioClip,
        model: TranscriptionModel,
    ) -> Result<Transcription, ClientError> {
        debug!(model = %model, bytes = clip.bytes.len(), format = %clip.format, "Requesting transcription");

        let file_name = clip.upload_name();
        let part = Part::bytes(clip.bytes)
            .file_name(file_name)
            .mime_str(clip.format.mime_type())?;
        let form = Form::new()
            .part("file", part)
            .text("model", model.as_str())
            .text("language", self.language.clone())
            .text("response_format", "verbose_json");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "Transcription service returned an error");
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let metadata: serde_json::Value = serde_json::from_str(&body)?;
        let text = metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();

        debug!(chars = text.len(), "Transcription received");
        Ok(Transcription { text, metadata })
    }
}
