use std::sync::Arc;

use tracing::{debug, info};
use voxtrade_clients::{AudioClip, ClientError, SlidingWindowLimiter, Transcriber};
use voxtrade_models::{Transcription, TranscriptionModel};

/// Audio ingestion stage: every transcription call first takes a permit
/// from the shared limiter, then goes to the speech service.
#[derive(Clone)]
pub struct AudioIngestor {
    transcriber: Arc<dyn Transcriber>,
    limiter: Arc<SlidingWindowLimiter>,
}

impl AudioIngestor {
    pub fn new(transcriber: Arc<dyn Transcriber>, limiter: Arc<SlidingWindowLimiter>) -> Self {
        Self {
            transcriber,
            limiter,
        }
    }

    pub fn limiter(&self) -> &SlidingWindowLimiter {
        &self.limiter
    }

    pub async fn transcribe(
        &self,
        clip: AudioClip,
        model: TranscriptionModel,
    ) -> Result<Transcription, ClientError> {
        debug!(bytes = clip.bytes.len(), format = %clip.format, "Waiting for transcription permit");
        self.limiter.acquire().await;

        let transcription = self.transcriber.transcribe(clip, model).await?;
        info!(model = %model, text = %transcription.text, "Transcription complete");
        Ok(transcription)
    }
}
