//! Test support module providing in-memory collaborators.
//!
//! `MockTranscriber` and `MockExecutor` stand in for the speech and order
//! backends. Both record what they were asked to do so tests can assert on
//! call counts and payloads without a network.

use async_trait::async_trait;
use tokio::sync::Mutex;
use voxtrade_models::{OrderRequest, Transcription, TranscriptionModel};

use crate::broker::OrderExecutor;
use crate::error::ClientError;
use crate::transcriber::{AudioClip, Transcriber};

enum TranscriberBehavior {
    Text(String),
    Http { status: u16, body: String },
}

/// A transcriber that returns canned text or a canned HTTP failure.
pub struct MockTranscriber {
    behavior: TranscriberBehavior,
    calls: Mutex<Vec<(AudioClip, TranscriptionModel)>>,
}

impl MockTranscriber {
    pub fn with_text(text: &str) -> Self {
        Self {
            behavior: TranscriberBehavior::Text(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_http(status: u16, body: &str) -> Self {
        Self {
            behavior: TranscriberBehavior::Http {
                status,
                body: body.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    pub async fn calls(&self) -> Vec<(AudioClip, TranscriptionModel)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(
        &self,
        clip: AudioClip,
        model: TranscriptionModel,
    ) -> Result<Transcription, ClientError> {
        self.calls.lock().await.push((clip, model));
        match &self.behavior {
            TranscriberBehavior::Text(text) => Ok(Transcription {
                text: text.clone(),
                metadata: serde_json::json!({
                    "text": text,
                    "language": "en",
                    "duration": 1.5,
                }),
            }),
            TranscriberBehavior::Http { status, body } => Err(ClientError::Http {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// An order executor that echoes a fixed confirmation or fails with a message.
pub struct MockExecutor {
    result: Result<serde_json::Value, String>,
    orders: Mutex<Vec<(OrderRequest, String)>>,
}

impl MockExecutor {
    /// Succeeds with `{"status":"success","orderid":"<order_id>"}`.
    pub fn ok(order_id: &str) -> Self {
        Self {
            result: Ok(serde_json::json!({"status": "success", "orderid": order_id})),
            orders: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with `ClientError::Rejected(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub async fn orders(&self) -> Vec<(OrderRequest, String)> {
        self.orders.lock().await.clone()
    }
}

#[async_trait]
impl OrderExecutor for MockExecutor {
    async fn place_order(
        &self,
        order: &OrderRequest,
        strategy: &str,
    ) -> Result<serde_json::Value, ClientError> {
        self.orders
            .lock()
            .await
            .push((order.clone(), strategy.to_string()));
        match &self.result {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(ClientError::Rejected(message.clone())),
        }
    }
}
