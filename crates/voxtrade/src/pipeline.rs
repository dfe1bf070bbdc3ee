use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use voxtrade_clients::{AudioClip, ClientError};
use voxtrade_models::{Action, OrderParams, Stage, TranscriptionModel};
use voxtrade_parser::{strip_punctuation, CommandParser};

use crate::dispatcher::OrderDispatcher;
use crate::ingest::AudioIngestor;

/// One validated upload, ready to run through the pipeline.
#[derive(Debug, Clone)]
pub struct VoiceOrderRequest {
    pub clip: AudioClip,
    pub params: OrderParams,
    pub model: TranscriptionModel,
}

/// What the caller gets back. The command fields are all set or all `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Transcript with punctuation removed.
    pub text: String,
    pub action: Option<Action>,
    pub quantity: Option<u32>,
    pub instrument: Option<String>,
    pub order_response: serde_json::Value,
    /// Raw metadata from the speech service.
    pub transcription: serde_json::Value,
}

/// Ingest, parse, dispatch. Cheap to clone; all parts are shared.
#[derive(Clone)]
pub struct VoicePipeline {
    ingestor: AudioIngestor,
    parser: Arc<CommandParser>,
    dispatcher: OrderDispatcher,
}

impl VoicePipeline {
    pub fn new(
        ingestor: AudioIngestor,
        parser: Arc<CommandParser>,
        dispatcher: OrderDispatcher,
    ) -> Self {
        Self {
            ingestor,
            parser,
            dispatcher,
        }
    }

    /// Only transcription failures are returned as errors. A transcript that
    /// does not parse yields `{"error": "Invalid command"}` and no order.
    pub async fn process(
        &self,
        request: VoiceOrderRequest,
    ) -> Result<PipelineReport, ClientError> {
        info!(
            stage = %Stage::Received,
            bytes = request.clip.bytes.len(),
            format = %request.clip.format,
            exchange = %request.params.exchange,
            product = %request.params.product_type,
            "Received audio"
        );

        let transcription = match self.ingestor.transcribe(request.clip, request.model).await {
            Ok(transcription) => transcription,
            Err(e) => {
                warn!(
                    stage = %Stage::Failed,
                    last_stage = %Stage::Received,
                    error = %e,
                    "Transcription failed"
                );
                return Err(e);
            }
        };
        let text = strip_punctuation(transcription.text.trim());

        let report = match self.parser.parse(&text) {
            Ok(command) => {
                let action = command.action();
                let quantity = command.quantity().get();
                let instrument = command.instrument().to_string();

                let order = command.into_order(request.params);
                let order_response = self.dispatcher.dispatch(&order).await;
                debug!(stage = %Stage::Dispatched, "Dispatch finished");

                PipelineReport {
                    text,
                    action: Some(action),
                    quantity: Some(quantity),
                    instrument: Some(instrument),
                    order_response,
                    transcription: transcription.metadata,
                }
            }
            Err(_) => PipelineReport {
                text,
                action: None,
                quantity: None,
                instrument: None,
                order_response: serde_json::json!({ "error": "Invalid command" }),
                transcription: transcription.metadata,
            },
        };

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use voxtrade_clients::test_support::{MockExecutor, MockTranscriber};
    use voxtrade_clients::SlidingWindowLimiter;
    use voxtrade_models::{AudioFormat, Exchange, GrammarMode, ProductType};
    use voxtrade_parser::{ActivationSet, InstrumentAliasTable};

    fn parser() -> Arc<CommandParser> {
        let mut aliases = BTreeMap::new();
        aliases.insert("TCS".to_string(), vec!["TCS".to_string()]);
        Arc::new(CommandParser::new(
            ActivationSet::new(["MILO"]).unwrap(),
            InstrumentAliasTable::from_map(&aliases).unwrap(),
            GrammarMode::Permissive,
        ))
    }

    fn pipeline(transcriber: Arc<MockTranscriber>, executor: Arc<MockExecutor>) -> VoicePipeline {
        let limiter = Arc::new(SlidingWindowLimiter::new(15, Duration::from_secs(60)));
        VoicePipeline::new(
            AudioIngestor::new(transcriber, limiter),
            parser(),
            OrderDispatcher::new(executor, "VoiceOrder"),
        )
    }

    fn request() -> VoiceOrderRequest {
        VoiceOrderRequest {
            clip: AudioClip::new(vec![0u8; 16], AudioFormat::Webm),
            params: OrderParams {
                exchange: Exchange::Nse,
                product_type: ProductType::Cnc,
            },
            model: TranscriptionModel::default(),
        }
    }

    #[tokio::test]
    async fn valid_command_is_dispatched() {
        let executor = Arc::new(MockExecutor::ok("1001"));
        let pipeline = pipeline(
            Arc::new(MockTranscriber::with_text(" Milo, buy 100 shares of TCS.")),
            executor.clone(),
        );

        let report = pipeline.process(request()).await.unwrap();

        assert_eq!(report.text, "Milo buy 100 shares of TCS");
        assert_eq!(report.action, Some(Action::Buy));
        assert_eq!(report.quantity, Some(100));
        assert_eq!(report.instrument.as_deref(), Some("TCS"));
        assert_eq!(report.order_response["orderid"], "1001");
        assert_eq!(report.transcription["language"], "en");

        let orders = executor.orders().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].0.exchange(), Exchange::Nse);
        assert_eq!(orders[0].0.product_type(), ProductType::Cnc);
    }

    #[tokio::test]
    async fn invalid_command_never_reaches_executor() {
        let executor = Arc::new(MockExecutor::ok("1001"));
        let pipeline = pipeline(
            Arc::new(MockTranscriber::with_text("MILO BUY 10 UNKNOWNSTOCK")),
            executor.clone(),
        );

        let report = pipeline.process(request()).await.unwrap();

        assert_eq!(report.action, None);
        assert_eq!(report.quantity, None);
        assert_eq!(report.instrument, None);
        assert_eq!(
            report.order_response,
            serde_json::json!({"error": "Invalid command"})
        );
        assert!(executor.orders().await.is_empty());
    }

    #[tokio::test]
    async fn dispatch_failure_still_reports_command() {
        let pipeline = pipeline(
            Arc::new(MockTranscriber::with_text("MILO SELL TWENTY TCS")),
            Arc::new(MockExecutor::failing("no margin")),
        );

        let report = pipeline.process(request()).await.unwrap();

        assert_eq!(report.action, Some(Action::Sell));
        assert_eq!(report.quantity, Some(20));
        assert_eq!(
            report.order_response,
            serde_json::json!({"error": "Order rejected: no margin"})
        );
    }

    #[tokio::test]
    async fn transcription_failure_is_returned() {
        let executor = Arc::new(MockExecutor::ok("1"));
        let pipeline = pipeline(
            Arc::new(MockTranscriber::failing_http(503, "overloaded")),
            executor.clone(),
        );

        let err = pipeline.process(request()).await.unwrap_err();
        assert_eq!(err.http_status(), Some((503, "overloaded")));
        assert!(executor.orders().await.is_empty());
    }

    #[test]
    fn report_serializes_nulls_for_invalid_command() {
        let report = PipelineReport {
            text: "HELLO".to_string(),
            action: None,
            quantity: None,
            instrument: None,
            order_response: serde_json::json!({"error": "Invalid command"}),
            transcription: serde_json::json!({"text": "HELLO"}),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["action"].is_null());
        assert!(value["quantity"].is_null());
        assert!(value["instrument"].is_null());
    }
}
