//! Inbound HTTP surface: `POST /transcribe` and `GET /health`.

use std::any::Any;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;
use voxtrade_clients::{AudioClip, ClientError};
use voxtrade_models::{
    AudioFormat, Exchange, ModelError, OrderParams, ProductType, TranscriptionModel,
};

use crate::pipeline::{PipelineReport, VoiceOrderRequest, VoicePipeline};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: VoicePipeline,
    pub default_model: TranscriptionModel,
}

/// Errors a handler can answer with. Parse failures are not here: they are
/// a normal 200 response carrying `{"error": "Invalid command"}`.
#[derive(Debug)]
pub enum ApiError {
    /// Rejected input; the pipeline never ran.
    BadRequest(String),
    /// The multipart body could not be read (including the size limit).
    Multipart(MultipartError),
    /// The speech service answered with an error status.
    Transcription { status: u16, details: String },
    Unexpected(String),
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        match e.http_status() {
            Some((status, body)) => ApiError::Transcription {
                status,
                details: body.to_string(),
            },
            None => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }),
            ),
            ApiError::Multipart(e) => (e.status(), serde_json::json!({ "error": e.body_text() })),
            ApiError::Transcription { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                serde_json::json!({
                    "error": format!("Transcription service error: HTTP {status}"),
                    "details": details,
                }),
            ),
            ApiError::Unexpected(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": format!("Unexpected error: {message}") }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router. `max_upload_bytes` caps the whole request body.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        tracing::info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/transcribe", post(transcribe))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(trace)
        .with_state(state)
}

/// Turn a panic anywhere below the router into the generic 500 body.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "request handler panicked".to_string()
    };
    error!(%message, "Request handler panicked");
    ApiError::Unexpected(message).into_response()
}

async fn health() -> &'static str {
    "OK"
}

async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PipelineReport>, ApiError> {
    // A body that is not multipart at all has no file part either.
    let multipart = multipart.map_err(|rejection| {
        warn!(%rejection, "Rejected non-multipart upload");
        ApiError::BadRequest("No file part".to_string())
    })?;
    let form = UploadForm::read(multipart).await?;
    let request = form.validate(state.default_model).map_err(|message| {
        warn!(%message, "Rejected upload");
        ApiError::BadRequest(message)
    })?;

    info!(
        bytes = request.clip.bytes.len(),
        model = %request.model,
        "Upload accepted"
    );

    match state.pipeline.process(request).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Default)]
struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Raw multipart fields, before any validation.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    exchange: Option<String>,
    product_type: Option<String>,
    model: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await.map_err(ApiError::Multipart)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(ApiError::Multipart)?;
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                "exchange" => form.exchange = Some(field.text().await.map_err(ApiError::Multipart)?),
                "product_type" => {
                    form.product_type = Some(field.text().await.map_err(ApiError::Multipart)?)
                }
                "model" => form.model = Some(field.text().await.map_err(ApiError::Multipart)?),
                _ => {}
            }
        }
        Ok(form)
    }

    /// Checks run in a fixed order and stop at the first problem.
    fn validate(self, default_model: TranscriptionModel) -> Result<VoiceOrderRequest, String> {
        let file = self.file.ok_or_else(|| "No file part".to_string())?;
        if file.file_name.as_deref().map_or(true, str::is_empty) {
            return Err("No selected file".to_string());
        }
        let format = file
            .content_type
            .as_deref()
            .and_then(|ct| AudioFormat::from_mime(ct).ok())
            .ok_or_else(|| "Unsupported audio format".to_string())?;

        let exchange: Exchange = self
            .exchange
            .unwrap_or_default()
            .parse()
            .map_err(|e: ModelError| e.to_string())?;
        let product_type: ProductType = self
            .product_type
            .unwrap_or_default()
            .parse()
            .map_err(|e: ModelError| e.to_string())?;
        let model = match self.model.filter(|m| !m.is_empty()) {
            Some(model) => model
                .parse::<TranscriptionModel>()
                .map_err(|e: ModelError| e.to_string())?,
            None => default_model,
        };

        Ok(VoiceOrderRequest {
            clip: AudioClip::new(file.bytes, format),
            params: OrderParams {
                exchange,
                product_type,
            },
            model,
        })
    }
}
