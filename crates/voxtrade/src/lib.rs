//! voxtrade - voice-driven market orders
//!
//! Accepts a spoken clip over HTTP, transcribes it through a rate-limited
//! speech service, parses `<phrase> BUY|SELL <qty> [SHARES OF] <instrument>`
//! and forwards the resulting market order to an OpenAlgo-compatible backend.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use voxtrade::models::VoxtradeConfig;
//! use voxtrade::parser::CommandParser;
//! use voxtrade::clients::{Transcriber, OrderExecutor};
//! use voxtrade::{build_pipeline, resolve_settings};
//! ```

pub use voxtrade_clients as clients;
pub use voxtrade_models as models;
pub use voxtrade_parser as parser;

pub mod dispatcher;
pub mod ingest;
pub mod pipeline;
pub mod server;
pub mod settings;

pub use dispatcher::OrderDispatcher;
pub use ingest::AudioIngestor;
pub use pipeline::{PipelineReport, VoiceOrderRequest, VoicePipeline};
pub use server::{router, ApiError, AppState};
pub use settings::{load_config, resolve_settings, Credentials, Settings, SettingsError};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use voxtrade_clients::{
    build_http_client, OpenAlgoClient, SlidingWindowLimiter, WhisperApiTranscriber,
};

/// Build the pipeline with the real speech and order clients.
pub fn build_pipeline(settings: &Settings) -> Result<VoicePipeline, anyhow::Error> {
    let parser = Arc::new(settings.command_parser()?);

    let stt = &settings.config.transcription;
    let stt_http = build_http_client(
        Duration::from_secs(stt.connect_timeout_seconds),
        Duration::from_secs(stt.request_timeout_seconds),
    )?;
    let transcriber = Arc::new(WhisperApiTranscriber::new(
        stt_http,
        &stt.base_url,
        settings.credentials.groq_api_key.clone(),
        stt.language.clone(),
    ));
    let limiter = Arc::new(SlidingWindowLimiter::new(
        stt.rate_limit_calls,
        Duration::from_secs(stt.rate_limit_period_seconds),
    ));

    let broker = &settings.config.broker;
    let broker_http = build_http_client(
        Duration::from_secs(broker.connect_timeout_seconds),
        Duration::from_secs(broker.request_timeout_seconds),
    )?;
    let executor = Arc::new(OpenAlgoClient::new(
        broker_http,
        &settings.broker_host,
        settings.credentials.openalgo_api_key.clone(),
    ));

    Ok(VoicePipeline::new(
        AudioIngestor::new(transcriber, limiter),
        parser,
        OrderDispatcher::new(executor, broker.strategy.clone()),
    ))
}

/// Build the HTTP application from resolved settings.
pub fn build_app(settings: &Settings) -> Result<Router, anyhow::Error> {
    let pipeline = build_pipeline(settings)?;
    let state = AppState {
        pipeline,
        default_model: settings.config.transcription.default_model,
    };
    Ok(router(state, settings.config.server.max_upload_bytes))
}
