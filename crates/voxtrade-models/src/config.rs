use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::audio::TranscriptionModel;

/// Top-level file configuration for voxtrade.
///
/// Credentials are deliberately absent: they come from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoxtradeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Inbound HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "127.0.0.1:5001".
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Speech-to-text service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptionConfig {
    /// OpenAI-compatible API root; `/audio/transcriptions` is appended.
    #[serde(default = "default_transcription_base_url")]
    pub base_url: String,
    /// Spoken language hint passed to the service.
    #[serde(default = "default_language")]
    pub language: String,
    /// Model used when the request does not pick one.
    #[serde(default)]
    pub default_model: TranscriptionModel,
    /// Calls allowed per rolling window, shared by all requests.
    #[serde(default = "default_rate_limit_calls")]
    pub rate_limit_calls: u32,
    /// Length of the rolling window in seconds.
    #[serde(default = "default_rate_limit_period")]
    pub rate_limit_period_seconds: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_transcription_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: default_transcription_base_url(),
            language: default_language(),
            default_model: TranscriptionModel::default(),
            rate_limit_calls: default_rate_limit_calls(),
            rate_limit_period_seconds: default_rate_limit_period(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_transcription_timeout(),
        }
    }
}

/// Order-execution backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrokerConfig {
    /// Backend root URL. `OPENALGO_HOST` overrides it.
    #[serde(default)]
    pub host: Option<String>,
    /// Strategy tag attached to every order.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_broker_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: None,
            strategy: default_strategy(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_broker_timeout(),
        }
    }
}

/// How strictly the command body is matched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrammarMode {
    /// `SHARES OF` optional, instrument may span several words.
    #[default]
    Permissive,
    /// `SHARES OF` required, instrument is exactly one word.
    Strict,
}

/// Voice command recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceConfig {
    /// Trigger phrases, checked in order. `VOICE_ACTIVATE_COMMAND` overrides them.
    #[serde(default = "default_activation_phrases")]
    pub activation_phrases: Vec<String>,
    /// Canonical symbol -> spoken variants.
    #[serde(default)]
    pub instrument_aliases: BTreeMap<String, Vec<String>>,
    /// JSON file with the same shape as `instrument_aliases`; replaces the inline table when set.
    #[serde(default)]
    pub aliases_path: Option<String>,
    #[serde(default)]
    pub grammar: GrammarMode,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            activation_phrases: default_activation_phrases(),
            instrument_aliases: BTreeMap::new(),
            aliases_path: None,
            grammar: GrammarMode::default(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5001".to_string()
}
fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}
fn default_transcription_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_rate_limit_calls() -> u32 {
    15
}
fn default_rate_limit_period() -> u64 {
    60
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_transcription_timeout() -> u64 {
    60
}
fn default_broker_timeout() -> u64 {
    30
}
fn default_strategy() -> String {
    "VoiceOrder".to_string()
}
fn default_activation_phrases() -> Vec<String> {
    vec!["MILO".to_string()]
}
