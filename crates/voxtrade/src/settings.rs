//! Startup configuration: the TOML file plus secrets and overrides from the
//! environment, validated once and then shared read-only.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::info;
use voxtrade_models::VoxtradeConfig;
use voxtrade_parser::{ActivationSet, CommandParser, InstrumentAliasTable, VocabularyError};

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const OPENALGO_API_KEY: &str = "OPENALGO_API_KEY";
pub const OPENALGO_HOST: &str = "OPENALGO_HOST";
pub const VOICE_ACTIVATE_COMMAND: &str = "VOICE_ACTIVATE_COMMAND";
pub const INSTRUMENT_ALIASES: &str = "INSTRUMENT_ALIASES";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("{name} is not valid JSON of the expected shape: {source}")]
    InvalidEnv {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Alias file {path} is not a JSON object of symbol -> variants: {source}")]
    AliasFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("Invalid voice vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// API keys taken from the environment. Never printed.
#[derive(Clone)]
pub struct Credentials {
    pub groq_api_key: String,
    pub openalgo_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("groq_api_key", &"<redacted>")
            .field("openalgo_api_key", &"<redacted>")
            .finish()
    }
}

/// Fully resolved settings. `config` has every environment override applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: VoxtradeConfig,
    pub credentials: Credentials,
    pub broker_host: String,
}

impl Settings {
    /// Build the command parser from the resolved vocabulary.
    pub fn command_parser(&self) -> Result<CommandParser, SettingsError> {
        let voice = &self.config.voice;
        let activation = ActivationSet::new(&voice.activation_phrases)?;
        let aliases = InstrumentAliasTable::from_map(&voice.instrument_aliases)?;
        info!(
            phrases = activation.len(),
            variants = aliases.variant_count(),
            grammar = ?voice.grammar,
            "Voice vocabulary loaded"
        );
        Ok(CommandParser::new(activation, aliases, voice.grammar))
    }
}

/// Read and deserialize the TOML configuration file.
///
/// A relative `voice.aliases_path` is taken relative to the file's directory.
pub fn load_config(path: &Path) -> Result<VoxtradeConfig, SettingsError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: display.clone(),
        source,
    })?;
    let mut config: VoxtradeConfig =
        toml::from_str(&text).map_err(|source| SettingsError::Toml {
            path: display,
            source,
        })?;

    if let (Some(aliases), Some(dir)) = (config.voice.aliases_path.as_deref(), path.parent()) {
        if Path::new(aliases).is_relative() {
            config.voice.aliases_path = Some(dir.join(aliases).display().to_string());
        }
    }
    Ok(config)
}

/// Merge the file configuration with the environment.
///
/// `env` is usually `|k| std::env::var(k).ok()`. Blank values count as unset.
/// All missing required variables are reported together.
pub fn resolve_settings<F>(mut config: VoxtradeConfig, env: F) -> Result<Settings, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let groq_api_key = lookup(GROQ_API_KEY);
    let openalgo_api_key = lookup(OPENALGO_API_KEY);
    let broker_host = lookup(OPENALGO_HOST).or_else(|| config.broker.host.clone());

    let mut missing = Vec::new();
    if groq_api_key.is_none() {
        missing.push(GROQ_API_KEY);
    }
    if openalgo_api_key.is_none() {
        missing.push(OPENALGO_API_KEY);
    }
    if broker_host.is_none() {
        missing.push(OPENALGO_HOST);
    }
    let (Some(groq_api_key), Some(openalgo_api_key), Some(broker_host)) =
        (groq_api_key, openalgo_api_key, broker_host)
    else {
        return Err(SettingsError::MissingEnv(missing));
    };

    if let Some(raw) = lookup(VOICE_ACTIVATE_COMMAND) {
        config.voice.activation_phrases = serde_json::from_str(&raw).map_err(|source| {
            SettingsError::InvalidEnv {
                name: VOICE_ACTIVATE_COMMAND,
                source,
            }
        })?;
    }

    if let Some(path) = config.voice.aliases_path.clone() {
        config.voice.instrument_aliases = load_alias_file(Path::new(&path))?;
    }
    if let Some(raw) = lookup(INSTRUMENT_ALIASES) {
        config.voice.instrument_aliases =
            serde_json::from_str(&raw).map_err(|source| SettingsError::InvalidEnv {
                name: INSTRUMENT_ALIASES,
                source,
            })?;
    }

    if config.transcription.rate_limit_calls == 0 {
        return Err(SettingsError::NotPositive("transcription.rate_limit_calls"));
    }
    if config.transcription.rate_limit_period_seconds == 0 {
        return Err(SettingsError::NotPositive(
            "transcription.rate_limit_period_seconds",
        ));
    }

    config.broker.host = Some(broker_host.clone());

    Ok(Settings {
        config,
        credentials: Credentials {
            groq_api_key,
            openalgo_api_key,
        },
        broker_host,
    })
}

fn load_alias_file(path: &Path) -> Result<BTreeMap<String, Vec<String>>, SettingsError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SettingsError::AliasFile {
        path: display,
        source,
    })
}
