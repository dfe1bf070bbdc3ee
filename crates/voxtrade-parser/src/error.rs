use thiserror::Error;
use voxtrade_models::Stage;

/// Why a transcript did not yield a command.
///
/// Callers see every variant as the same "invalid command"; the variants
/// exist so logs can tell the reasons apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("no activation phrase found")]
    NoActivationPhrase,

    #[error("grammar mismatch: {0}")]
    GrammarMismatch(String),

    #[error("bad quantity: {0:?}")]
    BadQuantity(String),

    #[error("instrument not recognized: {0:?}")]
    UnknownInstrument(String),
}

impl ParseFailure {
    /// Short machine-friendly tag for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseFailure::NoActivationPhrase => "no_activation_phrase",
            ParseFailure::GrammarMismatch(_) => "grammar_mismatch",
            ParseFailure::BadQuantity(_) => "bad_quantity",
            ParseFailure::UnknownInstrument(_) => "unknown_instrument",
        }
    }

    /// The last pipeline stage completed before the failure.
    pub fn last_stage(&self) -> Stage {
        match self {
            ParseFailure::NoActivationPhrase => Stage::Normalized,
            ParseFailure::GrammarMismatch(_) | ParseFailure::BadQuantity(_) => Stage::Activated,
            ParseFailure::UnknownInstrument(_) => Stage::GrammarMatched,
        }
    }
}

/// Errors building the activation set or alias table at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("at least one activation phrase is required")]
    NoActivationPhrases,

    #[error("activation phrase #{0} is empty after normalization")]
    EmptyActivationPhrase(usize),

    #[error("at least one instrument alias is required")]
    NoInstrumentAliases,

    #[error("instrument alias table has an empty canonical symbol")]
    EmptyCanonical,

    #[error("alias for {canonical} is empty after normalization")]
    EmptyVariant { canonical: String },

    #[error("alias {variant:?} for {canonical} contains an action word")]
    ActionWordVariant { canonical: String, variant: String },

    #[error("alias {variant:?} maps to both {first} and {second}")]
    ConflictingVariant {
        variant: String,
        first: String,
        second: String,
    },
}
