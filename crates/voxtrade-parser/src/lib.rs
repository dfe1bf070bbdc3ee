//! Voice command parsing: turns a noisy speech transcript into a canonical
//! `(action, quantity, instrument)` command.
//!
//! The stages run in a fixed order: normalize the transcript, find an
//! activation phrase, match the command grammar, then resolve the spoken
//! instrument through the alias table.

pub mod activation;
pub mod aliases;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod numbers;
pub mod parser;
pub mod synonyms;

pub use activation::ActivationSet;
pub use aliases::InstrumentAliasTable;
pub use error::{ParseFailure, VocabularyError};
pub use normalize::{strip_punctuation, NormalizedTranscript};
pub use parser::{CommandParser, ParsedCommand};
