use std::num::NonZeroU32;

use serde::Serialize;
use tracing::{debug, info, warn};
use voxtrade_models::{Action, GrammarMode, OrderParams, OrderRequest, Stage};

use crate::activation::ActivationSet;
use crate::aliases::InstrumentAliasTable;
use crate::error::ParseFailure;
use crate::grammar::match_command;
use crate::normalize::NormalizedTranscript;

/// A complete voice command. Only [`CommandParser::parse`] can build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCommand {
    action: Action,
    quantity: NonZeroU32,
    instrument: String,
}

impl ParsedCommand {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Canonical instrument symbol.
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn into_order(self, params: OrderParams) -> OrderRequest {
        OrderRequest::new(self.action, self.quantity, self.instrument, params)
    }
}

/// Turns transcripts into commands using tables fixed at construction.
///
/// Holds no mutable state, so one instance can be shared across requests.
#[derive(Debug, Clone)]
pub struct CommandParser {
    activation: ActivationSet,
    aliases: InstrumentAliasTable,
    grammar: GrammarMode,
}

impl CommandParser {
    pub fn new(
        activation: ActivationSet,
        aliases: InstrumentAliasTable,
        grammar: GrammarMode,
    ) -> Self {
        Self {
            activation,
            aliases,
            grammar,
        }
    }

    pub fn grammar(&self) -> GrammarMode {
        self.grammar
    }

    /// Parse a raw transcript. Every failure is logged with its reason and
    /// the last stage reached before being returned.
    pub fn parse(&self, transcript: &str) -> Result<ParsedCommand, ParseFailure> {
        let result = self.parse_inner(transcript);
        match &result {
            Ok(command) => info!(
                action = %command.action,
                quantity = command.quantity.get(),
                instrument = %command.instrument,
                stage = %Stage::InstrumentResolved,
                "Parsed voice command"
            ),
            Err(failure) => warn!(
                reason = failure.reason(),
                stage = %Stage::Failed,
                last_stage = %failure.last_stage(),
                detail = %failure,
                "Invalid voice command"
            ),
        }
        result
    }

    fn parse_inner(&self, transcript: &str) -> Result<ParsedCommand, ParseFailure> {
        let normalized = NormalizedTranscript::new(transcript);
        debug!(normalized = %normalized, stage = %Stage::Normalized, "Transcript normalized");

        let activation = self
            .activation
            .locate(&normalized)
            .ok_or(ParseFailure::NoActivationPhrase)?;
        debug!(phrase = %activation.phrase, stage = %Stage::Activated, "Activation phrase found");

        let body = match_command(activation.body, self.grammar)?;
        debug!(spoken_instrument = %body.spoken_instrument, stage = %Stage::GrammarMatched, "Command grammar matched");

        let instrument = self
            .aliases
            .resolve(&body.spoken_instrument)
            .ok_or_else(|| ParseFailure::UnknownInstrument(body.spoken_instrument.clone()))?;

        Ok(ParsedCommand {
            action: body.action,
            quantity: body.quantity,
            instrument: instrument.to_string(),
        })
    }
}
