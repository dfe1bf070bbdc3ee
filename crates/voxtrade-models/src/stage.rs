use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-request progress through the voice order pipeline.
///
/// Stages only move forward. `Failed` is reachable from any stage and is
/// logged together with the last stage that completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Received,
    Normalized,
    Activated,
    GrammarMatched,
    InstrumentResolved,
    Dispatched,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "RECEIVED",
            Stage::Normalized => "NORMALIZED",
            Stage::Activated => "ACTIVATED",
            Stage::GrammarMatched => "GRAMMAR_MATCHED",
            Stage::InstrumentResolved => "INSTRUMENT_RESOLVED",
            Stage::Dispatched => "DISPATCHED",
            Stage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Received < Stage::Normalized);
        assert!(Stage::GrammarMatched < Stage::InstrumentResolved);
        assert!(Stage::InstrumentResolved < Stage::Dispatched);
    }

    #[test]
    fn failed_is_terminal() {
        assert_eq!(Stage::Failed.as_str(), "FAILED");
        assert!(Stage::Dispatched < Stage::Failed);
        let json = serde_json::to_string(&Stage::Failed).unwrap();
        assert_eq!(json, "\"FAILED\"");
    }

    #[test]
    fn serde_matches_display() {
        let json = serde_json::to_string(&Stage::GrammarMatched).unwrap();
        assert_eq!(json, format!("\"{}\"", Stage::GrammarMatched));
    }
}
