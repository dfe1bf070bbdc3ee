use std::fmt;

use crate::synonyms::canonicalize_token;

/// Drop every character that is neither alphanumeric nor whitespace.
///
/// Nothing is inserted in place of the removed characters, so "T.C.S." becomes
/// "TCS" and "twenty-five" becomes "twentyfive".
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// A transcript after punctuation removal, uppercasing and synonym replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTranscript {
    tokens: Vec<String>,
}

impl NormalizedTranscript {
    pub fn new(raw: &str) -> Self {
        let tokens = strip_punctuation(raw)
            .split_whitespace()
            .map(|t| canonicalize_token(&t.to_uppercase()).to_string())
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for NormalizedTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_keeps_spacing() {
        assert_eq!(strip_punctuation("Milo, buy 100 shares of TCS."), "Milo buy 100 shares of TCS");
        assert_eq!(strip_punctuation("T.C.S."), "TCS");
        assert_eq!(strip_punctuation("!?"), "");
    }

    #[test]
    fn normalizes_case_spacing_and_synonyms() {
        let normalized = NormalizedTranscript::new("  Milo,   bye 10   shares of Infosys! ");
        assert_eq!(normalized.to_string(), "MILO BUY 10 SHARES OF INFOSYS");
    }

    #[test]
    fn synonyms_replaced_anywhere() {
        let normalized = NormalizedTranscript::new("sale cell self sel");
        assert_eq!(normalized.to_string(), "SELL SELL SELL SELL");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = NormalizedTranscript::new("Milo, cell twenty shares of Reliance.");
        let twice = NormalizedTranscript::new(&once.to_string());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input() {
        assert!(NormalizedTranscript::new("").is_empty());
        assert!(NormalizedTranscript::new(" ... ").is_empty());
    }
}
