use voxtrade_models::Action;

/// Spoken or misheard action words, lowercased, and the action they stand for.
const ACTION_SYNONYMS: &[(&str, Action)] = &[
    ("bhai", Action::Buy),
    ("bi", Action::Buy),
    ("by", Action::Buy),
    ("bye", Action::Buy),
    ("buy", Action::Buy),
    ("cell", Action::Sell),
    ("cel", Action::Sell),
    ("self", Action::Sell),
    ("sale", Action::Sell),
    ("sel", Action::Sell),
    ("sell", Action::Sell),
];

/// Resolve a single token to a canonical action, ignoring case.
pub fn canonical_action(token: &str) -> Option<Action> {
    let lower = token.to_lowercase();
    ACTION_SYNONYMS
        .iter()
        .find(|(word, _)| *word == lower)
        .map(|(_, action)| *action)
}

/// Replace a token with its canonical action token when it is a known synonym.
/// Other tokens are returned unchanged.
pub fn canonicalize_token(token: &str) -> &str {
    match canonical_action(token) {
        Some(action) => action.as_str(),
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misheard_words_resolve() {
        assert_eq!(canonical_action("BYE"), Some(Action::Buy));
        assert_eq!(canonical_action("bhai"), Some(Action::Buy));
        assert_eq!(canonical_action("Cell"), Some(Action::Sell));
        assert_eq!(canonical_action("SALE"), Some(Action::Sell));
    }

    #[test]
    fn canonicalization_is_idempotent() {
        for (word, _) in ACTION_SYNONYMS {
            let once = canonicalize_token(word);
            assert_eq!(canonicalize_token(once), once, "{word}");
        }
        assert_eq!(canonicalize_token("BUY"), "BUY");
        assert_eq!(canonicalize_token("SELL"), "SELL");
    }

    #[test]
    fn unrelated_tokens_pass_through() {
        assert_eq!(canonicalize_token("TCS"), "TCS");
        assert_eq!(canonicalize_token("BUYING"), "BUYING");
        assert_eq!(canonical_action("shares"), None);
    }
}
