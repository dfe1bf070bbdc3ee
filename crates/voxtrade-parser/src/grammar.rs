use std::num::NonZeroU32;

use voxtrade_models::{Action, GrammarMode};

use crate::error::ParseFailure;
use crate::numbers::parse_quantity;

/// A command body that matched the grammar; the instrument is still the spoken form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBody {
    pub action: Action,
    pub quantity: NonZeroU32,
    pub spoken_instrument: String,
}

/// Match `<BUY|SELL> <quantity> [SHARES OF] <instrument...>` against normalized tokens.
///
/// The shape is checked before the quantity is converted, so a body that is
/// structurally wrong always reports a grammar mismatch.
pub fn match_command(body: &[String], mode: GrammarMode) -> Result<CommandBody, ParseFailure> {
    let (action_token, rest) = body
        .split_first()
        .ok_or_else(|| ParseFailure::GrammarMismatch("empty command".to_string()))?;

    let action = Action::from_token(action_token).ok_or_else(|| {
        ParseFailure::GrammarMismatch(format!("expected BUY or SELL, found {action_token}"))
    })?;

    let (quantity_token, rest) = rest
        .split_first()
        .ok_or_else(|| ParseFailure::GrammarMismatch("missing quantity".to_string()))?;

    let instrument_tokens = match rest {
        [shares, of, tail @ ..] if shares == "SHARES" && of == "OF" => tail,
        _ if mode == GrammarMode::Strict => {
            return Err(ParseFailure::GrammarMismatch(
                "expected SHARES OF after quantity".to_string(),
            ));
        }
        _ => rest,
    };

    if instrument_tokens.is_empty() {
        return Err(ParseFailure::GrammarMismatch("missing instrument".to_string()));
    }
    if mode == GrammarMode::Strict && instrument_tokens.len() != 1 {
        return Err(ParseFailure::GrammarMismatch(format!(
            "expected a single-word instrument, found {}",
            instrument_tokens.join(" ")
        )));
    }

    let quantity = parse_quantity(quantity_token)
        .ok_or_else(|| ParseFailure::BadQuantity(quantity_token.clone()))?;

    Ok(CommandBody {
        action,
        quantity,
        spoken_instrument: instrument_tokens.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn permissive(text: &str) -> Result<CommandBody, ParseFailure> {
        match_command(&tokens(text), GrammarMode::Permissive)
    }

    fn strict(text: &str) -> Result<CommandBody, ParseFailure> {
        match_command(&tokens(text), GrammarMode::Strict)
    }

    #[test]
    fn full_form() {
        let body = permissive("BUY 100 SHARES OF TCS").unwrap();
        assert_eq!(body.action, Action::Buy);
        assert_eq!(body.quantity.get(), 100);
        assert_eq!(body.spoken_instrument, "TCS");
    }

    #[test]
    fn shares_of_is_optional() {
        let body = permissive("SELL TWENTY RELIANCE").unwrap();
        assert_eq!(body.action, Action::Sell);
        assert_eq!(body.quantity.get(), 20);
        assert_eq!(body.spoken_instrument, "RELIANCE");
    }

    #[test]
    fn instrument_takes_rest_of_line() {
        let body = permissive("BUY 5 SHARES OF TATA CONSULTANCY SERVICES").unwrap();
        assert_eq!(body.spoken_instrument, "TATA CONSULTANCY SERVICES");
    }

    #[test]
    fn shares_without_of_is_part_of_instrument() {
        let body = permissive("BUY 5 SHARES TCS").unwrap();
        assert_eq!(body.spoken_instrument, "SHARES TCS");
    }

    #[test]
    fn wrong_leading_token() {
        assert!(matches!(
            permissive("HOLD 10 TCS"),
            Err(ParseFailure::GrammarMismatch(_))
        ));
        assert!(matches!(permissive(""), Err(ParseFailure::GrammarMismatch(_))));
    }

    #[test]
    fn missing_parts() {
        assert!(matches!(permissive("BUY"), Err(ParseFailure::GrammarMismatch(_))));
        assert!(matches!(permissive("BUY 10"), Err(ParseFailure::GrammarMismatch(_))));
        assert!(matches!(
            permissive("BUY 10 SHARES OF"),
            Err(ParseFailure::GrammarMismatch(_))
        ));
    }

    #[test]
    fn bad_quantity() {
        assert_eq!(
            permissive("BUY ABC TCS"),
            Err(ParseFailure::BadQuantity("ABC".to_string()))
        );
        assert_eq!(
            permissive("SELL 0 TCS"),
            Err(ParseFailure::BadQuantity("0".to_string()))
        );
    }

    #[test]
    fn structure_is_checked_before_quantity() {
        assert!(matches!(permissive("BUY ABC"), Err(ParseFailure::GrammarMismatch(_))));
    }

    #[test]
    fn strict_requires_shares_of_and_one_word() {
        assert!(strict("BUY 100 SHARES OF TCS").is_ok());
        assert!(matches!(strict("BUY 100 TCS"), Err(ParseFailure::GrammarMismatch(_))));
        assert!(matches!(
            strict("BUY 100 SHARES OF TATA MOTORS"),
            Err(ParseFailure::GrammarMismatch(_))
        ));
    }
}
