use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Canonical trade direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
        }
    }

    /// Parse an already-canonical token. Spoken variants go through the synonym table instead.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "BUY" => Some(Action::Buy),
            "SELL" => Some(Action::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exchanges accepted by the order backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    Nse,
    Nfo,
    Cds,
    Bse,
    Bfo,
    Bcd,
    Mcx,
    Ncdex,
}

impl Exchange {
    pub const ALL: [Exchange; 8] = [
        Exchange::Nse,
        Exchange::Nfo,
        Exchange::Cds,
        Exchange::Bse,
        Exchange::Bfo,
        Exchange::Bcd,
        Exchange::Mcx,
        Exchange::Ncdex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Nse => "NSE",
            Exchange::Nfo => "NFO",
            Exchange::Cds => "CDS",
            Exchange::Bse => "BSE",
            Exchange::Bfo => "BFO",
            Exchange::Bcd => "BCD",
            Exchange::Mcx => "MCX",
            Exchange::Ncdex => "NCDEX",
        }
    }
}

impl FromStr for Exchange {
    type Err = ModelError;

    /// Exact match against the closed set; the form value is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Exchange::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ModelError::UnknownExchange(s.to_string()))
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broker product types: delivery (CNC), carry-forward (NRML), intraday (MIS).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Cnc,
    Nrml,
    Mis,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [ProductType::Cnc, ProductType::Nrml, ProductType::Mis];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Cnc => "CNC",
            ProductType::Nrml => "NRML",
            ProductType::Mis => "MIS",
        }
    }
}

impl FromStr for ProductType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ModelError::UnknownProductType(s.to_string()))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice orders are always sent at market.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceType {
    #[default]
    Market,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Market => "MARKET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_from_str_accepts_closed_set() {
        for name in ["NSE", "NFO", "CDS", "BSE", "BFO", "BCD", "MCX", "NCDEX"] {
            let exchange: Exchange = name.parse().unwrap();
            assert_eq!(exchange.as_str(), name);
        }
    }

    #[test]
    fn exchange_from_str_rejects_unknown_and_lowercase() {
        assert!(matches!(
            "NYSE".parse::<Exchange>(),
            Err(ModelError::UnknownExchange(v)) if v == "NYSE"
        ));
        assert!("nse".parse::<Exchange>().is_err());
        assert!("".parse::<Exchange>().is_err());
    }

    #[test]
    fn product_type_from_str() {
        assert_eq!("CNC".parse::<ProductType>().unwrap(), ProductType::Cnc);
        assert_eq!("NRML".parse::<ProductType>().unwrap(), ProductType::Nrml);
        assert_eq!("MIS".parse::<ProductType>().unwrap(), ProductType::Mis);
        assert!("BO".parse::<ProductType>().is_err());
    }

    #[test]
    fn wire_names_are_uppercase() {
        assert_eq!(serde_json::to_string(&Action::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Action::Sell).unwrap(), "\"SELL\"");
        assert_eq!(serde_json::to_string(&Exchange::Ncdex).unwrap(), "\"NCDEX\"");
        assert_eq!(serde_json::to_string(&ProductType::Nrml).unwrap(), "\"NRML\"");
        assert_eq!(serde_json::to_string(&PriceType::Market).unwrap(), "\"MARKET\"");
    }

    #[test]
    fn action_from_token_is_exact() {
        assert_eq!(Action::from_token("BUY"), Some(Action::Buy));
        assert_eq!(Action::from_token("SELL"), Some(Action::Sell));
        assert_eq!(Action::from_token("buy"), None);
        assert_eq!(Action::from_token("BYE"), None);
    }
}
