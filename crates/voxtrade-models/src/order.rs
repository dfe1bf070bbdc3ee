use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::market::{Action, Exchange, PriceType, ProductType};

/// Market parameters chosen by the caller alongside the spoken command.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderParams {
    pub exchange: Exchange,
    pub product_type: ProductType,
}

/// A fully specified market order, ready for the execution backend.
///
/// Every field is required and typed, so a request cannot carry a missing
/// action, a zero quantity, or an exchange outside the closed set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    action: Action,
    quantity: NonZeroU32,
    instrument: String,
    exchange: Exchange,
    product_type: ProductType,
    price_type: PriceType,
}

impl OrderRequest {
    pub fn new(
        action: Action,
        quantity: NonZeroU32,
        instrument: impl Into<String>,
        params: OrderParams,
    ) -> Self {
        Self {
            action,
            quantity,
            instrument: instrument.into(),
            exchange: params.exchange,
            product_type: params.product_type,
            price_type: PriceType::Market,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn price_type(&self) -> PriceType {
        self.price_type
    }
}
