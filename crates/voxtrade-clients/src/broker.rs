use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};
use voxtrade_models::{Action, Exchange, OrderRequest, PriceType, ProductType};

use crate::error::ClientError;
use crate::http::join_url;

/// Order-execution collaborator. Mockable for testing.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Place an order and return the backend's confirmation untouched.
    async fn place_order(
        &self,
        order: &OrderRequest,
        strategy: &str,
    ) -> Result<serde_json::Value, ClientError>;
}

/// Wire body for OpenAlgo's `placeorder` endpoint.
#[derive(Debug, Serialize)]
struct PlaceOrderBody<'a> {
    apikey: &'a str,
    strategy: &'a str,
    symbol: &'a str,
    action: Action,
    exchange: Exchange,
    pricetype: PriceType,
    product: ProductType,
    quantity: String,
}

/// REST client for an OpenAlgo-compatible order API.
pub struct OpenAlgoClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAlgoClient {
    pub fn new(client: Client, host: &str, api_key: String) -> Self {
        Self {
            client,
            endpoint: join_url(host, "api/v1/placeorder"),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderExecutor for OpenAlgoClient {
    async fn place_order(
        &self,
        order: &OrderRequest,
        strategy: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let body = PlaceOrderBody {
            apikey: &self.api_key,
            strategy,
            symbol: order.instrument(),
            action: order.action(),
            exchange: order.exchange(),
            pricetype: order.price_type(),
            product: order.product_type(),
            quantity: order.quantity().to_string(),
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "Order API returned an error");
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let confirmation: serde_json::Value = serde_json::from_str(&text)?;
        if confirmation.get("status").and_then(|s| s.as_str()) == Some("error") {
            let message = confirmation
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("order rejected without a message")
                .to_string();
            return Err(ClientError::Rejected(message));
        }

        info!(symbol = %order.instrument(), action = %order.action(), "Order accepted by backend");
        Ok(confirmation)
    }
}
