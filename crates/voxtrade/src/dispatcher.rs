use std::sync::Arc;

use tracing::{error, info};
use voxtrade_clients::OrderExecutor;
use voxtrade_models::OrderRequest;

/// Order dispatch stage. Failures never escape: they are folded into the
/// response body as `{"error": "..."}` next to an otherwise normal reply.
#[derive(Clone)]
pub struct OrderDispatcher {
    executor: Arc<dyn OrderExecutor>,
    strategy: String,
}

impl OrderDispatcher {
    pub fn new(executor: Arc<dyn OrderExecutor>, strategy: impl Into<String>) -> Self {
        Self {
            executor,
            strategy: strategy.into(),
        }
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Place `order` and return the backend reply verbatim, or the error object.
    pub async fn dispatch(&self, order: &OrderRequest) -> serde_json::Value {
        match self.executor.place_order(order, &self.strategy).await {
            Ok(confirmation) => {
                info!(
                    symbol = %order.instrument(),
                    action = %order.action(),
                    quantity = order.quantity().get(),
                    exchange = %order.exchange(),
                    product = %order.product_type(),
                    response = %confirmation,
                    "Order placed"
                );
                confirmation
            }
            Err(e) => {
                error!(symbol = %order.instrument(), error = %e, "Error placing order");
                serde_json::json!({ "error": e.to_string() })
            }
        }
    }
}
