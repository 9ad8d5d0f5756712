//! Broker abstraction used by the publish path.

use async_trait::async_trait;

use crate::error::BrokerError;

/// A client able to hand a message to an exchange.
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Publish `payload` to `exchange` with `routing_key`.
    ///
    /// A single call is a single delivery attempt; implementations do not retry.
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError>;
}
