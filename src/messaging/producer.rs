//! Payment producer.
//!
//! Serializes payment records to JSON and hands them to the broker on the
//! fixed payment exchange and routing key.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use super::broker::MessageBroker;
use crate::error::{PaymentError, Result};
use crate::service::PaymentPublisher;
use crate::types::PaymentRecord;
use crate::{PAYMENT_EXCHANGE, PAYMENT_ROUTING_KEY};

/// Publishes payment records to `payment-exchange` / `payment-rk`.
pub struct PaymentProducer {
    broker: Arc<dyn MessageBroker>,
}

impl PaymentProducer {
    /// Create a producer on top of the given broker client.
    pub fn new(broker: Arc<dyn MessageBroker>) -> Self {
        Self { broker }
    }

    /// Serialize any value and publish it on the payment route.
    ///
    /// Nothing reaches the broker when serialization fails.
    pub async fn publish_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let body = serde_json::to_string(value).map_err(|source| {
            debug!(error = %source, "Failed to serialize payment record");
            PaymentError::Serialization { source }
        })?;

        self.broker
            .publish(PAYMENT_EXCHANGE, PAYMENT_ROUTING_KEY, body.as_bytes())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PaymentPublisher for PaymentProducer {
    #[instrument(skip(self, record), fields(amount = ?record.amount))]
    async fn publish(&self, record: &PaymentRecord) -> Result<()> {
        self.publish_value(record).await
    }
}
