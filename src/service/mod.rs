//! Payment dispatch layer between the HTTP receiver and the producer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::types::PaymentRecord;

/// Anything that can publish a payment record.
#[async_trait]
pub trait PaymentPublisher: Send + Sync {
    /// Publish one record. Each call is one delivery attempt.
    async fn publish(&self, record: &PaymentRecord) -> Result<()>;
}

/// Forwards payment records to a publisher unchanged.
pub struct PaymentService {
    publisher: Arc<dyn PaymentPublisher>,
}

impl PaymentService {
    /// Create a service around the given publisher.
    pub fn new(publisher: Arc<dyn PaymentPublisher>) -> Self {
        Self { publisher }
    }

    /// Send a payment. Publisher errors are returned as-is.
    pub async fn send(&self, record: &PaymentRecord) -> Result<()> {
        debug!(payer = ?record.payer, payee = ?record.payee, "Dispatching payment");
        self.publisher.publish(record).await
    }
}
