//! Error types for publishing and broker access.

use thiserror::Error;

/// Failures raised by a broker client.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_lapin::PoolError),

    #[error("AMQP error: {0}")]
    Amqp(#[from] lapin::Error),

    #[error("broker setup failed: {0}")]
    Setup(String),

    #[error("exchange not found: {0}")]
    ExchangeNotFound(String),
}

/// Failures surfaced by the publish path.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("failed to serialize payment record: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl PaymentError {
    /// Whether this is the serialization failure of the record itself.
    pub fn is_serialization(&self) -> bool {
        matches!(self, PaymentError::Serialization { .. })
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
