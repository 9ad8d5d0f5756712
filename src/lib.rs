//! Payment Relay Library
//!
//! Accepts payment records over HTTP, publishes them as JSON to a RabbitMQ
//! exchange, and logs whatever arrives on the payment queue.

pub mod api;
pub mod error;
pub mod messaging;
pub mod service;
pub mod types;

pub use error::{BrokerError, PaymentError};
pub use messaging::{InMemoryBroker, MessageBroker, PaymentListener, PaymentProducer, RabbitClient};
pub use service::{PaymentPublisher, PaymentService};
pub use types::{AppConfig, PaymentRecord};

/// Exchange payments are published to
pub const PAYMENT_EXCHANGE: &str = "payment-exchange";

/// Routing key used for every payment
pub const PAYMENT_ROUTING_KEY: &str = "payment-rk";

/// Queue the listener consumes
pub const PAYMENT_QUEUE: &str = "payment-queue";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum pooled broker connections
pub const DEFAULT_POOL_SIZE: usize = 10;
