//! # Messaging
//!
//! Broker plumbing for payments.
//!
//! ## Features
//! - `MessageBroker` seam between the producer and the broker client
//! - RabbitMQ client with pooled connections
//! - In-process direct-exchange broker for local runs and tests
//! - Payment producer and queue listener

pub mod broker;
pub mod consumer;
pub mod in_memory;
pub mod producer;
pub mod rabbit_client;

pub use broker::MessageBroker;
pub use consumer::PaymentListener;
pub use in_memory::{InMemoryBroker, PublishedMessage};
pub use producer::PaymentProducer;
pub use rabbit_client::{RabbitClient, RabbitConfig};
