//! Core types for the payment relay.

mod config;
mod payment;

pub use self::config::{AppConfig, ENV_PREFIX};
pub use payment::PaymentRecord;
