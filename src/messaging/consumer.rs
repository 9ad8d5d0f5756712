//! Payment queue listener.

use tracing::info;

/// Logs every message delivered on the payment queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentListener;

impl PaymentListener {
    pub fn new() -> Self {
        Self
    }

    /// Handle one delivery: decode as text and log it verbatim.
    pub fn on_message(&self, body: &[u8]) {
        let message = String::from_utf8_lossy(body);
        info!("Message received: {}", message);
    }
}
