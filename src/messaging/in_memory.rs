//! In-process direct-exchange broker.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use super::broker::MessageBroker;
use crate::error::BrokerError;

/// A message accepted by an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub exchange: String,
    pub routing_key: String,
    pub body: Vec<u8>,
}

impl PublishedMessage {
    /// Body decoded as UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
struct Topology {
    exchanges: HashSet<String>,
    queues: HashMap<String, mpsc::UnboundedSender<Vec<u8>>>,
    /// (exchange, routing key) -> bound queues
    bindings: HashMap<(String, String), Vec<String>>,
    published: Vec<PublishedMessage>,
}

/// A thread-safe broker with direct-exchange routing held in memory.
///
/// Publishing to an undeclared exchange fails; a message whose routing key
/// matches no binding is accepted and dropped.
#[derive(Default, Clone)]
pub struct InMemoryBroker {
    inner: Arc<RwLock<Topology>>,
}

impl InMemoryBroker {
    /// Create an empty broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a direct exchange. Declaring twice is a no-op.
    pub async fn declare_exchange(&self, exchange: &str) {
        let mut topology = self.inner.write().await;
        topology.exchanges.insert(exchange.to_string());
    }

    /// Declare a queue and take its receiving end.
    ///
    /// Redeclaring a queue replaces the previous receiver.
    pub async fn declare_queue(&self, queue: &str) -> mpsc::UnboundedReceiver<Vec<u8>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut topology = self.inner.write().await;
        topology.queues.insert(queue.to_string(), tx);
        rx
    }

    /// Bind `queue` to `exchange` for messages carrying `routing_key`.
    pub async fn bind_queue(&self, queue: &str, exchange: &str, routing_key: &str) {
        let mut topology = self.inner.write().await;
        let bound = topology
            .bindings
            .entry((exchange.to_string(), routing_key.to_string()))
            .or_default();
        if !bound.iter().any(|q| q == queue) {
            bound.push(queue.to_string());
        }
    }

    /// Declare `exchange` and `queue`, bind them by `routing_key`, and take
    /// the queue's receiving end.
    pub async fn declare_topology(
        &self,
        exchange: &str,
        queue: &str,
        routing_key: &str,
    ) -> mpsc::UnboundedReceiver<Vec<u8>> {
        self.declare_exchange(exchange).await;
        let rx = self.declare_queue(queue).await;
        self.bind_queue(queue, exchange, routing_key).await;
        rx
    }

    /// All messages accepted so far, in publish order.
    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.inner.read().await.published.clone()
    }
}

#[async_trait]
impl MessageBroker for InMemoryBroker {
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError> {
        let mut topology = self.inner.write().await;

        if !topology.exchanges.contains(exchange) {
            return Err(BrokerError::ExchangeNotFound(exchange.to_string()));
        }

        topology.published.push(PublishedMessage {
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
            body: payload.to_vec(),
        });

        let key = (exchange.to_string(), routing_key.to_string());
        let Some(queues) = topology.bindings.get(&key) else {
            debug!(exchange, routing_key, "No binding matched, message dropped");
            return Ok(());
        };

        for queue in queues {
            let Some(tx) = topology.queues.get(queue) else {
                debug!(queue = %queue, "Bound queue not declared, message dropped");
                continue;
            };
            if tx.send(payload.to_vec()).is_err() {
                debug!(queue = %queue, "Queue receiver closed, message dropped");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_routes_to_bound_queue() {
        let broker = InMemoryBroker::new();
        broker.declare_exchange("ex").await;
        let mut rx = broker.declare_queue("q").await;
        broker.bind_queue("q", "ex", "rk").await;

        broker.publish("ex", "rk", b"hello").await.unwrap();

        assert_eq!(rx.recv().await, Some(b"hello".to_vec()));
        assert_eq!(broker.published().await.len(), 1);
    }

    #[tokio::test]
    async fn test_undeclared_exchange_rejected() {
        let broker = InMemoryBroker::new();
        let err = broker.publish("missing", "rk", b"x").await.unwrap_err();

        assert!(matches!(err, BrokerError::ExchangeNotFound(ref name) if name == "missing"));
        assert!(broker.published().await.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_routing_key_dropped() {
        let broker = InMemoryBroker::new();
        broker.declare_exchange("ex").await;
        let mut rx = broker.declare_queue("q").await;
        broker.bind_queue("q", "ex", "rk").await;

        broker.publish("ex", "other", b"x").await.unwrap();

        assert!(rx.try_recv().is_err());
        assert_eq!(broker.published().await[0].routing_key, "other");
    }

    #[tokio::test]
    async fn test_declare_topology_routes() {
        let broker = InMemoryBroker::new();
        let mut rx = broker.declare_topology("ex", "q", "rk").await;

        broker.publish("ex", "rk", b"routed").await.unwrap();

        assert_eq!(rx.recv().await, Some(b"routed".to_vec()));
    }

    #[tokio::test]
    async fn test_closed_receiver_still_accepts() {
        let broker = InMemoryBroker::new();
        let rx = broker.declare_topology("ex", "q", "rk").await;
        drop(rx);

        broker.publish("ex", "rk", b"lost").await.unwrap();

        assert_eq!(broker.published().await.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_binding_delivers_once() {
        let broker = InMemoryBroker::new();
        broker.declare_exchange("ex").await;
        let mut rx = broker.declare_queue("q").await;
        broker.bind_queue("q", "ex", "rk").await;
        broker.bind_queue("q", "ex", "rk").await;

        broker.publish("ex", "rk", b"once").await.unwrap();

        assert_eq!(rx.recv().await, Some(b"once".to_vec()));
        assert!(rx.try_recv().is_err());
    }
}
