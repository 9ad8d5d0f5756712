//! Payment Relay - Main Entry Point
//!
//! HTTP-triggered payment publisher with a payment queue listener.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payment_relay::api::{self, AppState};
use payment_relay::messaging::{
    InMemoryBroker, MessageBroker, PaymentListener, PaymentProducer, RabbitClient, RabbitConfig,
};
use payment_relay::service::PaymentService;
use payment_relay::types::AppConfig;
use payment_relay::{PAYMENT_EXCHANGE, PAYMENT_QUEUE, PAYMENT_ROUTING_KEY};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "payment_relay=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    info!("Starting Payment Relay v{}", env!("CARGO_PKG_VERSION"));

    let broker = connect_broker(&config).await?;

    // Wire components
    let producer = PaymentProducer::new(broker);
    let service = PaymentService::new(Arc::new(producer));
    let state = Arc::new(AppState { service });

    let app = api::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Payment Relay stopped");

    Ok(())
}

/// Build the broker client and register the queue listener.
async fn connect_broker(config: &AppConfig) -> Result<Arc<dyn MessageBroker>> {
    let listener = PaymentListener::new();

    let Some(uri) = config.amqp_uri.clone() else {
        warn!("PAYMENT_AMQP_URI not set, using in-process broker");
        let broker = InMemoryBroker::new();

        if !config.declare_topology {
            warn!("Topology not declared, publishes will fail until {} exists", PAYMENT_EXCHANGE);
            return Ok(Arc::new(broker));
        }

        let mut queue = broker
            .declare_topology(PAYMENT_EXCHANGE, PAYMENT_QUEUE, PAYMENT_ROUTING_KEY)
            .await;

        if config.listener_enabled {
            tokio::spawn(async move {
                while let Some(body) = queue.recv().await {
                    listener.on_message(&body);
                }
            });
        }

        return Ok(Arc::new(broker));
    };

    let client = Arc::new(RabbitClient::new(RabbitConfig {
        uri,
        pool_size: config.pool_size,
    })?);

    if config.declare_topology {
        client
            .declare_topology(PAYMENT_EXCHANGE, PAYMENT_QUEUE, PAYMENT_ROUTING_KEY)
            .await?;
    }

    if config.listener_enabled {
        let consumer = Arc::clone(&client);
        tokio::spawn(async move {
            if let Err(e) = consumer
                .consume(PAYMENT_QUEUE, move |body| listener.on_message(body))
                .await
            {
                error!(error = %e, "Payment listener stopped");
            }
        });
    }

    Ok(client)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
