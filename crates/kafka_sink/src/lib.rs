//! Kafka producer wrapper.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use std::time::Duration;
use tracing::info;

/// Delivery timeout for a single send.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Message-bus sink: `send` one payload to a topic, `close` when done.
///
/// Implemented by [`KafkaSink`]; tests supply recording sinks.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Publish one payload and wait for broker acknowledgment.
    async fn send(&self, topic: &str, payload: Bytes) -> Result<()>;

    /// Flush outstanding deliveries. Called exactly once per sink at the
    /// end of a run.
    async fn close(&self) -> Result<()>;
}

/// Wrapper around an rdkafka [`FutureProducer`].
#[derive(Clone)]
pub struct KafkaSink {
    producer: FutureProducer,
}

impl KafkaSink {
    /// Connect to a Kafka broker and verify it is reachable.
    ///
    /// The metadata probe makes broker unavailability a startup failure
    /// instead of a hang on the first send.
    pub async fn connect(bootstrap: &str) -> Result<Self> {
        info!("Connecting to Kafka at {}", bootstrap);

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", bootstrap)
            .set("message.timeout.ms", "5000")
            // Preserves per-topic ordering under retries.
            .set("max.in.flight.requests.per.connection", "1")
            .create()
            .context("failed to create Kafka producer")?;

        // fetch_metadata blocks, keep it off the async runtime.
        let probe = producer.clone();
        let bootstrap = bootstrap.to_string();
        tokio::task::spawn_blocking(move || {
            probe.client().fetch_metadata(None, Duration::from_secs(5))
        })
        .await?
        .with_context(|| format!("no broker reachable at {}", bootstrap))?;

        info!("Kafka producer connected");
        Ok(Self { producer })
    }
}

#[async_trait]
impl MessageSink for KafkaSink {
    async fn send(&self, topic: &str, payload: Bytes) -> Result<()> {
        let record = FutureRecord::to(topic).payload(payload.as_ref()).key("");

        self.producer
            .send(record, SEND_TIMEOUT)
            .await
            .map_err(|(e, _)| e)
            .with_context(|| format!("delivery to topic {} failed", topic))?;

        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let producer = self.producer.clone();
        tokio::task::spawn_blocking(move || producer.flush(Duration::from_secs(5))).await??;
        Ok(())
    }
}
