//! Wikimedia EventStreams → Kafka producer entry point.

use anyhow::Result;
use clap::Parser;
use eventstreams::EventStream;
use kafka_sink::KafkaSink;
use metrics_exporter_prometheus::PrometheusBuilder;
use pipeline::wikimedia::{
    PAGE_CREATE_STREAM_URL, RECENT_CHANGE_STREAM_URL, REVISION_CREATE_STREAM_URL,
};
use pipeline::{PageCreateAdapter, RecentChangeAdapter, RevisionCreateAdapter};
use producer::{Coordinator, Lane};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "producer", about = "Wikimedia EventStreams Kafka producer", version)]
struct Args {
    /// Kafka bootstrap broker(s) (host[:port]).
    #[arg(long, alias = "bootstrap_server", default_value = "localhost:9092")]
    bootstrap_server: String,

    /// Stop after this many events have been published.
    #[arg(long, alias = "events_to_produce", default_value_t = 10_000)]
    events_to_produce: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let metrics_port: u16 = std::env::var("METRICS_PORT")
        .unwrap_or_else(|_| "9090".into())
        .parse()
        .unwrap_or(9090);
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], metrics_port))
        .install()?;
    info!(
        "Prometheus metrics available at http://0.0.0.0:{}/metrics",
        metrics_port
    );

    // Broker connectivity is checked here; failure aborts before any stream
    // is opened.
    let sink = KafkaSink::connect(&args.bootstrap_server).await?;

    let edits = Lane::new(
        Box::new(EventStream::open(RECENT_CHANGE_STREAM_URL).await?),
        Box::new(RecentChangeAdapter),
        Box::new(sink.clone()),
    );
    let creations = Lane::new(
        Box::new(EventStream::open(PAGE_CREATE_STREAM_URL).await?),
        Box::new(PageCreateAdapter),
        Box::new(sink.clone()),
    );
    let revisions = Lane::new(
        Box::new(EventStream::open(REVISION_CREATE_STREAM_URL).await?),
        Box::new(RevisionCreateAdapter),
        Box::new(sink),
    );

    let coordinator = Coordinator::new(edits, creations, revisions, args.events_to_produce);
    let accepted = coordinator.run().await?;

    info!("producer stopping after {} events", accepted);
    Ok(())
}
