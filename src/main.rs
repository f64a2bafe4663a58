use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use sensord_core::config::Config;
use sensord_core::{Pipeline, SchemaMode, SubscriberRegistry};

#[derive(Parser)]
#[command(name = "sensord", about = "Sensor telemetry feed ingester with live dashboard fan-out")]
struct Cli {
    /// Path to a TOML config file (defaults + environment are used without one).
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Listening port for the dashboard push channel.
    #[arg(long)]
    port: Option<u16>,
    /// Use the synthetic generator instead of the live stdin feed.
    #[arg(long)]
    synthetic: bool,
    /// Schema mode: single-metric, dual-metric, full-telemetry, or passthrough.
    #[arg(long)]
    schema: Option<SchemaMode>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.synthetic {
        config.feed.synthetic = true;
    }
    let mode = match cli.schema {
        Some(mode) => mode,
        None => config.schema_mode()?,
    };

    let registry = Arc::new(SubscriberRegistry::new());
    let pipeline = Pipeline::new(mode, config.feed.columns.clone(), Arc::clone(&registry));

    tracing::info!(%mode, synthetic = config.feed.synthetic, "starting pipeline");
    if config.feed.synthetic {
        let feed =
            sensord_feeds::synthetic::synthetic_feed(mode, Duration::from_millis(config.feed.tick_ms));
        tokio::spawn(pipeline.run(feed));
    } else {
        tokio::spawn(pipeline.run(sensord_feeds::stdin::stdin_feed()));
    }

    // The push channel outlives the feed: dashboards stay connected after a
    // live feed reaches EOF, they just stop receiving events.
    sensord_web::serve(registry, config.server.port).await
}
