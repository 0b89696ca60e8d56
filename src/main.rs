use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rateboard::config::Settings;
use rateboard::store::{normalize, RateStore};
use rateboard::{http, observability, seed};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    observability::init(settings.metrics_port);

    let doc = seed::load(&settings.rates_file)?;
    let table = normalize(&doc.rates)?;
    let store = Arc::new(RateStore::new(table));

    let addr = format!("{}:{}", settings.bind, settings.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("rateboard listening on {addr}");
    info!("  rates_file: {}", settings.rates_file.display());
    info!("  seeded specs: {}", doc.rates.len());
    info!(
        "  metrics: {}",
        settings
            .metrics_port
            .map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics"))
    );

    axum::serve(listener, http::router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("rateboard stopped");
    Ok(())
}

/// Stop accepting on SIGTERM/ctrl-c; axum drains in-flight requests.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to register SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
    info!("shutdown signal received");
}
