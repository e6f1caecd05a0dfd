//! Honeypot server binary

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use honeypot_config::load_settings;
use honeypot_server::{
    create_router, init_metrics, AppState, DisabledSink, HttpCallbackSink, ReportSink,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;

    let metrics_handle = init_metrics()?;

    let reporter: Arc<dyn ReportSink> = if settings.callback.enabled {
        Arc::new(HttpCallbackSink::new(&settings.callback)?)
    } else {
        Arc::new(DisabledSink)
    };

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings, reporter, metrics_handle);

    // Keep the shutdown handle alive for the lifetime of the process
    let _cleanup_shutdown = state.sessions.start_cleanup_task();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "honeypot listening");

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
