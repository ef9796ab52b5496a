mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = idcole_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let upstream = Arc::new(idcole_upstream::IdenticoleClient::with_base_url(
        config.upstream_timeout_secs,
        &config.upstream_base_url,
    )?);

    let geocoder = match &config.geocode_api_key {
        Some(key) => Some(Arc::new(idcole_geocode::GeocodeClient::new(
            key,
            config.geocode_timeout_secs,
        )?)),
        None => {
            tracing::warn!(
                "GEOCODE_MAPS_KEY not set; geocoding disabled, searches use the fallback point"
            );
            None
        }
    };

    let app = build_app(AppState { upstream, geocoder });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, upstream = %config.upstream_base_url, "relay listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
