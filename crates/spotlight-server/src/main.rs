mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use spotlight_cluster::ClusterService;
use spotlight_store::EventStoreClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = spotlight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = EventStoreClient::from_config(&config)?;
    let clusters = ClusterService::new(store)
        .freshness(Duration::from_secs(config.cache_ttl_secs))
        .nearest_threshold_m(config.nearest_threshold_m);

    let auth = AuthState::from_env(matches!(
        config.env,
        spotlight_core::Environment::Development
    ))?;
    let state = AppState {
        clusters: Arc::new(clusters),
        default_radius_m: config.cluster_radius_m,
    };
    let app = build_app(state, auth, default_rate_limit_state());

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting spotlight-server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
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
