mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use haulfinder_engine::{EngineConfig, SearchService};
use haulfinder_geocode::HttpGeocoder;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(haulfinder_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = haulfinder_db::PoolConfig::from_app_config(&config);
    let pool = haulfinder_db::connect_pool(&config.database_url, pool_config).await?;
    haulfinder_db::run_migrations(&pool).await?;

    let geocoder = HttpGeocoder::new(
        &config.geocoder_zip_base_url,
        &config.geocoder_place_base_url,
        config.geocoder_timeout_secs,
        &config.geocoder_user_agent,
    )?;
    let catalog = haulfinder_db::PgFacilityCatalog::new(pool.clone());
    let search = Arc::new(SearchService::new(
        Arc::new(geocoder),
        Arc::new(catalog),
        EngineConfig {
            default_radius_miles: config.search_default_radius_miles,
            max_page_size: config.search_max_page_size,
            timeout: Duration::from_secs(config.search_timeout_secs),
        },
    ));

    let app = build_app(AppState { pool, search }, default_rate_limit_state());

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting haulfinder server");
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
