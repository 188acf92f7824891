use std::net::{Ipv4Addr, SocketAddr};

use blog_portal::{config::AppConfig, init, middleware::error::AppResult, middleware::mw_ctx};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let ctx_state = mw_ctx::create_ctx_state(&config)?;
    init::warm_up_store(&ctx_state).await;

    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, routes_all.into_make_service()).await?;

    Ok(())
}
