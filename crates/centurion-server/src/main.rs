// SPDX-License-Identifier: Apache-2.0
use std::net::SocketAddr;

use anyhow::Context;
use centurion_server::{build_state, router, run_end_of_game, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::load().context("loading configuration")?;
    let state = build_state().await;
    let app = router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.context("binding http listener")?;
    info!(%addr, "centurion core listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    run_end_of_game(&state).await;
    state.bus.stop().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
