//! HTTP server lifecycle.

use crate::error::ApiError;
use crate::routes::app;
use crate::state::AppState;
use axum::serve as axum_serve;
use log::{error, info};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds `bind_addr` and serves until Ctrl-C.
pub async fn serve(bind_addr: SocketAddr, state: AppState) -> Result<(), ApiError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|err| ApiError::Internal(format!("failed to bind {bind_addr}: {err}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    info!(
        "event=server_start module=api status=ok bind={}",
        local_addr
    );

    axum_serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("event=shutdown_signal module=api status=ok signal=SIGINT"),
        Err(err) => {
            error!(
                "event=shutdown_signal module=api status=error error={}",
                err
            );
            std::future::pending::<()>().await;
        }
    }
}
