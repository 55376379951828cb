use tokio::signal::ctrl_c;

/// Resolves once the process is asked to stop (SIGINT, or SIGTERM on unix)
pub async fn shutdown() {
    tokio::select! {
        result = ctrl_c() => match result {
            Ok(()) => tracing::info!("Received SIGINT, shutting down"),
            Err(e) => tracing::error!(error = %e, "Failed listening for SIGINT"),
        },
        () = terminate() => {}
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut signal) => match signal.recv().await {
            Some(()) => tracing::info!("Received SIGTERM, shutting down"),
            None => tracing::warn!("Cannot receive more SIGTERM signals"),
        },
        Err(e) => tracing::error!(error = %e, "Failed listening for SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending().await
}
