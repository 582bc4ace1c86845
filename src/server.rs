//! Serve the router until SIGINT/SIGTERM, then drain in-flight requests for a bounded grace period.

use axum::Router;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Serve `app` until the process receives an interrupt or termination signal.
pub async fn serve(listener: TcpListener, app: Router, grace: Duration) -> std::io::Result<()> {
    serve_with_shutdown(listener, app, grace, shutdown_signal()).await
}

/// Serve `app` until `signal` resolves. After that no new connections are accepted and
/// in-flight requests get `grace` to finish before the server is dropped.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    grace: Duration,
    signal: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.wait_for(|stop| *stop).await;
    });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        res = &mut handle => return res.map_err(std::io::Error::other)?,
        _ = signal => {}
    }

    tracing::info!(grace_secs = grace.as_secs(), "shutdown signal received, draining connections");
    let _ = stop_tx.send(true);
    match tokio::time::timeout(grace, &mut handle).await {
        Ok(res) => res.map_err(std::io::Error::other)?,
        Err(_) => {
            tracing::warn!("grace period elapsed, aborting in-flight requests");
            handle.abort();
            Ok(())
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
