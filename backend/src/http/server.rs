//! Serving loop with bounded graceful shutdown.

use axum::Router;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// Once `shutdown` fires the listener stops accepting, and in-flight
/// requests get at most `grace` to finish before they are aborted.
pub async fn serve_with_grace<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut handle = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut handle => {
            return result.map_err(io::Error::other)?;
        }
        _ = shutdown => {
            info!("shutdown requested, draining in-flight requests for up to {:?}", grace);
        }
    }

    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut handle).await {
        Ok(result) => {
            result.map_err(io::Error::other)??;
            info!("server stopped");
            Ok(())
        }
        Err(_) => {
            warn!("grace period elapsed, aborting remaining requests");
            handle.abort();
            Ok(())
        }
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
