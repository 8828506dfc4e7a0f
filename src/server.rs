//! Server lifecycle: explicit start and timed graceful shutdown.

use crate::response::{write_json, Response as Envelope};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

pub const SHUTTING_DOWN_TEXT: &str = "server is shutting down";

/// Time left for cancelled connections to flush their 503 before the server task is aborted.
const FORCED_CLOSE_WAIT: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serve: {0}")]
    Serve(#[from] std::io::Error),
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("in-flight requests did not finish within {0:?}; server closed forcibly")]
    GracePeriodExpired(Duration),
}

/// A running HTTP server.
///
/// Dropping it starts a graceful shutdown (no new connections, in-flight
/// requests run to completion) without waiting for it or enforcing a deadline.
/// Use [`Server::shutdown`] to bound the wait.
pub struct Server {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    force_close_tx: watch::Sender<bool>,
    task: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Bind `addr` and start serving `router`.
    pub async fn bind(addr: &str, router: Router) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await.map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        Self::start(listener, router)
    }

    /// Start serving on an already bound listener.
    pub fn start(listener: TcpListener, router: Router) -> Result<Self, ServerError> {
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (force_close_tx, force_close_rx) = watch::channel(false);
        let router = router.layer(middleware::from_fn_with_state(
            force_close_rx,
            cancel_on_force_close,
        ));
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });
        tracing::info!(address = %local_addr, "server started");
        Ok(Server {
            local_addr,
            shutdown_tx,
            force_close_tx,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and give in-flight requests up to `grace` to finish.
    ///
    /// Past the deadline every request still in flight is cancelled (its handler
    /// is dropped and the client gets a 503 envelope), then the server task is
    /// aborted if it has not exited shortly after.
    pub async fn shutdown(self, grace: Duration) -> Result<(), ServerError> {
        tracing::info!(grace_secs = grace.as_secs_f64(), "shutting down the server");
        let Server {
            shutdown_tx,
            force_close_tx,
            mut task,
            ..
        } = self;
        let _ = shutdown_tx.send(());
        match tokio::time::timeout(grace, &mut task).await {
            Ok(joined) => {
                joined??;
                tracing::info!("server stopped");
                Ok(())
            }
            Err(_) => {
                tracing::warn!("grace period expired, cancelling in-flight requests");
                let _ = force_close_tx.send(true);
                if tokio::time::timeout(FORCED_CLOSE_WAIT, &mut task).await.is_err() {
                    task.abort();
                }
                Err(ServerError::GracePeriodExpired(grace))
            }
        }
    }
}

/// Resolves once a forced close is requested. A dropped sender never forces.
async fn force_close_requested(mut rx: watch::Receiver<bool>) {
    if rx.wait_for(|closed| *closed).await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn cancel_on_force_close(
    State(force_close): State<watch::Receiver<bool>>,
    request: Request,
    next: Next,
) -> Response {
    tokio::select! {
        response = next.run(request) => response,
        _ = force_close_requested(force_close) => {
            tracing::warn!("in-flight request cancelled at shutdown");
            write_json(
                StatusCode::SERVICE_UNAVAILABLE,
                Envelope::general_error(SHUTTING_DOWN_TEXT),
            )
        }
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM. If a handler cannot be installed that source never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}
