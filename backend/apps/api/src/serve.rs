//! Listener loops
//!
//! Plain HTTP goes through `axum::serve`. HTTPS accepts connections
//! itself: the handshake runs through `tokio-rustls`, then hyper-util's
//! auto connection builder drives the router, one task per connection.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use rustls::ServerConfig;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// Serve the router over plain HTTP
pub async fn serve_plain(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serve the router over TLS
///
/// A failed handshake drops that connection only; the accept loop
/// keeps running.
pub async fn serve_tls(
    listener: TcpListener,
    app: Router,
    tls_config: Arc<ServerConfig>,
) -> Result<()> {
    let acceptor = TlsAcceptor::from(tls_config);

    loop {
        let (stream, peer) = listener.accept().await?;
        let acceptor = acceptor.clone();
        let app = app.clone();

        tokio::spawn(async move {
            let stream = match acceptor.accept(stream).await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::debug!(peer = %peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            let service = TowerToHyperService::new(app);

            if let Err(e) = auto::Builder::new(TokioExecutor::new())
                .serve_connection_with_upgrades(TokioIo::new(stream), service)
                .await
            {
                tracing::debug!(peer = %peer, error = %e, "Connection closed with error");
            }
        });
    }
}
