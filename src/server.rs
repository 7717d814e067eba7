use std::future::Future;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;

/// Accept inbound connections until `shutdown` resolves
///
/// Connections are kept alive between requests. A client that takes longer
/// than `header_timeout` to send request headers, including while an
/// established connection sits idle, is disconnected.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    header_timeout: Duration,
    shutdown: impl Future<Output = ()>,
) {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = listener.accept() => {
                match res {
                    Ok((stream, peer)) => {
                        let io = TokioIo::new(stream);
                        let service = TowerToHyperService::new(app.clone());

                        tokio::task::spawn(async move {
                            if let Err(err) = http1::Builder::new()
                                .timer(TokioTimer::new())
                                .keep_alive(true)
                                .header_read_timeout(header_timeout)
                                .serve_connection(io, service)
                                .await
                            {
                                tracing::debug!("Connection from {} ended: {}", peer, err);
                            }
                        });
                    }
                    Err(err) => {
                        tracing::error!("Failed to accept connection: {}", err);
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Stopped accepting connections");
                break;
            }
        }
    }
}
