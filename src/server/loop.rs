// Server loop module
// Sequential accept loop: one connection is served to completion before the
// next is accepted

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections until the process is killed.
///
/// Accept errors are logged and the loop carries on; per-connection errors
/// are handled inside [`serve_connection`].
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                serve_connection(stream, peer_addr, Arc::clone(&state)).await;
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
