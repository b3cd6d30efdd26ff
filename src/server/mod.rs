// Server module entry point
// Listener setup and the sequential serve loop for the dev server

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the file is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

/// Static file development server
///
/// Owns the request state (document root, MIME table, response hooks),
/// all fixed before the first connection is accepted.
#[derive(Debug, Clone)]
pub struct DevServer {
    state: Arc<AppState>,
}

impl DevServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Bind `addr` and serve forever
    pub async fn run(self, addr: SocketAddr) -> Result<(), ServerError> {
        let listener = create_reusable_listener(addr)?;
        logger::log_server_start(&addr, &self.state.root);
        logger::log_info(&format!(
            "[CONFIG] {} MIME types, {} response hooks",
            self.state.mime.len(),
            self.state.hooks.len()
        ));
        start_server_loop(listener, self.state).await;
        Ok(())
    }
}
