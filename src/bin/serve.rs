use webstage::config::{AppState, Config};
use webstage::logger;
use webstage::server::DevServer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging)?;

    let addr = cfg.get_socket_addr()?;
    let state = AppState::from_config(&cfg)?;
    if cfg.server.cross_origin_isolation {
        logger::log_info("[CONFIG] Cross-origin isolation headers enabled");
    }

    // Connections are served one at a time, so a single thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(DevServer::new(state).run(addr))?;
    Ok(())
}
