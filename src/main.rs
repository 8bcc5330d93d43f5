use simple_web_server::config::{Config, DEFAULT_CONFIG_PATH};
use simple_web_server::{logger, Server, ServerError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional single argument: config file path without extension
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path).map_err(ServerError::from)?;

    logger::init(&cfg).map_err(ServerError::Logger)?;

    // Create Tokio runtime, worker count from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = Server::bind(&cfg)?;
    logger::log_server_start(&server.local_addr()?, &cfg);

    server.run().await;
    Ok(())
}
