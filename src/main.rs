use anyhow::Result;
use guardian_interface::{config, AppState, MemoryDb, RestApi};
use log::info;

async fn run_app() -> Result<()> {
    let config_path = config::config_path_from_env();
    let config = config::load_config(config_path.as_deref())?;

    // Initialize logging, RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.api.log_level),
    )
    .init();
    info!("Starting Guardian monitoring interface");

    match &config_path {
        Some(path) => info!("Configuration loaded from {:?}", path),
        None => info!("No configuration file given, using defaults"),
    }

    let db = MemoryDb::from_config(&config.storage);
    let state = AppState::new(db, config.storage.recent_incidents_limit);

    // Start the REST API, returns once the shutdown signal is received
    let http_server = RestApi::new(&config.api, state);
    http_server.run().await?;

    info!("API server stopped");
    Ok(())
}

fn main() {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_app()) {
        eprintln!("Application error: {:#}", e);
        std::process::exit(1);
    }
}
