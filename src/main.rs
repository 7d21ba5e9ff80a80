use std::sync::Arc;

use tracing::{error, info};

use miniboard::web::WebServer;
use miniboard::{Config, Database, LocalImageStore};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = miniboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        miniboard::logging::init_console_only(&config.logging.level);
    }

    info!("miniboard starting");

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> miniboard::Result<()> {
    let db = Database::open(&config.database.path).await?;
    info!("Database ready at {}", config.database.path);

    let images = LocalImageStore::new(&config.storage.path, &config.storage.public_url)?;

    let server = WebServer::new(&config, db, Arc::new(images))?;
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );
    server.run().await
}
