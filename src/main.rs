use anyhow::Result;
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use evalyn_client::api::ApiServer;
use evalyn_client::backend::create_backend;
use evalyn_client::{App, Config, PageSurface};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("evalyn-client")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Upload videos for AI analysis and check their reports")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a TOML configuration file")
        )
        .arg(
            Arg::new("backend-url")
                .short('b')
                .long("backend-url")
                .value_name("URL")
                .help("Base URL of the analysis service")
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to serve the page on")
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to serve the page on")
                .value_parser(clap::value_parser!(u16))
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Deadline for each call to the analysis service")
                .value_parser(clap::value_parser!(u64))
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
        )
        .get_matches();

    // Load configuration
    let (mut config, config_error) = match matches.get_one::<String>("config") {
        Some(path) => (Config::load_from(path)?, None),
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };

    if let Some(url) = matches.get_one::<String>("backend-url") {
        config.backend.endpoint = url.clone();
    }
    if let Some(host) = matches.get_one::<String>("host") {
        config.server.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.backend.timeout_seconds = Some(*timeout);
    }

    // Initialize logging
    let level = if matches.get_flag("verbose") {
        "debug".to_string()
    } else {
        config.logging.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("evalyn_client={},tower_http={}", level, level))),
        )
        .init();

    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    config.validate()?;
    info!("🚀 Evalyn client starting");
    info!("{}", config.summary());

    let backend = create_backend(&config.backend)?;
    if !backend.is_available().await {
        warn!("⚠️  Analysis service at {} is not reachable yet", config.backend.endpoint);
    }

    let page = Arc::new(PageSurface::new());
    let app = Arc::new(App::new(backend, page.clone(), &config));

    ApiServer::new(app, page, Arc::new(config)).start().await
}
