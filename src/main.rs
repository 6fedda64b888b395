mod cli;
mod client;
mod config;
mod dom;
mod error;
mod logging;
mod output;
mod parsers;
mod records;
mod utils;

use crate::cli::Cli;
use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::logging::{init_logging, parse_log_level, LoggerConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration
    let config = Config::from_file(&args.config)?;
    // Initialize logging with custom configuration
    let logger_config = LoggerConfig {
        directory: config.logging.directory.clone(),
        file_name: config.logging.filename.clone(),
        rotation: tracing_appender::rolling::Rotation::DAILY,
        level: parse_log_level(&config.logging.level)?,
    };

    init_logging(logger_config)?;

    log_info!("[main] Scraper started");
    log_info!(
        "[main] Command line arguments: mode={}, clear_cache={}, output={:?}",
        args.mode.as_str(),
        args.clear_cache,
        args.output
    );

    let client = Client::builder()
        .cache_dir(config.cache_dir())
        .timeout_secs(config.client.request_timeout)
        .header("user-agent", &config.client.user_agent)?
        .build()?;

    if args.clear_cache {
        client.clear_cache()?;
        log_info!("[main] Response cache cleared");
    }

    let results = parsers::run_mode(args.mode, &client, &config).await?;

    if let Some(results) = results {
        log_info!(
            "[main] Mode {} produced {} records",
            args.mode.as_str(),
            results.record_count()
        );
        output::control_output(&results, args.mode, args.output, &config.results_dir())?;
    }

    log_info!("[main] Scraper finished");
    Ok(())
}
