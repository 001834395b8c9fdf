use clap::Parser;
use unisearch::core::rows::render_rows;
use unisearch::core::SearchProvider;
use unisearch::utils::{logger, validation::Validate};
use unisearch::{CliConfig, HttpSearchClient, SearchConfig, SearchError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let result = match cli.print.clone() {
        Some(query) => {
            logger::init_cli_logger(config.verbose, config.log_format);
            tracing::debug!("Config: {:?}", config);
            print_search(&config, &query).await
        }
        None => run_screen(config).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ unisearch failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn print_search(config: &SearchConfig, query: &str) -> Result<(), SearchError> {
    let client = HttpSearchClient::new(config)?;
    let universities = client.search(query).await?;

    tracing::info!("Found {} universities", universities.len());
    for row in render_rows(&universities) {
        for line in row.to_text_lines() {
            println!("{}", line);
        }
        println!();
    }
    Ok(())
}

async fn run_screen(config: SearchConfig) -> Result<(), SearchError> {
    logger::init_tui_logger(
        config.verbose,
        config.log_format,
        config.log_file.as_deref().map(std::path::Path::new),
    )?;
    tracing::info!("Starting unisearch against {}", config.base_url);
    tracing::debug!("Config: {:?}", config);

    // The event loop blocks on terminal input; keep it off the async workers.
    tokio::task::spawn_blocking(move || unisearch::tui::run(&config))
        .await
        .map_err(|e| SearchError::TerminalError {
            message: e.to_string(),
        })?
}
