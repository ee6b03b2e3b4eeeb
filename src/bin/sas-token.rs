use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sas_token_client::observability::metrics;
use sas_token_client::resilience::Tier;
use sas_token_client::sources::TokenFetcher;
use sas_token_client::utils::config_loader;
use sas_token_client::utils::constants::{DEFAULT_CONFIG_PATH, EXIT_CONFIG, EXIT_TEMPFAIL};
use sas_token_client::utils::logging;
use sas_token_client::utils::logging::LogLevel;

#[derive(Parser)]
#[command(author, version, about = "Fetch a SAS token from the analytics auth endpoint", long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level.to_owned()).await?;

    // -------------------------------
    // 2. Fetch token once
    // -------------------------------

    let fetcher = TokenFetcher::new(&service_config.http)?;
    let auth = &service_config.auth;
    let outcome = fetcher.fetch_token(&auth.endpoint, &auth.token).await;

    // -------------------------------
    // 3. Report
    // -------------------------------

    if service_config.metrics.is_enabled {
        eprintln!("{}", metrics::gather_text().await?);
    }

    let code = match outcome {
        Ok(response) => {
            println!("{}", response.into_token());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            match err.tier() {
                Tier::Recoverable => ExitCode::from(EXIT_TEMPFAIL),
                Tier::Unrecoverable => ExitCode::from(EXIT_CONFIG),
            }
        }
    };
    Ok(code)
}
