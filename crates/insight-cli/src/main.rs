//! Command-line front end for market-insight
//!
//! # Usage
//!
//! ```bash
//! export ALPHA_VANTAGE_API_KEY=...
//! export ANTHROPIC_API_KEY=...
//!
//! market-insight quotes
//! market-insight ask "What are the current market risks?"
//! market-insight summary
//! market-insight chat
//! ```

mod chat;
mod render;

use clap::{Parser, Subcommand};
use insight_market::{MarketConfig, MarketDesk};
use insight_utils::{Config, LogFormat};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "market-insight")]
#[command(about = "Watchlist quotes and AI market commentary", long_about = None)]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Generation model (defaults to MARKET_INSIGHT_MODEL, then the built-in model)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Quote request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    quote_timeout: Option<u64>,

    /// Generation request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    generation_timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the watchlist quotes
    Quotes {
        /// Print the records as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Ask one question about the watchlist
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Print a short market summary
    Summary,
    /// Interactive chat (default)
    Chat,
}

fn market_config(args: &Args) -> insight_market::Result<MarketConfig> {
    let mut builder = MarketConfig::builder();
    if let Some(model) = &args.model {
        builder = builder.model(model);
    }
    if let Some(secs) = args.quote_timeout {
        builder = builder.quote_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.generation_timeout {
        builder = builder.generation_timeout(Duration::from_secs(secs));
    }
    builder.with_env_api_keys().with_env_model().build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let app = Config::from_env();

    let format = if args.json_logs || app.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    insight_utils::init_tracing_with("warn,insight_market=info", format);

    info!(app = %app.app_name, environment = %app.environment, "Starting");

    let config = market_config(&args)?;
    info!(model = %config.model, "Configuration loaded");
    let desk = MarketDesk::from_config(&config)?;

    match args.command.unwrap_or(Command::Chat) {
        Command::Quotes { json } => {
            let batch = desk.refresh_quotes().await;
            if json {
                println!("{}", render::quotes_json(&batch)?);
            } else {
                println!("{}", render::quotes_table(&batch));
            }
        }
        Command::Ask { question } => {
            desk.refresh_quotes().await;
            println!("{}", desk.ask(&question.join(" ")).await?);
        }
        Command::Summary => {
            println!("{}", desk.market_summary().await);
        }
        Command::Chat => chat::run(&desk).await?,
    }

    Ok(())
}
