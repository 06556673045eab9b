//! XChange CLI
//!
//! Command-line shell over the exchange-rate cache:
//! - Load configuration from environment
//! - Open the SQLite stores
//! - Create the exchange rate service
//! - Run one command and print the result

mod config;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xchange_client::HttpClient;
use xchange_core::{ApiConfig, CurrencyConverter, ExchangeRateService};
use xchange_repo::build_sqlite_stores;

#[derive(Parser)]
#[command(name = "xchange")]
#[command(author, version, about = "Cached currency rates and conversion", long_about = None)]
struct Cli {
    /// Base URL of the exchange-rate API
    #[arg(long, env = "EXCHANGE_RATE_BASE_URL", default_value = ApiConfig::DEFAULT_BASE_URL)]
    api_url: String,

    /// App id sent as `Authorization: Token <id>`
    #[arg(long, env = "APP_ID")]
    app_id: String,

    /// SQLite database holding the rate cache
    #[arg(
        long,
        env = "XCHANGE_DATABASE_URL",
        default_value = "sqlite://xchange.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every cached rate, refreshing when stale
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert; non-numeric trailing input is ignored
        amount: String,
        /// Source currency (defaults to the base currency)
        #[arg(long)]
        from: Option<String>,
        /// Target currency (defaults to the configured target)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the rates published at the end of a day (YYYY-MM-DD)
    History { date: NaiveDate },
    /// Show plan and quota details for the app id
    Usage,
    /// Drop the cached rates and the freshness mark
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,xchange_core=debug,xchange_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = config::from_env()?;

    tracing::debug!(database_url = %cli.database_url, api_url = %cli.api_url, "Starting xchange");

    let (rates, prefs) = build_sqlite_stores(&cli.database_url).await?;
    let converter = CurrencyConverter::new(&settings);
    let service = ExchangeRateService::new(
        HttpClient::new(),
        rates,
        prefs,
        ApiConfig::new(cli.api_url, cli.app_id),
        settings,
    );

    match cli.command {
        Commands::Rates => {
            let rates = service.fetch_currency_rates().await?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }

        Commands::Convert { amount, from, to } => {
            let amount = converter.parse_amount(&amount);
            let from = from.unwrap_or_else(|| service.config().base_currency.clone());
            let to = to.unwrap_or_else(|| service.config().default_target.clone());

            let rates = service.fetch_currency_rates().await?;
            let converted = converter.convert_codes(amount, &from, &to, &rates)?;
            println!(
                "{} {} = {} {}",
                converter.format_amount(amount),
                from.to_uppercase(),
                converter.format_amount(converted),
                to.to_uppercase()
            );
        }

        Commands::History { date } => {
            let response = service.fetch_historical_rates(date).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Usage => {
            let usage = service.fetch_usage().await?;
            println!("{}", serde_json::to_string_pretty(&usage)?);
        }

        Commands::ClearCache => {
            service.invalidate_cache().await;
            println!("✓ Rate cache cleared");
        }
    }

    Ok(())
}
