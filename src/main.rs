mod acquire;
mod config;
mod extract;
mod market_data;
mod models;
mod output;
mod service;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::acquire::source_from_config;
use crate::config::{AppConfig, SourceMode};
use crate::market_data::ChartClient;
use crate::output::Format;
use crate::service::QuoteService;

#[derive(Parser)]
#[command(name = "set-quote-scraper", about = "SET quote pages → typed JSON", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format (csv only for tabular resources)
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    format: Format,

    /// Override where pages come from
    #[arg(long, value_enum, global = true)]
    mode: Option<SourceMode>,

    /// Directory of DOM dumps (implies --mode snapshot)
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Key financial rows and trading statistics by period
    KeyFinancials { symbol: String },

    /// Company highlights with every row label kept
    Highlights { symbol: String },

    /// Ranked major shareholders
    Shareholders { symbol: String },

    /// Rights & benefits (XD/XR/XW/XB/XM events)
    RightsBenefits { symbol: String },

    /// Company profile: description, address, contacts
    Profile { symbol: String },

    /// Forward a Yahoo chart request, e.g. `chart PTT BK --range 1y`
    Chart {
        name: String,
        country: String,
        #[arg(long)]
        interval: Option<String>,
        #[arg(long)]
        range: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "set_quote_scraper=info,warn",
        1 => "set_quote_scraper=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let mut config = AppConfig::load()?;
    if let Some(mode) = cli.mode {
        config.source.mode = mode;
    }
    if let Some(dir) = cli.snapshot_dir {
        config.source.mode = SourceMode::Snapshot;
        config.source.snapshot_dir = dir;
    }

    let format = cli.format;
    let quote_service = || -> Result<QuoteService> {
        Ok(QuoteService::new(source_from_config(&config.source)?))
    };

    match cli.command {
        Command::KeyFinancials { symbol } => {
            let _t = utils::Timer::start(format!("key-financials {}", symbol));
            let resp = quote_service()?.key_financials(&symbol).await?;
            match format {
                Format::Json => output::json(&resp)?,
                Format::Csv => output::financials_csv(&resp)?,
            }
        }

        Command::Highlights { symbol } => {
            let _t = utils::Timer::start(format!("highlights {}", symbol));
            let resp = quote_service()?.company_highlights(&symbol).await?;
            output::json_only(&resp, format)?;
        }

        Command::Shareholders { symbol } => {
            let _t = utils::Timer::start(format!("shareholders {}", symbol));
            let resp = quote_service()?.major_shareholders(&symbol).await?;
            match format {
                Format::Json => output::json(&resp)?,
                Format::Csv => output::shareholders_csv(&resp)?,
            }
        }

        Command::RightsBenefits { symbol } => {
            let _t = utils::Timer::start(format!("rights-benefits {}", symbol));
            let resp = quote_service()?.rights_benefits(&symbol).await?;
            output::json_only(&resp, format)?;
        }

        Command::Profile { symbol } => {
            let _t = utils::Timer::start(format!("profile {}", symbol));
            let resp = quote_service()?.company_profile(&symbol).await?;
            output::json_only(&resp, format)?;
        }

        Command::Chart { name, country, interval, range } => {
            let _t = utils::Timer::start(format!("chart {}.{}", name, country));
            let client = ChartClient::new(&config.chart)?;
            let outcome = client.fetch(&name, &country, interval.as_deref(), range.as_deref()).await;
            output::json_only(&outcome, format)?;
        }
    }

    Ok(())
}
