mod format;
mod quote;
mod reference;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use hezship_core::{AppConfig, RateTable, ShippingRateEngine};
use tracing_subscriber::EnvFilter;

use crate::quote::QuoteArgs;

#[derive(Debug, Parser)]
#[command(name = "hezship")]
#[command(about = "Shipping rate quotes for Kenyan deliveries")]
struct Cli {
    /// Pin "now" to a local time (YYYY-MM-DDTHH:MM) instead of the system clock
    #[arg(long, global = true, value_parser = parse_at)]
    at: Option<NaiveDateTime>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price one shipment
    Quote(QuoteArgs),
    /// List every shipping tier available to a location
    Methods {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        county: Option<String>,
        /// Cart subtotal in KES
        #[arg(long, default_value = "0")]
        order_total: rust_decimal::Decimal,
    },
    /// Estimate delivery dates for a tier
    Estimate {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        county: Option<String>,
        #[arg(long, default_value = "standard")]
        tier: hezship_core::ShippingTier,
    },
    /// Check whether same-day delivery can be ordered right now
    SameDay {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        county: Option<String>,
    },
    /// List counties with published rates
    Counties,
    /// List major cities with published rates
    Cities,
    /// Validate a delivery address
    ValidateAddress {
        #[arg(long, default_value = "")]
        street: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        county: String,
        #[arg(long, default_value = "")]
        postal_code: String,
    },
}

/// Parse `--at` as a local date-time, with or without seconds.
fn parse_at(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM, got {raw:?}: {e}"))
}

/// Build the engine from the configured rate table, or the built-in one.
fn build_engine(config: &AppConfig) -> anyhow::Result<ShippingRateEngine> {
    let table = match &config.rates_path {
        Some(path) => hezship_core::load_rate_table(path)
            .with_context(|| format!("loading rate table from {}", path.display()))?,
        None => RateTable::kenya(),
    };
    Ok(ShippingRateEngine::new(table, config.shipping.clone()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = hezship_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        env = %config.env,
        rates_path = ?config.rates_path,
        "hezship starting"
    );
    tracing::debug!(?config, "configuration loaded");
    let engine = build_engine(&config)?;
    let now = cli.at.unwrap_or_else(|| Local::now().naive_local());

    match cli.command {
        Some(Commands::Quote(args)) => quote::run_quote(&engine, &args, now, cli.json)?,
        Some(Commands::Methods {
            city,
            county,
            order_total,
        }) => quote::run_methods(
            &engine,
            city.as_deref(),
            county.as_deref(),
            order_total,
            now,
            cli.json,
        )?,
        Some(Commands::Estimate { city, county, tier }) => {
            quote::run_estimate(&engine, city.as_deref(), county.as_deref(), tier, now, cli.json)?;
        }
        Some(Commands::SameDay { city, county }) => {
            quote::run_same_day(&engine, city.as_deref(), county.as_deref(), now, cli.json)?;
        }
        Some(Commands::Counties) => reference::run_counties(&engine, cli.json)?,
        Some(Commands::Cities) => reference::run_cities(&engine, cli.json)?,
        Some(Commands::ValidateAddress {
            street,
            city,
            county,
            postal_code,
        }) => {
            let address = hezship_core::AddressInput {
                street,
                city,
                county,
                postal_code,
            };
            reference::run_validate_address(&engine, &address, cli.json)?;
        }
        None => println!("hezship: run with --help to list commands"),
    }

    Ok(())
}
