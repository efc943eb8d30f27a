//! Quote, method listing, delivery estimate and same-day commands.

use chrono::NaiveDateTime;
use clap::Args;
use hezship_core::{
    format_cutoff, LocationKey, ShippingQuote, ShippingQuoteRequest, ShippingRateEngine,
    ShippingTier,
};
use rust_decimal::Decimal;

use crate::format::{fmt_cost, fmt_kes, print_json};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Destination city. When neither city nor county is given, the
    /// configured default location is used
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Destination county
    #[arg(long)]
    pub(crate) county: Option<String>,
    /// Shipping tier: standard, express or same-day
    #[arg(long, default_value = "standard")]
    pub(crate) tier: ShippingTier,
    /// Cart subtotal in KES
    #[arg(long, default_value = "0")]
    pub(crate) order_total: Decimal,
    /// Total parcel weight in kg (defaults to the base weight)
    #[arg(long)]
    pub(crate) weight: Option<Decimal>,
    #[arg(long)]
    pub(crate) bulky: bool,
    #[arg(long)]
    pub(crate) fragile: bool,
    /// Apply the holiday-period surcharge
    #[arg(long)]
    pub(crate) holiday: bool,
}

/// Fill in the configured default location when the caller named none.
fn with_default_location(
    engine: &ShippingRateEngine,
    city: Option<String>,
    county: Option<String>,
) -> (Option<String>, Option<String>) {
    let key = LocationKey::new(city.as_deref(), county.as_deref());
    if key.city.is_none() && key.county.is_none() {
        let cfg = engine.config();
        (
            Some(cfg.default_city.clone()),
            Some(cfg.default_county.clone()),
        )
    } else {
        (city, county)
    }
}

pub(crate) fn build_request(engine: &ShippingRateEngine, args: &QuoteArgs) -> ShippingQuoteRequest {
    let (city, county) = with_default_location(engine, args.city.clone(), args.county.clone());
    ShippingQuoteRequest {
        city,
        county,
        tier: args.tier,
        order_total: args.order_total,
        weight_kg: args.weight,
        is_bulky: args.bulky,
        is_fragile: args.fragile,
        is_holiday: args.holiday,
    }
}

/// Price a single shipment and print the breakdown.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_quote(
    engine: &ShippingRateEngine,
    args: &QuoteArgs,
    now: NaiveDateTime,
    json: bool,
) -> anyhow::Result<()> {
    let request = build_request(engine, args);
    let quote = engine.calculate(&request, now);

    if json {
        return print_json(&quote);
    }

    print_quote(&quote);
    Ok(())
}

fn print_quote(quote: &ShippingQuote) {
    println!("{}", quote.message);
    println!("  tier: {}  zone: {}", quote.tier, quote.zone);

    let (Some(base), Some(cost)) = (quote.base_rate, quote.cost) else {
        println!("  unavailable");
        return;
    };

    println!("  {:<44}{:>16}", "Base rate", fmt_kes(base));
    for line in &quote.surcharges {
        println!("  {:<44}{:>16}", line.reason, format!("+{}", fmt_kes(line.amount)));
    }
    for line in &quote.discounts {
        println!("  {:<44}{:>16}", line.reason, format!("-{}", fmt_kes(line.amount)));
    }
    println!("  {:<44}{:>16}", "Total", fmt_cost(cost));

    if let Some(estimate) = &quote.estimated_delivery {
        println!("  Delivery: {}", estimate.formatted_range);
    }
}

/// List every tier the location can use, with its cost and delivery window.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_methods(
    engine: &ShippingRateEngine,
    city: Option<&str>,
    county: Option<&str>,
    order_total: Decimal,
    now: NaiveDateTime,
    json: bool,
) -> anyhow::Result<()> {
    let (city, county) =
        with_default_location(engine, city.map(str::to_string), county.map(str::to_string));
    let quotes = engine.available_methods(city.as_deref(), county.as_deref(), order_total, now);

    if json {
        return print_json(&quotes);
    }

    let header = format!("{:<11}{:<12}{:>16}  DELIVERY", "TIER", "ZONE", "COST");
    println!("{header}");
    println!("{}", "-".repeat(header.len() + 16));
    for quote in &quotes {
        let cost = quote.cost.map_or_else(|| "n/a".to_string(), fmt_cost);
        let delivery = quote
            .estimated_delivery
            .as_ref()
            .map_or(quote.message.as_str(), |e| e.formatted_range.as_str());
        println!(
            "{:<11}{:<12}{:>16}  {delivery}",
            quote.tier.to_string(),
            quote.zone.to_string(),
            cost
        );
    }
    Ok(())
}

/// Print the projected delivery window for one tier.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_estimate(
    engine: &ShippingRateEngine,
    city: Option<&str>,
    county: Option<&str>,
    tier: ShippingTier,
    now: NaiveDateTime,
    json: bool,
) -> anyhow::Result<()> {
    let key = LocationKey::new(city, county);
    let estimate = engine.estimate(&key, tier, now);

    if json {
        return print_json(&estimate);
    }

    println!("{tier} to {}: {}", key.label().unwrap_or("Kenya"), estimate.formatted_range);
    if let Some(cutoff) = estimate.cutoff_time {
        println!("  order before {}", format_cutoff(cutoff));
    } else {
        println!("  {}-{} days", estimate.min_days, estimate.max_days);
    }
    Ok(())
}

/// Report whether same-day delivery can be ordered at `now`.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_same_day(
    engine: &ShippingRateEngine,
    city: Option<&str>,
    county: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> anyhow::Result<()> {
    let key = LocationKey::new(city, county);
    let result = engine.check_same_day(&key, now);

    if json {
        return print_json(&result);
    }

    let status = if result.available { "available" } else { "unavailable" };
    println!("same-day: {status}");
    if let Some(reason) = result.reason {
        println!("  reason: {reason}");
    }
    println!("  {}", result.message);
    Ok(())
}
