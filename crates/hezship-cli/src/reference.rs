//! Reference data listings and address validation.

use hezship_core::{AddressInput, ShippingRateEngine};

use crate::format::{fmt_kes, print_json};

/// Print every county with its zone and standard/express rates.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_counties(engine: &ShippingRateEngine, json: bool) -> anyhow::Result<()> {
    let counties = engine.all_counties();
    if json {
        return print_json(&counties);
    }

    let header = format!("{:<18}{:<12}{:>16}{:>16}", "COUNTY", "ZONE", "STANDARD", "EXPRESS");
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
    for name in counties {
        let profile = engine.resolve(None, Some(name)).profile;
        let standard = profile.standard_rate.map_or_else(|| "-".to_string(), fmt_kes);
        let express = profile.express_rate.map_or_else(|| "-".to_string(), fmt_kes);
        println!(
            "{name:<18}{:<12}{standard:>16}{express:>16}",
            profile.zone.to_string()
        );
    }
    Ok(())
}

/// Print every major city and whether it offers same-day delivery.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_cities(engine: &ShippingRateEngine, json: bool) -> anyhow::Result<()> {
    let cities = engine.all_cities();
    if json {
        return print_json(&cities);
    }

    let header = format!("{:<14}{:<12}SAME-DAY", "CITY", "ZONE");
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
    for name in cities {
        let profile = engine.resolve(Some(name), None).profile;
        let same_day = if profile.same_day_available { "yes" } else { "no" };
        println!("{name:<14}{:<12}{same_day}", profile.zone.to_string());
    }
    Ok(())
}

/// Validate a delivery address and print errors, warnings and the
/// normalised form.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub(crate) fn run_validate_address(
    engine: &ShippingRateEngine,
    address: &AddressInput,
    json: bool,
) -> anyhow::Result<()> {
    let result = engine.validate_address(address);
    if json {
        return print_json(&result);
    }

    println!("valid: {}", result.is_valid);
    for error in &result.errors {
        println!("  error: {error}");
    }
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }
    if let Some(formatted) = &result.formatted_address {
        println!(
            "  {}, {}, {} {}, {}",
            formatted.street,
            formatted.city,
            formatted.county,
            formatted.postal_code,
            formatted.country
        );
    }
    Ok(())
}
