use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment, ShippingConfig};
use crate::types::Zone;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take the [`ShippingConfig`]
/// defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("HEZSHIP_ENV", "development"))?;
    let log_level = or_default("HEZSHIP_LOG_LEVEL", "info");
    let rates_path = lookup("HEZSHIP_RATES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let shipping = build_shipping_config(&lookup)?;

    Ok(AppConfig {
        env,
        log_level,
        rates_path,
        shipping,
    })
}

/// Build a [`ShippingConfig`] from `HEZSHIP_*` variables over the defaults.
fn build_shipping_config<F>(lookup: &F) -> Result<ShippingConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ShippingConfig::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let string = |var: &str, default: String| -> String {
        lookup(var)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(default)
    };

    let amount = |var: &str, default: Decimal| -> Result<Decimal, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = Decimal::from_str(raw.trim()).map_err(|e| invalid(var, e.to_string()))?;
        if value.is_sign_negative() {
            return Err(invalid(var, format!("must not be negative, got {value}")));
        }
        Ok(value)
    };

    let default_zone = match lookup("HEZSHIP_DEFAULT_ZONE") {
        Ok(raw) => {
            Zone::from_str(&raw).map_err(|e| invalid("HEZSHIP_DEFAULT_ZONE", e.to_string()))?
        }
        Err(_) => defaults.default_zone,
    };

    let same_day_cutoff = match lookup("HEZSHIP_SAME_DAY_CUTOFF") {
        Ok(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map_err(|e| invalid("HEZSHIP_SAME_DAY_CUTOFF", e.to_string()))?,
        Err(_) => defaults.same_day_cutoff,
    };

    Ok(ShippingConfig {
        default_county: string("HEZSHIP_DEFAULT_COUNTY", defaults.default_county),
        default_city: string("HEZSHIP_DEFAULT_CITY", defaults.default_city),
        default_zone,
        weight_factor_per_kg: amount(
            "HEZSHIP_WEIGHT_FACTOR_PER_KG",
            defaults.weight_factor_per_kg,
        )?,
        base_weight: amount("HEZSHIP_BASE_WEIGHT_KG", defaults.base_weight)?,
        bulky_item_threshold: amount(
            "HEZSHIP_BULKY_ITEM_THRESHOLD_KG",
            defaults.bulky_item_threshold,
        )?,
        bulky_item_surcharge: amount(
            "HEZSHIP_BULKY_ITEM_SURCHARGE",
            defaults.bulky_item_surcharge,
        )?,
        fragile_item_surcharge: amount(
            "HEZSHIP_FRAGILE_ITEM_SURCHARGE",
            defaults.fragile_item_surcharge,
        )?,
        remote_area_surcharge: amount(
            "HEZSHIP_REMOTE_AREA_SURCHARGE",
            defaults.remote_area_surcharge,
        )?,
        holiday_surcharge: amount("HEZSHIP_HOLIDAY_SURCHARGE", defaults.holiday_surcharge)?,
        same_day_cutoff,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HEZSHIP_ENV".to_string(),
            reason: format!("expected development, test or production, got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
