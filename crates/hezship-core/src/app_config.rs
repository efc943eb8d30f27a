use std::path::PathBuf;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Tunable pricing options. Amounts are KES, weights are kilograms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingConfig {
    pub default_county: String,
    pub default_city: String,
    /// Zone used when a request carries no county.
    pub default_zone: Zone,
    pub weight_factor_per_kg: Decimal,
    /// Weight included in every base rate.
    pub base_weight: Decimal,
    /// Orders at or above this weight are treated as bulky.
    pub bulky_item_threshold: Decimal,
    pub bulky_item_surcharge: Decimal,
    pub fragile_item_surcharge: Decimal,
    pub remote_area_surcharge: Decimal,
    pub holiday_surcharge: Decimal,
    /// Same-day orders must be placed at or before this local time.
    pub same_day_cutoff: NaiveTime,
}

/// Twelve noon, local time.
pub const DEFAULT_SAME_DAY_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(t) => t,
    None => panic!("invalid cutoff"),
};

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            default_county: "Nairobi".to_string(),
            default_city: "Nairobi".to_string(),
            default_zone: Zone::Urban,
            weight_factor_per_kg: Decimal::from(50),
            base_weight: Decimal::from(5),
            bulky_item_threshold: Decimal::from(15),
            bulky_item_surcharge: Decimal::from(300),
            fragile_item_surcharge: Decimal::from(200),
            remote_area_surcharge: Decimal::from(200),
            holiday_surcharge: Decimal::from(100),
            same_day_cutoff: DEFAULT_SAME_DAY_CUTOFF,
        }
    }
}

/// A partial [`ShippingConfig`]; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingConfigUpdate {
    pub default_county: Option<String>,
    pub default_city: Option<String>,
    pub default_zone: Option<Zone>,
    pub weight_factor_per_kg: Option<Decimal>,
    pub base_weight: Option<Decimal>,
    pub bulky_item_threshold: Option<Decimal>,
    pub bulky_item_surcharge: Option<Decimal>,
    pub fragile_item_surcharge: Option<Decimal>,
    pub remote_area_surcharge: Option<Decimal>,
    pub holiday_surcharge: Option<Decimal>,
    pub same_day_cutoff: Option<NaiveTime>,
}

impl ShippingConfig {
    /// Merge `update` over `self`, returning the result.
    #[must_use]
    pub fn apply(mut self, update: ShippingConfigUpdate) -> Self {
        if let Some(v) = update.default_county {
            self.default_county = v;
        }
        if let Some(v) = update.default_city {
            self.default_city = v;
        }
        if let Some(v) = update.default_zone {
            self.default_zone = v;
        }
        if let Some(v) = update.weight_factor_per_kg {
            self.weight_factor_per_kg = v;
        }
        if let Some(v) = update.base_weight {
            self.base_weight = v;
        }
        if let Some(v) = update.bulky_item_threshold {
            self.bulky_item_threshold = v;
        }
        if let Some(v) = update.bulky_item_surcharge {
            self.bulky_item_surcharge = v;
        }
        if let Some(v) = update.fragile_item_surcharge {
            self.fragile_item_surcharge = v;
        }
        if let Some(v) = update.remote_area_surcharge {
            self.remote_area_surcharge = v;
        }
        if let Some(v) = update.holiday_surcharge {
            self.holiday_surcharge = v;
        }
        if let Some(v) = update.same_day_cutoff {
            self.same_day_cutoff = v;
        }
        self
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML rate table to load instead of the built-in one.
    pub rates_path: Option<PathBuf>,
    pub shipping: ShippingConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("rates_path", &self.rates_path)
            .field("default_zone", &self.shipping.default_zone)
            .field("base_weight", &self.shipping.base_weight)
            .field("same_day_cutoff", &self.shipping.same_day_cutoff)
            .finish_non_exhaustive()
    }
}
