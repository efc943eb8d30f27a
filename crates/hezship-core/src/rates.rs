//! Static rate reference data.
//!
//! A [`RateTable`] is built once, either from the compiled-in Kenyan data
//! ([`RateTable::kenya`]) or from a YAML file ([`load_rate_table`]), and is
//! never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::location::normalize_location;
use crate::types::{DayRange, RateProfile, ShippingTier, TierSettings, Zone, ZoneRates};
use crate::ConfigError;

/// Zone-level defaults, one entry per [`Zone`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTable {
    pub urban: ZoneRates,
    #[serde(rename = "peri-urban")]
    pub peri_urban: ZoneRates,
    pub rural: ZoneRates,
    pub remote: ZoneRates,
}

impl ZoneTable {
    #[must_use]
    pub fn get(&self, zone: Zone) -> &ZoneRates {
        match zone {
            Zone::Urban => &self.urban,
            Zone::PeriUrban => &self.peri_urban,
            Zone::Rural => &self.rural,
            Zone::Remote => &self.remote,
        }
    }
}

/// Per-tier names and free-shipping thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub standard: TierSettings,
    pub express: TierSettings,
    #[serde(rename = "same-day")]
    pub same_day: TierSettings,
}

impl TierTable {
    #[must_use]
    pub fn get(&self, tier: ShippingTier) -> &TierSettings {
        match tier {
            ShippingTier::Standard => &self.standard,
            ShippingTier::Express => &self.express,
            ShippingTier::SameDay => &self.same_day,
        }
    }
}

/// Every rate the engine can quote against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Major cities, keyed by normalised name. Checked before counties.
    #[serde(default)]
    pub cities: BTreeMap<String, RateProfile>,
    /// Counties, keyed by normalised name.
    #[serde(default)]
    pub counties: BTreeMap<String, RateProfile>,
    /// Used when a county is given but not listed.
    pub default_county: RateProfile,
    pub zones: ZoneTable,
    pub tiers: TierTable,
}

fn kes(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn city(
    standard: i64,
    express: i64,
    same_day_rate: Option<i64>,
    std_days: (u32, u32),
    exp_days: (u32, u32),
) -> RateProfile {
    RateProfile {
        standard_rate: Some(kes(standard)),
        express_rate: Some(kes(express)),
        same_day_available: same_day_rate.is_some(),
        same_day_rate: same_day_rate.map(kes),
        standard_delivery_days: Some(DayRange::new(std_days.0, std_days.1)),
        express_delivery_days: Some(DayRange::new(exp_days.0, exp_days.1)),
        zone: Zone::Urban,
    }
}

fn county(standard: i64, express: i64, same_day_available: bool, zone: Zone) -> RateProfile {
    RateProfile {
        standard_rate: Some(kes(standard)),
        express_rate: Some(kes(express)),
        same_day_available,
        same_day_rate: None,
        standard_delivery_days: None,
        express_delivery_days: None,
        zone,
    }
}

fn zone_rates(
    standard: i64,
    express: i64,
    same_day_rate: Option<i64>,
    std_days: (u32, u32),
    exp_days: (u32, u32),
) -> ZoneRates {
    ZoneRates {
        standard_rate: kes(standard),
        express_rate: kes(express),
        same_day_available: false,
        same_day_rate: same_day_rate.map(kes),
        standard_delivery_days: DayRange::new(std_days.0, std_days.1),
        express_delivery_days: DayRange::new(exp_days.0, exp_days.1),
    }
}

fn tier(name: &str, description: &str, free_threshold: i64) -> TierSettings {
    TierSettings {
        name: name.to_string(),
        description: description.to_string(),
        free_threshold: kes(free_threshold),
    }
}

impl RateTable {
    /// The built-in table for Kenyan deliveries, in KES.
    #[must_use]
    pub fn kenya() -> Self {
        use Zone::{PeriUrban, Remote, Rural, Urban};

        let cities = BTreeMap::from([
            ("Nairobi".to_string(), city(200, 400, Some(800), (1, 2), (0, 1))),
            ("Mombasa".to_string(), city(350, 600, None, (2, 3), (1, 2))),
            ("Kisumu".to_string(), city(350, 600, None, (2, 4), (1, 2))),
            ("Nakuru".to_string(), city(300, 550, None, (2, 3), (1, 2))),
            ("Eldoret".to_string(), city(400, 650, None, (2, 4), (1, 2))),
        ]);

        let counties = [
            // Nairobi and surrounding
            ("Nairobi", county(200, 400, true, Urban)),
            ("Kiambu", county(250, 450, true, PeriUrban)),
            ("Kajiado", county(300, 550, false, PeriUrban)),
            ("Machakos", county(300, 550, false, PeriUrban)),
            // Coast
            ("Mombasa", county(350, 600, false, Urban)),
            ("Kilifi", county(400, 650, false, PeriUrban)),
            ("Kwale", county(450, 700, false, Rural)),
            ("Taita Taveta", county(500, 800, false, Rural)),
            ("Lamu", county(600, 1000, false, Remote)),
            ("Tana River", county(600, 1000, false, Remote)),
            // Western
            ("Kisumu", county(350, 600, false, Urban)),
            ("Kakamega", county(400, 650, false, PeriUrban)),
            ("Bungoma", county(450, 700, false, Rural)),
            ("Busia", county(500, 800, false, Rural)),
            ("Vihiga", county(450, 700, false, Rural)),
            // Rift Valley
            ("Nakuru", county(300, 550, false, Urban)),
            ("Uasin Gishu", county(400, 650, false, Urban)),
            ("Nandi", county(450, 700, false, Rural)),
            ("Kericho", county(400, 650, false, PeriUrban)),
            ("Bomet", county(450, 700, false, Rural)),
            ("Baringo", county(500, 800, false, Rural)),
            ("Turkana", county(800, 1200, false, Remote)),
            ("West Pokot", county(700, 1100, false, Remote)),
        ]
        .into_iter()
        .map(|(name, profile)| (name.to_string(), profile))
        .collect();

        let default_county = RateProfile {
            standard_rate: Some(kes(500)),
            express_rate: Some(kes(800)),
            same_day_available: false,
            same_day_rate: None,
            standard_delivery_days: Some(DayRange::new(3, 7)),
            express_delivery_days: Some(DayRange::new(2, 4)),
            zone: Rural,
        };

        let zones = ZoneTable {
            urban: zone_rates(300, 550, Some(1000), (2, 4), (1, 2)),
            peri_urban: zone_rates(400, 650, None, (3, 5), (2, 3)),
            rural: zone_rates(500, 800, None, (4, 7), (2, 4)),
            remote: zone_rates(700, 1100, None, (5, 10), (3, 6)),
        };

        let tiers = TierTable {
            standard: tier("Standard Shipping", "Standard delivery service", 10_000),
            express: tier("Express Shipping", "Faster delivery service", 20_000),
            same_day: tier(
                "Same Day Delivery",
                "Delivery within the same day (selected areas only)",
                30_000,
            ),
        };

        Self {
            cities,
            counties,
            default_county,
            zones,
            tiers,
        }
    }

    /// County names available for selection, excluding the default profile.
    #[must_use]
    pub fn all_counties(&self) -> Vec<&str> {
        self.counties.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn all_cities(&self) -> Vec<&str> {
        self.cities.keys().map(String::as_str).collect()
    }

    /// Returns `true` if `name` (in any casing) is a listed county.
    #[must_use]
    pub fn has_county(&self, name: &str) -> bool {
        self.counties.contains_key(&normalize_location(name))
    }

    #[must_use]
    pub fn has_city(&self, name: &str) -> bool {
        self.cities.contains_key(&normalize_location(name))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::kenya()
    }
}

/// Load and validate a rate table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rate_table(path: &Path) -> Result<RateTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RateTableIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rate_table(&content)
}

/// Parse and validate a rate table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text does not parse or fails validation.
pub fn parse_rate_table(content: &str) -> Result<RateTable, ConfigError> {
    let table: RateTable = serde_yaml::from_str(content)?;
    validate_rate_table(&table)?;
    Ok(table)
}

fn validate_rate_table(table: &RateTable) -> Result<(), ConfigError> {
    for (kind, entries) in [("city", &table.cities), ("county", &table.counties)] {
        for (name, profile) in entries {
            let normalized = normalize_location(name);
            if normalized.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{kind} name must be non-empty"
                )));
            }
            if normalized != *name {
                return Err(ConfigError::Validation(format!(
                    "{kind} '{name}' is not in normalised form; expected '{normalized}'"
                )));
            }
            validate_profile(&format!("{kind} '{name}'"), profile)?;
        }
    }

    validate_profile("default county", &table.default_county)?;

    for zone in Zone::ALL {
        let rates = table.zones.get(zone);
        let label = format!("zone '{zone}'");
        validate_profile(&label, &rates.as_profile(zone))?;
    }

    for tier in ShippingTier::ALL {
        let settings = table.tiers.get(tier);
        if settings.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "tier '{tier}' must have a display name"
            )));
        }
        if settings.free_threshold.is_sign_negative() {
            return Err(ConfigError::Validation(format!(
                "tier '{tier}' has negative free threshold {}",
                settings.free_threshold
            )));
        }
    }

    Ok(())
}

fn validate_profile(label: &str, profile: &RateProfile) -> Result<(), ConfigError> {
    let rates = [
        ("standard rate", profile.standard_rate),
        ("express rate", profile.express_rate),
        ("same-day rate", profile.same_day_rate),
    ];
    for (what, rate) in rates {
        if let Some(rate) = rate {
            if rate.is_sign_negative() {
                return Err(ConfigError::Validation(format!(
                    "{label} has negative {what} {rate}"
                )));
            }
        }
    }

    let ranges = [
        ("standard delivery days", profile.standard_delivery_days),
        ("express delivery days", profile.express_delivery_days),
    ];
    for (what, range) in ranges {
        if let Some(range) = range {
            if range.min > range.max {
                return Err(ConfigError::Validation(format!(
                    "{label} has {what} min {} greater than max {}",
                    range.min, range.max
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "rates_test.rs"]
mod tests;
