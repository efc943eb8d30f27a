//! The shipping rate engine: an immutable [`RateTable`] plus the current
//! [`ShippingConfig`].
//!
//! The engine holds no clock. Anything that depends on "now" takes it as a
//! parameter, so every method is a pure function of its inputs.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::app_config::{ShippingConfig, ShippingConfigUpdate};
use crate::location::{resolve_profile, LocationKey, ResolvedProfile};
use crate::rates::RateTable;
use crate::types::{DayRange, RateProfile, ShippingTier};

#[derive(Debug, Clone)]
pub struct ShippingRateEngine {
    table: Arc<RateTable>,
    config: ShippingConfig,
}

impl ShippingRateEngine {
    #[must_use]
    pub fn new(table: RateTable, config: ShippingConfig) -> Self {
        Self::with_shared_table(Arc::new(table), config)
    }

    /// Build an engine over a table shared with other engines.
    #[must_use]
    pub fn with_shared_table(table: Arc<RateTable>, config: ShippingConfig) -> Self {
        tracing::info!(
            cities = table.cities.len(),
            counties = table.counties.len(),
            default_zone = %config.default_zone,
            "shipping rate engine initialised"
        );
        Self { table, config }
    }

    /// The built-in Kenyan table with default configuration.
    #[must_use]
    pub fn kenya() -> Self {
        Self::new(RateTable::kenya(), ShippingConfig::default())
    }

    #[must_use]
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    #[must_use]
    pub fn config(&self) -> &ShippingConfig {
        &self.config
    }

    /// Merge `update` into the current configuration. Takes effect for
    /// subsequent calls only.
    pub fn update_config(&mut self, update: ShippingConfigUpdate) {
        self.config = self.config.clone().apply(update);
        tracing::info!(config = ?self.config, "shipping configuration updated");
    }

    /// Resolve a raw `(city, county)` pair to a rate profile.
    #[must_use]
    pub fn resolve(&self, city: Option<&str>, county: Option<&str>) -> ResolvedProfile {
        self.resolve_key(&LocationKey::new(city, county))
    }

    #[must_use]
    pub fn resolve_key(&self, key: &LocationKey) -> ResolvedProfile {
        resolve_profile(&self.table, key, self.config.default_zone)
    }

    #[must_use]
    pub fn all_counties(&self) -> Vec<&str> {
        self.table.all_counties()
    }

    #[must_use]
    pub fn all_cities(&self) -> Vec<&str> {
        self.table.all_cities()
    }

    /// Base rate of `tier` for `profile`, falling back to the profile's zone.
    ///
    /// Same-day additionally falls back to the default zone's same-day rate;
    /// `None` means no same-day rate is configured anywhere on that path.
    #[must_use]
    pub fn base_rate(&self, profile: &RateProfile, tier: ShippingTier) -> Option<Decimal> {
        let zone = self.table.zones.get(profile.zone);
        match tier {
            ShippingTier::Standard => Some(profile.standard_rate.unwrap_or(zone.standard_rate)),
            ShippingTier::Express => Some(profile.express_rate.unwrap_or(zone.express_rate)),
            ShippingTier::SameDay => profile
                .same_day_rate
                .or(zone.same_day_rate)
                .or_else(|| self.table.zones.get(self.config.default_zone).same_day_rate),
        }
    }

    /// Delivery window of `tier` for `profile`, falling back to the profile's
    /// zone. Same-day has no window and returns `None`.
    #[must_use]
    pub fn delivery_days(&self, profile: &RateProfile, tier: ShippingTier) -> Option<DayRange> {
        let zone = self.table.zones.get(profile.zone);
        match tier {
            ShippingTier::Standard => Some(
                profile
                    .standard_delivery_days
                    .unwrap_or(zone.standard_delivery_days),
            ),
            ShippingTier::Express => Some(
                profile
                    .express_delivery_days
                    .unwrap_or(zone.express_delivery_days),
            ),
            ShippingTier::SameDay => None,
        }
    }
}

impl Default for ShippingRateEngine {
    fn default() -> Self {
        Self::kenya()
    }
}
