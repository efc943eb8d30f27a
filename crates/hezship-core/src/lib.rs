//! Shipping rate engine for Kenyan storefront checkout.
//!
//! Resolves a delivery location and shipping tier to a cost, an availability
//! flag and a delivery estimate over an immutable [`RateTable`].

pub mod address;
pub mod app_config;
pub mod calculator;
pub mod config;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod location;
pub mod rates;
pub mod same_day;
pub mod types;

pub use address::{validate_kenyan_address, AddressInput, AddressValidation, FormattedAddress};
pub use app_config::{AppConfig, Environment, ShippingConfig, ShippingConfigUpdate};
pub use calculator::ShippingQuoteRequest;
pub use config::{load_app_config, load_app_config_from_env};
pub use delivery::format_delivery_date;
pub use engine::ShippingRateEngine;
pub use error::{ConfigError, ParseError};
pub use location::{normalize_location, LocationKey, ProfileSource, ResolvedProfile};
pub use rates::{load_rate_table, parse_rate_table, RateTable, TierTable, ZoneTable};
pub use same_day::{format_cutoff, SameDayAvailability, SameDayRefusal};
pub use types::{
    Adjustment, AdjustmentKind, DayRange, DeliveryEstimate, RateProfile, ShippingQuote,
    ShippingTier, TierSettings, Zone, ZoneRates,
};
