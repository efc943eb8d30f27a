//! Reference-data and quote types shared by the resolver, calculator and
//! estimator.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Coarse geographic tier used as a rate fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Urban,
    PeriUrban,
    Rural,
    Remote,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Urban, Zone::PeriUrban, Zone::Rural, Zone::Remote];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Urban => write!(f, "urban"),
            Zone::PeriUrban => write!(f, "peri-urban"),
            Zone::Rural => write!(f, "rural"),
            Zone::Remote => write!(f, "remote"),
        }
    }
}

impl std::str::FromStr for Zone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(Zone::Urban),
            "peri-urban" | "peri_urban" | "periurban" => Ok(Zone::PeriUrban),
            "rural" => Ok(Zone::Rural),
            "remote" => Ok(Zone::Remote),
            _ => Err(ParseError::UnknownZone(s.to_string())),
        }
    }
}

/// Shipping speed class.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingTier {
    #[default]
    Standard,
    Express,
    SameDay,
}

impl ShippingTier {
    pub const ALL: [ShippingTier; 3] = [
        ShippingTier::Standard,
        ShippingTier::Express,
        ShippingTier::SameDay,
    ];
}

impl std::fmt::Display for ShippingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShippingTier::Standard => write!(f, "standard"),
            ShippingTier::Express => write!(f, "express"),
            ShippingTier::SameDay => write!(f, "same-day"),
        }
    }
}

impl std::str::FromStr for ShippingTier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ShippingTier::Standard),
            "express" => Ok(ShippingTier::Express),
            "same-day" | "same_day" | "sameday" => Ok(ShippingTier::SameDay),
            _ => Err(ParseError::UnknownTier(s.to_string())),
        }
    }
}

/// Inclusive delivery window in whole days from the order date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min: u32,
    pub max: u32,
}

impl DayRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Rates for a single city or county.
///
/// Any field left as `None` is taken from the [`ZoneRates`] of `zone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateProfile {
    #[serde(default)]
    pub standard_rate: Option<Decimal>,
    #[serde(default)]
    pub express_rate: Option<Decimal>,
    #[serde(default)]
    pub same_day_available: bool,
    #[serde(default)]
    pub same_day_rate: Option<Decimal>,
    #[serde(default)]
    pub standard_delivery_days: Option<DayRange>,
    #[serde(default)]
    pub express_delivery_days: Option<DayRange>,
    pub zone: Zone,
}

/// Complete zone-level defaults. Unlike [`RateProfile`], only the same-day
/// rate may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRates {
    pub standard_rate: Decimal,
    pub express_rate: Decimal,
    #[serde(default)]
    pub same_day_available: bool,
    #[serde(default)]
    pub same_day_rate: Option<Decimal>,
    pub standard_delivery_days: DayRange,
    pub express_delivery_days: DayRange,
}

impl ZoneRates {
    /// View these defaults as a fully-populated profile for `zone`.
    #[must_use]
    pub fn as_profile(&self, zone: Zone) -> RateProfile {
        RateProfile {
            standard_rate: Some(self.standard_rate),
            express_rate: Some(self.express_rate),
            same_day_available: self.same_day_available,
            same_day_rate: self.same_day_rate,
            standard_delivery_days: Some(self.standard_delivery_days),
            express_delivery_days: Some(self.express_delivery_days),
            zone,
        }
    }
}

/// Display name and free-shipping threshold of a [`ShippingTier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub free_threshold: Decimal,
}

/// Kind of a line item on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentKind {
    FreeShipping,
    Weight,
    Bulky,
    Fragile,
    Remote,
    Holiday,
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentKind::FreeShipping => write!(f, "free-shipping"),
            AdjustmentKind::Weight => write!(f, "weight"),
            AdjustmentKind::Bulky => write!(f, "bulky"),
            AdjustmentKind::Fragile => write!(f, "fragile"),
            AdjustmentKind::Remote => write!(f, "remote"),
            AdjustmentKind::Holiday => write!(f, "holiday"),
        }
    }
}

/// An itemised surcharge or discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub amount: Decimal,
    pub reason: String,
}

/// Projected delivery window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryEstimate {
    pub min_days: u32,
    pub max_days: u32,
    /// `None` for same-day, which is always "today".
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub formatted_range: String,
    /// Order cutoff, set for same-day only.
    pub cutoff_time: Option<NaiveTime>,
}

/// Result of pricing one tier for one location.
///
/// When `available` is `false`, `cost`, `base_rate` and `estimated_delivery`
/// are all `None` and `message` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingQuote {
    pub available: bool,
    pub tier: ShippingTier,
    pub zone: Zone,
    pub cost: Option<Decimal>,
    pub base_rate: Option<Decimal>,
    pub surcharges: Vec<Adjustment>,
    pub discounts: Vec<Adjustment>,
    pub estimated_delivery: Option<DeliveryEstimate>,
    pub message: String,
}

impl ShippingQuote {
    /// Sum of all surcharge amounts.
    #[must_use]
    pub fn surcharge_total(&self) -> Decimal {
        self.surcharges.iter().map(|s| s.amount).sum()
    }

    /// `true` when the quote is available and costs nothing.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.available && self.cost == Some(Decimal::ZERO)
    }
}
