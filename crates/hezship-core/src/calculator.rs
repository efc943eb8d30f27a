//! Per-tier shipping cost calculation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::ShippingRateEngine;
use crate::location::LocationKey;
use crate::types::{Adjustment, AdjustmentKind, ShippingQuote, ShippingTier, Zone};

/// Everything needed to price one shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingQuoteRequest {
    pub city: Option<String>,
    pub county: Option<String>,
    pub tier: ShippingTier,
    /// Cart subtotal in KES, compared against the tier's free threshold.
    pub order_total: Decimal,
    /// Total weight. `None` means the configured base weight.
    pub weight_kg: Option<Decimal>,
    pub is_bulky: bool,
    pub is_fragile: bool,
    pub is_holiday: bool,
}

impl ShippingQuoteRequest {
    #[must_use]
    pub fn new(tier: ShippingTier, order_total: Decimal) -> Self {
        Self {
            tier,
            order_total,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    #[must_use]
    pub fn weight_kg(mut self, weight: Decimal) -> Self {
        self.weight_kg = Some(weight);
        self
    }

    #[must_use]
    pub fn bulky(mut self, is_bulky: bool) -> Self {
        self.is_bulky = is_bulky;
        self
    }

    #[must_use]
    pub fn fragile(mut self, is_fragile: bool) -> Self {
        self.is_fragile = is_fragile;
        self
    }

    #[must_use]
    pub fn holiday(mut self, is_holiday: bool) -> Self {
        self.is_holiday = is_holiday;
        self
    }

    fn location(&self) -> LocationKey {
        LocationKey::new(self.city.as_deref(), self.county.as_deref())
    }
}

impl ShippingRateEngine {
    /// Price `request`. `now` only affects the projected delivery dates.
    ///
    /// Never fails: unknown locations fall back to default rates, and tiers
    /// that cannot be served come back with `available == false`.
    #[must_use]
    pub fn calculate(&self, request: &ShippingQuoteRequest, now: NaiveDateTime) -> ShippingQuote {
        let key = request.location();
        let resolved = self.resolve_key(&key);
        let profile = resolved.profile;
        let tier = request.tier;

        if tier == ShippingTier::SameDay && !profile.same_day_available {
            return unavailable(
                tier,
                profile.zone,
                "Same-day delivery is not available for this location",
            );
        }

        let Some(base_rate) = self.base_rate(&profile, tier) else {
            tracing::warn!(
                source = ?resolved.source,
                zone = %profile.zone,
                "same-day offered but no same-day rate configured"
            );
            return unavailable(
                tier,
                profile.zone,
                "Same-day delivery rate is not configured for this location",
            );
        };

        let settings = self.table().tiers.get(tier);
        let estimated_delivery = Some(self.estimate_for_profile(&profile, tier, now.date()));

        if request.order_total >= settings.free_threshold {
            let reason = format!(
                "Free {} for orders above KES {}",
                settings.name,
                settings.free_threshold.normalize()
            );
            tracing::debug!(
                %tier,
                order_total = %request.order_total,
                "free shipping threshold met"
            );
            return ShippingQuote {
                available: true,
                tier,
                zone: profile.zone,
                cost: Some(Decimal::ZERO),
                base_rate: Some(base_rate),
                surcharges: Vec::new(),
                discounts: vec![Adjustment {
                    kind: AdjustmentKind::FreeShipping,
                    amount: base_rate,
                    reason: reason.clone(),
                }],
                estimated_delivery,
                message: reason,
            };
        }

        let priced = self.surcharges(request, profile.zone).and_then(|surcharges| {
            let cost = surcharges
                .iter()
                .try_fold(base_rate, |total, line| total.checked_add(line.amount))?;
            Some((surcharges, cost))
        });
        let Some((surcharges, cost)) = priced else {
            tracing::warn!(
                %tier,
                zone = %profile.zone,
                weight_kg = ?request.weight_kg,
                "shipping cost overflowed"
            );
            return unavailable(tier, profile.zone, "Shipping cost is out of range for this order");
        };

        tracing::debug!(
            %tier,
            zone = %profile.zone,
            %base_rate,
            %cost,
            surcharges = surcharges.len(),
            "shipping quote calculated"
        );

        ShippingQuote {
            available: true,
            tier,
            zone: profile.zone,
            cost: Some(cost),
            base_rate: Some(base_rate),
            surcharges,
            discounts: Vec::new(),
            estimated_delivery,
            message: format!("{} to {}", settings.name, key.label().unwrap_or("Kenya")),
        }
    }

    /// Surcharges in fixed order: weight, bulky, fragile, remote, holiday.
    /// Each applies independently of the others. `None` when the weight
    /// charge does not fit in a `Decimal`.
    fn surcharges(&self, request: &ShippingQuoteRequest, zone: Zone) -> Option<Vec<Adjustment>> {
        let cfg = self.config();
        let weight = request.weight_kg.unwrap_or(cfg.base_weight);
        let mut lines = Vec::new();

        if weight > cfg.base_weight {
            // Partial kilograms are charged as whole ones.
            let extra_kg = weight.checked_sub(cfg.base_weight)?.ceil();
            lines.push(Adjustment {
                kind: AdjustmentKind::Weight,
                amount: extra_kg.checked_mul(cfg.weight_factor_per_kg)?,
                reason: format!(
                    "Extra weight ({} kg above {} kg base)",
                    extra_kg.normalize(),
                    cfg.base_weight.normalize()
                ),
            });
        }

        if request.is_bulky || weight >= cfg.bulky_item_threshold {
            lines.push(Adjustment {
                kind: AdjustmentKind::Bulky,
                amount: cfg.bulky_item_surcharge,
                reason: "Bulky item handling".to_string(),
            });
        }

        if request.is_fragile {
            lines.push(Adjustment {
                kind: AdjustmentKind::Fragile,
                amount: cfg.fragile_item_surcharge,
                reason: "Fragile item handling".to_string(),
            });
        }

        if zone == Zone::Remote {
            lines.push(Adjustment {
                kind: AdjustmentKind::Remote,
                amount: cfg.remote_area_surcharge,
                reason: "Remote area delivery".to_string(),
            });
        }

        if request.is_holiday {
            lines.push(Adjustment {
                kind: AdjustmentKind::Holiday,
                amount: cfg.holiday_surcharge,
                reason: "Holiday period delivery".to_string(),
            });
        }

        Some(lines)
    }

    /// Quotes for every tier the location can use: standard and express
    /// always, same-day only where the resolved profile offers it.
    ///
    /// Quotes are computed at the base weight with no handling flags.
    #[must_use]
    pub fn available_methods(
        &self,
        city: Option<&str>,
        county: Option<&str>,
        order_total: Decimal,
        now: NaiveDateTime,
    ) -> Vec<ShippingQuote> {
        let resolved = self.resolve(city, county);

        ShippingTier::ALL
            .into_iter()
            .filter(|tier| *tier != ShippingTier::SameDay || resolved.profile.same_day_available)
            .map(|tier| {
                let request = ShippingQuoteRequest {
                    city: city.map(str::to_string),
                    county: county.map(str::to_string),
                    tier,
                    order_total,
                    ..ShippingQuoteRequest::default()
                };
                self.calculate(&request, now)
            })
            .collect()
    }
}

fn unavailable(tier: ShippingTier, zone: Zone, message: &str) -> ShippingQuote {
    ShippingQuote {
        available: false,
        tier,
        zone,
        cost: None,
        base_rate: None,
        surcharges: Vec::new(),
        discounts: Vec::new(),
        estimated_delivery: None,
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
