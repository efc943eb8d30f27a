//! Delivery-window projection.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::engine::ShippingRateEngine;
use crate::location::LocationKey;
use crate::types::{DeliveryEstimate, RateProfile, ShippingTier};

/// Shown when a window starts today.
const TODAY_BEFORE_EVENING: &str = "Today (before 8:00 PM)";

/// Format a projected date the way checkout shows it, e.g. `Fri, 16 Oct`.
#[must_use]
pub fn format_delivery_date(date: NaiveDate) -> String {
    date.format("%a, %-d %b").to_string()
}

fn project(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

impl ShippingRateEngine {
    /// Estimate delivery for `tier` to `location`, counting from `now`.
    #[must_use]
    pub fn estimate(
        &self,
        location: &LocationKey,
        tier: ShippingTier,
        now: NaiveDateTime,
    ) -> DeliveryEstimate {
        let resolved = self.resolve_key(location);
        self.estimate_for_profile(&resolved.profile, tier, now.date())
    }

    pub(crate) fn estimate_for_profile(
        &self,
        profile: &RateProfile,
        tier: ShippingTier,
        today: NaiveDate,
    ) -> DeliveryEstimate {
        let Some(days) = self.delivery_days(profile, tier) else {
            // Same-day ignores the profile entirely.
            return DeliveryEstimate {
                min_days: 0,
                max_days: 0,
                min_date: None,
                max_date: None,
                formatted_range: "Today".to_string(),
                cutoff_time: Some(self.config().same_day_cutoff),
            };
        };

        let min_date = project(today, days.min);
        let max_date = project(today, days.max);

        let formatted_range = if days.min == 0 {
            TODAY_BEFORE_EVENING.to_string()
        } else if days.min == days.max {
            format_delivery_date(min_date)
        } else {
            format!(
                "{} - {}",
                format_delivery_date(min_date),
                format_delivery_date(max_date)
            )
        };

        DeliveryEstimate {
            min_days: days.min,
            max_days: days.max,
            min_date: Some(min_date),
            max_date: Some(max_date),
            formatted_range,
            cutoff_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::app_config::ShippingConfig;
    use crate::rates::RateTable;
    use crate::types::{DayRange, Zone};

    /// Friday 16 October 2026, 09:15.
    fn friday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn key(city: Option<&str>, county: Option<&str>) -> LocationKey {
        LocationKey::new(city, county)
    }

    #[test]
    fn format_delivery_date_uses_short_weekday_and_month() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_delivery_date(date), "Fri, 16 Oct");
        let date = NaiveDate::from_ymd_opt(2026, 11, 3).unwrap();
        assert_eq!(format_delivery_date(date), "Tue, 3 Nov");
    }

    #[test]
    fn standard_nairobi_projects_range() {
        let engine = ShippingRateEngine::kenya();
        let est = engine.estimate(
            &key(Some("Nairobi"), None),
            ShippingTier::Standard,
            friday_morning(),
        );
        assert_eq!(est.min_days, 1);
        assert_eq!(est.max_days, 2);
        assert_eq!(est.min_date, NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(est.max_date, NaiveDate::from_ymd_opt(2026, 10, 18));
        assert_eq!(est.formatted_range, "Sat, 17 Oct - Sun, 18 Oct");
        assert_eq!(est.cutoff_time, None);
    }

    #[test]
    fn express_nairobi_starting_today_says_today() {
        let engine = ShippingRateEngine::kenya();
        let est = engine.estimate(
            &key(Some("Nairobi"), None),
            ShippingTier::Express,
            friday_morning(),
        );
        assert_eq!(est.min_days, 0);
        assert_eq!(est.max_days, 1);
        assert_eq!(est.formatted_range, "Today (before 8:00 PM)");
    }

    #[test]
    fn same_day_ignores_profile() {
        let engine = ShippingRateEngine::kenya();
        let est = engine.estimate(
            &key(None, Some("Turkana")),
            ShippingTier::SameDay,
            friday_morning(),
        );
        assert_eq!(est.min_days, 0);
        assert_eq!(est.max_days, 0);
        assert_eq!(est.formatted_range, "Today");
        assert_eq!(est.min_date, None);
        assert_eq!(est.cutoff_time, NaiveTime::from_hms_opt(12, 0, 0));
    }

    #[test]
    fn county_without_window_uses_zone_defaults() {
        let engine = ShippingRateEngine::kenya();
        let est = engine.estimate(
            &key(None, Some("Turkana")),
            ShippingTier::Standard,
            friday_morning(),
        );
        assert_eq!((est.min_days, est.max_days), (5, 10));
        assert_eq!(est.max_date, NaiveDate::from_ymd_opt(2026, 10, 26));
    }

    #[test]
    fn equal_bounds_collapse_to_single_date() {
        let mut table = RateTable::kenya();
        table
            .counties
            .get_mut("Lamu")
            .unwrap()
            .standard_delivery_days = Some(DayRange::new(3, 3));
        let engine = ShippingRateEngine::new(table, ShippingConfig::default());
        let est = engine.estimate(
            &key(None, Some("Lamu")),
            ShippingTier::Standard,
            friday_morning(),
        );
        assert_eq!(est.formatted_range, "Mon, 19 Oct");
    }

    #[test]
    fn projection_ignores_time_of_day() {
        let engine = ShippingRateEngine::kenya();
        let late = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let a = engine.estimate(
            &key(Some("Mombasa"), None),
            ShippingTier::Standard,
            friday_morning(),
        );
        let b = engine.estimate(&key(Some("Mombasa"), None), ShippingTier::Standard, late);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_county_uses_default_zone_window() {
        let engine = ShippingRateEngine::kenya();
        let est = engine.estimate(&key(None, None), ShippingTier::Express, friday_morning());
        assert_eq!(engine.resolve(None, None).profile.zone, Zone::Urban);
        assert_eq!((est.min_days, est.max_days), (1, 2));
    }
}
