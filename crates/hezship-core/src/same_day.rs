//! Same-day availability: location, cutoff time and weekday rules.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use crate::engine::ShippingRateEngine;
use crate::location::LocationKey;

/// Why same-day delivery was refused. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SameDayRefusal {
    NotOffered,
    CutoffExceeded,
    Sunday,
}

impl std::fmt::Display for SameDayRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SameDayRefusal::NotOffered => write!(f, "not-offered"),
            SameDayRefusal::CutoffExceeded => write!(f, "cutoff-exceeded"),
            SameDayRefusal::Sunday => write!(f, "sunday"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SameDayAvailability {
    pub available: bool,
    pub reason: Option<SameDayRefusal>,
    /// Echoed on success and when the cutoff rule fails.
    pub cutoff_time: Option<NaiveTime>,
    pub message: String,
}

/// Render a cutoff like `12:00 PM`.
#[must_use]
pub fn format_cutoff(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

impl ShippingRateEngine {
    /// Check whether same-day delivery to `location` can be ordered at `now`
    /// (local wall-clock time). The first failing rule wins.
    #[must_use]
    pub fn check_same_day(
        &self,
        location: &LocationKey,
        now: NaiveDateTime,
    ) -> SameDayAvailability {
        let profile = self.resolve_key(location).profile;
        let cutoff = self.config().same_day_cutoff;

        if !profile.same_day_available {
            return SameDayAvailability {
                available: false,
                reason: Some(SameDayRefusal::NotOffered),
                cutoff_time: None,
                message: "Same-day delivery is not available in this location".to_string(),
            };
        }

        if now.time() > cutoff {
            return SameDayAvailability {
                available: false,
                reason: Some(SameDayRefusal::CutoffExceeded),
                cutoff_time: Some(cutoff),
                message: format!(
                    "Same-day delivery orders must be placed before {}",
                    format_cutoff(cutoff)
                ),
            };
        }

        if now.weekday() == Weekday::Sun {
            return SameDayAvailability {
                available: false,
                reason: Some(SameDayRefusal::Sunday),
                cutoff_time: None,
                message: "Same-day delivery is not available on Sundays".to_string(),
            };
        }

        SameDayAvailability {
            available: true,
            reason: None,
            cutoff_time: Some(cutoff),
            message: format!("Order before {} for delivery today", format_cutoff(cutoff)),
        }
    }
}
