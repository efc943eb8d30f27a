//! Location normalisation and rate-profile resolution.
//!
//! Resolution is an ordered strategy with no fuzzy matching:
//!
//! 1. exact city match in the city table
//! 2. exact county match in the county table
//! 3. a county was given but is not listed: the default county profile
//! 4. no county at all: the configured default zone
//!
//! Every input lands on one of these, so resolution is total.

use serde::Serialize;

use crate::rates::RateTable;
use crate::types::{RateProfile, Zone};

/// Trim, lowercase, then uppercase the first character of each word.
///
/// A "word" starts at any alphanumeric or underscore character that follows a
/// non-word character, so `"murang'a"` becomes `"Murang'A"` and
/// `"  taita   TAVETA "` becomes `"Taita   Taveta"`. Inner whitespace is kept.
#[must_use]
pub fn normalize_location(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut prev_is_word = false;

    for c in lowered.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }

    out
}

/// A normalised `(city, county)` pair. Empty inputs become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationKey {
    pub city: Option<String>,
    pub county: Option<String>,
}

impl LocationKey {
    #[must_use]
    pub fn new(city: Option<&str>, county: Option<&str>) -> Self {
        let clean = |s: Option<&str>| s.map(normalize_location).filter(|s| !s.is_empty());
        Self {
            city: clean(city),
            county: clean(county),
        }
    }

    /// Human-readable label: the city if known, else the county.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.city.as_deref().or(self.county.as_deref())
    }
}

/// Which resolution step produced a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ProfileSource {
    MatchedCity(String),
    MatchedCounty(String),
    /// A county was supplied but not found; carries the normalised input.
    DefaultCounty(String),
    ZoneFallback(Zone),
}

/// A profile together with the step that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProfile {
    pub source: ProfileSource,
    pub profile: RateProfile,
}

/// Resolve `key` against `table`, using `default_zone` when no county is given.
#[must_use]
pub fn resolve_profile(
    table: &RateTable,
    key: &LocationKey,
    default_zone: Zone,
) -> ResolvedProfile {
    if let Some(city) = key.city.as_deref() {
        if let Some(profile) = table.cities.get(city) {
            return ResolvedProfile {
                source: ProfileSource::MatchedCity(city.to_string()),
                profile: *profile,
            };
        }

        tracing::debug!(
            city,
            county = key.county.as_deref(),
            "city not in rate table, falling through to county"
        );
    }

    if let Some(county) = key.county.as_deref() {
        if let Some(profile) = table.counties.get(county) {
            return ResolvedProfile {
                source: ProfileSource::MatchedCounty(county.to_string()),
                profile: *profile,
            };
        }

        tracing::debug!(
            city = key.city.as_deref(),
            county,
            "county not in rate table, using default county rates"
        );
        return ResolvedProfile {
            source: ProfileSource::DefaultCounty(county.to_string()),
            profile: table.default_county,
        };
    }

    tracing::debug!(
        city = key.city.as_deref(),
        zone = %default_zone,
        "no county given, using default zone rates"
    );
    ResolvedProfile {
        source: ProfileSource::ZoneFallback(default_zone),
        profile: table.zones.get(default_zone).as_profile(default_zone),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn normalize_trims_and_title_cases() {
        assert_eq!(normalize_location("  nairobi "), "Nairobi");
        assert_eq!(normalize_location("UASIN GISHU"), "Uasin Gishu");
        assert_eq!(normalize_location("west pokot"), "West Pokot");
    }

    #[test]
    fn normalize_capitalizes_after_punctuation() {
        assert_eq!(normalize_location("murang'a"), "Murang'A");
        assert_eq!(normalize_location("elgeyo-marakwet"), "Elgeyo-Marakwet");
    }

    #[test]
    fn normalize_keeps_inner_whitespace() {
        assert_eq!(normalize_location("tana  river"), "Tana  River");
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert_eq!(normalize_location("   "), "");
    }

    #[test]
    fn location_key_drops_blank_parts() {
        let key = LocationKey::new(Some("  "), Some("kiambu"));
        assert_eq!(key.city, None);
        assert_eq!(key.county.as_deref(), Some("Kiambu"));
        assert_eq!(key.label(), Some("Kiambu"));
    }

    #[test]
    fn city_match_wins_over_county() {
        let table = RateTable::kenya();
        let key = LocationKey::new(Some("mombasa"), Some("Nairobi"));
        let resolved = resolve_profile(&table, &key, Zone::Urban);
        assert_eq!(resolved.source, ProfileSource::MatchedCity("Mombasa".to_string()));
        assert_eq!(resolved.profile.standard_rate, Some(Decimal::from(350)));
    }

    #[test]
    fn unknown_city_falls_through_to_county() {
        let table = RateTable::kenya();
        let key = LocationKey::new(Some("Thika"), Some("Kiambu"));
        let resolved = resolve_profile(&table, &key, Zone::Urban);
        assert_eq!(resolved.source, ProfileSource::MatchedCounty("Kiambu".to_string()));
        assert_eq!(resolved.profile.zone, Zone::PeriUrban);
    }

    #[test]
    fn unknown_county_uses_default_county_profile() {
        let table = RateTable::kenya();
        let key = LocationKey::new(None, Some("Marsabit"));
        let resolved = resolve_profile(&table, &key, Zone::Urban);
        assert_eq!(resolved.source, ProfileSource::DefaultCounty("Marsabit".to_string()));
        assert_eq!(resolved.profile, table.default_county);
        assert_eq!(resolved.profile.zone, Zone::Rural);
    }

    #[test]
    fn missing_county_uses_default_zone() {
        let table = RateTable::kenya();
        let key = LocationKey::new(Some("Thika"), None);
        let resolved = resolve_profile(&table, &key, Zone::PeriUrban);
        assert_eq!(resolved.source, ProfileSource::ZoneFallback(Zone::PeriUrban));
        assert_eq!(resolved.profile.standard_rate, Some(Decimal::from(400)));
        assert_eq!(resolved.profile.zone, Zone::PeriUrban);
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn resolve_with_logs(key: &LocationKey) -> (ResolvedProfile, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let table = RateTable::kenya();
        let resolved = tracing::subscriber::with_default(subscriber, || {
            resolve_profile(&table, key, Zone::Urban)
        });
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (resolved, output)
    }

    #[test]
    fn unknown_city_fallthrough_is_logged() {
        let (resolved, logs) = resolve_with_logs(&LocationKey::new(Some("Thika"), Some("Kiambu")));
        assert_eq!(resolved.source, ProfileSource::MatchedCounty("Kiambu".to_string()));
        assert!(logs.contains("city not in rate table"), "logs: {logs}");
        assert!(logs.contains("Thika"), "logs: {logs}");
    }

    #[test]
    fn matched_city_logs_nothing() {
        let (resolved, logs) = resolve_with_logs(&LocationKey::new(Some("Nakuru"), None));
        assert_eq!(resolved.source, ProfileSource::MatchedCity("Nakuru".to_string()));
        assert!(logs.is_empty(), "logs: {logs}");
    }

    #[test]
    fn profile_source_serializes_tagged() {
        let value = serde_json::to_value(ProfileSource::ZoneFallback(Zone::Remote)).unwrap();
        assert_eq!(value["kind"], "zone-fallback");
        assert_eq!(value["value"], "remote");
    }
}
