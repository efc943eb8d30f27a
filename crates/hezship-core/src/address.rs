//! Kenyan delivery address validation.
//!
//! Validation collects every problem instead of stopping at the first one.
//! Only the county must be in the rate table; an unlisted city is a warning
//! because county rates still apply.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::engine::ShippingRateEngine;
use crate::location::normalize_location;
use crate::rates::RateTable;

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid postal code regex"));

const MIN_STREET_LEN: usize = 5;
const MIN_PLACE_LEN: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub county: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedAddress {
    pub street: String,
    pub city: String,
    pub county: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Present only when `is_valid`.
    pub formatted_address: Option<FormattedAddress>,
}

/// Validate `address` against the counties and cities in `table`.
#[must_use]
pub fn validate_kenyan_address(table: &RateTable, address: &AddressInput) -> AddressValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let street = address.street.trim();
    let city = address.city.trim();
    let county = address.county.trim();
    let postal_code = address.postal_code.trim();

    if street.chars().count() < MIN_STREET_LEN {
        errors.push("Please enter a valid street address".to_string());
    }

    if city.chars().count() < MIN_PLACE_LEN {
        errors.push("Please enter a valid city/town".to_string());
    }

    if county.chars().count() < MIN_PLACE_LEN {
        errors.push("Please select a county".to_string());
    }

    if !POSTAL_CODE.is_match(postal_code) {
        errors.push("Please enter a valid 5-digit postal code".to_string());
    }

    let normalized_city = normalize_location(city);
    let normalized_county = normalize_location(county);

    if !city.is_empty() && !table.cities.contains_key(&normalized_city) {
        tracing::warn!(city, "city not found in rate table, county rates will apply");
        warnings.push(format!(
            "City \"{city}\" not found in database, using county rates"
        ));
    }

    if !county.is_empty() && !table.counties.contains_key(&normalized_county) {
        errors.push(format!(
            "County \"{county}\" not recognized. Please select a valid Kenyan county."
        ));
    }

    let is_valid = errors.is_empty();
    let formatted_address = is_valid.then(|| FormattedAddress {
        street: street.to_string(),
        city: normalized_city,
        county: normalized_county,
        postal_code: postal_code.to_string(),
        country: "Kenya".to_string(),
    });

    AddressValidation {
        is_valid,
        errors,
        warnings,
        formatted_address,
    }
}

impl ShippingRateEngine {
    /// Validate `address` against this engine's rate table.
    #[must_use]
    pub fn validate_address(&self, address: &AddressInput) -> AddressValidation {
        validate_kenyan_address(self.table(), address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(street: &str, city: &str, county: &str, postal_code: &str) -> AddressInput {
        AddressInput {
            street: street.to_string(),
            city: city.to_string(),
            county: county.to_string(),
            postal_code: postal_code.to_string(),
        }
    }

    #[test]
    fn valid_address_is_formatted() {
        let table = RateTable::kenya();
        let result = validate_kenyan_address(
            &table,
            &address("  12 Moi Avenue ", "nairobi", "NAIROBI", "00100"),
        );
        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
        let formatted = result.formatted_address.expect("formatted address");
        assert_eq!(formatted.street, "12 Moi Avenue");
        assert_eq!(formatted.city, "Nairobi");
        assert_eq!(formatted.county, "Nairobi");
        assert_eq!(formatted.postal_code, "00100");
        assert_eq!(formatted.country, "Kenya");
    }

    #[test]
    fn unknown_city_is_only_a_warning() {
        let table = RateTable::kenya();
        let result =
            validate_kenyan_address(&table, &address("Kenyatta Road", "Thika", "Kiambu", "01000"));
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Thika"));
    }

    #[test]
    fn unknown_county_is_an_error() {
        let table = RateTable::kenya();
        let result = validate_kenyan_address(
            &table,
            &address("Main Street", "Marsabit", "Marsabit", "60500"),
        );
        assert!(!result.is_valid);
        assert!(result.formatted_address.is_none());
        assert_eq!(
            result.errors,
            vec!["County \"Marsabit\" not recognized. Please select a valid Kenyan county."]
        );
    }

    #[test]
    fn all_errors_are_collected() {
        let table = RateTable::kenya();
        let result = validate_kenyan_address(&table, &address("", "", "", ""));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Please enter a valid street address",
                "Please enter a valid city/town",
                "Please select a county",
                "Please enter a valid 5-digit postal code",
            ]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn postal_code_must_be_exactly_five_digits() {
        let table = RateTable::kenya();
        for bad in ["0010", "001000", "00 10", "abcde", "٠٠١٠٠"] {
            let result =
                validate_kenyan_address(&table, &address("Moi Avenue", "Nairobi", "Nairobi", bad));
            assert!(!result.is_valid, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn short_street_is_rejected() {
        let table = RateTable::kenya();
        let result =
            validate_kenyan_address(&table, &address("Moi", "Nairobi", "Nairobi", "00100"));
        assert_eq!(result.errors, vec!["Please enter a valid street address"]);
    }
}
