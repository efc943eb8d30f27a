use super::*;

const MINIMAL_TABLE: &str = r"
cities:
  Nairobi:
    standard_rate: 200
    express_rate: 400
    same_day_available: true
    same_day_rate: 800
    standard_delivery_days: { min: 1, max: 2 }
    express_delivery_days: { min: 0, max: 1 }
    zone: urban
counties:
  Kiambu:
    standard_rate: 250
    express_rate: 450
    same_day_available: true
    zone: peri-urban
default_county:
  standard_rate: 500
  express_rate: 800
  zone: rural
zones:
  urban:
    standard_rate: 300
    express_rate: 550
    same_day_rate: 1000
    standard_delivery_days: { min: 2, max: 4 }
    express_delivery_days: { min: 1, max: 2 }
  peri-urban:
    standard_rate: 400
    express_rate: 650
    standard_delivery_days: { min: 3, max: 5 }
    express_delivery_days: { min: 2, max: 3 }
  rural:
    standard_rate: 500
    express_rate: 800
    standard_delivery_days: { min: 4, max: 7 }
    express_delivery_days: { min: 2, max: 4 }
  remote:
    standard_rate: 700
    express_rate: 1100
    standard_delivery_days: { min: 5, max: 10 }
    express_delivery_days: { min: 3, max: 6 }
tiers:
  standard: { name: Standard Shipping, free_threshold: 10000 }
  express: { name: Express Shipping, free_threshold: 20000 }
  same-day: { name: Same Day Delivery, free_threshold: 30000 }
";

#[test]
fn kenya_table_has_expected_shape() {
    let table = RateTable::kenya();
    assert_eq!(table.cities.len(), 5);
    assert_eq!(table.counties.len(), 23);
    assert_eq!(table.default_county.zone, Zone::Rural);
    assert_eq!(table.tiers.get(ShippingTier::Standard).free_threshold, Decimal::from(10_000));
    assert_eq!(table.tiers.get(ShippingTier::Express).free_threshold, Decimal::from(20_000));
    assert_eq!(table.tiers.get(ShippingTier::SameDay).free_threshold, Decimal::from(30_000));
}

#[test]
fn kenya_table_passes_validation() {
    assert!(validate_rate_table(&RateTable::kenya()).is_ok());
}

#[test]
fn only_nairobi_city_offers_same_day() {
    let table = RateTable::kenya();
    let offering: Vec<_> = table
        .cities
        .iter()
        .filter(|(_, p)| p.same_day_available)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(offering, vec!["Nairobi"]);
}

#[test]
fn remote_counties_are_tagged_remote() {
    let table = RateTable::kenya();
    for name in ["Lamu", "Tana River", "Turkana", "West Pokot"] {
        assert_eq!(table.counties[name].zone, Zone::Remote, "{name}");
    }
}

#[test]
fn has_county_is_case_insensitive() {
    let table = RateTable::kenya();
    assert!(table.has_county("  taita taveta"));
    assert!(!table.has_county("Default"));
    assert!(table.has_city("ELDORET"));
    assert!(!table.has_city("Thika"));
}

#[test]
fn parse_minimal_table() {
    let table = parse_rate_table(MINIMAL_TABLE).unwrap();
    assert_eq!(table.all_cities(), vec!["Nairobi"]);
    assert_eq!(table.all_counties(), vec!["Kiambu"]);
    let kiambu = table.counties["Kiambu"];
    assert_eq!(kiambu.zone, Zone::PeriUrban);
    assert_eq!(kiambu.same_day_rate, None);
    assert_eq!(kiambu.standard_delivery_days, None);
    assert!(!table.default_county.same_day_available);
    assert_eq!(table.tiers.standard.description, "");
}

#[test]
fn parse_rejects_unnormalised_name() {
    let yaml = MINIMAL_TABLE.replace("  Kiambu:", "  kiambu:");
    let err = parse_rate_table(&yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("'kiambu'")),
        "got: {err}"
    );
}

#[test]
fn parse_rejects_inverted_day_range() {
    let yaml = MINIMAL_TABLE.replace(
        "standard_delivery_days: { min: 1, max: 2 }",
        "standard_delivery_days: { min: 3, max: 2 }",
    );
    let err = parse_rate_table(&yaml).unwrap_err();
    assert!(err.to_string().contains("greater than max"), "got: {err}");
}

#[test]
fn parse_rejects_negative_rate() {
    let yaml = MINIMAL_TABLE.replace("standard_rate: 250", "standard_rate: -250");
    let err = parse_rate_table(&yaml).unwrap_err();
    assert!(err.to_string().contains("negative standard rate"), "got: {err}");
}

#[test]
fn parse_rejects_missing_zone() {
    let start = MINIMAL_TABLE.find("  remote:").unwrap();
    let end = MINIMAL_TABLE.find("tiers:").unwrap();
    let yaml = format!("{}{}", &MINIMAL_TABLE[..start], &MINIMAL_TABLE[end..]);
    let err = parse_rate_table(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::RateTableParse(_)), "got: {err}");
}

#[test]
fn parse_rejects_unknown_zone_name() {
    let yaml = MINIMAL_TABLE.replace("zone: peri-urban", "zone: suburban");
    let err = parse_rate_table(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::RateTableParse(_)), "got: {err}");
}

#[test]
fn load_missing_file_reports_path() {
    let err = load_rate_table(Path::new("/nonexistent/rates.yaml")).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::RateTableIo { ref path, .. } if path == "/nonexistent/rates.yaml"
        ),
        "got: {err}"
    );
}

#[test]
fn load_rates_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("rates.yaml");
    assert!(
        path.exists(),
        "rates.yaml missing at {path:?}; required for this test"
    );
    let table = load_rate_table(&path).expect("failed to load rates.yaml");
    assert_eq!(table, RateTable::kenya());
}
