use freight_domain::{cargo_types, DomainError, QuoteFormData, QuoteRequirement, SeaFreightMode, ShippingType};
use serde_json::json;

fn complete_air() -> QuoteFormData {
    QuoteFormData { origin: Some(1),
                    destination: Some(2),
                    shipping_type: Some(ShippingType::Air),
                    shipping_date: "2030-05-01".into(),
                    number_of_packages: Some(3),
                    gross_weight_kg: Some(120.5),
                    volume_cbm: Some(1.2),
                    cargo_type_category: "General Cargo".into(),
                    cargo_type: "Electronics".into(),
                    ..QuoteFormData::default() }
}

#[test]
fn requirement_omits_absent_optionals() {
    let req = QuoteRequirement::try_from(&complete_air()).unwrap();
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v,
               json!({
                   "origin": 1,
                   "destination": 2,
                   "shippingType": "AIR",
                   "shippingDate": "2030-05-01",
                   "numberOfPackages": 3,
                   "grossWeightKG": 120.5,
                   "volumeCBM": 1.2,
                   "cargoTypeCategory": "General Cargo",
                   "cargoType": "Electronics"
               }));
}

#[test]
fn requirement_keeps_containers_for_full_container_load() {
    let mut form = complete_air();
    form.shipping_type = Some(ShippingType::Water);
    form.sea_freight_mode = Some(SeaFreightMode::Fcl);
    form.number_of_packages = None;
    form.gross_weight_kg = None;
    form.volume_cbm = None;
    form.max_transit_days = Some(30);
    form.container_count.insert(2, 4);
    assert!(form.is_full_container_load());
    assert!(!form.declares_packages());

    let v = serde_json::to_value(QuoteRequirement::try_from(&form).unwrap()).unwrap();
    assert_eq!(v["seaFreightMode"], json!("FCL"));
    assert_eq!(v["containerCount"], json!({"2": 4}));
    assert_eq!(v["maxTransitDays"], json!(30));
    assert!(v.get("numberOfPackages").is_none());
}

#[test]
fn zero_transit_days_means_no_limit() {
    let mut form = complete_air();
    form.max_transit_days = Some(0);
    let req = QuoteRequirement::try_from(&form).unwrap();
    assert_eq!(req.max_transit_days, None);
}

#[test]
fn incomplete_form_reports_first_missing_field() {
    let mut form = complete_air();
    form.destination = None;
    assert_eq!(QuoteRequirement::try_from(&form).unwrap_err(), DomainError::MissingField("destination"));

    let mut form = complete_air();
    form.shipping_date = "tomorrow".into();
    assert!(matches!(QuoteRequirement::try_from(&form), Err(DomainError::InvalidDate(_))));
}

#[test]
fn preset_shipping_type_and_catalogue() {
    let form = QuoteFormData::new(Some(ShippingType::Water));
    assert_eq!(form.shipping_type, Some(ShippingType::Water));
    assert!(form.shipping_date.is_empty());
    assert_eq!(cargo_types("Food & Beverages")[0], "Fresh Food");
}
