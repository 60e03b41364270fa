//! Recorridos completos del flujo de cotización.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use freight_adapters::{build_quote_flow, on_requirement, quote_engine, FieldKind, QuoteEngine};
use freight_core::{Advance, FlowEngine, SubmissionError, SubmitOutcome};
use freight_domain::{LocationType, QuoteFormData, QuoteRequirement, ShippingType};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn engine(initial: QuoteFormData) -> (QuoteEngine, Arc<Mutex<Vec<QuoteRequirement>>>) {
    let sent: Arc<Mutex<Vec<QuoteRequirement>>> = Arc::default();
    let sink = sent.clone();
    let engine = quote_engine(today(), initial, on_requirement(move |req: QuoteRequirement| {
                                  sink.lock().unwrap().push(req);
                                  async { Ok::<(), SubmissionError>(()) }
                              })).unwrap();
    (engine, sent)
}

#[tokio::test]
async fn air_flow_skips_containers() {
    let (mut e, sent) = engine(QuoteFormData::new(Some(ShippingType::Air)));
    assert_eq!(e.active_step_ids(), vec!["shipping-details", "locations", "packages", "cargo-type"]);

    e.input("shippingDate", "2025-07-01");
    assert_eq!(e.advance().await, Advance::Moved { from: 1, to: 2 });

    let view = e.render_current().unwrap();
    assert_eq!(view.get("origin").unwrap().kind,
               FieldKind::Location { location_type: LocationType::Airport });
    e.input("origin", "10");
    e.input("destination", "11");
    e.advance().await;
    assert_eq!(e.current_step_id(), Some("packages"));

    e.input("numberOfPackages", "2");
    e.input("grossWeightKG", "40.5");
    e.input("volumeCBM", "0.8");
    e.advance().await;

    e.input("cargoTypeCategory", "Special Cargo");
    e.input("cargoType", "Live Animals");
    assert!(e.progress().is_last);
    assert_eq!(e.advance().await, Advance::Submitted(SubmitOutcome::Completed));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].number_of_packages, Some(2));
    assert_eq!(sent[0].container_count, None);
    assert_eq!(sent[0].cargo_type, "Live Animals");
}

#[tokio::test]
async fn switching_to_full_container_load_swaps_packages_for_containers() {
    let (mut e, sent) = engine(QuoteFormData::default());
    e.input("shippingType", "WATER");
    assert_eq!(e.active_step_ids(), vec!["shipping-details", "locations", "cargo-type"]);
    e.input("seaFreightMode", "FCL");
    assert_eq!(e.active_step_ids(), vec!["shipping-details", "locations", "containers", "cargo-type"]);
    e.input("shippingDate", "2025-06-15");
    e.advance().await;

    let view = e.render_current().unwrap();
    assert_eq!(view.get("destination").unwrap().kind,
               FieldKind::Location { location_type: LocationType::SeaPort });
    e.input("origin", "1");
    e.input("destination", "1");
    assert!(matches!(e.advance().await, Advance::Blocked(_)));
    e.input("destination", "2");
    e.advance().await;

    assert_eq!(e.current_step_id(), Some("containers"));
    assert!(matches!(e.advance().await, Advance::Blocked(ref errs) if errs.contains_key("containerCount")));
    e.input("containerCount.20", "2");
    assert!(e.errors().is_empty(), "live validation clears the error");
    e.advance().await;

    e.input("cargoTypeCategory", "Bulk Cargo");
    e.input("cargoType", "Dry Bulk");
    assert_eq!(e.advance().await, Advance::Submitted(SubmitOutcome::Completed));
    let sent = sent.lock().unwrap();
    let req = &sent[0];
    assert_eq!(req.container_count.as_ref().map(|c| c[&20]), Some(2));
    assert_eq!(req.number_of_packages, None);
}

#[tokio::test]
async fn going_back_to_air_from_containers_clamps_the_position() {
    let (mut e, _) = engine(QuoteFormData::default());
    e.input("shippingType", "WATER");
    e.input("seaFreightMode", "FCL");
    e.input("shippingDate", "2025-06-20");
    e.advance().await;
    e.input("origin", "1");
    e.input("destination", "2");
    e.advance().await;
    assert_eq!(e.current_step_id(), Some("containers"));

    // Un cambio que quita el step actual deja el índice dentro de rango.
    e.patch(serde_json::json!({"shippingType": "AIR", "seaFreightMode": null}));
    assert_eq!(e.active_step_ids(), vec!["shipping-details", "locations", "packages", "cargo-type"]);
    assert_eq!(e.current_index(), 3);
    assert_eq!(e.current_step_id(), Some("packages"));
    assert!(e.retreat_to("shipping-details"));
    assert_eq!(e.value().sea_freight_mode, None);
}

#[tokio::test]
async fn switching_air_to_water_drops_airport_locations() {
    let (mut e, sent) = engine(QuoteFormData::new(Some(ShippingType::Air)));
    e.input("shippingDate", "2025-07-01");
    e.advance().await;
    e.input("origin", "10");
    e.input("destination", "11");
    e.advance().await;
    assert_eq!(e.current_step_id(), Some("packages"));

    assert!(e.retreat_to("shipping-details"));
    e.input("shippingType", "WATER");
    assert_eq!(e.value().origin, None);
    assert_eq!(e.value().destination, None);
    e.input("seaFreightMode", "LCL");
    e.advance().await;

    let view = e.render_current().unwrap();
    assert_eq!(view.get("origin").unwrap().kind,
               FieldKind::Location { location_type: LocationType::SeaPort });
    assert!(matches!(e.advance().await, Advance::Blocked(ref errs) if errs.contains_key("origin")));
    e.input("origin", "20");
    e.input("destination", "21");
    assert_eq!(e.advance().await, Advance::Moved { from: 2, to: 3 });

    e.input("numberOfPackages", "1");
    e.input("grossWeightKG", "12");
    e.input("volumeCBM", "0.5");
    e.advance().await;
    e.input("cargoTypeCategory", "General Cargo");
    e.input("cargoType", "Electronics");
    assert_eq!(e.advance().await, Advance::Submitted(SubmitOutcome::Completed));

    let sent = sent.lock().unwrap();
    let req = &sent[0];
    assert_eq!((req.origin, req.destination), (20, 21));
    assert_eq!(req.shipping_type, ShippingType::Water);
}

#[tokio::test]
async fn category_change_resets_cargo_type() {
    let (mut e, _) = engine(QuoteFormData { origin: Some(1),
                                            destination: Some(2),
                                            shipping_type: Some(ShippingType::Air),
                                            shipping_date: "2025-08-01".into(),
                                            number_of_packages: Some(1),
                                            gross_weight_kg: Some(1.0),
                                            volume_cbm: Some(1.0),
                                            ..QuoteFormData::default() });
    while e.current_step_id() != Some("cargo-type") {
        assert!(matches!(e.advance().await, Advance::Moved { .. }));
    }
    e.input("cargoTypeCategory", "General Cargo");
    e.input("cargoType", "Electronics");
    e.input("cargoTypeCategory", "Food & Beverages");
    assert_eq!(e.value().cargo_type_category, "Food & Beverages");
    assert_eq!(e.value().cargo_type, "");
}

#[test]
fn flow_list_and_builder_agree() {
    let steps = build_quote_flow(today());
    let ids: Vec<_> = steps.iter().map(|s| s.id().to_string()).collect();
    let from_list = FlowEngine::initialize(steps, QuoteFormData::default(), freight_core::NoopSubmit).unwrap();
    let (from_builder, _) = engine(QuoteFormData::default());
    assert_eq!(ids, vec!["shipping-details", "locations", "containers", "packages", "cargo-type"]);
    assert_eq!(from_list.definition().definition_hash, from_builder.definition().definition_hash);
}
