use freight_core::{FieldSink, StepDefinition, StepProps, ValidationResult};
use freight_domain::QuoteFormData;
use log::warn;
use serde_json::Value;

use crate::view::{opt, FieldKind, FormView};

pub const ID: &str = "locations";

/// Origen y destino. El tipo de ubicación ofrecido depende del medio.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationsStep;

impl StepDefinition<QuoteFormData, FormView> for LocationsStep {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Locations"
    }

    fn render(&self, props: &StepProps<'_, QuoteFormData>, _sink: &mut FieldSink) -> FormView {
        let v = props.value;
        let location_type = v.location_type();
        FormView::new(ID, self.title()).field("origin",
                                              "Origin Location",
                                              FieldKind::Location { location_type },
                                              opt(v.origin),
                                              true,
                                              props.errors)
                                       .field("destination",
                                              "Destination Location",
                                              FieldKind::Location { location_type },
                                              opt(v.destination),
                                              true,
                                              props.errors)
    }

    fn validate(&self, value: &QuoteFormData) -> Option<ValidationResult> {
        let mut r = ValidationResult::valid();
        r.require(value.origin.is_some(), "origin", "Origin location is required");
        r.require(value.destination.is_some(), "destination", "Destination location is required");
        if value.origin.is_some() && value.origin == value.destination {
            r.add_error("destination", "Destination must be different from origin");
        }
        Some(r)
    }

    fn on_input(&self, _value: &QuoteFormData, field: &str, raw: &str, sink: &mut FieldSink) {
        match raw.trim() {
            "" => sink.set(field, Value::Null),
            s => match s.parse::<i64>() {
                Ok(id) => sink.set(field, id),
                Err(_) => warn!("location ids are numeric, got {raw:?} for `{field}`"),
            },
        }
    }
}
