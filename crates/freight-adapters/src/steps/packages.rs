use freight_core::{FieldSink, StepDefinition, StepProps, ValidationResult};
use freight_domain::QuoteFormData;

use super::{decimal_input, integer_input};
use crate::view::{opt, FieldKind, FormView};

pub const ID: &str = "packages";

/// Bultos, peso y volumen. Se salta en FCL (y en marítimo sin modalidad).
#[derive(Debug, Clone, Copy, Default)]
pub struct PackagesStep;

impl StepDefinition<QuoteFormData, FormView> for PackagesStep {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Package Details"
    }

    fn render(&self, props: &StepProps<'_, QuoteFormData>, _sink: &mut FieldSink) -> FormView {
        let v = props.value;
        let e = props.errors;
        FormView::new(ID, self.title()).field("numberOfPackages",
                                              "Number of Packages",
                                              FieldKind::Number,
                                              opt(v.number_of_packages),
                                              true,
                                              e)
                                       .field("grossWeightKG",
                                              "Gross Weight (kg)",
                                              FieldKind::Number,
                                              opt(v.gross_weight_kg),
                                              true,
                                              e)
                                       .field("volumeCBM", "Volume (CBM)", FieldKind::Number, opt(v.volume_cbm), true, e)
    }

    fn validate(&self, value: &QuoteFormData) -> Option<ValidationResult> {
        let mut r = ValidationResult::valid();
        r.require(value.number_of_packages.is_some_and(|n| n > 0),
                  "numberOfPackages",
                  "Number of packages must be at least 1");
        r.require(value.gross_weight_kg.is_some_and(|w| w > 0.0),
                  "grossWeightKG",
                  "Gross weight must be greater than 0");
        r.require(value.volume_cbm.is_some_and(|v| v > 0.0), "volumeCBM", "Volume must be greater than 0");
        Some(r)
    }

    fn should_skip(&self, value: &QuoteFormData) -> bool {
        !value.declares_packages()
    }

    fn on_input(&self, _value: &QuoteFormData, field: &str, raw: &str, sink: &mut FieldSink) {
        match field {
            "numberOfPackages" => integer_input(sink, field, raw),
            "grossWeightKG" | "volumeCBM" => decimal_input(sink, field, raw),
            _ => sink.set(field, raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_domain::{SeaFreightMode, ShippingType};

    #[test]
    fn shown_for_air_and_less_than_container_load() {
        let air = QuoteFormData::new(Some(ShippingType::Air));
        assert!(!PackagesStep.should_skip(&air));
        let mut water = QuoteFormData::new(Some(ShippingType::Water));
        assert!(PackagesStep.should_skip(&water));
        water.sea_freight_mode = Some(SeaFreightMode::Lcl);
        assert!(!PackagesStep.should_skip(&water));
        water.sea_freight_mode = Some(SeaFreightMode::Fcl);
        assert!(PackagesStep.should_skip(&water));
    }

    #[test]
    fn every_measure_must_be_positive() {
        let errors = PackagesStep.validate(&QuoteFormData::default()).unwrap().into_errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["volumeCBM"], "Volume must be greater than 0");
    }

    #[test]
    fn negative_weight_input_is_ignored() {
        let mut sink = FieldSink::new();
        PackagesStep.on_input(&QuoteFormData::default(), "grossWeightKG", "-3", &mut sink);
        assert!(sink.is_empty());
        PackagesStep.on_input(&QuoteFormData::default(), "grossWeightKG", "2.5", &mut sink);
        assert!(!sink.is_empty());
    }
}
