use freight_core::{FieldSink, StepDefinition, StepProps, ValidationResult};
use freight_domain::{cargo_types, categories, QuoteFormData};
use serde_json::json;

use crate::view::{FieldKind, FormView};

pub const ID: &str = "cargo-type";

#[derive(Debug, Clone, Copy, Default)]
pub struct CargoTypeStep;

impl StepDefinition<QuoteFormData, FormView> for CargoTypeStep {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Cargo Type"
    }

    fn render(&self, props: &StepProps<'_, QuoteFormData>, _sink: &mut FieldSink) -> FormView {
        let v = props.value;
        let mut view = FormView::new(ID, self.title()).field("cargoTypeCategory",
                                                             "Cargo Category",
                                                             FieldKind::Select { options: categories().map(String::from)
                                                                                                       .collect() },
                                                             v.cargo_type_category.clone(),
                                                             true,
                                                             props.errors);
        // El tipo específico sólo se ofrece con una categoría elegida.
        if !v.cargo_type_category.is_empty() {
            let options = cargo_types(&v.cargo_type_category).iter().map(|s| s.to_string()).collect();
            view = view.field("cargoType",
                              "Specific Cargo Type",
                              FieldKind::Select { options },
                              v.cargo_type.clone(),
                              true,
                              props.errors)
                       .note(format!("Selected category: {}", v.cargo_type_category));
        }
        view
    }

    fn validate(&self, value: &QuoteFormData) -> Option<ValidationResult> {
        let mut r = ValidationResult::valid();
        r.require(!value.cargo_type_category.is_empty(),
                  "cargoTypeCategory",
                  "Cargo category is required");
        r.require(!value.cargo_type.is_empty(), "cargoType", "Specific cargo type is required");
        Some(r)
    }

    fn on_input(&self, value: &QuoteFormData, field: &str, raw: &str, sink: &mut FieldSink) {
        match field {
            "cargoTypeCategory" if raw != value.cargo_type_category => {
                sink.patch(json!({ "cargoTypeCategory": raw, "cargoType": "" }))
            }
            "cargoTypeCategory" => {}
            _ => sink.set(field, raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_options_follow_the_category() {
        let form = QuoteFormData { cargo_type_category: "Bulk Cargo".into(),
                                   ..QuoteFormData::default() };
        let errors = freight_core::FieldErrors::new();
        let view = CargoTypeStep.render(&StepProps { value: &form,
                                                     errors: &errors,
                                                     attempted_advance: false },
                                        &mut FieldSink::new());
        match &view.get("cargoType").unwrap().kind {
            FieldKind::Select { options } => assert_eq!(options[0], "Liquid Bulk"),
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(CargoTypeStep.render(&StepProps { value: &QuoteFormData::default(),
                                                  errors: &errors,
                                                  attempted_advance: false },
                                     &mut FieldSink::new())
                             .get("cargoType")
                             .is_none());
    }
}
