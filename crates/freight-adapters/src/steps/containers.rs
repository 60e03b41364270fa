use std::collections::BTreeMap;

use freight_core::{FieldSink, StepDefinition, StepProps, ValidationResult};
use freight_domain::QuoteFormData;
use log::warn;

use crate::view::{FieldKind, FormView};

pub const ID: &str = "containers";

/// Selección de contenedores. Sólo existe para FCL.
///
/// Entrada: campo `containerCount.<tipo>` con la cantidad; vacío o `0`
/// quita el tipo.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainersStep;

impl StepDefinition<QuoteFormData, FormView> for ContainersStep {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Container Selection"
    }

    fn render(&self, props: &StepProps<'_, QuoteFormData>, _sink: &mut FieldSink) -> FormView {
        let summary = props.value
                           .container_count
                           .iter()
                           .map(|(kind, n)| format!("{kind}x{n}"))
                           .collect::<Vec<_>>()
                           .join(", ");
        FormView::new(ID, self.title()).field("containerCount",
                                              "Containers",
                                              FieldKind::Containers,
                                              summary,
                                              true,
                                              props.errors)
                                       .note(format!("Total containers: {}", props.value.total_containers()))
    }

    fn validate(&self, value: &QuoteFormData) -> Option<ValidationResult> {
        let mut r = ValidationResult::valid();
        r.require(value.total_containers() >= 1,
                  "containerCount",
                  "At least one container is required for FCL shipping");
        Some(r)
    }

    fn should_skip(&self, value: &QuoteFormData) -> bool {
        !value.is_full_container_load()
    }

    fn on_input(&self, value: &QuoteFormData, field: &str, raw: &str, sink: &mut FieldSink) {
        let Some(kind) = field.strip_prefix("containerCount.") else {
            sink.set(field, raw);
            return;
        };
        let Ok(kind) = kind.parse::<u32>() else {
            warn!("unknown container type `{kind}`");
            return;
        };
        let count = match raw.trim() {
            "" => 0,
            s => match s.parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    warn!("ignoring container count {raw:?}");
                    return;
                }
            },
        };
        let mut counts: BTreeMap<u32, u32> = value.container_count.clone();
        if count == 0 {
            counts.remove(&kind);
        } else {
            counts.insert(kind, count);
        }
        match serde_json::to_value(&counts) {
            Ok(v) => sink.set("containerCount", v),
            Err(e) => warn!("container counts not serializable: {e}"),
        }
    }
}
