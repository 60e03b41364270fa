//! Steps del formulario de cotización.

pub mod cargo_type;
pub mod containers;
pub mod locations;
pub mod packages;
pub mod shipping_details;

use chrono::NaiveDate;
use freight_core::{ConfigurationError, FieldSink, FlowEngine, StepDefinition, SubmitHandler};
use freight_domain::QuoteFormData;
use log::warn;
use serde_json::Value;

use crate::view::FormView;

pub use cargo_type::CargoTypeStep;
pub use containers::ContainersStep;
pub use locations::LocationsStep;
pub use packages::PackagesStep;
pub use shipping_details::ShippingDetailsStep;

pub type QuoteEngine = FlowEngine<QuoteFormData, FormView>;

/// Los cinco steps en orden. `today` es la referencia de la regla "la fecha
/// no puede estar en el pasado".
pub fn build_quote_flow(today: NaiveDate) -> Vec<Box<dyn StepDefinition<QuoteFormData, FormView>>> {
    vec![Box::new(ShippingDetailsStep::new(today)),
         Box::new(LocationsStep),
         Box::new(ContainersStep),
         Box::new(PackagesStep),
         Box::new(CargoTypeStep)]
}

/// Engine del flujo de cotización con store en memoria.
pub fn quote_engine<H>(today: NaiveDate, initial: QuoteFormData, handler: H) -> Result<QuoteEngine, ConfigurationError>
    where H: SubmitHandler<QuoteFormData> + 'static
{
    QuoteEngine::builder().first_step(ShippingDetailsStep::new(today))
                          .add_step(LocationsStep)
                          .add_step(ContainersStep)
                          .add_step(PackagesStep)
                          .add_step(CargoTypeStep)
                          .build(initial, handler)
}

/// Entrada numérica entera: vacío limpia el campo, texto no numérico o
/// negativo se ignora.
pub(crate) fn integer_input(sink: &mut FieldSink, field: &str, raw: &str) {
    match raw.trim() {
        "" => sink.set(field, Value::Null),
        s => match s.parse::<u32>() {
            Ok(n) => sink.set(field, n),
            Err(_) => warn!("ignoring non-integer input for `{field}`: {raw:?}"),
        },
    }
}

/// Igual que `integer_input` pero admite decimales.
pub(crate) fn decimal_input(sink: &mut FieldSink, field: &str, raw: &str) {
    match raw.trim() {
        "" => sink.set(field, Value::Null),
        s => match s.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => sink.set(field, n),
            _ => warn!("ignoring invalid number for `{field}`: {raw:?}"),
        },
    }
}
