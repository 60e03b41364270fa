//! Tipo de envío, modalidad marítima, fecha y tránsito máximo.

use chrono::NaiveDate;
use freight_core::{FieldSink, StepDefinition, StepProps, ValidationResult};
use freight_domain::{parse_shipping_date, QuoteFormData, SeaFreightMode, ShippingType};
use log::warn;
use serde_json::{json, Value};

use super::integer_input;
use crate::view::{opt, FieldKind, FormView};

pub const ID: &str = "shipping-details";

#[derive(Debug, Clone)]
pub struct ShippingDetailsStep {
    today: NaiveDate,
}

impl ShippingDetailsStep {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl StepDefinition<QuoteFormData, FormView> for ShippingDetailsStep {
    fn id(&self) -> &str {
        ID
    }

    fn title(&self) -> &str {
        "Shipping Details"
    }

    fn render(&self, props: &StepProps<'_, QuoteFormData>, _sink: &mut FieldSink) -> FormView {
        let v = props.value;
        let e = props.errors;
        let mut view = FormView::new(ID, self.title()).field("shippingType",
                                                             "Shipping Type",
                                                             FieldKind::Select { options: vec!["AIR".into(),
                                                                                               "WATER".into()] },
                                                             opt(v.shipping_type),
                                                             true,
                                                             e);
        if v.shipping_type == Some(ShippingType::Water) {
            view = view.field("seaFreightMode",
                              "Sea Freight Mode",
                              FieldKind::Select { options: vec!["FCL".into(), "LCL".into()] },
                              opt(v.sea_freight_mode),
                              true,
                              e);
        }
        view.field("shippingDate", "Shipping Date", FieldKind::Date, v.shipping_date.clone(), true, e)
            .field("maxTransitDays",
                   "Max Transit Days",
                   FieldKind::Number,
                   opt(v.max_transit_days),
                   false,
                   e)
    }

    fn validate(&self, value: &QuoteFormData) -> Option<ValidationResult> {
        let mut r = ValidationResult::valid();
        r.require(value.shipping_type.is_some(), "shippingType", "Shipping type is required");
        if value.shipping_type == Some(ShippingType::Water) {
            r.require(value.sea_freight_mode.is_some(),
                      "seaFreightMode",
                      "Sea freight mode is required for water shipping");
        }
        if value.shipping_date.trim().is_empty() {
            r.add_error("shippingDate", "Shipping date is required");
        } else {
            match parse_shipping_date(&value.shipping_date) {
                Ok(date) if date < self.today => r.add_error("shippingDate", "Shipping date cannot be in the past"),
                Ok(_) => {}
                Err(_) => r.add_error("shippingDate", "Shipping date must be a valid date (YYYY-MM-DD)"),
            }
        }
        Some(r)
    }

    fn on_input(&self, value: &QuoteFormData, field: &str, raw: &str, sink: &mut FieldSink) {
        match field {
            "shippingType" => {
                let next = match raw.trim() {
                    "" => None,
                    s => match s.parse::<ShippingType>() {
                        Ok(t) => Some(t),
                        Err(e) => {
                            warn!("{e}");
                            return;
                        }
                    },
                };
                if next == value.shipping_type {
                    return;
                }
                // Aeropuertos y puertos son catálogos distintos: cambiar de medio
                // invalida la modalidad y las ubicaciones elegidas.
                sink.patch(json!({
                    "shippingType": next.map(|t| t.as_str()),
                    "seaFreightMode": Value::Null,
                    "origin": Value::Null,
                    "destination": Value::Null,
                }))
            }
            "seaFreightMode" => match raw.trim() {
                "" => sink.set("seaFreightMode", Value::Null),
                s => match s.parse::<SeaFreightMode>() {
                    Ok(m) => sink.set("seaFreightMode", m.as_str()),
                    Err(e) => warn!("{e}"),
                },
            },
            "shippingDate" => sink.set("shippingDate", raw.trim()),
            "maxTransitDays" => integer_input(sink, field, raw),
            _ => sink.set(field, raw),
        }
    }
}
