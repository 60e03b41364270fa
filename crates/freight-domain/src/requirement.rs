use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{parse_shipping_date, DomainError, QuoteFormData, SeaFreightMode, ShippingType};

/// Requerimiento de cotización que se entrega al servicio de tarifas.
///
/// Se construye desde un formulario completo; los opcionales ausentes no se
/// serializan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequirement {
    pub origin: i64,
    pub destination: i64,
    pub shipping_type: ShippingType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sea_freight_mode: Option<SeaFreightMode>,
    pub shipping_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_packages: Option<u32>,
    #[serde(rename = "grossWeightKG", skip_serializing_if = "Option::is_none", default)]
    pub gross_weight_kg: Option<f64>,
    #[serde(rename = "volumeCBM", skip_serializing_if = "Option::is_none", default)]
    pub volume_cbm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_transit_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub container_count: Option<BTreeMap<u32, u32>>,
    pub cargo_type_category: String,
    pub cargo_type: String,
}

impl TryFrom<&QuoteFormData> for QuoteRequirement {
    type Error = DomainError;

    fn try_from(form: &QuoteFormData) -> Result<Self, Self::Error> {
        let origin = form.origin.ok_or(DomainError::MissingField("origin"))?;
        let destination = form.destination.ok_or(DomainError::MissingField("destination"))?;
        let shipping_type = form.shipping_type.ok_or(DomainError::MissingField("shippingType"))?;
        if form.shipping_date.trim().is_empty() {
            return Err(DomainError::MissingField("shippingDate"));
        }
        let shipping_date = parse_shipping_date(&form.shipping_date)?;
        if form.cargo_type_category.is_empty() {
            return Err(DomainError::MissingField("cargoTypeCategory"));
        }
        if form.cargo_type.is_empty() {
            return Err(DomainError::MissingField("cargoType"));
        }

        Ok(QuoteRequirement { origin,
                              destination,
                              shipping_type,
                              sea_freight_mode: form.sea_freight_mode,
                              shipping_date,
                              number_of_packages: form.number_of_packages,
                              gross_weight_kg: form.gross_weight_kg,
                              volume_cbm: form.volume_cbm,
                              // 0 equivale a "sin límite".
                              max_transit_days: form.max_transit_days.filter(|d| *d > 0),
                              container_count: (!form.container_count.is_empty()).then(|| form.container_count.clone()),
                              cargo_type_category: form.cargo_type_category.clone(),
                              cargo_type: form.cargo_type.clone() })
    }
}
