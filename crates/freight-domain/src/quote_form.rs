use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{LocationType, SeaFreightMode, ShippingType};

/// Valor agregado del flujo de cotización.
///
/// Los campos numéricos vacíos son `None` (`null` en JSON). `containerCount`
/// mapea id de tipo de contenedor a cantidad.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFormData {
    pub origin: Option<i64>,
    pub destination: Option<i64>,
    pub shipping_type: Option<ShippingType>,
    pub sea_freight_mode: Option<SeaFreightMode>,
    /// `YYYY-MM-DD`, tal como lo escribió el usuario.
    pub shipping_date: String,
    pub number_of_packages: Option<u32>,
    #[serde(rename = "grossWeightKG")]
    pub gross_weight_kg: Option<f64>,
    #[serde(rename = "volumeCBM")]
    pub volume_cbm: Option<f64>,
    pub max_transit_days: Option<u32>,
    pub container_count: BTreeMap<u32, u32>,
    pub cargo_type_category: String,
    pub cargo_type: String,
}

impl QuoteFormData {
    /// Formulario vacío, opcionalmente con el tipo de envío ya elegido.
    pub fn new(preset: Option<ShippingType>) -> Self {
        Self { shipping_type: preset,
               ..Self::default() }
    }

    pub fn location_type(&self) -> LocationType {
        self.shipping_type.map_or(LocationType::Airport, |t| t.location_type())
    }

    pub fn is_full_container_load(&self) -> bool {
        self.shipping_type == Some(ShippingType::Water) && self.sea_freight_mode == Some(SeaFreightMode::Fcl)
    }

    /// Los bultos se declaran en envíos aéreos y en carga consolidada.
    pub fn declares_packages(&self) -> bool {
        self.shipping_type == Some(ShippingType::Air) || self.sea_freight_mode == Some(SeaFreightMode::Lcl)
    }

    pub fn total_containers(&self) -> u32 {
        self.container_count.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_form_serializes_every_key() {
        let v = serde_json::to_value(QuoteFormData::default()).unwrap();
        let obj = v.as_object().unwrap();
        for key in ["origin",
                    "destination",
                    "shippingType",
                    "seaFreightMode",
                    "shippingDate",
                    "numberOfPackages",
                    "grossWeightKG",
                    "volumeCBM",
                    "maxTransitDays",
                    "containerCount",
                    "cargoTypeCategory",
                    "cargoType"]
        {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["containerCount"], json!({}));
    }

    #[test]
    fn container_keys_round_trip_as_strings() {
        let mut f = QuoteFormData::new(Some(ShippingType::Water));
        f.container_count.insert(20, 2);
        f.container_count.insert(40, 1);
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["containerCount"], json!({"20": 2, "40": 1}));
        let back: QuoteFormData = serde_json::from_value(v).unwrap();
        assert_eq!(back.total_containers(), 3);
        assert_eq!(back.location_type(), LocationType::SeaPort);
    }
}
