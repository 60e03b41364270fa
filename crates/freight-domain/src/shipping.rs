use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Medio de transporte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShippingType {
    Air,
    Water,
}

impl ShippingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingType::Air => "AIR",
            ShippingType::Water => "WATER",
        }
    }

    /// Tipo de ubicación que se ofrece para origen y destino.
    pub fn location_type(&self) -> LocationType {
        match self {
            ShippingType::Water => LocationType::SeaPort,
            ShippingType::Air => LocationType::Airport,
        }
    }
}

impl FromStr for ShippingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AIR" => Ok(ShippingType::Air),
            "WATER" => Ok(ShippingType::Water),
            _ => Err(DomainError::UnknownShippingType(s.to_string())),
        }
    }
}

impl fmt::Display for ShippingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full / less than container load. Sólo aplica a envíos marítimos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeaFreightMode {
    Fcl,
    Lcl,
}

impl SeaFreightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeaFreightMode::Fcl => "FCL",
            SeaFreightMode::Lcl => "LCL",
        }
    }
}

impl FromStr for SeaFreightMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCL" => Ok(SeaFreightMode::Fcl),
            "LCL" => Ok(SeaFreightMode::Lcl),
            _ => Err(DomainError::UnknownSeaFreightMode(s.to_string())),
        }
    }
}

impl fmt::Display for SeaFreightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    SeaPort,
    Airport,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocationType::SeaPort => "SEA_PORT",
            LocationType::Airport => "AIRPORT",
        };
        f.write_str(s)
    }
}

/// Fechas de envío en formato `YYYY-MM-DD`.
pub fn parse_shipping_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| DomainError::InvalidDate(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_type_wire_names() {
        assert_eq!(serde_json::to_string(&ShippingType::Water).unwrap(), "\"WATER\"");
        assert_eq!("air".parse::<ShippingType>().unwrap(), ShippingType::Air);
        assert!("sea".parse::<ShippingType>().is_err());
        assert_eq!(serde_json::to_string(&LocationType::SeaPort).unwrap(), "\"SEA_PORT\"");
        assert_eq!(LocationType::Airport.to_string(), "AIRPORT");
        assert_eq!(ShippingType::Air.location_type(), LocationType::Airport);
    }

    #[test]
    fn dates_parse_strictly() {
        assert!(parse_shipping_date("2025-03-01").is_ok());
        assert!(matches!(parse_shipping_date("01/03/2025"), Err(DomainError::InvalidDate(_))));
    }
}
