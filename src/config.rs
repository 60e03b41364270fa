//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use chrono::{Local, NaiveDate};
use freight_domain::{parse_shipping_date, ShippingType};
use log::warn;
use once_cell::sync::Lazy;
use std::env;

use crate::errors::AppError;

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Tipo de envío preseleccionado (`FREIGHTFLOW_SHIPPING_TYPE`).
    pub preset_shipping_type: Option<ShippingType>,
    /// Fecha de referencia para "no en el pasado" (`FREIGHTFLOW_TODAY`).
    /// `None` usa la fecha local.
    pub reference_date: Option<NaiveDate>,
    /// Filtro de env_logger (`FREIGHTFLOW_LOG`).
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { preset_shipping_type: None,
               reference_date: None,
               log_filter: "info".to_string() }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let preset_shipping_type = non_empty("FREIGHTFLOW_SHIPPING_TYPE").map(|v| v.parse::<ShippingType>())
                                                                         .transpose()
                                                                         .map_err(|e| AppError::Config(e.to_string()))?;
        let reference_date = non_empty("FREIGHTFLOW_TODAY").map(|v| parse_shipping_date(&v))
                                                           .transpose()
                                                           .map_err(|e| AppError::Config(e.to_string()))?;
        let log_filter = non_empty("FREIGHTFLOW_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self { preset_shipping_type,
                  reference_date,
                  log_filter })
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Variables inválidas se reportan y se usa la configuración por defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("{e}; using default configuration");
                             AppConfig::default()
                         })
});
