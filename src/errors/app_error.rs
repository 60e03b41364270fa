use freight_core::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Flujo mal definido: {0}")]
    Flow(#[from] ConfigurationError),
    #[error("Comando inválido: {0}")]
    Command(String),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
}
