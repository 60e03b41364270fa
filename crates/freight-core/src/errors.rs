//! Errores del core.
//!
//! Sólo `ConfigurationError` escapa del motor (falla rápida al inicializar).
//! `InvalidArgument` y `SubmissionError` se registran y se descartan en el
//! borde del engine. Los errores de validación no son errores de Rust: viajan
//! como datos dentro de `ValidationResult`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Definición de flujo o valor inicial mal formados. Defecto del host.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ConfigurationError {
    #[error("flow definition has no steps")] EmptyDefinition,
    #[error("duplicate step id: {0}")] DuplicateStepId(String),
    #[error("initial value must serialize to a JSON object: {0}")] MalformedInitialValue(String),
}

/// Uso incorrecto de `set_field`. El engine lo registra e ignora la llamada.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum InvalidArgument {
    #[error("value is required for single field updates (field `{0}`)")] MissingValue(String),
    #[error("multi-field update must be a JSON object")] PatchNotObject,
    #[error("unknown field `{0}`")] UnknownField(String),
    #[error("merged value rejected: {0}")] Rejected(String),
}

/// Fallo del callback de envío del host.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum SubmissionError {
    #[error("submission failed: {0}")] Failed(String),
    #[error("submission payload could not be built: {0}")] Payload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        assert_eq!(ConfigurationError::DuplicateStepId("locations".into()).to_string(),
                   "duplicate step id: locations");
        assert_eq!(InvalidArgument::MissingValue("origin".into()).to_string(),
                   "value is required for single field updates (field `origin`)");
        assert_eq!(SubmissionError::Failed("503".into()).to_string(), "submission failed: 503");
    }
}
