//! Definiciones relacionadas a Steps.
//!
//! Un Step es una pantalla de captura dentro del flujo. Este módulo define:
//! - `StepDefinition`: interfaz neutral usada por el engine.
//! - `StepSpec`: implementación basada en closures (funciones como datos).
//! - `ValidationResult` y `FieldErrors`.

pub mod definition;
pub mod spec;
mod validation;

pub use definition::{StepDefinition, StepProps};
pub use spec::StepSpec;
pub use validation::{FieldErrors, ValidationResult};
