//! freight-adapters: flujo de cotización sobre `freight-core`.
//!
//! Este crate provee:
//! - `FormView`, la representación neutral que devuelve el render de cada
//!   step (el host decide cómo pintarla).
//! - Los cinco steps del formulario de cotización y `build_quote_flow`.
//! - `RequirementSubmit`, que traduce el formulario final a un
//!   `QuoteRequirement` antes de entregarlo al host.

pub mod steps;
pub mod submission;
pub mod view;

pub use steps::{build_quote_flow, quote_engine, QuoteEngine};
pub use submission::{on_requirement, RequirementSubmit};
pub use view::{FieldKind, FieldView, FormView};
