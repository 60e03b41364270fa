//! Engine module: FlowEngine, builder, contrato de envío y resultados.

pub mod builder;
pub mod core;
mod outcome;
pub mod submit;

pub use builder::{EngineBuilder, EngineBuilderInit};
pub use core::FlowEngine;
pub use outcome::{Advance, Progress, SubmitOutcome};
pub use submit::{submit_fn, NoopSubmit, SubmitFn, SubmitHandler};
