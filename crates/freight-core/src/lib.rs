//! freight-core: motor de flujos de captura por pasos.
//!
//! Un flujo es una lista ordenada de steps que comparten un único valor
//! agregado. El engine decide qué steps están activos (`should_skip`), valida
//! antes de avanzar y entrega el valor final a un callback asíncrono del host.
pub mod constants;
pub mod definition;
pub mod engine;
pub mod errors;
pub mod event;
pub mod field;
pub mod hashing;
pub mod step;

pub use definition::FlowDefinition;
pub use engine::{submit_fn, Advance, EngineBuilder, EngineBuilderInit, FlowEngine, NoopSubmit, Progress,
                 SubmitHandler, SubmitOutcome};
pub use errors::{ConfigurationError, InvalidArgument, SubmissionError};
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use field::{FieldSink, FieldUpdate};
pub use step::{FieldErrors, StepDefinition, StepProps, StepSpec, ValidationResult};
