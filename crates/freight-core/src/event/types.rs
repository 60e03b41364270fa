//! Tipos de evento del flujo y estructura `FlowEvent`.
//!
//! Cada operación del `FlowEngine` que cambia estado emite eventos a un
//! `EventStore` append-only. Sirven para auditar la sesión de captura; el
//! estado vivo sigue estando en el engine.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{InvalidArgument, SubmissionError};
use crate::step::FieldErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Primer evento de un `flow_id`.
    FlowInitialized {
        definition_hash: String,
        step_count: usize,
        active_steps: Vec<String>,
    },
    FieldsMerged { fields: Vec<String> },
    /// `set_field` mal usado; el estado no cambió.
    FieldUpdateRejected { error: InvalidArgument },
    /// La lista de steps activos cambió tras una fusión.
    ActiveStepsChanged { active_steps: Vec<String>, current_index: usize },
    ValidationFailed { step_id: String, errors: FieldErrors },
    StepAdvanced { from: String, to: String },
    StepRetreated { from: String, to: String },
    /// La revalidación final encontró steps inválidos; no hubo envío.
    SubmissionRejected { invalid_steps: Vec<String> },
    SubmissionStarted,
    /// `fingerprint`: hash del valor enviado.
    SubmissionSucceeded { fingerprint: String },
    SubmissionFailed { error: SubmissionError },
    FlowReset { active_steps: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
