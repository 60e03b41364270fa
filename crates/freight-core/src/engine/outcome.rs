use serde::{Deserialize, Serialize};

use crate::step::FieldErrors;

/// Resultado de `advance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// El step actual no valida; no hubo navegación.
    Blocked(FieldErrors),
    /// Índices 1-based dentro de los steps activos.
    Moved { from: usize, to: usize },
    /// Era el último step activo (o no había ninguno): se intentó el envío.
    Submitted(SubmitOutcome),
}

/// Resultado de `submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// Algún step activo no valida. El callback no se invocó.
    Rejected { invalid_steps: Vec<String> },
    /// El callback del host terminó bien.
    Completed,
    /// El callback del host falló. El error ya quedó registrado; mostrarlo
    /// al usuario es tarea del host.
    CallbackFailed,
}

/// Posición dentro de los steps activos (alimenta la barra de progreso y
/// la etiqueta "Next"/"Submit" del host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub is_last: bool,
}
