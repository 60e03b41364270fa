//! Core FlowEngine implementation

use log::{debug, error, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::sync::watch;
use uuid::Uuid;

use crate::definition::FlowDefinition;
use crate::engine::{Advance, EngineBuilderInit, Progress, SubmitHandler, SubmitOutcome};
use crate::errors::ConfigurationError;
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::field::{apply_update, FieldSink, FieldUpdate};
use crate::hashing::hash_value;
use crate::step::{FieldErrors, StepDefinition, StepProps};

/// Motor de un flujo de captura por pasos.
///
/// Es dueño exclusivo del valor agregado `T`: los steps y el host sólo piden
/// fusiones (`set_field`, `FieldSink`). Todas las operaciones son síncronas
/// salvo `submit`, que espera el callback del host.
pub struct FlowEngine<T, V, E = InMemoryEventStore>
    where E: EventStore
{
    flow_id: Uuid,
    definition: FlowDefinition<T, V>,
    handler: Box<dyn SubmitHandler<T>>,
    event_store: E,
    value: T,
    /// Índices en `definition.steps` de los steps no saltados, en orden.
    active: Vec<usize>,
    /// 1-based dentro de `active`. Nunca baja de 1.
    current: usize,
    errors: FieldErrors,
    attempted_advance: bool,
    submitting: watch::Sender<bool>,
}

impl<T, V> FlowEngine<T, V, InMemoryEventStore>
    where T: Serialize + DeserializeOwned + Clone + Send + 'static
{
    /// Crea un engine con store en memoria.
    ///
    /// Falla si la lista está vacía, si hay ids duplicados o si `initial` no
    /// serializa a un objeto JSON.
    pub fn initialize<H>(steps: Vec<Box<dyn StepDefinition<T, V>>>,
                         initial: T,
                         handler: H)
                         -> Result<Self, ConfigurationError>
        where H: SubmitHandler<T> + 'static
    {
        Self::initialize_with_store(InMemoryEventStore::default(), steps, initial, handler)
    }

    /// Builder con store en memoria.
    pub fn builder() -> EngineBuilderInit<InMemoryEventStore> {
        EngineBuilderInit::default()
    }
}

impl<T, V, E> FlowEngine<T, V, E>
    where T: Serialize + DeserializeOwned + Clone + Send + 'static,
          E: EventStore
{
    pub fn initialize_with_store<H>(event_store: E,
                                    steps: Vec<Box<dyn StepDefinition<T, V>>>,
                                    initial: T,
                                    handler: H)
                                    -> Result<Self, ConfigurationError>
        where H: SubmitHandler<T> + 'static
    {
        let definition = FlowDefinition::new(steps)?;
        check_initial(&initial)?;
        let (submitting, _) = watch::channel(false);
        let mut engine = Self { flow_id: Uuid::new_v4(),
                                definition,
                                handler: Box::new(handler),
                                event_store,
                                value: initial,
                                active: Vec::new(),
                                current: 1,
                                errors: FieldErrors::new(),
                                attempted_advance: false,
                                submitting };
        engine.active = engine.compute_active();
        let kind = FlowEventKind::FlowInitialized { definition_hash: engine.definition.definition_hash.clone(),
                                                    step_count: engine.definition.len(),
                                                    active_steps: engine.active_step_ids() };
        engine.record(kind);
        debug!("flow {} initialized with {} active steps", engine.flow_id, engine.active.len());
        Ok(engine)
    }

    /// Vuelve a sembrar el estado como `initialize`, conservando definición,
    /// handler y store.
    pub fn reset(&mut self, initial: T) -> Result<(), ConfigurationError> {
        check_initial(&initial)?;
        self.value = initial;
        self.active = self.compute_active();
        self.current = 1;
        self.errors.clear();
        self.attempted_advance = false;
        let active_steps = self.active_step_ids();
        self.record(FlowEventKind::FlowReset { active_steps });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lecturas de estado
    // ------------------------------------------------------------------

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    pub fn definition(&self) -> &FlowDefinition<T, V> {
        &self.definition
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// 1-based. Con la lista activa vacía se queda en 1 y `current_step` es `None`.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn attempted_advance(&self) -> bool {
        self.attempted_advance
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    /// Permite observar `is_submitting` mientras `submit` está en curso.
    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    pub fn current_step(&self) -> Option<&dyn StepDefinition<T, V>> {
        self.active
            .get(self.current - 1)
            .map(|&i| self.definition.steps[i].as_ref())
    }

    pub fn current_step_id(&self) -> Option<&str> {
        self.current_step().map(|s| s.id())
    }

    pub fn active_step_ids(&self) -> Vec<String> {
        self.active
            .iter()
            .map(|&i| self.definition.steps[i].id().to_string())
            .collect()
    }

    pub fn progress(&self) -> Progress {
        let total = self.active.len();
        Progress { current: self.current.min(total),
                   total,
                   is_last: self.current >= total }
    }

    /// Eventos del flujo (orden ascendente por seq).
    pub fn events(&self) -> Vec<FlowEvent> {
        self.event_store.list(self.flow_id)
    }

    /// Variante compacta de eventos, útil en tests.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                FlowEventKind::FlowInitialized { .. } => "I",
                FlowEventKind::FieldsMerged { .. } => "M",
                FlowEventKind::FieldUpdateRejected { .. } => "W",
                FlowEventKind::ActiveStepsChanged { .. } => "K",
                FlowEventKind::ValidationFailed { .. } => "X",
                FlowEventKind::StepAdvanced { .. } => "A",
                FlowEventKind::StepRetreated { .. } => "B",
                FlowEventKind::SubmissionRejected { .. } => "J",
                FlowEventKind::SubmissionStarted => "S",
                FlowEventKind::SubmissionSucceeded { .. } => "C",
                FlowEventKind::SubmissionFailed { .. } => "F",
                FlowEventKind::FlowReset { .. } => "R",
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Mutaciones
    // ------------------------------------------------------------------

    /// Fusiona uno o varios campos en el valor agregado.
    ///
    /// Un uso incorrecto (campo sin valor, patch que no es objeto, campo
    /// desconocido, tipo incompatible) se registra y la llamada se ignora.
    pub fn set_field(&mut self, update: impl Into<FieldUpdate>, should_validate: bool) {
        let (next, fields) = match apply_update(&self.value, update.into()) {
            Ok(merged) => merged,
            Err(err) => {
                warn!("flow {}: field update ignored: {err}", self.flow_id);
                self.record(FlowEventKind::FieldUpdateRejected { error: err });
                return;
            }
        };
        // Fusiones sin cambios no se registran ni recalculan steps activos.
        if !fields.is_empty() {
            self.value = next;
            self.record(FlowEventKind::FieldsMerged { fields });
            self.recompute_active();
        }

        if should_validate && self.attempted_advance {
            let result = self.current_step().and_then(|s| s.validate(&self.value));
            if let Some(result) = result {
                self.errors = result.into_errors();
            }
        }
    }

    /// `set_field(FieldUpdate::field(name, value), true)`.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.set_field(FieldUpdate::field(name, value), true);
    }

    /// `set_field(FieldUpdate::Patch(patch), true)`.
    pub fn patch(&mut self, patch: Value) {
        self.set_field(FieldUpdate::Patch(patch), true);
    }

    /// Entrega una entrada cruda al step actual (`on_input`) y aplica las
    /// fusiones que éste encole.
    pub fn input(&mut self, field: &str, raw: &str) {
        let mut sink = FieldSink::new();
        match self.current_step() {
            Some(step) => step.on_input(&self.value, field, raw, &mut sink),
            None => {
                warn!("flow {}: input for `{field}` ignored, no active step", self.flow_id);
                return;
            }
        }
        self.apply_sink(sink);
    }

    /// Invoca el contrato de render del step actual y aplica lo que haya
    /// encolado en el sink.
    pub fn render_current(&mut self) -> Option<V> {
        let mut sink = FieldSink::new();
        let view = {
            let step = self.current_step()?;
            let props = StepProps { value: &self.value,
                                    errors: &self.errors,
                                    attempted_advance: self.attempted_advance };
            step.render(&props, &mut sink)
        };
        self.apply_sink(sink);
        Some(view)
    }

    /// Valida el step actual y, si pasa, avanza o (en el último) envía.
    pub async fn advance(&mut self) -> Advance {
        self.attempted_advance = true;
        let checked = self.current_step().map(|s| (s.id().to_string(), s.validate(&self.value)));
        let Some((step_id, result)) = checked else {
            // Sin steps activos: estado degenerado, se envía directamente.
            return Advance::Submitted(self.submit().await);
        };

        match result {
            Some(result) if !result.is_valid() => {
                self.errors = result.into_errors();
                let errors = self.errors.clone();
                debug!("flow {}: step `{step_id}` blocked by {} error(s)", self.flow_id, errors.len());
                self.record(FlowEventKind::ValidationFailed { step_id,
                                                              errors: errors.clone() });
                return Advance::Blocked(errors);
            }
            _ => self.errors.clear(),
        }

        if self.current < self.active.len() {
            let from = self.current;
            self.current += 1;
            self.attempted_advance = false;
            self.errors.clear();
            let to_id = self.current_step_id().unwrap_or_default().to_string();
            debug!("flow {}: {step_id} -> {to_id}", self.flow_id);
            self.record(FlowEventKind::StepAdvanced { from: step_id, to: to_id });
            Advance::Moved { from, to: self.current }
        } else {
            Advance::Submitted(self.submit().await)
        }
    }

    /// Retrocede un step. No-op (devuelve `false`) en el primero.
    pub fn retreat(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.move_back_to(self.current - 1);
        true
    }

    /// Retrocede hasta un step activo anterior al actual (p. ej. el primero
    /// inválido tras un envío rechazado). `false` si no es un step activo
    /// anterior.
    pub fn retreat_to(&mut self, step_id: &str) -> bool {
        let target = self.active
                         .iter()
                         .position(|&i| self.definition.steps[i].id() == step_id)
                         .map(|pos| pos + 1);
        match target {
            Some(index) if index < self.current => {
                self.move_back_to(index);
                true
            }
            _ => false,
        }
    }

    /// Revalida todos los steps activos y, si todos pasan, invoca el
    /// callback del host con el valor final.
    ///
    /// Los errores del callback se registran y no se propagan.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.attempted_advance = true;

        let mut aggregated = FieldErrors::new();
        let mut invalid_steps = Vec::new();
        for &idx in &self.active {
            let step = &self.definition.steps[idx];
            if let Some(result) = step.validate(&self.value) {
                if !result.is_valid() {
                    invalid_steps.push(step.id().to_string());
                    aggregated.extend(result.into_errors());
                }
            }
        }
        self.errors = aggregated;

        if !invalid_steps.is_empty() {
            debug!("flow {}: submission rejected, invalid steps {:?}", self.flow_id, invalid_steps);
            self.record(FlowEventKind::SubmissionRejected { invalid_steps: invalid_steps.clone() });
            return SubmitOutcome::Rejected { invalid_steps };
        }

        self.submitting.send_replace(true);
        self.record(FlowEventKind::SubmissionStarted);

        let result = self.handler.submit(self.value.clone()).await;
        let outcome = match result {
            Ok(()) => {
                let fingerprint = self.value_fingerprint();
                self.record(FlowEventKind::SubmissionSucceeded { fingerprint });
                SubmitOutcome::Completed
            }
            Err(err) => {
                error!("flow {}: form submission error: {err}", self.flow_id);
                self.record(FlowEventKind::SubmissionFailed { error: err });
                SubmitOutcome::CallbackFailed
            }
        };

        self.submitting.send_replace(false);
        outcome
    }

    // ------------------------------------------------------------------
    // Internos
    // ------------------------------------------------------------------

    fn record(&mut self, kind: FlowEventKind) {
        let _ = self.event_store.append_kind(self.flow_id, kind);
    }

    fn compute_active(&self) -> Vec<usize> {
        self.definition
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.should_skip(&self.value))
            .map(|(i, _)| i)
            .collect()
    }

    /// Recalcula los steps activos. Si el step actual sigue activo se le
    /// sigue por id; si desapareció, el índice se recorta a la nueva
    /// longitud.
    fn recompute_active(&mut self) {
        let next = self.compute_active();
        if next == self.active {
            return;
        }
        let current_def = self.active.get(self.current - 1).copied();
        self.current = match current_def.and_then(|idx| next.iter().position(|&i| i == idx)) {
            Some(pos) => pos + 1,
            None => self.current.min(next.len()).max(1),
        };
        self.active = next;
        let active_steps = self.active_step_ids();
        debug!("flow {}: active steps now {:?}", self.flow_id, active_steps);
        self.record(FlowEventKind::ActiveStepsChanged { active_steps,
                                                        current_index: self.current });
    }

    fn move_back_to(&mut self, index: usize) {
        let from = self.current_step_id().unwrap_or_default().to_string();
        self.current = index;
        self.errors.clear();
        self.attempted_advance = false;
        let to = self.current_step_id().unwrap_or_default().to_string();
        self.record(FlowEventKind::StepRetreated { from, to });
    }

    fn apply_sink(&mut self, mut sink: FieldSink) {
        for (update, should_validate) in sink.drain() {
            self.set_field(update, should_validate);
        }
    }

    fn value_fingerprint(&self) -> String {
        let value = serde_json::to_value(&self.value).unwrap_or_default();
        hash_value(&json!({
            "engine_version": crate::constants::ENGINE_VERSION,
            "definition_hash": self.definition.definition_hash,
            "value": value,
        }))
    }
}

fn check_initial<T: Serialize>(initial: &T) -> Result<(), ConfigurationError> {
    match serde_json::to_value(initial) {
        Ok(Value::Object(_)) => Ok(()),
        Ok(other) => Err(ConfigurationError::MalformedInitialValue(format!("expected object, got {other}"))),
        Err(e) => Err(ConfigurationError::MalformedInitialValue(e.to_string())),
    }
}
