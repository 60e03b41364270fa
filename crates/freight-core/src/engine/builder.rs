//! Builder para `FlowEngine`.
//!
//! `EngineBuilderInit` sólo conoce la store; `first_step` fija los tipos del
//! valor agregado `T` y de la vista `V`, y a partir de ahí `add_step` sólo
//! acepta steps compatibles con ese par de tipos.
//!
//! ```ignore
//! let engine = EngineBuilderInit::new()
//!     .first_step(ShippingDetailsStep::new(today))
//!     .add_step(LocationsStep)
//!     .build(QuoteFormData::default(), submit_fn(|req| async move { Ok(()) }))?;
//! ```

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::engine::{FlowEngine, SubmitHandler};
use crate::errors::ConfigurationError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::step::StepDefinition;

/// Estado inicial del builder: sólo la store de eventos.
#[derive(Debug, Default)]
pub struct EngineBuilderInit<E: EventStore> {
    pub event_store: E,
}

impl EngineBuilderInit<InMemoryEventStore> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: EventStore> EngineBuilderInit<E> {
    pub fn with_store(event_store: E) -> Self {
        Self { event_store }
    }

    /// Define el primer paso y transiciona al builder completo.
    pub fn first_step<T, V, S>(self, step: S) -> EngineBuilder<T, V, E>
        where S: StepDefinition<T, V> + 'static
    {
        EngineBuilder { event_store: self.event_store,
                        steps: vec![Box::new(step)],
                        _types: PhantomData }
    }
}

/// Builder principal que acumula pasos.
pub struct EngineBuilder<T, V, E: EventStore> {
    event_store: E,
    steps: Vec<Box<dyn StepDefinition<T, V>>>,
    _types: PhantomData<fn() -> (T, V)>,
}

impl<T, V, E> EngineBuilder<T, V, E>
    where T: Serialize + DeserializeOwned + Clone + Send + 'static,
          E: EventStore
{
    #[inline]
    pub fn add_step<S>(mut self, next: S) -> Self
        where S: StepDefinition<T, V> + 'static
    {
        self.steps.push(Box::new(next));
        self
    }

    /// Añade pasos ya empaquetados (p. ej. una lista construida por un adapter).
    pub fn add_boxed(mut self, steps: impl IntoIterator<Item = Box<dyn StepDefinition<T, V>>>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Construye el engine. Los errores de configuración se detectan aquí.
    pub fn build<H>(self, initial: T, handler: H) -> Result<FlowEngine<T, V, E>, ConfigurationError>
        where H: SubmitHandler<T> + 'static
    {
        FlowEngine::initialize_with_store(self.event_store, self.steps, initial, handler)
    }
}
