use crate::field::FieldSink;

use super::{FieldErrors, ValidationResult};

/// Lo que un step ve al renderizarse.
#[derive(Debug)]
pub struct StepProps<'a, T> {
    pub value: &'a T,
    pub errors: &'a FieldErrors,
    /// El usuario ya intentó avanzar desde este step al menos una vez.
    pub attempted_advance: bool,
}

/// Trait que define un Step sobre el valor agregado `T`, renderizado como `V`.
///
/// Implementaciones deben ser puras respecto al valor recibido: toda
/// modificación pasa por el `FieldSink`.
pub trait StepDefinition<T, V>: Send + Sync {
    /// Identificador estable y único dentro del Flow.
    fn id(&self) -> &str;

    /// Etiqueta de presentación. El engine no la usa para decidir nada.
    fn title(&self) -> &str {
        self.id()
    }

    /// Contrato de render del host.
    fn render(&self, props: &StepProps<'_, T>, sink: &mut FieldSink) -> V;

    /// `None` significa que el step no declara validador (siempre válido).
    fn validate(&self, _value: &T) -> Option<ValidationResult> {
        None
    }

    /// `true` excluye el step de la secuencia activa.
    fn should_skip(&self, _value: &T) -> bool {
        false
    }

    /// Traduce una entrada cruda del host a actualizaciones tipadas.
    fn on_input(&self, _value: &T, field: &str, raw: &str, sink: &mut FieldSink) {
        sink.set(field, raw);
    }
}
