//! Actualizaciones de campos sobre el valor agregado.
//!
//! El valor agregado `T` se trata como un objeto JSON plano: cada
//! actualización se serializa, se fusiona de forma "shallow" (las claves
//! nuevas reemplazan a las viejas) y se vuelve a deserializar a `T`. Así el
//! engine puede ser genérico sobre `T` sin perder el chequeo de tipos: una
//! fusión que produce un `T` inválido se rechaza completa.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::InvalidArgument;

/// Las dos convenciones de llamada de `set_field`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Un solo campo. `value: None` es un uso incorrecto y se rechaza.
    Field { name: String, value: Option<Value> },
    /// Varios campos que deben cambiar juntos. Debe ser un objeto JSON.
    Patch(Value),
}

impl FieldUpdate {
    pub fn field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldUpdate::Field { name: name.into(),
                             value: Some(value.into()) }
    }

    pub fn patch(value: Value) -> Self {
        FieldUpdate::Patch(value)
    }

    /// Convierte la actualización en un mapa listo para fusionar.
    pub fn into_patch(self) -> Result<Map<String, Value>, InvalidArgument> {
        match self {
            FieldUpdate::Field { name, value: Some(v) } => {
                let mut m = Map::new();
                m.insert(name, v);
                Ok(m)
            }
            FieldUpdate::Field { name, value: None } => Err(InvalidArgument::MissingValue(name)),
            FieldUpdate::Patch(Value::Object(m)) => Ok(m),
            FieldUpdate::Patch(_) => Err(InvalidArgument::PatchNotObject),
        }
    }
}

impl<S: Into<String>> From<(S, Option<Value>)> for FieldUpdate {
    fn from((name, value): (S, Option<Value>)) -> Self {
        FieldUpdate::Field { name: name.into(), value }
    }
}

impl From<Map<String, Value>> for FieldUpdate {
    fn from(m: Map<String, Value>) -> Self {
        FieldUpdate::Patch(Value::Object(m))
    }
}

impl From<Value> for FieldUpdate {
    fn from(v: Value) -> Self {
        FieldUpdate::Patch(v)
    }
}

/// Cola de actualizaciones pedidas por un step (el "mutation callback").
///
/// Los steps nunca tocan el valor agregado; sólo encolan aquí y el engine
/// aplica la cola, en orden, cuando el step devuelve el control.
#[derive(Debug, Default)]
pub struct FieldSink {
    queued: Vec<(FieldUpdate, bool)>,
}

impl FieldSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encola `name = value` con revalidación en vivo.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.push(FieldUpdate::field(name, value), true);
    }

    /// Igual que `set` pero sin revalidar el step actual.
    pub fn set_quiet(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.push(FieldUpdate::field(name, value), false);
    }

    pub fn patch(&mut self, value: Value) {
        self.push(FieldUpdate::Patch(value), true);
    }

    pub fn push(&mut self, update: FieldUpdate, should_validate: bool) {
        self.queued.push((update, should_validate));
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (FieldUpdate, bool)> + '_ {
        self.queued.drain(..)
    }
}

/// Merge shallow: keys from `b` override keys from `a` when both are objects.
/// Cuando alguno de los dos valores no es objeto, `b` tiene precedencia.
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (k, v) in mb.iter() {
                out.insert(k.clone(), v.clone());
            }
            Value::Object(out)
        }
        (_, other) => other.clone(),
    }
}

/// Aplica `update` sobre `current` y devuelve el nuevo valor junto con las
/// claves cuyo valor cambió (vacío si la fusión no cambia nada). Sólo se
/// aceptan claves que `current` ya serializa.
pub fn apply_update<T>(current: &T, update: FieldUpdate) -> Result<(T, Vec<String>), InvalidArgument>
    where T: Serialize + DeserializeOwned
{
    let base = serde_json::to_value(current).map_err(|e| InvalidArgument::Rejected(e.to_string()))?;
    let patch = update.into_patch()?;
    let Value::Object(fields) = &base else {
        return Err(InvalidArgument::Rejected("aggregated value is not an object".into()));
    };
    if let Some(unknown) = patch.keys().find(|k| !fields.contains_key(*k)) {
        return Err(InvalidArgument::UnknownField(unknown.clone()));
    }
    let changed: Vec<String> = patch.iter()
                                    .filter(|(k, v)| fields.get(k.as_str()) != Some(*v))
                                    .map(|(k, _)| k.clone())
                                    .collect();
    let merged = merge_json(&base, &Value::Object(patch));
    let next = serde_json::from_value(merged).map_err(|e| InvalidArgument::Rejected(e.to_string()))?;
    Ok((next, changed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Form {
        name: String,
        count: Option<u32>,
    }

    fn form() -> Form {
        Form { name: String::new(), count: None }
    }

    #[test]
    fn single_field_update_merges_one_key() {
        let (next, keys) = apply_update(&form(), FieldUpdate::field("count", 3)).expect("merge");
        assert_eq!(next.count, Some(3));
        assert_eq!(keys, vec!["count".to_string()]);
    }

    #[test]
    fn unchanged_values_report_no_keys() {
        let current = Form { name: "a".into(), count: Some(2) };
        let (next, keys) = apply_update(&current, FieldUpdate::patch(json!({"name": "a", "count": 2}))).expect("merge");
        assert_eq!(next, current);
        assert!(keys.is_empty());
        let (_, keys) = apply_update(&current, FieldUpdate::patch(json!({"name": "a", "count": 3}))).expect("merge");
        assert_eq!(keys, vec!["count".to_string()]);
    }

    #[test]
    fn single_field_without_value_is_rejected() {
        let err = apply_update(&form(), FieldUpdate::from(("count", None::<Value>))).unwrap_err();
        assert_eq!(err, InvalidArgument::MissingValue("count".into()));
    }

    #[test]
    fn unknown_and_mistyped_fields_are_rejected() {
        assert_eq!(apply_update(&form(), FieldUpdate::field("nope", 1)).unwrap_err(),
                   InvalidArgument::UnknownField("nope".into()));
        assert!(matches!(apply_update(&form(), FieldUpdate::field("count", "three")),
                         Err(InvalidArgument::Rejected(_))));
        assert_eq!(apply_update(&form(), FieldUpdate::patch(json!([1, 2]))).unwrap_err(),
                   InvalidArgument::PatchNotObject);
    }

    #[test]
    fn sink_preserves_order_and_flags() {
        let mut sink = FieldSink::new();
        sink.set("name", "a");
        sink.set_quiet("count", 1);
        let drained: Vec<_> = sink.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(drained[0].1);
        assert!(!drained[1].1);
        assert!(sink.is_empty());
    }
}
