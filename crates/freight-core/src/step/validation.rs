use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Campo -> mensaje legible. Sólo contiene claves de campos inválidos.
pub type FieldErrors = BTreeMap<String, String>;

/// Resultado de validar un step.
///
/// `is_valid` se deriva de `errors`, por lo que `is_valid() == errors.is_empty()`
/// se cumple por construcción.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: FieldErrors,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Registra un error; un segundo error sobre el mismo campo reemplaza al
    /// primero.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Atajo: registra `message` cuando `ok` es falso.
    pub fn require(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

impl<K: Into<String>, M: Into<String>> FromIterator<(K, M)> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        Self { errors: iter.into_iter().map(|(k, m)| (k.into(), m.into())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_errors() {
        let mut r = ValidationResult::valid();
        assert!(r.is_valid());
        r.require(true, "origin", "required");
        assert!(r.is_valid());
        r.require(false, "destination", "Destination location is required");
        r.add_error("destination", "Destination must be different from origin");
        assert!(!r.is_valid());
        assert_eq!(r.errors().len(), 1);
        assert_eq!(r.errors()["destination"], "Destination must be different from origin");
    }
}
