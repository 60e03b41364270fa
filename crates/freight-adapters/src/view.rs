//! Vista neutral de un step.
//!
//! No tiene semántica para el core: es el `V` con el que se instancia el
//! engine del flujo de cotización. El binario la imprime como texto.

use std::fmt;

use freight_core::FieldErrors;
use freight_domain::LocationType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select { options: Vec<String> },
    Location { location_type: LocationType },
    /// Cantidades por tipo de contenedor (`containerCount.<id>`).
    Containers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub step_id: String,
    pub title: String,
    pub fields: Vec<FieldView>,
    pub notes: Vec<String>,
}

impl FormView {
    pub fn new(step_id: &str, title: &str) -> Self {
        Self { step_id: step_id.to_string(),
               title: title.to_string(),
               fields: Vec::new(),
               notes: Vec::new() }
    }

    /// Añade un campo tomando su error (si lo hay) de `errors`.
    pub fn field(mut self,
                 name: &str,
                 label: &str,
                 kind: FieldKind,
                 value: impl Into<String>,
                 required: bool,
                 errors: &FieldErrors)
                 -> Self {
        self.fields.push(FieldView { name: name.to_string(),
                                     label: label.to_string(),
                                     kind,
                                     value: value.into(),
                                     required,
                                     error: errors.get(name).cloned() });
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for field in &self.fields {
            let mark = if field.required { "*" } else { "" };
            write!(f, "  {}{} [{}]: {}", field.label, mark, field.name, field.value)?;
            match &field.kind {
                FieldKind::Select { options } if !options.is_empty() => {
                    write!(f, "  ({})", options.join(" | "))?
                }
                FieldKind::Location { location_type } => write!(f, "  ({location_type})")?,
                _ => {}
            }
            writeln!(f)?;
            if let Some(err) = &field.error {
                writeln!(f, "    ! {err}")?;
            }
        }
        for note in &self.notes {
            writeln!(f, "  - {note}")?;
        }
        Ok(())
    }
}

/// Formatea un opcional como texto de campo (vacío si no hay valor).
pub(crate) fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
