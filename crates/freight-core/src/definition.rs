//! Definición inmutable del flujo: lista ordenada de steps + hash de la
//! secuencia de ids.

use std::collections::HashSet;
use std::fmt;

use serde_json::json;

use crate::errors::ConfigurationError;
use crate::hashing::hash_value;
use crate::step::StepDefinition;

pub struct FlowDefinition<T, V> {
    pub steps: Vec<Box<dyn StepDefinition<T, V>>>,
    pub definition_hash: String,
}

impl<T, V> FlowDefinition<T, V> {
    /// Valida la lista (no vacía, ids únicos) y calcula `definition_hash`.
    pub fn new(steps: Vec<Box<dyn StepDefinition<T, V>>>) -> Result<Self, ConfigurationError> {
        if steps.is_empty() {
            return Err(ConfigurationError::EmptyDefinition);
        }
        let mut seen = HashSet::new();
        for s in &steps {
            if !seen.insert(s.id()) {
                return Err(ConfigurationError::DuplicateStepId(s.id().to_string()));
            }
        }
        let ids: Vec<&str> = steps.iter().map(|s| s.id()).collect();
        let definition_hash = hash_value(&json!(ids));
        Ok(Self { steps, definition_hash })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn position(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == step_id)
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }
}

impl<T, V> fmt::Debug for FlowDefinition<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowDefinition")
         .field("steps", &self.step_ids())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}
