//! Action-definition store.
//!
//! The boundary interface the reconcilers and dispatch resolution work
//! against, plus an in-memory implementation. Names are unique across the
//! whole catalog regardless of origin.

use serde_json::Value;
use std::sync::Mutex;

use crate::types::ActionDefinition;
use warden_core::WardenError;

/// Fields an update may refresh on an existing definition.
///
/// `action_type` is deliberately absent: a definition's origin tag is set at
/// creation and reconcilers never rewrite it.
#[derive(Debug, Clone, Default)]
pub struct DefinitionUpdate {
    pub description: Option<String>,
    pub options: Option<Value>,
}

/// Boundary interface to the action-definition store.
///
/// Each call is individually atomic; callers serialize whole reconciliation
/// passes externally (this engine provides no cross-call locking).
pub trait DefinitionStore: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<ActionDefinition>;
    fn create(&self, definition: ActionDefinition) -> Result<ActionDefinition, WardenError>;
    fn update(&self, name: &str, fields: DefinitionUpdate)
        -> Result<ActionDefinition, WardenError>;
    fn all(&self) -> Vec<ActionDefinition>;
}

/// In-memory definition store with unique-name enforcement.
pub struct MemoryDefinitionStore {
    definitions: Mutex<Vec<ActionDefinition>>,
}

impl MemoryDefinitionStore {
    pub fn new() -> Self {
        Self {
            definitions: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ActionDefinition>>, WardenError> {
        self.definitions
            .lock()
            .map_err(|e| WardenError::Store(format!("Lock poisoned: {}", e)))
    }
}

impl Default for MemoryDefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore for MemoryDefinitionStore {
    fn find_by_name(&self, name: &str) -> Option<ActionDefinition> {
        let definitions = match self.definitions.lock() {
            Ok(d) => d,
            Err(_) => return None,
        };
        definitions.iter().find(|d| d.name == name).cloned()
    }

    fn create(&self, definition: ActionDefinition) -> Result<ActionDefinition, WardenError> {
        let mut definitions = self.lock()?;
        if definitions.iter().any(|d| d.name == definition.name) {
            return Err(WardenError::Store(format!(
                "Duplicate action definition name: {}",
                definition.name
            )));
        }
        definitions.push(definition.clone());
        Ok(definition)
    }

    fn update(
        &self,
        name: &str,
        fields: DefinitionUpdate,
    ) -> Result<ActionDefinition, WardenError> {
        let mut definitions = self.lock()?;
        let definition = definitions
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| {
                WardenError::Store(format!("Action definition not found: {}", name))
            })?;

        if let Some(description) = fields.description {
            definition.description = description;
        }
        if let Some(options) = fields.options {
            definition.options = options;
        }

        Ok(definition.clone())
    }

    fn all(&self) -> Vec<ActionDefinition> {
        match self.definitions.lock() {
            Ok(d) => d.clone(),
            Err(_) => vec![],
        }
    }
}
