//! The synthetic environment the agent perceives
//!
//! An environment is an ordered list of entries. A driver may add or remove
//! entries between cycles; the agent never mutates it.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agent::actions::Action;
use crate::capability::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Resource,
    Opportunity,
    Threat,
    Api,
    Unknown,
}

impl EntryKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntryKind::Resource => "resource",
            EntryKind::Opportunity => "opportunity",
            EntryKind::Threat => "threat",
            EntryKind::Api => "api",
            EntryKind::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EnvironmentEntry {
    pub id: String,
    pub kind: EntryKind,
    pub relevance: f32,
    pub intensity: f32,
    pub description: String,
    /// Free-form qualities such as color, emotion, meaning or texture
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Actions this entry offers, subject to boundary filtering
    #[serde(default)]
    pub declared_actions: Vec<Action>,
    #[serde(skip)]
    pub capability: Option<Arc<dyn Capability>>,
}

impl std::fmt::Debug for EnvironmentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentEntry")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("relevance", &self.relevance)
            .field("intensity", &self.intensity)
            .field("description", &self.description)
            .field("attributes", &self.attributes)
            .field("declared_actions", &self.declared_actions)
            .field("capability", &self.capability.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

impl EnvironmentEntry {
    pub fn new(
        id: impl Into<String>,
        kind: EntryKind,
        relevance: f32,
        intensity: f32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            relevance,
            intensity,
            description: description.into(),
            attributes: BTreeMap::new(),
            declared_actions: Vec::new(),
            capability: None,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.declared_actions.push(action);
        self
    }

    pub fn with_capability(mut self, capability: Arc<dyn Capability>) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Number of populated fields, used as a crude complexity signal
    pub fn field_count(&self) -> usize {
        let base = 5; // id, kind, relevance, intensity, description
        base + self.attributes.len()
            + usize::from(!self.declared_actions.is_empty())
            + usize::from(self.capability.is_some())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    entries: Vec<EnvironmentEntry>,
}

impl Environment {
    pub fn new(entries: Vec<EnvironmentEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[EnvironmentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: EnvironmentEntry) {
        self.entries.push(entry);
    }

    pub fn remove(&mut self, id: &str) -> Option<EnvironmentEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&EnvironmentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut EnvironmentEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_find_remove() {
        let mut env = Environment::default();
        env.add(EnvironmentEntry::new("r1", EntryKind::Resource, 0.8, 0.5, "library"));
        assert_eq!(env.len(), 1);
        assert!(env.find("r1").is_some());
        assert!(env.remove("r1").is_some());
        assert!(env.remove("r1").is_none());
        assert!(env.is_empty());
    }

    #[test]
    fn test_field_count_includes_attributes() {
        let entry = EnvironmentEntry::new("r1", EntryKind::Resource, 0.8, 0.5, "library")
            .with_attribute("color", "blue")
            .with_attribute("emotion", "positive");
        assert_eq!(entry.field_count(), 7);
    }
}
