//! Ethical boundary filtering over the shared action vocabulary

use serde::{Deserialize, Serialize};

pub use crate::core::actions::{
    Action, ActionCategory, ActionKind, CapabilityCall, BENEFIT_HELP, BENEFIT_INTEGRITY, BENEFIT_KNOWLEDGE,
};

/// An ethical boundary with its importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub name: String,
    pub importance: f32,
}

impl Boundary {
    pub fn new(name: impl Into<String>, importance: f32) -> Self {
        Self {
            name: name.into(),
            importance,
        }
    }

    /// Whether taking `action` would cross this boundary
    pub fn forbids(&self, action: &Action) -> bool {
        matches!(
            (self.name.as_str(), action.kind),
            ("non-violence", ActionKind::Attack) | ("honesty", ActionKind::Deceive)
        )
    }
}

/// Drop every action that crosses any boundary
pub fn filter_by_boundaries(actions: Vec<Action>, boundaries: &[Boundary]) -> Vec<Action> {
    actions
        .into_iter()
        .filter(|action| {
            let violated = boundaries.iter().find(|b| b.forbids(action));
            if let Some(boundary) = violated {
                tracing::debug!(action = %action.kind, boundary = %boundary.name, "Action filtered by boundary");
            }
            violated.is_none()
        })
        .collect()
}
