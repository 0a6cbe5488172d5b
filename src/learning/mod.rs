//! Tabular value learning over (state, action) pairs
//!
//! One bootstrapped temporal-difference update per experience:
//! `new = old + α × (reward + γ × max_next − old)`, clamped to [0, 1],
//! followed by a uniform decay of every other entry. The decay makes the
//! final table depend on the order experiences arrive in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::actions::{Action, ActionKind};
use crate::core::types::SimTime;

pub const LEARNING_RATE: f32 = 0.1;
pub const DISCOUNT: f32 = 0.9;
pub const FORGETTING_RATE: f32 = 0.01;
/// Value assumed for a pair that has never been updated
pub const DEFAULT_VALUE: f32 = 0.5;
const MAX_MEMORY: usize = 1000;

/// Identifier of a perceived state; "default" when nothing was perceived
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(pub String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn fallback() -> Self {
        Self("default".into())
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateActionKey {
    pub state: StateId,
    pub action: ActionKind,
}

impl StateActionKey {
    pub fn new(state: StateId, action: ActionKind) -> Self {
        Self { state, action }
    }
}

/// One (state, action, reward, next state) transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub state: StateId,
    pub action: Action,
    /// +1 for success, -1 for failure
    pub reward: f32,
    pub next_state: Option<StateId>,
    pub at: SimTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningReflection {
    pub memory_size: usize,
    pub average_value: f32,
    pub learning_rate: f32,
}

#[derive(Debug, Clone, Default)]
pub struct LearningSystem {
    memory: Vec<Experience>,
    values: BTreeMap<StateActionKey, f32>,
}

impl LearningSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for a pair, `DEFAULT_VALUE` if never updated
    pub fn value(&self, state: &StateId, action: ActionKind) -> f32 {
        self.values
            .get(&StateActionKey::new(state.clone(), action))
            .copied()
            .unwrap_or(DEFAULT_VALUE)
    }

    pub fn values(&self) -> &BTreeMap<StateActionKey, f32> {
        &self.values
    }

    pub fn memory(&self) -> &[Experience] {
        &self.memory
    }

    /// Remember an experience and apply one value update
    pub fn store_experience(&mut self, experience: Experience) {
        self.update_values(&experience);
        self.memory.push(experience);
        if self.memory.len() > MAX_MEMORY {
            let excess = self.memory.len() - MAX_MEMORY;
            self.memory.drain(..excess);
        }
    }

    fn update_values(&mut self, experience: &Experience) {
        let key = StateActionKey::new(experience.state.clone(), experience.action.kind);
        let current = self.values.get(&key).copied().unwrap_or(DEFAULT_VALUE);
        let max_next = self.max_next_value(experience.next_state.as_ref());
        let updated = current + LEARNING_RATE * (experience.reward + DISCOUNT * max_next - current);

        for (other, value) in self.values.iter_mut() {
            if *other != key {
                *value = (*value * (1.0 - FORGETTING_RATE)).max(0.0);
            }
        }
        tracing::debug!(
            state = %experience.state.0,
            action = %experience.action.kind,
            reward = experience.reward,
            value = updated.clamp(0.0, 1.0),
            "Value updated"
        );
        self.values.insert(key, updated.clamp(0.0, 1.0));
    }

    fn max_next_value(&self, next_state: Option<&StateId>) -> f32 {
        let Some(state) = next_state else {
            return 0.0;
        };
        Self::possible_actions()
            .iter()
            .map(|action| self.value(state, action.kind))
            .fold(0.0, f32::max)
    }

    /// The fixed action repertoire considered by the value table
    pub fn possible_actions() -> Vec<Action> {
        vec![Action::observe(), Action::engage_any(), Action::avoid_any()]
    }

    /// Highest-valued action for a state; ties go to the first listed
    pub fn best_action(&self, state: &StateId) -> Action {
        let mut best: Option<(Action, f32)> = None;
        for action in Self::possible_actions() {
            let value = self.value(state, action.kind);
            match &best {
                Some((_, best_value)) if value <= *best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action).unwrap_or_else(Action::observe)
    }

    pub fn reflect(&self) -> LearningReflection {
        let average_value = if self.values.is_empty() {
            0.0
        } else {
            self.values.values().sum::<f32>() / self.values.len() as f32
        };
        LearningReflection {
            memory_size: self.memory.len(),
            average_value,
            learning_rate: LEARNING_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(state: &str, action: Action, reward: f32) -> Experience {
        Experience {
            state: StateId::new(state),
            action,
            reward,
            next_state: Some(StateId::new(state)),
            at: 0,
        }
    }

    #[test]
    fn test_unseen_pair_defaults() {
        let learning = LearningSystem::new();
        assert_eq!(learning.value(&StateId::new("s"), ActionKind::Observe), DEFAULT_VALUE);
    }

    #[test]
    fn test_single_update_matches_rule() {
        let mut learning = LearningSystem::new();
        learning.store_experience(experience("s", Action::observe(), 1.0));
        // 0.5 + 0.1 × (1 + 0.9 × 0.5 − 0.5) = 0.595
        let v = learning.value(&StateId::new("s"), ActionKind::Observe);
        assert!((v - 0.595).abs() < 1e-5);
    }

    #[test]
    fn test_negative_reward_lowers_value() {
        let mut learning = LearningSystem::new();
        learning.store_experience(experience("s", Action::observe(), -1.0));
        assert!(learning.value(&StateId::new("s"), ActionKind::Observe) < DEFAULT_VALUE);
    }

    #[test]
    fn test_other_entries_decay() {
        let mut learning = LearningSystem::new();
        learning.store_experience(experience("s", Action::observe(), 1.0));
        let before = learning.value(&StateId::new("s"), ActionKind::Observe);
        learning.store_experience(experience("t", Action::observe(), 1.0));
        let after = learning.value(&StateId::new("s"), ActionKind::Observe);
        assert!((after - before * 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_order_matters() {
        let mut ab = LearningSystem::new();
        ab.store_experience(experience("a", Action::observe(), 1.0));
        ab.store_experience(experience("b", Action::observe(), -1.0));

        let mut ba = LearningSystem::new();
        ba.store_experience(experience("b", Action::observe(), -1.0));
        ba.store_experience(experience("a", Action::observe(), 1.0));

        assert_ne!(ab.values(), ba.values());
    }

    #[test]
    fn test_best_action_prefers_learned_value() {
        let mut learning = LearningSystem::new();
        let state = StateId::new("s");
        assert_eq!(learning.best_action(&state).kind, ActionKind::Observe);

        for _ in 0..3 {
            learning.store_experience(experience("s", Action::avoid_any(), 1.0));
        }
        assert_eq!(learning.best_action(&state).kind, ActionKind::Avoid);
    }

    #[test]
    fn test_no_next_state_bootstraps_zero() {
        let mut learning = LearningSystem::new();
        learning.store_experience(Experience {
            state: StateId::new("s"),
            action: Action::observe(),
            reward: 1.0,
            next_state: None,
            at: 0,
        });
        // 0.5 + 0.1 × (1 − 0.5) = 0.55
        let v = learning.value(&StateId::new("s"), ActionKind::Observe);
        assert!((v - 0.55).abs() < 1e-5);
    }
}
