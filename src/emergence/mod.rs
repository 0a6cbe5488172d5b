//! Emergence - patterns across subsystem interactions
//!
//! Subsystems register as components of an undirected graph. Each
//! `evolve` call is one tick: component states drift with their
//! connectivity, every interaction produces an outcome, and the detectors
//! re-run over the new state.
//!
//! Complexity is `0.2 × components + 0.3 × interactions + 0.5 × mean
//! connections`. It only grows while components are registered before the
//! interactions that connect them; registering a component after
//! interactions exist lowers the mean connection count.

pub mod detectors;

pub use detectors::{Finding, FunctionKind};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::{unit, variance, ComponentId, SimTime};

const MAX_OUTCOMES: usize = 10;
const OUTCOMES_KEPT: usize = 5;
const STABILITY_WINDOW: usize = 3;
/// Findings younger than this count towards adaptability
pub const RECENCY_WINDOW_MS: SimTime = 30_000;
const ACTIVE_INTERACTION: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentProfile {
    pub kind: String,
    pub role: String,
}

impl ComponentProfile {
    pub fn new(kind: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            role: role.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentState {
    pub activity: f32,
    pub coherence: f32,
    pub stability: f32,
    pub adaptability: f32,
}

impl Default for ComponentState {
    fn default() -> Self {
        Self {
            activity: 0.5,
            coherence: 0.5,
            stability: 0.5,
            adaptability: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergenceComponent {
    pub id: ComponentId,
    pub profile: ComponentProfile,
    pub state: ComponentState,
    /// One entry per interaction touching this component
    pub connections: Vec<ComponentId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Feedback,
    Synchronization,
    Amplification,
    Reinforcement,
    Coordination,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    pub synergy: f32,
    pub interference: f32,
    pub net_effect: f32,
    pub at: SimTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub components: (ComponentId, ComponentId),
    pub kind: InteractionKind,
    pub strength: f32,
    pub created_at: SimTime,
    pub outcomes: Vec<InteractionOutcome>,
}

impl Interaction {
    pub fn new(a: ComponentId, b: ComponentId, kind: InteractionKind, strength: f32, created_at: SimTime) -> Self {
        Self {
            components: (a, b),
            kind,
            strength,
            created_at,
            outcomes: Vec::new(),
        }
    }

    pub fn involves(&self, id: &ComponentId) -> bool {
        &self.components.0 == id || &self.components.1 == id
    }

    pub fn shares_component(&self, other: &Interaction) -> bool {
        other.involves(&self.components.0) || other.involves(&self.components.1)
    }

    fn record(&mut self, outcome: InteractionOutcome) {
        self.outcomes.push(outcome);
        if self.outcomes.len() > MAX_OUTCOMES {
            let excess = self.outcomes.len() - OUTCOMES_KEPT;
            self.outcomes.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergentProperty {
    pub finding: Finding,
    pub description: String,
    pub detected_at: SimTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    pub avg_activity: f32,
    pub avg_coherence: f32,
    pub stability: f32,
    pub adaptability: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmergenceReport {
    pub complexity: f32,
    pub emergent_property_count: usize,
    pub active_interaction_count: usize,
    pub system_state: SystemState,
}

#[derive(Debug, Clone, Default)]
pub struct EmergenceSystem {
    components: Vec<EmergenceComponent>,
    interactions: Vec<Interaction>,
    properties: BTreeMap<String, EmergentProperty>,
    complexity: f32,
}

impl EmergenceSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self) -> &[EmergenceComponent] {
        &self.components
    }

    pub fn component(&self, id: &ComponentId) -> Option<&EmergenceComponent> {
        self.components.iter().find(|c| &c.id == id)
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn properties(&self) -> &BTreeMap<String, EmergentProperty> {
        &self.properties
    }

    pub fn complexity(&self) -> f32 {
        self.complexity
    }

    /// Register a component; re-registering an id replaces its profile
    pub fn add_component(&mut self, id: impl Into<String>, profile: ComponentProfile) {
        let id = ComponentId::new(id);
        match self.components.iter_mut().find(|c| c.id == id) {
            Some(existing) => existing.profile = profile,
            None => self.components.push(EmergenceComponent {
                id,
                profile,
                state: ComponentState::default(),
                connections: Vec::new(),
            }),
        }
        self.update_complexity();
    }

    /// Connect two components; unknown ids are recorded but not connected
    pub fn create_interaction(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        kind: InteractionKind,
        strength: f32,
        now: SimTime,
    ) {
        let a = ComponentId::new(a);
        let b = ComponentId::new(b);
        if let Some(component) = self.components.iter_mut().find(|c| c.id == a) {
            component.connections.push(b.clone());
        }
        if let Some(component) = self.components.iter_mut().find(|c| c.id == b) {
            component.connections.push(a.clone());
        }
        self.interactions.push(Interaction::new(a, b, kind, strength, now));
        self.update_complexity();
        self.check_for_emergence(now);
    }

    fn update_complexity(&mut self) {
        let count = self.components.len();
        let total_connections: usize = self.components.iter().map(|c| c.connections.len()).sum();
        let mean_connections = total_connections as f32 / count.max(1) as f32;
        self.complexity = count as f32 * 0.2 + self.interactions.len() as f32 * 0.3 + mean_connections * 0.5;
    }

    /// One tick of the emergence dynamics
    pub fn evolve(&mut self, rng: &mut dyn RandomSource, now: SimTime) -> EmergenceReport {
        self.update_component_states(rng);
        self.process_interactions(now);
        self.check_for_emergence(now);
        let report = self.report(now);
        tracing::debug!(
            complexity = report.complexity,
            properties = report.emergent_property_count,
            "Emergence evolved"
        );
        report
    }

    /// Current aggregate without advancing the dynamics
    pub fn report(&self, now: SimTime) -> EmergenceReport {
        EmergenceReport {
            complexity: self.complexity,
            emergent_property_count: self.properties.len(),
            active_interaction_count: self
                .interactions
                .iter()
                .filter(|i| i.strength > ACTIVE_INTERACTION)
                .count(),
            system_state: self.system_state(now),
        }
    }

    fn update_component_states(&mut self, rng: &mut dyn RandomSource) {
        for component in &mut self.components {
            let influence = component.connections.len() as f32 * 0.1;
            let noise = (rng.next_f32() - 0.5) * 0.1;
            component.state.activity = unit(component.state.activity + influence + noise);
            component.state.coherence = unit(component.state.coherence + influence * 0.5 + noise);
        }
    }

    fn process_interactions(&mut self, now: SimTime) {
        for interaction in &mut self.interactions {
            let activity = |id: &ComponentId| {
                self.components
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.state.activity)
            };
            let (Some(a), Some(b)) = (activity(&interaction.components.0), activity(&interaction.components.1)) else {
                continue;
            };
            let synergy = (a + b) / 2.0;
            let interference = (a - b).abs();
            interaction.record(InteractionOutcome {
                synergy,
                interference,
                net_effect: synergy - interference * 0.5,
                at: now,
            });
        }
    }

    fn check_for_emergence(&mut self, now: SimTime) {
        let mut found = Vec::new();
        if let Some(finding) = detectors::synchronization(&self.components) {
            found.push(("synchronization".to_string(), finding));
        }
        if let Some(finding) = detectors::hierarchy(&self.components) {
            found.push(("hierarchy".to_string(), finding));
        }
        for (index, finding) in detectors::functions(&self.interactions).into_iter().enumerate() {
            found.push((format!("function_{}", index), finding));
        }
        for (index, finding) in detectors::structures(&self.components).into_iter().enumerate() {
            found.push((format!("structure_{}", index), finding));
        }

        for (name, finding) in found {
            if !self.properties.contains_key(&name) {
                tracing::info!(property = %name, "Emergent property detected");
            }
            let description = finding.description().to_string();
            self.properties.insert(
                name,
                EmergentProperty {
                    finding,
                    description,
                    detected_at: now,
                },
            );
        }
    }

    pub fn system_state(&self, now: SimTime) -> SystemState {
        let count = self.components.len().max(1) as f32;
        SystemState {
            avg_activity: self.components.iter().map(|c| c.state.activity).sum::<f32>() / count,
            avg_coherence: self.components.iter().map(|c| c.state.coherence).sum::<f32>() / count,
            stability: self.stability(),
            adaptability: self.adaptability(now),
        }
    }

    /// `1 − variance` of each interaction's last three net effects
    fn stability(&self) -> f32 {
        let recent: Vec<f32> = self
            .interactions
            .iter()
            .flat_map(|i| {
                let start = i.outcomes.len().saturating_sub(STABILITY_WINDOW);
                i.outcomes[start..].iter().map(|o| o.net_effect)
            })
            .collect();
        match variance(&recent) {
            Some(v) => (1.0 - v).max(0.0),
            None => 0.5,
        }
    }

    fn adaptability(&self, now: SimTime) -> f32 {
        let recent = self
            .properties
            .values()
            .filter(|p| now.saturating_sub(p.detected_at) < RECENCY_WINDOW_MS)
            .count();
        (recent as f32 * 0.3).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{ScriptedRandom, SeededRandom};

    fn cognitive(role: &str) -> ComponentProfile {
        ComponentProfile::new("cognitive", role)
    }

    fn wired() -> EmergenceSystem {
        let mut system = EmergenceSystem::new();
        system.add_component("creativity", cognitive("idea_generation"));
        system.add_component("decision", cognitive("choice_making"));
        system.add_component("consciousness", cognitive("awareness"));
        system.add_component("learning", cognitive("adaptation"));
        system.create_interaction("creativity", "decision", InteractionKind::Feedback, 0.8, 0);
        system.create_interaction("decision", "consciousness", InteractionKind::Synchronization, 0.7, 0);
        system.create_interaction("creativity", "consciousness", InteractionKind::Amplification, 0.75, 0);
        system.create_interaction("learning", "decision", InteractionKind::Reinforcement, 0.85, 0);
        system
    }

    #[test]
    fn test_complexity_formula() {
        let system = wired();
        // 0.8 + 1.2 + 0.5 × (8 / 4)
        assert!((system.complexity() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_wiring_detects_functions_and_structures() {
        let system = wired();
        assert!(system.properties().contains_key("function_0"));
        assert!(system.properties().contains_key("structure_0"));
        assert!(!system.properties().contains_key("hierarchy"));
    }

    #[test]
    fn test_evolve_records_outcomes_and_clamps() {
        let mut system = wired();
        let mut rng = SeededRandom::new(9);
        for tick in 0..12 {
            system.evolve(&mut rng, tick * 1000);
        }
        for component in system.components() {
            assert!((0.0..=1.0).contains(&component.state.activity));
            assert!((0.0..=1.0).contains(&component.state.coherence));
        }
        for interaction in system.interactions() {
            assert!(interaction.outcomes.len() <= MAX_OUTCOMES);
            assert!(interaction.outcomes.len() >= OUTCOMES_KEPT);
        }
        // Activity saturates at 1 for every connected component
        assert!(system.properties().contains_key("synchronization"));
    }

    #[test]
    fn test_outcome_history_trimmed_to_last_five() {
        let mut system = wired();
        let mut rng = ScriptedRandom::constant(0.5);
        for tick in 0..11 {
            system.evolve(&mut rng, tick);
        }
        let outcomes = &system.interactions()[0].outcomes;
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[0].at, 6);
    }

    #[test]
    fn test_report_does_not_tick() {
        let system = wired();
        let before = system.components()[0].state;
        let report = system.report(0);
        assert_eq!(system.components()[0].state, before);
        assert_eq!(report.active_interaction_count, 4);
        assert_eq!(report.system_state.stability, 0.5);
        assert!(report.system_state.adaptability > 0.0);
    }

    #[test]
    fn test_adaptability_fades() {
        let system = wired();
        assert_eq!(system.system_state(RECENCY_WINDOW_MS).adaptability, 0.0);
    }

    #[test]
    fn test_interaction_with_unknown_component() {
        let mut system = EmergenceSystem::new();
        system.add_component("a", cognitive("x"));
        system.create_interaction("a", "ghost", InteractionKind::Coordination, 0.4, 0);
        assert_eq!(system.component(&ComponentId::new("a")).unwrap().connections.len(), 1);
        let mut rng = ScriptedRandom::constant(0.5);
        system.evolve(&mut rng, 0);
        assert!(system.interactions()[0].outcomes.is_empty());
    }
}
