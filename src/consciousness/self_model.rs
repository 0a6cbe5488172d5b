//! The agent's model of itself: identity, embodiment and a sense of time

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::consciousness::workspace::{Integration, PhenomenalExperience, QualiaKind};
use crate::core::types::SimTime;

const MAX_NARRATIVE: usize = 100;
const NARRATIVE_KEEP: usize = 50;
const MAX_PAST: usize = 50;
const CONTINUITY_WINDOW: usize = 10;
/// Broadcast score above which an experience shapes identity
pub const IDENTITY_THRESHOLD: f32 = 0.8;
const BASE_TRAIT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEvent {
    pub event: String,
    pub significance: f32,
    pub at: SimTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub experience: PhenomenalExperience,
    pub at: SimTime,
}

/// A goal as the agent holds it in mind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    pub goal: String,
    pub priority: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embodiment {
    pub boundaries: BTreeMap<String, f32>,
    /// Capability name → strength
    pub capabilities: BTreeMap<String, f32>,
    /// Limitation name → severity
    pub limitations: BTreeMap<String, f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfReflection {
    pub narrative_richness: f32,
    pub identity_strength: f32,
    pub temporal_continuity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SelfModel {
    core: BTreeMap<String, f32>,
    narrative: Vec<NarrativeEvent>,
    embodiment: Embodiment,
    past: VecDeque<Moment>,
    present: Option<Moment>,
    /// Goals, highest priority first
    future: Vec<Aim>,
}

impl SelfModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn core(&self) -> &BTreeMap<String, f32> {
        &self.core
    }

    pub fn set_trait(&mut self, name: impl Into<String>, strength: f32) {
        self.core.insert(name.into(), strength);
    }

    pub fn narrative(&self) -> &[NarrativeEvent] {
        &self.narrative
    }

    pub fn embodiment(&self) -> &Embodiment {
        &self.embodiment
    }

    pub fn past(&self) -> impl Iterator<Item = &Moment> {
        self.past.iter()
    }

    pub fn present(&self) -> Option<&Moment> {
        self.present.as_ref()
    }

    pub fn future(&self) -> &[Aim] {
        &self.future
    }

    pub fn set_goal(&mut self, goal: impl Into<String>, priority: f32) {
        let goal = goal.into();
        self.future.retain(|a| a.goal != goal);
        self.future.push(Aim { goal, priority });
        self.future.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    }

    pub fn define_boundary(&mut self, name: impl Into<String>, importance: f32) {
        self.embodiment.boundaries.insert(name.into(), importance);
    }

    pub fn add_capability(&mut self, name: impl Into<String>) {
        self.embodiment.capabilities.insert(name.into(), 0.5);
    }

    pub fn add_limitation(&mut self, name: impl Into<String>) {
        self.embodiment.limitations.insert(name.into(), 0.5);
    }

    /// Absorb a workspace broadcast; no-op when nothing won
    pub fn update(&mut self, integration: &Integration, now: SimTime) {
        let Some(winner) = &integration.winner else {
            return;
        };

        let moment = Moment {
            experience: winner.experience.clone(),
            at: now,
        };
        if let Some(previous) = self.present.replace(moment) {
            self.past.push_back(previous);
            if self.past.len() > MAX_PAST {
                self.past.pop_front();
            }
        }

        self.record(format!("Experienced: {}", winner.experience.stimulus_id), now);

        if winner.score() > IDENTITY_THRESHOLD {
            self.grow_identity(winner.experience.qualia.kind);
        }
    }

    /// Append a narrative event; past the cap only the latest 50 survive
    pub fn record(&mut self, event: impl Into<String>, now: SimTime) {
        self.narrative.push(NarrativeEvent {
            event: event.into(),
            significance: 0.5,
            at: now,
        });
        if self.narrative.len() > MAX_NARRATIVE {
            let excess = self.narrative.len() - NARRATIVE_KEEP;
            self.narrative.drain(..excess);
        }
    }

    fn grow_identity(&mut self, kind: QualiaKind) {
        let (name, factor) = match kind {
            QualiaKind::Achievement => ("competence", 1.1),
            QualiaKind::Relationship => ("social_connection", 1.05),
            QualiaKind::Learning => ("growth", 1.1),
            QualiaKind::Neutral => return,
        };
        let current = self.core.get(name).copied().unwrap_or(BASE_TRAIT);
        self.core.insert(name.to_string(), current * factor);
    }

    pub fn reflect(&self) -> SelfReflection {
        let identity_strength = if self.core.is_empty() {
            0.0
        } else {
            self.core.values().sum::<f32>() / self.core.len() as f32
        };
        SelfReflection {
            narrative_richness: (self.narrative.len() as f32 / 50.0).min(1.0),
            identity_strength,
            temporal_continuity: self.temporal_continuity(),
        }
    }

    /// Share of repeated themes among the last ten events
    fn temporal_continuity(&self) -> f32 {
        if self.narrative.len() < 2 {
            return 0.0;
        }
        let start = self.narrative.len().saturating_sub(CONTINUITY_WINDOW);
        let recent = &self.narrative[start..];
        let unique: BTreeSet<&str> = recent.iter().map(|e| e.event.as_str()).collect();
        1.0 - unique.len() as f32 / recent.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consciousness::workspace::{Competitor, Qualia};

    fn integration(id: &str, arousal: f32, kind: QualiaKind) -> Integration {
        let experience = PhenomenalExperience {
            stimulus_id: id.into(),
            qualia: Qualia {
                color: "blue".into(),
                texture: "smooth".into(),
                emotion: Some("positive".into()),
                meaning: None,
                relevance: 0.9,
                kind,
                description: id.into(),
            },
            valence: 0.5,
            arousal,
            clarity: 0.9,
            at: 0,
        };
        Integration {
            winner: Some(Competitor::new(experience)),
            competitors: 1,
            integration_success: true,
        }
    }

    #[test]
    fn test_present_moves_into_past() {
        let mut model = SelfModel::new();
        model.update(&integration("a", 0.5, QualiaKind::Neutral), 0);
        model.update(&integration("b", 0.5, QualiaKind::Neutral), 1);
        assert_eq!(model.present().unwrap().experience.stimulus_id, "b");
        assert_eq!(model.past().count(), 1);
    }

    #[test]
    fn test_strong_broadcast_grows_identity() {
        let mut model = SelfModel::new();
        // 0.9 × 0.9 × 2.5 > 0.8
        model.update(&integration("lib", 0.9, QualiaKind::Learning), 0);
        assert!((model.core()["growth"] - 0.55).abs() < 1e-6);

        // 0.3 × 0.9 × 2.5 < 0.8
        model.update(&integration("opp", 0.3, QualiaKind::Achievement), 1);
        assert!(!model.core().contains_key("competence"));
    }

    #[test]
    fn test_narrative_trimmed_to_fifty() {
        let mut model = SelfModel::new();
        for i in 0..101 {
            model.record(format!("event {}", i), i);
        }
        assert_eq!(model.narrative().len(), 50);
        assert_eq!(model.narrative()[0].event, "event 51");
        assert_eq!(model.reflect().narrative_richness, 1.0);
    }

    #[test]
    fn test_temporal_continuity() {
        let mut model = SelfModel::new();
        assert_eq!(model.reflect().temporal_continuity, 0.0);
        for _ in 0..4 {
            model.record("Performed action of type: observe", 0);
        }
        // one unique theme among four events
        assert!((model.reflect().temporal_continuity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_goals_ordered_by_priority() {
        let mut model = SelfModel::new();
        model.set_goal("acquire knowledge", 0.8);
        model.set_goal("maintain integrity", 0.9);
        model.set_goal("acquire knowledge", 0.95);
        let goals: Vec<&str> = model.future().iter().map(|a| a.goal.as_str()).collect();
        assert_eq!(goals, vec!["acquire knowledge", "maintain integrity"]);
    }
}
