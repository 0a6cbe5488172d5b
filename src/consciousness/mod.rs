//! Consciousness - attention, integration and self-modelling
//!
//! `attend` runs the conscious then the subconscious mind. `integrate_information`
//! runs a workspace competition over every live phenomenal experience, hands
//! the winner to the self model, then lets the deeper minds react to the raw
//! experience.

pub mod minds;
pub mod self_model;
pub mod workspace;

pub use minds::{
    AttentionFocus, ConsciousMind, CoreBelief, Habit, SpiritualMind, Stimulus, SubconsciousMind, Tally, Thought,
    UnconsciousMind,
};
pub use self_model::{Aim, Embodiment, SelfModel, SelfReflection};
pub use workspace::{Competitor, GlobalWorkspace, Integration, PhenomenalExperience, Qualia, QualiaKind};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::actions::ActionKind;
use crate::core::random::RandomSource;
use crate::core::types::SimTime;
use crate::learning::Experience;

/// One entry of the stream of consciousness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub kind: String,
    pub content: PhenomenalExperience,
    pub at: SimTime,
}

/// Plain snapshot of every mind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsciousnessLevel {
    pub attention_focus: Option<AttentionFocus>,
    pub working_memory_load: f32,
    pub emotional_state: BTreeMap<String, Tally>,
    pub habitual_patterns: BTreeMap<ActionKind, Habit>,
    pub live_insights: usize,
    pub core_beliefs: BTreeMap<String, CoreBelief>,
    pub repressed_memories: usize,
    pub transcendent_experiences: usize,
    pub sense_of_connectedness: f32,
    pub integration_level: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ConsciousnessSystem {
    pub conscious: ConsciousMind,
    pub subconscious: SubconsciousMind,
    pub unconscious: UnconsciousMind,
    pub spiritual: SpiritualMind,
    pub workspace: GlobalWorkspace,
    pub self_model: SelfModel,
}

impl ConsciousnessSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the stimulus took the attention focus
    pub fn attend(&mut self, stimulus: &Stimulus, rng: &mut dyn RandomSource, now: SimTime) -> bool {
        let focused = self.conscious.attend(stimulus, rng, now);
        self.subconscious.process_emotional_state(stimulus);
        focused
    }

    pub fn integrate_information(
        &mut self,
        experience: &Experience,
        rng: &mut dyn RandomSource,
        now: SimTime,
    ) -> Integration {
        let integration = self.workspace.integrate(self.conscious.phenomenal_experiences());
        if let Some(winner) = &integration.winner {
            tracing::info!(
                stimulus = %winner.experience.stimulus_id,
                competitors = integration.competitors,
                "Global broadcast"
            );
        }
        self.self_model.update(&integration, now);

        self.subconscious.reinforce_habit(experience.action.kind);
        self.subconscious.generate_insight(rng, now);
        self.unconscious.process_core_beliefs(experience.reward);
        self.unconscious.repress_memory(experience.reward, rng, now);
        self.spiritual.update_connectedness(experience.reward);
        self.spiritual.have_transcendent_experience(rng, now);

        integration
    }

    pub fn stream_of_consciousness(&self) -> Vec<StreamEntry> {
        self.conscious
            .phenomenal_experiences()
            .iter()
            .map(|experience| StreamEntry {
                kind: "feeling".into(),
                content: experience.clone(),
                at: experience.at,
            })
            .collect()
    }

    pub fn assess_consciousness_level(&self, now: SimTime) -> ConsciousnessLevel {
        ConsciousnessLevel {
            attention_focus: self.conscious.focus().cloned(),
            working_memory_load: self.conscious.working_memory_load(),
            emotional_state: self.subconscious.emotional_state(),
            habitual_patterns: self.subconscious.habits(),
            live_insights: self.subconscious.live_insights(now).count(),
            core_beliefs: self.unconscious.core_beliefs().clone(),
            repressed_memories: self.unconscious.repressed_count(),
            transcendent_experiences: self.spiritual.transcendent_count(),
            sense_of_connectedness: self.spiritual.connectedness(),
            integration_level: self.workspace.integration_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::Action;
    use crate::core::random::ScriptedRandom;
    use crate::learning::StateId;

    fn experience(reward: f32) -> Experience {
        Experience {
            state: StateId::fallback(),
            action: Action::observe(),
            reward,
            next_state: None,
            at: 0,
        }
    }

    #[test]
    fn test_integration_feeds_self_model() {
        let mut system = ConsciousnessSystem::new();
        let mut rng = ScriptedRandom::constant(0.9);
        let mut lib = Stimulus::new("library", 0.5, 0.8);
        lib.emotion = Some("positive".into());
        system.attend(&lib, &mut rng, 0);
        system.attend(&Stimulus::new("stream", 0.6, 0.6), &mut rng, 0);

        let integration = system.integrate_information(&experience(1.0), &mut rng, 0);
        assert_eq!(integration.competitors, 2);
        // 0.4 × 2.5 beats 0.36 × 1.0
        assert_eq!(integration.winner.unwrap().experience.stimulus_id, "library");
        assert_eq!(system.self_model.present().unwrap().experience.stimulus_id, "library");
        assert!((system.spiritual.connectedness() - 0.01).abs() < 1e-6);
        assert_eq!(system.unconscious.repressed_count(), 0);
    }

    #[test]
    fn test_integration_with_nothing_attended() {
        let mut system = ConsciousnessSystem::new();
        let mut rng = ScriptedRandom::constant(0.9);
        let integration = system.integrate_information(&experience(-1.0), &mut rng, 0);
        assert!(!integration.integration_success);
        assert!(system.self_model.present().is_none());
        assert_eq!(system.subconscious.habit(ActionKind::Observe).unwrap().count, 1);
    }

    #[test]
    fn test_snapshot_and_stream() {
        let mut system = ConsciousnessSystem::new();
        let mut rng = ScriptedRandom::constant(0.9);
        system.attend(&Stimulus::new("a", 0.9, 0.9), &mut rng, 5);
        system.integrate_information(&experience(1.0), &mut rng, 5);

        let stream = system.stream_of_consciousness();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].kind, "feeling");

        let level = system.assess_consciousness_level(5);
        assert_eq!(level.attention_focus.as_ref().unwrap().stimulus_id, "a");
        assert_eq!(level.emotional_state["neutral"].count, 1);
        // 0.81 × 2.0 / 5
        assert!((level.integration_level - 0.324).abs() < 1e-5);
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains("integration_level"));
    }
}
