//! The four minds
//!
//! Each mind is a plain state transformer. None of them schedules itself;
//! the consciousness system calls them in a fixed order.

use std::collections::{BTreeMap, VecDeque};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::actions::ActionKind;
use crate::consciousness::workspace::{PhenomenalExperience, Qualia, QualiaKind};
use crate::core::random::RandomSource;
use crate::core::types::SimTime;

pub const WORKING_MEMORY_CAPACITY: usize = 7;
pub const INSIGHT_PROBABILITY: f32 = 0.1;
pub const INSIGHT_TTL_MS: SimTime = 60_000;
pub const HABIT_INCREMENT: f32 = 0.1;
pub const CORE_BELIEF: &str = "The world is a good place.";
pub const CORE_BELIEF_INCREMENT: f32 = 0.05;
pub const REPRESSION_PROBABILITY: f32 = 0.5;
pub const TRANSCENDENCE_PROBABILITY: f32 = 0.05;
pub const TRANSCENDENCE_BOOST: f32 = 0.2;
pub const CONNECTEDNESS_CREEP: f32 = 0.01;

/// Something that can be attended to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    pub id: String,
    pub intensity: f32,
    pub relevance: f32,
    pub description: String,
    pub color: Option<String>,
    pub texture: Option<String>,
    pub emotion: Option<String>,
    pub meaning: Option<String>,
    pub qualia_kind: QualiaKind,
}

impl Stimulus {
    pub fn new(id: impl Into<String>, intensity: f32, relevance: f32) -> Self {
        Self {
            id: id.into(),
            intensity,
            relevance,
            description: String::new(),
            color: None,
            texture: None,
            emotion: None,
            meaning: None,
            qualia_kind: QualiaKind::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionFocus {
    pub stimulus_id: String,
    pub intensity: f32,
    pub at: SimTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub id: String,
    pub description: String,
    pub kind: QualiaKind,
}

#[derive(Debug, Clone, Default)]
pub struct ConsciousMind {
    focus: Option<AttentionFocus>,
    working_memory: VecDeque<Thought>,
    /// One experience per stimulus id, in first-attended order
    phenomenal: Vec<PhenomenalExperience>,
}

impl ConsciousMind {
    pub fn focus(&self) -> Option<&AttentionFocus> {
        self.focus.as_ref()
    }

    pub fn working_memory(&self) -> impl Iterator<Item = &Thought> {
        self.working_memory.iter()
    }

    pub fn working_memory_load(&self) -> f32 {
        self.working_memory.len() as f32 / WORKING_MEMORY_CAPACITY as f32
    }

    pub fn phenomenal_experiences(&self) -> &[PhenomenalExperience] {
        &self.phenomenal
    }

    /// Take `stimulus` into focus unless the current focus is at least as intense
    pub fn attend(&mut self, stimulus: &Stimulus, rng: &mut dyn RandomSource, now: SimTime) -> bool {
        if let Some(focus) = &self.focus {
            if stimulus.intensity <= focus.intensity {
                return false;
            }
        }
        self.focus = Some(AttentionFocus {
            stimulus_id: stimulus.id.clone(),
            intensity: stimulus.intensity,
            at: now,
        });
        self.record_experience(stimulus, rng, now);
        true
    }

    fn record_experience(&mut self, stimulus: &Stimulus, rng: &mut dyn RandomSource, now: SimTime) {
        let experience = PhenomenalExperience {
            stimulus_id: stimulus.id.clone(),
            qualia: Qualia {
                color: stimulus.color.clone().unwrap_or_else(|| "neutral".into()),
                texture: stimulus.texture.clone().unwrap_or_else(|| "smooth".into()),
                emotion: stimulus.emotion.clone(),
                meaning: stimulus.meaning.clone(),
                relevance: stimulus.relevance,
                kind: stimulus.qualia_kind,
                description: stimulus.description.clone(),
            },
            valence: rng.next_f32(),
            arousal: stimulus.intensity,
            clarity: stimulus.relevance,
            at: now,
        };
        match self.phenomenal.iter_mut().find(|e| e.stimulus_id == stimulus.id) {
            Some(existing) => *existing = experience,
            None => self.phenomenal.push(experience),
        }
    }

    /// Hold a thought, evicting the oldest past capacity
    pub fn remember(&mut self, thought: Thought) {
        self.working_memory.push_back(thought);
        while self.working_memory.len() > WORKING_MEMORY_CAPACITY {
            self.working_memory.pop_front();
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub intensity: f32,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub strength: f32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub at: SimTime,
    pub expires_at: SimTime,
}

#[derive(Debug, Clone, Default)]
pub struct SubconsciousMind {
    emotional_state: AHashMap<String, Tally>,
    habits: AHashMap<ActionKind, Habit>,
    insights: Vec<Insight>,
}

impl SubconsciousMind {
    /// Accumulate the stimulus emotion ("neutral" when unlabelled)
    pub fn process_emotional_state(&mut self, stimulus: &Stimulus) {
        let emotion = stimulus.emotion.clone().unwrap_or_else(|| "neutral".into());
        let tally = self.emotional_state.entry(emotion).or_default();
        tally.intensity += stimulus.intensity;
        tally.count += 1;
    }

    pub fn reinforce_habit(&mut self, action: ActionKind) {
        let habit = self.habits.entry(action).or_default();
        habit.strength += HABIT_INCREMENT;
        habit.count += 1;
    }

    pub fn generate_insight(&mut self, rng: &mut dyn RandomSource, now: SimTime) {
        self.insights.retain(|i| i.expires_at > now);
        if rng.chance(INSIGHT_PROBABILITY) {
            tracing::debug!("Insight formed");
            self.insights.push(Insight {
                text: "A new connection has been formed.".into(),
                at: now,
                expires_at: now + INSIGHT_TTL_MS,
            });
        }
    }

    pub fn live_insights(&self, now: SimTime) -> impl Iterator<Item = &Insight> {
        self.insights.iter().filter(move |i| i.expires_at > now)
    }

    /// Emotion tallies in name order
    pub fn emotional_state(&self) -> BTreeMap<String, Tally> {
        self.emotional_state.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    pub fn habits(&self) -> BTreeMap<ActionKind, Habit> {
        self.habits.iter().map(|(k, v)| (*k, *v)).collect()
    }

    pub fn habit(&self, action: ActionKind) -> Option<Habit> {
        self.habits.get(&action).copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreBelief {
    pub strength: f32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepressedMemory {
    pub memory: String,
    pub at: SimTime,
}

#[derive(Debug, Clone, Default)]
pub struct UnconsciousMind {
    core_beliefs: BTreeMap<String, CoreBelief>,
    repressed: Vec<RepressedMemory>,
}

impl UnconsciousMind {
    pub fn core_beliefs(&self) -> &BTreeMap<String, CoreBelief> {
        &self.core_beliefs
    }

    pub fn repressed_count(&self) -> usize {
        self.repressed.len()
    }

    pub fn process_core_beliefs(&mut self, reward: f32) {
        if reward > 0.0 {
            let belief = self.core_beliefs.entry(CORE_BELIEF.to_string()).or_default();
            belief.strength += CORE_BELIEF_INCREMENT;
            belief.count += 1;
        }
    }

    /// Negative experiences are sometimes pushed out of awareness
    pub fn repress_memory(&mut self, reward: f32, rng: &mut dyn RandomSource, now: SimTime) {
        if reward < 0.0 && rng.chance(REPRESSION_PROBABILITY) {
            self.repressed.push(RepressedMemory {
                memory: "A negative experience occurred.".into(),
                at: now,
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscendentExperience {
    pub experience: String,
    pub at: SimTime,
}

#[derive(Debug, Clone, Default)]
pub struct SpiritualMind {
    transcendent: Vec<TranscendentExperience>,
    connectedness: f32,
}

impl SpiritualMind {
    pub fn connectedness(&self) -> f32 {
        self.connectedness
    }

    pub fn transcendent_count(&self) -> usize {
        self.transcendent.len()
    }

    pub fn have_transcendent_experience(&mut self, rng: &mut dyn RandomSource, now: SimTime) {
        if rng.chance(TRANSCENDENCE_PROBABILITY) {
            tracing::debug!("Transcendent experience");
            self.transcendent.push(TranscendentExperience {
                experience: "A feeling of oneness with the universe.".into(),
                at: now,
            });
            self.connectedness = (self.connectedness + TRANSCENDENCE_BOOST).min(1.0);
        }
    }

    pub fn update_connectedness(&mut self, reward: f32) {
        if reward > 0.0 {
            self.connectedness = (self.connectedness + CONNECTEDNESS_CREEP).min(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    fn stimulus(id: &str, intensity: f32) -> Stimulus {
        Stimulus::new(id, intensity, 0.8)
    }

    #[test]
    fn test_focus_needs_strictly_greater_intensity() {
        let mut mind = ConsciousMind::default();
        let mut rng = ScriptedRandom::constant(0.4);
        assert!(mind.attend(&stimulus("a", 0.5), &mut rng, 0));
        assert!(!mind.attend(&stimulus("b", 0.5), &mut rng, 1));
        assert!(!mind.attend(&stimulus("c", 0.4), &mut rng, 2));
        assert!(mind.attend(&stimulus("d", 0.6), &mut rng, 3));
        assert_eq!(mind.focus().unwrap().stimulus_id, "d");
        assert_eq!(mind.phenomenal_experiences().len(), 2);
    }

    #[test]
    fn test_experience_overwritten_per_stimulus() {
        let mut mind = ConsciousMind::default();
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        mind.attend(&stimulus("a", 0.5), &mut rng, 0);
        mind.attend(&stimulus("a", 0.7), &mut rng, 10);
        let experiences = mind.phenomenal_experiences();
        assert_eq!(experiences.len(), 1);
        assert_eq!(experiences[0].arousal, 0.7);
        assert_eq!(experiences[0].at, 10);
        assert_eq!(experiences[0].qualia.color, "neutral");
    }

    #[test]
    fn test_working_memory_evicts_oldest() {
        let mut mind = ConsciousMind::default();
        for i in 0..9 {
            mind.remember(Thought {
                id: format!("thought-{}", i),
                description: String::new(),
                kind: QualiaKind::Learning,
            });
        }
        assert_eq!(mind.working_memory_load(), 1.0);
        assert_eq!(mind.working_memory().next().unwrap().id, "thought-2");
    }

    #[test]
    fn test_emotions_tallied() {
        let mut mind = SubconsciousMind::default();
        let mut joyful = stimulus("a", 0.5);
        joyful.emotion = Some("positive".into());
        mind.process_emotional_state(&joyful);
        mind.process_emotional_state(&joyful);
        mind.process_emotional_state(&stimulus("b", 0.3));
        let state = mind.emotional_state();
        assert_eq!(state["positive"].count, 2);
        assert!((state["positive"].intensity - 1.0).abs() < 1e-6);
        assert_eq!(state["neutral"].count, 1);
    }

    #[test]
    fn test_insights_expire() {
        let mut mind = SubconsciousMind::default();
        let mut rng = ScriptedRandom::constant(0.05);
        mind.generate_insight(&mut rng, 0);
        assert_eq!(mind.live_insights(1).count(), 1);
        assert_eq!(mind.live_insights(INSIGHT_TTL_MS).count(), 0);
    }

    #[test]
    fn test_habit_reinforcement() {
        let mut mind = SubconsciousMind::default();
        mind.reinforce_habit(ActionKind::Observe);
        mind.reinforce_habit(ActionKind::Observe);
        let habit = mind.habit(ActionKind::Observe).unwrap();
        assert_eq!(habit.count, 2);
        assert!((habit.strength - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_unconscious_reacts_to_reward_sign() {
        let mut mind = UnconsciousMind::default();
        let mut rng = ScriptedRandom::constant(0.1);
        mind.process_core_beliefs(1.0);
        mind.process_core_beliefs(-1.0);
        mind.repress_memory(-1.0, &mut rng, 0);
        mind.repress_memory(1.0, &mut rng, 0);
        assert_eq!(mind.core_beliefs()[CORE_BELIEF].count, 1);
        assert_eq!(mind.repressed_count(), 1);
    }

    #[test]
    fn test_connectedness_capped() {
        let mut mind = SpiritualMind::default();
        let mut rng = ScriptedRandom::constant(0.0);
        for _ in 0..10 {
            mind.have_transcendent_experience(&mut rng, 0);
        }
        mind.update_connectedness(1.0);
        assert_eq!(mind.connectedness(), 1.0);
        assert_eq!(mind.transcendent_count(), 10);
    }
}
