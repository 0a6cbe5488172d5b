//! Decision making - deliberate versus automatic choice
//!
//! Willpower gates the strategy. Above the threshold every option is scored
//! against beliefs, desires, values, live emotions and external pressure,
//! and each such decision costs willpower. At or below it, options are
//! scored by habit and immediate reward alone.
//!
//! Score ranges:
//! - deliberate: beliefs, desires, values and external pressure lie in
//!   [0, 1]; emotional influence in [-1, 1]; noise in [0, 0.1). Totals lie
//!   in [-0.15, 1.1).
//! - automatic: habit and immediate reward in [0, 1]; noise in [0, 0.2).
//!   Totals lie in [0, 0.92).

pub mod influence;
pub mod metacognition;
pub mod state;

pub use metacognition::{BehaviorPattern, MetacognitiveReflection, MetacognitiveSystem, PatternKind};
pub use state::{Belief, Desire, Emotion, EmotionKind, ExternalInfluence, HeldValue};

use serde::{Deserialize, Serialize};

use crate::core::actions::Action;
use crate::core::error::{AgentError, Result};
use crate::core::random::RandomSource;
use crate::core::types::SimTime;

/// Willpower above which decisions are deliberate
pub const DELIBERATE_THRESHOLD: f32 = 0.3;
/// Willpower spent per deliberate decision
pub const WILLPOWER_COST: f32 = 0.1;
/// Scale of the random term in both strategies
pub const RANDOMNESS_FACTOR: f32 = 0.2;
/// Default lifetime of an emotion
pub const DEFAULT_EMOTION_TTL: SimTime = 5000;
const MAX_HISTORY: usize = 500;
const REFLECTION_WINDOW: usize = 10;

/// Situation a decision is made in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Ids of the perceived environment entries
    pub perceived: Vec<String>,
    /// Active goals, highest priority first
    pub goals: Vec<String>,
    pub uncertainty: Option<f32>,
    pub time_constraint: Option<f32>,
    pub current_time: SimTime,
}

impl DecisionContext {
    pub fn new(current_time: SimTime) -> Self {
        Self {
            current_time,
            ..Self::default()
        }
    }

    /// Number of populated descriptive fields (the clock is not one)
    pub fn field_count(&self) -> usize {
        2 + usize::from(self.uncertainty.is_some()) + usize::from(self.time_constraint.is_some())
    }

    /// `0.1 × fields + uncertainty + time constraint`, each defaulting to 0.5
    pub fn complexity(&self) -> f32 {
        self.field_count() as f32 * 0.1
            + self.uncertainty.unwrap_or(0.5)
            + self.time_constraint.unwrap_or(0.5)
    }
}

/// Why an option scored the way it did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision_type", rename_all = "snake_case")]
pub enum Reasoning {
    Deliberate {
        belief_alignment: f32,
        desire_alignment: f32,
        value_alignment: f32,
        emotional_influence: f32,
        external_pressure: f32,
        random_factor: f32,
    },
    Automatic {
        habitual_score: f32,
        immediate_reward: f32,
        random_factor: f32,
    },
}

impl Reasoning {
    pub fn is_deliberate(&self) -> bool {
        matches!(self, Reasoning::Deliberate { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub option: Action,
    /// Position of the chosen option in the input list
    pub option_index: usize,
    pub score: f32,
    pub reasoning: Reasoning,
}

/// A past decision, as remembered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEpisode {
    pub chosen: Action,
    pub context: DecisionContext,
    pub reasoning: Reasoning,
    pub at: SimTime,
    pub willpower_at_decision: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionReflection {
    pub total_decisions: usize,
    pub deliberate_decisions: usize,
    pub automatic_decisions: usize,
    pub current_willpower: f32,
    pub metacognition: MetacognitiveReflection,
}

#[derive(Debug, Clone)]
pub struct DecisionMakingSystem {
    beliefs: Vec<Belief>,
    desires: Vec<Desire>,
    values: Vec<HeldValue>,
    emotions: Vec<Emotion>,
    external_influences: Vec<ExternalInfluence>,
    history: Vec<DecisionEpisode>,
    metacognition: MetacognitiveSystem,
    willpower: f32,
    max_willpower: f32,
}

impl Default for DecisionMakingSystem {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl DecisionMakingSystem {
    pub fn new(initial_willpower: f32, max_willpower: f32) -> Self {
        Self {
            beliefs: Vec::new(),
            desires: Vec::new(),
            values: Vec::new(),
            emotions: Vec::new(),
            external_influences: Vec::new(),
            history: Vec::new(),
            metacognition: MetacognitiveSystem::new(),
            willpower: initial_willpower.clamp(0.0, max_willpower),
            max_willpower,
        }
    }

    pub fn willpower(&self) -> f32 {
        self.willpower
    }

    pub fn max_willpower(&self) -> f32 {
        self.max_willpower
    }

    pub fn beliefs(&self) -> &[Belief] {
        &self.beliefs
    }

    pub fn belief(&self, id: &str) -> Option<&Belief> {
        self.beliefs.iter().find(|b| b.id == id)
    }

    pub fn desires(&self) -> &[Desire] {
        &self.desires
    }

    pub fn desire(&self, id: &str) -> Option<&Desire> {
        self.desires.iter().find(|d| d.id == id)
    }

    pub fn history(&self) -> &[DecisionEpisode] {
        &self.history
    }

    pub fn metacognition(&self) -> &MetacognitiveSystem {
        &self.metacognition
    }

    /// Emotions still alive at `now`
    pub fn active_emotions(&self, now: SimTime) -> impl Iterator<Item = &Emotion> {
        self.emotions.iter().filter(move |e| e.is_alive(now))
    }

    /// Form a belief, or merge into an existing one with the same id
    pub fn form_belief(
        &mut self,
        id: impl Into<String>,
        statement: impl Into<String>,
        confidence: f32,
        evidence: Vec<String>,
    ) {
        let id = id.into();
        let statement = statement.into();
        let confidence = confidence.clamp(0.0, 1.0);
        match self.beliefs.iter_mut().find(|b| b.id == id) {
            Some(existing) => existing.merge(statement, confidence, evidence),
            None => self.beliefs.push(Belief {
                id,
                statement,
                confidence,
                evidence,
                previous_statement: None,
            }),
        }
    }

    /// Explicit update of a known belief; unknown ids are ignored
    pub fn update_belief(&mut self, id: &str, statement: impl Into<String>, confidence: f32, evidence: Vec<String>) {
        if let Some(existing) = self.beliefs.iter_mut().find(|b| b.id == id) {
            existing.merge(statement.into(), confidence.clamp(0.0, 1.0), evidence);
        }
    }

    pub fn form_desire(&mut self, id: impl Into<String>, content: impl Into<String>, strength: f32, urgency: f32) {
        let desire = Desire {
            id: id.into(),
            content: content.into(),
            strength: strength.clamp(0.0, 1.0),
            urgency: urgency.clamp(0.0, 1.0),
            fulfillment_attempts: 0,
        };
        match self.desires.iter_mut().find(|d| d.id == desire.id) {
            Some(existing) => *existing = desire,
            None => self.desires.push(desire),
        }
    }

    pub fn hold_value(&mut self, id: impl Into<String>, statement: impl Into<String>, importance: f32) {
        let value = HeldValue {
            id: id.into(),
            statement: statement.into(),
            importance: importance.clamp(0.0, 1.0),
        };
        match self.values.iter_mut().find(|v| v.id == value.id) {
            Some(existing) => *existing = value,
            None => self.values.push(value),
        }
    }

    /// Set an emotion that expires `ttl` ms after `now`; replaces one of the same kind
    pub fn set_emotion(&mut self, kind: EmotionKind, intensity: f32, ttl: SimTime, now: SimTime) {
        self.emotions.retain(|e| e.kind != kind && e.is_alive(now));
        self.emotions.push(Emotion {
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            created_at: now,
            ttl,
        });
    }

    pub fn add_external_influence(&mut self, source: impl Into<String>, strength: f32) {
        self.external_influences.push(ExternalInfluence {
            source: source.into(),
            strength,
        });
    }

    pub fn restore_willpower(&mut self, amount: f32) {
        self.willpower = (self.willpower + amount).min(self.max_willpower);
    }

    /// Choose one of `options`
    ///
    /// Fails only when `options` is empty. The chosen option is always an
    /// element of the input; equal scores go to the earlier option.
    pub fn make_decision(
        &mut self,
        options: &[Action],
        context: &DecisionContext,
        rng: &mut dyn RandomSource,
    ) -> Result<Decision> {
        if options.is_empty() {
            return Err(AgentError::EmptyOptionSet);
        }

        let now = context.current_time;
        self.emotions.retain(|e| e.is_alive(now));
        self.metacognition.observe(options.len(), context.complexity(), now);

        let scored: Vec<(f32, Reasoning)> = if self.willpower > DELIBERATE_THRESHOLD {
            let scored = options
                .iter()
                .map(|option| self.score_deliberate(option, now, rng))
                .collect();
            self.willpower = (self.willpower - WILLPOWER_COST).max(0.0);
            scored
        } else {
            options
                .iter()
                .map(|option| self.score_automatic(option, rng))
                .collect()
        };

        Ok(self.finalize(options, scored, context))
    }

    fn score_deliberate(&self, option: &Action, now: SimTime, rng: &mut dyn RandomSource) -> (f32, Reasoning) {
        let belief_alignment = self.belief_alignment(rng);
        let desire_alignment = self.desire_alignment(rng);
        let value_alignment = self.value_alignment(rng);
        let emotional_influence = self.emotional_influence(option, now);
        let external_pressure = self.external_pressure(rng);
        let random_factor = rng.next_f32() * (RANDOMNESS_FACTOR * 0.5);

        let total = belief_alignment * 0.25
            + desire_alignment * 0.25
            + value_alignment * 0.25
            + emotional_influence * 0.15
            + external_pressure * 0.1
            + random_factor;

        (
            total,
            Reasoning::Deliberate {
                belief_alignment,
                desire_alignment,
                value_alignment,
                emotional_influence,
                external_pressure,
                random_factor,
            },
        )
    }

    fn score_automatic(&self, option: &Action, rng: &mut dyn RandomSource) -> (f32, Reasoning) {
        let habitual_score = self.habitual_score(option);
        let immediate_reward = match option.immediate_reward {
            Some(reward) => reward.clamp(0.0, 1.0),
            None => rng.next_f32() * 0.5,
        };
        let random_factor = rng.next_f32() * RANDOMNESS_FACTOR;
        let total = habitual_score * 0.6 + immediate_reward * 0.3 + random_factor * 0.1;

        (
            total,
            Reasoning::Automatic {
                habitual_score,
                immediate_reward,
                random_factor,
            },
        )
    }

    /// Confidence-weighted alignment, averaged over beliefs
    fn belief_alignment(&self, rng: &mut dyn RandomSource) -> f32 {
        if self.beliefs.is_empty() {
            return 0.5;
        }
        let total: f32 = self
            .beliefs
            .iter()
            .map(|b| rng.next_f32() * b.confidence)
            .sum();
        (total / self.beliefs.len() as f32).clamp(0.0, 1.0)
    }

    /// Alignment weighted by strength × urgency
    fn desire_alignment(&self, rng: &mut dyn RandomSource) -> f32 {
        let mut total = 0.0;
        let mut weight = 0.0;
        for desire in &self.desires {
            let alignment = rng.next_f32();
            total += alignment * desire.weight();
            weight += desire.weight();
        }
        if weight > 0.0 {
            total / weight
        } else {
            0.5
        }
    }

    fn value_alignment(&self, rng: &mut dyn RandomSource) -> f32 {
        if self.values.is_empty() {
            return 0.5;
        }
        let total: f32 = self
            .values
            .iter()
            .map(|v| rng.next_f32() * v.importance)
            .sum();
        (total / self.values.len() as f32).clamp(0.0, 1.0)
    }

    /// Mean table influence over live emotions, 0.5 when calm
    fn emotional_influence(&self, option: &Action, now: SimTime) -> f32 {
        let influences: Vec<f32> = self
            .active_emotions(now)
            .map(|e| influence::influence(&e.kind, option.category) * e.intensity)
            .collect();
        if influences.is_empty() {
            0.5
        } else {
            influences.iter().sum::<f32>() / influences.len() as f32
        }
    }

    fn external_pressure(&self, rng: &mut dyn RandomSource) -> f32 {
        let total: f32 = self
            .external_influences
            .iter()
            .map(|i| i.strength * rng.next_f32() * 0.5)
            .sum();
        total.clamp(0.0, 1.0)
    }

    /// `min(1, 0.2 × past choices of the same kind)`
    pub fn habitual_score(&self, option: &Action) -> f32 {
        let similar = self.history.iter().filter(|e| e.chosen.kind == option.kind).count();
        (similar as f32 * 0.2).min(1.0)
    }

    fn finalize(&mut self, options: &[Action], mut scored: Vec<(f32, Reasoning)>, context: &DecisionContext) -> Decision {
        let mut best = 0;
        for (index, (score, _)) in scored.iter().enumerate() {
            if *score > scored[best].0 {
                best = index;
            }
        }

        let (score, reasoning) = scored.swap_remove(best);
        let option = options[best].clone();

        self.history.push(DecisionEpisode {
            chosen: option.clone(),
            context: context.clone(),
            reasoning: reasoning.clone(),
            at: context.current_time,
            willpower_at_decision: self.willpower,
        });
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }

        self.update_desires(&option);

        tracing::debug!(
            action = %option.kind,
            score,
            deliberate = reasoning.is_deliberate(),
            willpower = self.willpower,
            "Decision made"
        );

        Decision {
            option,
            option_index: best,
            score,
            reasoning,
        }
    }

    fn update_desires(&mut self, chosen: &Action) {
        for desire in &mut self.desires {
            if chosen.benefits.iter().any(|b| b == &desire.content) {
                desire.satisfy();
            } else {
                desire.intensify();
            }
        }
    }

    /// Review the last ten decisions and adjust belief confidence
    pub fn reflect(&mut self, rng: &mut dyn RandomSource) -> DecisionReflection {
        let start = self.history.len().saturating_sub(REFLECTION_WINDOW);
        let recent = self.history.len() - start;
        let deliberate = self.history[start..]
            .iter()
            .filter(|e| e.reasoning.is_deliberate())
            .count();

        // Stand-in outcome signal: roughly half the episodes count as successes
        for _ in 0..recent {
            let reinforce = rng.next_f32() > 0.5;
            self.adjust_supporting_beliefs(reinforce);
        }

        DecisionReflection {
            total_decisions: recent,
            deliberate_decisions: deliberate,
            automatic_decisions: recent - deliberate,
            current_willpower: self.willpower,
            metacognition: self.metacognition.reflect(),
        }
    }

    /// The first two beliefs (in formation order) support every choice
    fn adjust_supporting_beliefs(&mut self, reinforce: bool) {
        for belief in self.beliefs.iter_mut().take(2) {
            let factor = if reinforce { 1.05 } else { 0.95 };
            belief.confidence = (belief.confidence * factor).clamp(0.1, 1.0);
        }
    }
}
