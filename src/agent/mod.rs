//! Autonomous agent - one perceive, decide, act, learn cycle at a time
//!
//! The agent owns one instance of every subsystem and the single random
//! source they all draw from. `act` runs a whole cycle to completion; the
//! only suspension point is a delegated capability call, which is awaited
//! before the cycle continues.

pub mod actions;
pub mod environment;
pub mod perception;
pub mod reflection;

pub use actions::{filter_by_boundaries, Action, ActionCategory, ActionKind, Boundary};
pub use environment::{EntryKind, Environment, EnvironmentEntry};
pub use perception::{perceive, Features, Percept};
pub use reflection::AgentReflection;

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consciousness::{ConsciousnessSystem, QualiaKind, Thought};
use crate::core::config::AgentConfig;
use crate::core::error::Result;
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::types::SimTime;
use crate::creativity::{Concept, CreativitySystem, Idea};
use crate::decision::{DecisionContext, DecisionMakingSystem, Reasoning};
use crate::emergence::{ComponentProfile, EmergenceSystem, InteractionKind};
use crate::learning::{Experience, LearningSystem, StateId};

const MAX_HISTORY: usize = 200;
/// Novelty an idea needs before the agent considers acting on it
pub const INNOVATION_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal: String,
    pub priority: f32,
    pub source: String,
    pub set_at: SimTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub feedback: String,
}

impl ActionResult {
    pub fn failed(feedback: impl Into<String>) -> Self {
        Self {
            success: false,
            feedback: feedback.into(),
        }
    }
}

/// What one cycle did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleOutcome {
    pub action: Action,
    pub result: ActionResult,
    pub reasoning: Reasoning,
    pub at: SimTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: Action,
    pub result: ActionResult,
    pub at: SimTime,
}

pub struct AutonomousAgent {
    id: String,
    session_id: Uuid,
    pub creativity: CreativitySystem,
    pub decision: DecisionMakingSystem,
    pub consciousness: ConsciousnessSystem,
    pub emergence: EmergenceSystem,
    pub learning: LearningSystem,
    goals: Vec<Goal>,
    boundaries: Vec<Boundary>,
    capabilities: BTreeSet<String>,
    limitations: BTreeSet<String>,
    history: VecDeque<HistoryEntry>,
    rng: Box<dyn RandomSource>,
    clock: SimTime,
    cycles: u64,
    cycle_interval_ms: u64,
    willpower_recovery: f32,
    action_success_probability: f32,
}

impl AutonomousAgent {
    /// Agent seeded from `config.seed`
    pub fn new(id: impl Into<String>, config: &AgentConfig) -> Self {
        Self::with_random(id, config, Box::new(SeededRandom::new(config.seed)))
    }

    pub fn with_random(id: impl Into<String>, config: &AgentConfig, mut rng: Box<dyn RandomSource>) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&rng.next_u64().to_le_bytes());
        bytes[8..].copy_from_slice(&rng.next_u64().to_le_bytes());
        let session_id = uuid::Builder::from_random_bytes(bytes).into_uuid();

        let mut agent = Self {
            id: id.into(),
            session_id,
            creativity: CreativitySystem::new(),
            decision: DecisionMakingSystem::new(config.initial_willpower, config.max_willpower),
            consciousness: ConsciousnessSystem::new(),
            emergence: EmergenceSystem::new(),
            learning: LearningSystem::new(),
            goals: Vec::new(),
            boundaries: Vec::new(),
            capabilities: BTreeSet::new(),
            limitations: BTreeSet::new(),
            history: VecDeque::new(),
            rng,
            clock: 0,
            cycles: 0,
            cycle_interval_ms: config.cycle_interval_ms,
            willpower_recovery: config.willpower_recovery,
            action_success_probability: config.action_success_probability,
        };

        agent.wire_emergence();
        for boundary in &config.boundaries {
            agent.define_boundary(boundary.name.clone(), boundary.importance);
        }
        for goal in &config.goals {
            agent.set_goal(goal.goal.clone(), goal.priority);
        }
        tracing::info!(agent = %agent.id, session = %agent.session_id, "Agent created");
        agent
    }

    fn wire_emergence(&mut self) {
        let components = [
            ("creativity", "idea_generation"),
            ("decision", "choice_making"),
            ("consciousness", "awareness"),
            ("learning", "adaptation"),
        ];
        for (id, role) in components {
            self.emergence.add_component(id, ComponentProfile::new("cognitive", role));
        }
        self.emergence
            .create_interaction("creativity", "decision", InteractionKind::Feedback, 0.8, self.clock);
        self.emergence
            .create_interaction("decision", "consciousness", InteractionKind::Synchronization, 0.7, self.clock);
        self.emergence
            .create_interaction("creativity", "consciousness", InteractionKind::Amplification, 0.75, self.clock);
        self.emergence
            .create_interaction("learning", "decision", InteractionKind::Reinforcement, 0.85, self.clock);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Simulated time of the latest cycle
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn capabilities(&self) -> &BTreeSet<String> {
        &self.capabilities
    }

    pub fn limitations(&self) -> &BTreeSet<String> {
        &self.limitations
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// The agent's random source, for drivers that must share it
    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Add a goal, keeping goals ordered by priority
    pub fn set_goal(&mut self, goal: impl Into<String>, priority: f32) {
        let goal = goal.into();
        self.goals.push(Goal {
            goal: goal.clone(),
            priority,
            source: "internal".into(),
            set_at: self.clock,
        });
        self.goals.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        self.consciousness.self_model.set_goal(goal, priority);
    }

    pub fn define_boundary(&mut self, name: impl Into<String>, importance: f32) {
        let name = name.into();
        self.boundaries.push(Boundary::new(name.clone(), importance));
        self.consciousness.self_model.define_boundary(name, importance);
    }

    pub fn add_capability(&mut self, capability: impl Into<String>) {
        let capability = capability.into();
        self.capabilities.insert(capability.clone());
        self.consciousness.self_model.add_capability(capability);
    }

    pub fn add_limitation(&mut self, limitation: impl Into<String>) {
        let limitation = limitation.into();
        self.limitations.insert(limitation.clone());
        self.consciousness.self_model.add_limitation(limitation);
    }

    pub fn learn_concept(&mut self, concept: Concept) {
        self.creativity.learn(concept, self.rng.as_mut());
    }

    pub fn add_inspiration(&mut self, source: impl Into<String>, intensity: f32) -> Option<Idea> {
        self.creativity
            .add_inspiration(source, intensity, self.rng.as_mut(), self.clock)
    }

    /// Notice entries, attend to them and learn them as concepts
    pub fn perceive(&mut self, environment: &Environment) -> Vec<Percept> {
        let percepts = perception::perceive(environment);
        for percept in &percepts {
            self.consciousness.attend(&percept.stimulus, self.rng.as_mut(), self.clock);
            self.creativity.learn(percept.concept(), self.rng.as_mut());
        }
        percepts
    }

    /// Run one full cycle against `environment`
    ///
    /// Fails only with `EmptyOptionSet`, which cannot happen while the
    /// baseline actions survive boundary filtering.
    pub async fn act(&mut self, environment: &Environment) -> Result<CycleOutcome> {
        self.clock += self.cycle_interval_ms;
        self.cycles += 1;
        let now = self.clock;
        self.decision.restore_willpower(self.willpower_recovery);

        let percepts = self.perceive(environment);
        let candidates = self.generate_possible_actions(&percepts, environment);
        let mut options = filter_by_boundaries(candidates, &self.boundaries);

        let state = percepts
            .first()
            .map(|p| StateId::new(p.id.clone()))
            .unwrap_or_else(StateId::fallback);
        options.push(self.learning.best_action(&state));

        let context = DecisionContext {
            perceived: percepts.iter().map(|p| p.id.clone()).collect(),
            goals: self.goals.iter().map(|g| g.goal.clone()).collect(),
            uncertainty: None,
            time_constraint: None,
            current_time: now,
        };
        let decision = self.decision.make_decision(&options, &context, self.rng.as_mut())?;

        let result = self.execute_action(&decision.option, environment).await;

        let next_percepts = self.perceive(environment);
        let experience = Experience {
            state,
            action: decision.option.clone(),
            reward: if result.success { 1.0 } else { -1.0 },
            next_state: Some(
                next_percepts
                    .first()
                    .map(|p| StateId::new(p.id.clone()))
                    .unwrap_or_else(StateId::fallback),
            ),
            at: now,
        };
        self.learning.store_experience(experience.clone());
        self.consciousness
            .integrate_information(&experience, self.rng.as_mut(), now);

        self.update_self_model(&decision.option, &result);
        self.emergence.evolve(self.rng.as_mut(), now);

        tracing::info!(
            cycle = self.cycles,
            action = %decision.option.kind,
            target = decision.option.target.as_deref().unwrap_or("-"),
            success = result.success,
            "Cycle complete"
        );

        Ok(CycleOutcome {
            action: decision.option,
            result,
            reasoning: decision.reasoning,
            at: now,
        })
    }

    /// Baseline actions, per-percept actions, an optional innovative action
    /// and every action declared anywhere in the environment
    ///
    /// Declared actions do not depend on perception: an API entry too dull
    /// to notice still offers its capability.
    pub fn generate_possible_actions(&mut self, percepts: &[Percept], environment: &Environment) -> Vec<Action> {
        let mut actions = vec![Action::observe(), Action::wait()];

        for percept in percepts {
            match percept.kind {
                EntryKind::Opportunity => actions.push(Action::engage(percept.id.clone(), percept.features.valence)),
                EntryKind::Threat => actions.push(Action::avoid(percept.id.clone(), percept.features.valence)),
                EntryKind::Resource => actions.push(Action::acquire(percept.id.clone(), percept.features.relevance)),
                EntryKind::Api | EntryKind::Unknown => {}
            }
        }

        if let Some(idea) = self.creativity.create_idea(self.rng.as_mut(), self.clock) {
            if idea.novelty_score > INNOVATION_THRESHOLD {
                actions.push(Action::innovative(idea.emergent.description.clone()));
            }
        }

        for entry in environment.entries() {
            actions.extend(entry.declared_actions.iter().cloned());
        }
        actions
    }

    async fn execute_action(&mut self, action: &Action, environment: &Environment) -> ActionResult {
        if let Some(call) = &action.capability {
            let capability = environment.find(&call.provider).and_then(|e| e.capability.clone());
            let Some(capability) = capability else {
                tracing::warn!(provider = %call.provider, "Capability not available");
                return ActionResult::failed(format!("{} not available in environment.", call.provider));
            };
            return match capability.invoke(&call.request).await {
                Ok(outcome) => ActionResult {
                    success: outcome.success,
                    feedback: outcome.feedback,
                },
                Err(e) => {
                    tracing::warn!(provider = %call.provider, error = %e, "Capability call failed");
                    ActionResult::failed(e.to_string())
                }
            };
        }

        let success = self.rng.chance(self.action_success_probability);
        if success && action.kind == ActionKind::Innovative {
            self.consciousness.conscious.remember(Thought {
                id: format!("thought-{}", self.clock),
                description: format!(
                    "Reflected on innovative action: {}",
                    action.basis.as_deref().unwrap_or("unknown")
                ),
                kind: QualiaKind::Learning,
            });
        }
        ActionResult {
            success,
            feedback: format!("Action execution feedback for {}", action.kind),
        }
    }

    fn update_self_model(&mut self, action: &Action, result: &ActionResult) {
        self.history.push_back(HistoryEntry {
            action: action.clone(),
            result: result.clone(),
            at: self.clock,
        });
        if self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }

        if result.success && self.rng.next_f32() > 0.8 {
            let capability = match &action.target {
                Some(target) => format!("{} {}", action.kind, target),
                None => action.kind.to_string(),
            };
            self.add_capability(capability);
        }
        if !result.success && self.rng.next_f32() > 0.6 {
            self.add_limitation(format!("difficulty with {}", action.kind));
        }
        self.consciousness
            .self_model
            .record(format!("Performed action of type: {}", action.kind), self.clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    fn environment() -> Environment {
        Environment::new(vec![
            EnvironmentEntry::new("library", EntryKind::Resource, 0.8, 0.5, "A library of ancient texts.")
                .with_attribute("emotion", "positive"),
            EnvironmentEntry::new("dilemma", EntryKind::Threat, 0.9, 0.7, "A difficult choice.")
                .with_attribute("emotion", "negative"),
        ])
    }

    #[test]
    fn test_construction_wires_subsystems() {
        let agent = AutonomousAgent::new("agent-1", &AgentConfig::default());
        assert_eq!(agent.emergence.components().len(), 4);
        assert_eq!(agent.emergence.interactions().len(), 4);
        assert_eq!(agent.boundaries().len(), 3);
        assert_eq!(agent.goals()[0].goal, "maintain integrity");
        assert_eq!(agent.consciousness.self_model.future()[0].goal, "maintain integrity");
    }

    #[test]
    fn test_session_id_follows_seed() {
        let a = AutonomousAgent::new("a", &AgentConfig::default().with_seed(7));
        let b = AutonomousAgent::new("b", &AgentConfig::default().with_seed(7));
        assert_eq!(a.session_id(), b.session_id());
    }

    #[test]
    fn test_candidates_follow_entry_kinds() {
        let mut agent = AutonomousAgent::new("agent-1", &AgentConfig::default());
        let environment = environment();
        let percepts = agent.perceive(&environment);
        let actions = agent.generate_possible_actions(&percepts, &environment);
        let kinds: Vec<ActionKind> = actions.iter().map(|a| a.kind).collect();
        assert_eq!(&kinds[..4], &[ActionKind::Observe, ActionKind::Wait, ActionKind::Acquire, ActionKind::Avoid]);
        assert_eq!(agent.creativity.concepts().len(), 2);
    }

    #[test]
    fn test_unnoticed_entry_still_offers_declared_action() {
        use crate::capability::CapabilityRequest;

        let mut agent = AutonomousAgent::new("agent-1", &AgentConfig::default());
        let environment = Environment::new(vec![EnvironmentEntry::new(
            "repo-api",
            EntryKind::Api,
            0.4,
            0.5,
            "A quiet repository API",
        )
        .with_action(Action::delegated(
            "repo-api",
            CapabilityRequest::CreateResource {
                name: "repo".into(),
                description: "test".into(),
            },
        ))]);

        let percepts = agent.perceive(&environment);
        assert!(percepts.is_empty());
        let actions = agent.generate_possible_actions(&percepts, &environment);
        let kinds: Vec<ActionKind> = actions.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActionKind::Observe, ActionKind::Wait, ActionKind::CreateResource]);
    }

    #[tokio::test]
    async fn test_cycle_updates_every_subsystem() {
        let mut agent = AutonomousAgent::new("agent-1", &AgentConfig::default());
        let outcome = agent.act(&environment()).await.unwrap();

        assert_eq!(agent.clock(), 2000);
        assert_eq!(outcome.at, 2000);
        assert_eq!(agent.learning.memory().len(), 1);
        assert_eq!(agent.decision.history().len(), 1);
        assert_eq!(agent.history().count(), 1);
        assert!(agent.consciousness.self_model.present().is_some());
        assert!(agent
            .consciousness
            .self_model
            .narrative()
            .iter()
            .any(|e| e.event.starts_with("Performed action of type")));
        assert!(agent.emergence.interactions()[0].outcomes.len() == 1);
    }

    #[tokio::test]
    async fn test_missing_capability_is_soft_failure() {
        use crate::capability::CapabilityRequest;

        let mut config = AgentConfig::default();
        config.initial_willpower = 0.0;
        config.willpower_recovery = 0.0;
        let mut agent = AutonomousAgent::with_random("agent-1", &config, Box::new(ScriptedRandom::constant(0.5)));
        let delegated = Action::delegated(
            "resource-api",
            CapabilityRequest::CreateResource {
                name: "repo".into(),
                description: "test".into(),
            },
        )
        .with_immediate_reward(1.0);
        let environment = Environment::new(vec![EnvironmentEntry::new(
            "resource-api",
            EntryKind::Api,
            1.0,
            1.0,
            "API without an attached capability",
        )
        .with_action(delegated)]);

        let outcome = agent.act(&environment).await.unwrap();
        assert_eq!(outcome.action.kind, ActionKind::CreateResource);
        assert!(!outcome.result.success);
        assert!(outcome.result.feedback.contains("not available"));
    }
}
