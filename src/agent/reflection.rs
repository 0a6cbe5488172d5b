//! Agent-wide introspection snapshot

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::AutonomousAgent;
use crate::consciousness::{ConsciousnessLevel, SelfReflection, StreamEntry};
use crate::core::types::SimTime;
use crate::creativity::CreativeCapacity;
use crate::decision::DecisionReflection;
use crate::emergence::EmergenceReport;
use crate::learning::LearningReflection;

/// Plain, serializable view of every subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReflection {
    pub agent_id: String,
    pub session_id: Uuid,
    pub cycle: u64,
    pub at: SimTime,
    pub decision: DecisionReflection,
    pub creative_capacity: CreativeCapacity,
    pub consciousness: ConsciousnessLevel,
    pub self_reflection: SelfReflection,
    pub emergence: EmergenceReport,
    pub learning: LearningReflection,
    pub stream_of_consciousness: Vec<StreamEntry>,
    pub capabilities: BTreeSet<String>,
    pub limitations: BTreeSet<String>,
}

impl AutonomousAgent {
    /// Gather diagnostics from every subsystem
    ///
    /// Decision reflection adjusts belief confidence; nothing else changes.
    /// The emergence report is read without advancing the dynamics.
    pub fn reflect(&mut self) -> AgentReflection {
        let now = self.clock();
        let decision = self.decision.reflect(self.rng.as_mut());
        AgentReflection {
            agent_id: self.id().to_string(),
            session_id: self.session_id(),
            cycle: self.cycles(),
            at: now,
            decision,
            creative_capacity: self.creativity.evaluate_creative_capacity(now),
            consciousness: self.consciousness.assess_consciousness_level(now),
            self_reflection: self.consciousness.self_model.reflect(),
            emergence: self.emergence.report(now),
            learning: self.learning.reflect(),
            stream_of_consciousness: self.consciousness.stream_of_consciousness(),
            capabilities: self.capabilities().clone(),
            limitations: self.limitations().clone(),
        }
    }
}
