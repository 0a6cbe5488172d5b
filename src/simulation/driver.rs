//! Fixed-interval simulation driver
//!
//! Owns one agent and its environment. A cycle always runs to completion
//! before the next tick is awaited, so cycles never overlap.

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;

use crate::agent::{ActionKind, AutonomousAgent, CycleOutcome, EntryKind, Environment, EnvironmentEntry};
use crate::core::config::AgentConfig;

/// The observable part of one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleTrace {
    pub cycle: u64,
    pub action: ActionKind,
    pub target: Option<String>,
    pub success: bool,
    pub feedback: String,
}

impl CycleTrace {
    fn from_outcome(cycle: u64, outcome: &CycleOutcome) -> Self {
        Self {
            cycle,
            action: outcome.action.kind,
            target: outcome.action.target.clone(),
            success: outcome.result.success,
            feedback: outcome.result.feedback.clone(),
        }
    }
}

pub struct SimulationDriver {
    agent: AutonomousAgent,
    environment: Environment,
    cycle_interval: Duration,
    reflection_interval: u64,
    dynamic_event_probability: f32,
    cycle: u64,
    traces: VecDeque<CycleTrace>,
    trace_retention: usize,
}

impl SimulationDriver {
    pub fn new(agent: AutonomousAgent, environment: Environment, config: &AgentConfig) -> Self {
        Self {
            agent,
            environment,
            cycle_interval: Duration::from_millis(config.cycle_interval_ms),
            reflection_interval: config.reflection_interval,
            dynamic_event_probability: config.dynamic_event_probability,
            cycle: 0,
            traces: VecDeque::new(),
            trace_retention: config.trace_retention.max(1),
        }
    }

    pub fn agent(&self) -> &AutonomousAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut AutonomousAgent {
        &mut self.agent
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// The most recent traces, oldest first
    pub fn traces(&self) -> &VecDeque<CycleTrace> {
        &self.traces
    }

    /// Run one cycle: world event, agent cycle, environment reaction
    ///
    /// A cycle the agent cannot complete is logged and skipped.
    pub async fn step(&mut self) -> Option<CycleTrace> {
        self.cycle += 1;
        self.generate_world_event();

        let outcome = match self.agent.act(&self.environment).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(cycle = self.cycle, error = %e, "Cycle skipped");
                return None;
            }
        };

        self.react(&outcome);
        let trace = CycleTrace::from_outcome(self.cycle, &outcome);
        self.traces.push_back(trace.clone());
        while self.traces.len() > self.trace_retention {
            self.traces.pop_front();
        }

        if self.reflection_interval > 0 && self.cycle % self.reflection_interval == 0 {
            self.log_reflection();
        }
        Some(trace)
    }

    /// Run `cycles` cycles back to back
    pub async fn run_cycles(&mut self, cycles: u64) -> &VecDeque<CycleTrace> {
        for _ in 0..cycles {
            self.step().await;
        }
        &self.traces
    }

    /// Pump cycles on the configured interval until `max_cycles` or `shutdown`
    pub async fn run<F>(&mut self, max_cycles: Option<u64>, shutdown: F) -> &VecDeque<CycleTrace>
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.cycle_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(agent = %self.agent.id(), interval_ms = self.cycle_interval.as_millis() as u64, "Simulation starting");
        loop {
            if max_cycles.is_some_and(|max| self.cycle >= max) {
                break;
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!(cycles = self.cycle, "Shutdown requested");
                    break;
                }
                _ = interval.tick() => {
                    self.step().await;
                }
            }
        }
        tracing::info!(cycles = self.cycle, "Simulation stopped");
        &self.traces
    }

    fn generate_world_event(&mut self) {
        let rng = self.agent.rng();
        if !rng.chance(self.dynamic_event_probability) {
            return;
        }
        let relevance = rng.next_f32();
        let intensity = rng.next_f32();
        let id = format!("dynamic-event-{}", self.cycle);
        tracing::info!(event = %id, "New dynamic event generated");
        self.environment.add(
            EnvironmentEntry::new(
                id,
                EntryKind::Opportunity,
                relevance,
                intensity,
                "A new, unexpected opportunity has arisen.",
            )
            .with_attribute("color", "cyan")
            .with_attribute("emotion", "positive"),
        );
    }

    fn react(&mut self, outcome: &CycleOutcome) {
        if !outcome.result.success {
            return;
        }
        match outcome.action.kind {
            ActionKind::Acquire => {
                if let Some(target) = &outcome.action.target {
                    if self.environment.remove(target).is_some() {
                        tracing::info!(resource = %target, "Resource acquired and removed");
                    }
                }
            }
            ActionKind::Innovative => {
                let rng = self.agent.rng();
                let relevance = rng.next_f32();
                let intensity = rng.next_f32();
                let id = format!("new-resource-{}", self.cycle);
                tracing::info!(resource = %id, "Agent created a new resource");
                self.environment.add(
                    EnvironmentEntry::new(
                        id,
                        EntryKind::Resource,
                        relevance,
                        intensity,
                        "A new resource created by the agent.",
                    )
                    .with_attribute("color", "white")
                    .with_attribute("emotion", "neutral"),
                );
            }
            _ => {}
        }
    }

    fn log_reflection(&mut self) {
        let reflection = self.agent.reflect();
        match serde_json::to_string(&reflection.consciousness) {
            Ok(consciousness) => tracing::info!(
                cycle = self.cycle,
                willpower = reflection.decision.current_willpower,
                complexity = reflection.emergence.complexity,
                %consciousness,
                "Reflection"
            ),
            Err(e) => tracing::warn!(error = %e, "Reflection could not be serialized"),
        }
    }
}
