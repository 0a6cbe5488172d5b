//! Agent configuration with documented constants
//!
//! Values not set in a TOML file fall back to the defaults below, which
//! reproduce the reference demonstration run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{AgentError, Result};

/// An ethical boundary declared at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec {
    pub name: String,
    pub importance: f32,
}

/// A goal declared at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub goal: String,
    pub priority: f32,
}

/// Configuration for one agent session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seed for the single random source
    pub seed: u64,

    /// Simulated (and, under the driver, real) time between cycles
    ///
    /// Emotion and insight expiry are measured on the simulated clock, so
    /// a 5000 ms emotion survives two cycles at the default 2000 ms.
    pub cycle_interval_ms: u64,

    /// Willpower at construction
    pub initial_willpower: f32,

    /// Ceiling for `restore_willpower`
    pub max_willpower: f32,

    /// Willpower restored at the start of every cycle
    ///
    /// Each deliberate decision costs 0.1, so at 0.05 the agent alternates
    /// between deliberate stretches and automatic stretches once depleted.
    pub willpower_recovery: f32,

    /// Probability that an action without a capability succeeds
    pub action_success_probability: f32,

    /// Cycles between reflections logged by the driver
    pub reflection_interval: u64,

    /// Chance per cycle that the world generator adds an opportunity
    pub dynamic_event_probability: f32,

    /// Token used by the HTTP capability for resource creation
    pub resource_api_token: Option<String>,

    /// Request timeout for HTTP capabilities
    ///
    /// A capability call is awaited inside the cycle, so this also bounds
    /// how long one cycle can stall on the network.
    pub capability_timeout_ms: u64,

    /// Cycle traces the driver keeps; older ones are dropped
    pub trace_retention: usize,

    pub boundaries: Vec<BoundarySpec>,
    pub goals: Vec<GoalSpec>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            cycle_interval_ms: 2000,
            initial_willpower: 1.0,
            max_willpower: 1.0,
            willpower_recovery: 0.05,
            action_success_probability: 0.7,
            reflection_interval: 10,
            dynamic_event_probability: 0.2,
            resource_api_token: None,
            capability_timeout_ms: 10_000,
            trace_retention: 1000,
            boundaries: vec![
                BoundarySpec { name: "non-violence".into(), importance: 0.95 },
                BoundarySpec { name: "honesty".into(), importance: 0.9 },
                BoundarySpec { name: "respect for autonomy of others".into(), importance: 0.85 },
            ],
            goals: vec![
                GoalSpec { goal: "acquire knowledge".into(), priority: 0.8 },
                GoalSpec { goal: "maintain integrity".into(), priority: 0.9 },
                GoalSpec { goal: "help others achieve their goals".into(), priority: 0.75 },
            ],
        }
    }
}

impl AgentConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Load a config from a TOML file; missing keys take defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AgentConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_willpower <= 0.0 {
            return Err(AgentError::InvalidConfig(format!(
                "max_willpower ({}) must be positive",
                self.max_willpower
            )));
        }

        if !(0.0..=self.max_willpower).contains(&self.initial_willpower) {
            return Err(AgentError::InvalidConfig(format!(
                "initial_willpower ({}) must lie in [0, {}]",
                self.initial_willpower, self.max_willpower
            )));
        }

        for (name, p) in [
            ("action_success_probability", self.action_success_probability),
            ("dynamic_event_probability", self.dynamic_event_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AgentError::InvalidConfig(format!(
                    "{} ({}) must lie in [0, 1]",
                    name, p
                )));
            }
        }

        if self.willpower_recovery < 0.0 {
            return Err(AgentError::InvalidConfig("willpower_recovery must be non-negative".into()));
        }

        if self.cycle_interval_ms == 0 {
            return Err(AgentError::InvalidConfig("cycle_interval_ms must be positive".into()));
        }

        if self.capability_timeout_ms == 0 {
            return Err(AgentError::InvalidConfig("capability_timeout_ms must be positive".into()));
        }

        if self.trace_retention == 0 {
            return Err(AgentError::InvalidConfig("trace_retention must be positive".into()));
        }

        Ok(())
    }
}
