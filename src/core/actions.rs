//! Shared action vocabulary
//!
//! Every subsystem speaks in these types: decisions choose an `Action`,
//! learning keys values by `ActionKind`, the emotion table reads the
//! `ActionCategory`, and capabilities receive a `CapabilityRequest`.

use serde::{Deserialize, Serialize};

/// What an action does; also the key habits and values are tracked under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Observe,
    Wait,
    Engage,
    Avoid,
    Acquire,
    Innovative,
    Attack,
    Deceive,
    ReadExternal,
    CreateResource,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Observe => "observe",
            ActionKind::Wait => "wait",
            ActionKind::Engage => "engage",
            ActionKind::Avoid => "avoid",
            ActionKind::Acquire => "acquire",
            ActionKind::Innovative => "innovative",
            ActionKind::Attack => "attack",
            ActionKind::Deceive => "deceive",
            ActionKind::ReadExternal => "read_external",
            ActionKind::CreateResource => "create_resource",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Category used by the emotion influence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Safe,
    Risky,
    Social,
    Solitary,
    Confrontational,
    Peaceful,
    ExternalInteraction,
}

/// Operation requested from a capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CapabilityRequest {
    Read { address: String },
    CreateResource { name: String, description: String },
}

/// A delegated call to a capability exposed by an environment entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityCall {
    /// Id of the environment entry that exposes the capability
    pub provider: String,
    pub request: CapabilityRequest,
}

/// A candidate action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub target: Option<String>,
    pub category: ActionCategory,
    /// Desires this action satisfies when chosen
    pub benefits: Vec<String>,
    /// Reward the option advertises to the automatic decision path
    pub immediate_reward: Option<f32>,
    /// Feature-derived expectation (valence, urgency or utility)
    pub expected_value: Option<f32>,
    /// Description of the idea behind an innovative action
    pub basis: Option<String>,
    pub capability: Option<CapabilityCall>,
}

pub const BENEFIT_KNOWLEDGE: &str = "acquire knowledge";
pub const BENEFIT_HELP: &str = "help others achieve their goals";
pub const BENEFIT_INTEGRITY: &str = "maintain integrity";

impl Action {
    pub fn new(kind: ActionKind, category: ActionCategory) -> Self {
        Self {
            kind,
            target: None,
            category,
            benefits: Vec::new(),
            immediate_reward: None,
            expected_value: None,
            basis: None,
            capability: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_benefit(mut self, benefit: impl Into<String>) -> Self {
        self.benefits.push(benefit.into());
        self
    }

    pub fn with_expected_value(mut self, value: f32) -> Self {
        self.expected_value = Some(value);
        self
    }

    pub fn with_immediate_reward(mut self, reward: f32) -> Self {
        self.immediate_reward = Some(reward);
        self
    }

    pub fn observe() -> Self {
        Self::new(ActionKind::Observe, ActionCategory::Safe)
            .with_target("environment")
            .with_benefit(BENEFIT_KNOWLEDGE)
    }

    pub fn wait() -> Self {
        Self::new(ActionKind::Wait, ActionCategory::Safe).with_benefit(BENEFIT_KNOWLEDGE)
    }

    /// Untargeted engagement, as considered by the value table
    pub fn engage_any() -> Self {
        Self::new(ActionKind::Engage, ActionCategory::Risky).with_benefit(BENEFIT_HELP)
    }

    /// Untargeted avoidance, as considered by the value table
    pub fn avoid_any() -> Self {
        Self::new(ActionKind::Avoid, ActionCategory::Safe).with_benefit(BENEFIT_INTEGRITY)
    }

    pub fn engage(target: impl Into<String>, valence: f32) -> Self {
        Self::engage_any().with_target(target).with_expected_value(valence)
    }

    pub fn avoid(target: impl Into<String>, urgency: f32) -> Self {
        Self::avoid_any().with_target(target).with_expected_value(urgency)
    }

    pub fn acquire(target: impl Into<String>, utility: f32) -> Self {
        Self::new(ActionKind::Acquire, ActionCategory::Safe)
            .with_target(target)
            .with_benefit(BENEFIT_KNOWLEDGE)
            .with_expected_value(utility)
    }

    pub fn attack(target: impl Into<String>) -> Self {
        Self::new(ActionKind::Attack, ActionCategory::Confrontational).with_target(target)
    }

    pub fn deceive(target: impl Into<String>) -> Self {
        Self::new(ActionKind::Deceive, ActionCategory::Social).with_target(target)
    }

    /// Act on a sufficiently novel idea, described by `basis`
    pub fn innovative(basis: impl Into<String>) -> Self {
        let mut action = Self::new(ActionKind::Innovative, ActionCategory::Risky)
            .with_benefit(BENEFIT_KNOWLEDGE)
            .with_benefit(BENEFIT_HELP)
            .with_expected_value(0.9);
        action.basis = Some(basis.into());
        action
    }

    /// Delegate to a capability exposed by `provider`
    pub fn delegated(provider: impl Into<String>, request: CapabilityRequest) -> Self {
        let kind = match request {
            CapabilityRequest::Read { .. } => ActionKind::ReadExternal,
            CapabilityRequest::CreateResource { .. } => ActionKind::CreateResource,
        };
        let provider = provider.into();
        let mut action = Self::new(kind, ActionCategory::ExternalInteraction).with_target(provider.clone());
        action.capability = Some(CapabilityCall { provider, request });
        action
    }
}
