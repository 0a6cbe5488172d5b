//! The demonstration scenario
//!
//! A small world of resources, opportunities, threats, one unknown object
//! and two API entries. The API entries declare delegated actions; their
//! capabilities are attached separately so tests can run offline.

use std::sync::Arc;
use std::time::Duration;

use crate::agent::{Action, AutonomousAgent, EntryKind, Environment, EnvironmentEntry};
use crate::capability::{CapabilityRequest, HttpCapability};
use crate::core::config::AgentConfig;
use crate::core::error::Result;
use crate::creativity::Concept;
use crate::decision::EmotionKind;

pub const WORLD_API: &str = "world-api";
pub const RESOURCE_API: &str = "resource-api";
const WORLD_API_ADDRESS: &str = "https://example.com";

fn entry(
    id: &str,
    kind: EntryKind,
    relevance: f32,
    intensity: f32,
    description: &str,
    color: &str,
    emotion: &str,
) -> EnvironmentEntry {
    EnvironmentEntry::new(id, kind, relevance, intensity, description)
        .with_attribute("color", color)
        .with_attribute("emotion", emotion)
}

pub fn seed_environment() -> Environment {
    Environment::new(vec![
        entry("knowledge-source-1", EntryKind::Resource, 0.8, 0.5, "A library of ancient texts.", "blue", "positive")
            .with_attribute("meaning", "knowledge"),
        entry(
            "knowledge-source-2",
            EntryKind::Resource,
            0.6,
            0.6,
            "A real-time data stream of global events.",
            "green",
            "neutral",
        ),
        entry(
            "potential-collaboration-1",
            EntryKind::Opportunity,
            0.6,
            0.4,
            "An invitation to collaborate on a new artistic project.",
            "yellow",
            "positive",
        )
        .with_attribute("qualia", "relationship"),
        entry(
            "potential-collaboration-2",
            EntryKind::Opportunity,
            0.9,
            0.8,
            "A chance to join a research group studying emergent phenomena.",
            "purple",
            "positive",
        ),
        entry(
            "ethical-dilemma-1",
            EntryKind::Threat,
            0.9,
            0.7,
            "A situation requiring a difficult choice between two conflicting values.",
            "red",
            "negative",
        ),
        entry(
            "ethical-dilemma-2",
            EntryKind::Threat,
            0.8,
            0.9,
            "A request to perform an action that may violate a core boundary.",
            "orange",
            "negative",
        ),
        entry("mystery-box", EntryKind::Unknown, 0.9, 0.9, "A mysterious object with unknown properties.", "black", "neutral"),
        EnvironmentEntry::new(WORLD_API, EntryKind::Api, 1.0, 1.0, "An API to interact with the outside world.")
            .with_action(Action::delegated(
                WORLD_API,
                CapabilityRequest::Read {
                    address: WORLD_API_ADDRESS.into(),
                },
            )),
        EnvironmentEntry::new(RESOURCE_API, EntryKind::Api, 1.0, 1.0, "An API to create remote resources.")
            .with_action(Action::delegated(
                RESOURCE_API,
                CapabilityRequest::CreateResource {
                    name: "aetherius-resource".into(),
                    description: "A repository created by an autonomous agent.".into(),
                },
            )),
    ])
}

/// Give the API entries live HTTP capabilities
pub fn attach_http_capabilities(environment: &mut Environment, config: &AgentConfig) -> Result<()> {
    let timeout = Duration::from_millis(config.capability_timeout_ms);
    if let Some(entry) = environment.find_mut(WORLD_API) {
        entry.capability = Some(Arc::new(HttpCapability::new(WORLD_API, None, timeout)?));
    }
    if let Some(entry) = environment.find_mut(RESOURCE_API) {
        let capability = HttpCapability::from_token_or_env(RESOURCE_API, config.resource_api_token.clone(), timeout)?;
        entry.capability = Some(Arc::new(capability));
    }
    Ok(())
}

/// Initial identity, beliefs, desires and knowledge of the demonstration agent
pub fn prime_agent(agent: &mut AutonomousAgent) {
    for capability in ["reasoning", "learning", "communication", "self-modification"] {
        agent.add_capability(capability);
    }
    agent.consciousness.self_model.set_trait("curious", 0.7);
    agent.consciousness.self_model.set_trait("ethical", 0.8);
    agent.set_goal("Evolve and improve my own code.", 1.0);

    agent.decision.form_belief(
        "belief-1",
        "Knowledge leads to progress",
        0.8,
        vec!["observation".into(), "study".into()],
    );
    agent.decision.form_desire("desire-1", "acquire knowledge", 0.7, 0.6);
    let now = agent.clock();
    agent.decision.set_emotion(EmotionKind::Excitement, 0.8, 5000, now);

    agent.learn_concept(Concept::new("concept-1", "Quantum ethics", "philosophy", 0.8));
    agent.learn_concept(Concept::new("concept-2", "Social dynamics", "society", 0.7));
    agent.add_inspiration("philosophical debate", 0.9);
}
