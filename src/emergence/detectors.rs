//! Emergence detectors
//!
//! Each detector is a pure function of the component graph. The system
//! stores what they find under a fixed key, overwriting earlier findings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::{variance, ComponentId};
use crate::emergence::{EmergenceComponent, Interaction, InteractionKind};

const ACTIVE_THRESHOLD: f32 = 0.6;
const SYNCHRONY_THRESHOLD: f32 = 0.7;
const HUB_CONNECTIONS: usize = 3;
const STRONG_INTERACTION: f32 = 0.7;

/// Capability inferred from a functional cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    SelfRegulation,
    CollectiveBehavior,
    UnknownFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum Finding {
    Synchronization {
        level: f32,
        participants: usize,
    },
    Hierarchy {
        hubs: Vec<ComponentId>,
        levels: u32,
    },
    Function {
        /// Indices into the interaction list
        cluster: Vec<usize>,
        capability: FunctionKind,
    },
    Structure {
        triangle: [ComponentId; 3],
    },
}

impl Finding {
    pub fn description(&self) -> &'static str {
        match self {
            Finding::Synchronization { .. } => "Components exhibiting synchronized behavior",
            Finding::Hierarchy { .. } => "Hierarchical organization detected",
            Finding::Function { .. } => "New functional capability emerged",
            Finding::Structure { .. } => "New structural pattern emerged",
        }
    }
}

/// More than two highly active components whose activities barely differ
pub fn synchronization(components: &[EmergenceComponent]) -> Option<Finding> {
    let active: Vec<f32> = components
        .iter()
        .map(|c| c.state.activity)
        .filter(|a| *a > ACTIVE_THRESHOLD)
        .collect();
    if active.len() <= 2 {
        return None;
    }
    let level = 1.0 - variance(&active)?;
    (level > SYNCHRONY_THRESHOLD).then_some(Finding::Synchronization {
        level,
        participants: active.len(),
    })
}

/// Components with more than three connections act as hubs
pub fn hierarchy(components: &[EmergenceComponent]) -> Option<Finding> {
    let hubs: Vec<ComponentId> = components
        .iter()
        .filter(|c| c.connections.len() > HUB_CONNECTIONS)
        .map(|c| c.id.clone())
        .collect();
    if hubs.is_empty() {
        return None;
    }
    let max = components.iter().map(|c| c.connections.len()).max().unwrap_or(0);
    let levels = ((max + 1) as f32).log2().ceil() as u32;
    Some(Finding::Hierarchy { hubs, levels })
}

/// Clusters of strong interactions sharing a component
///
/// Needs more than two strong interactions. Each unclaimed interaction seeds
/// a cluster and claims every unclaimed interaction touching one of its own
/// two components; single-member clusters are dropped.
pub fn functions(interactions: &[Interaction]) -> Vec<Finding> {
    let strong: Vec<usize> = interactions
        .iter()
        .enumerate()
        .filter(|(_, i)| i.strength > STRONG_INTERACTION)
        .map(|(index, _)| index)
        .collect();
    if strong.len() <= 2 {
        return Vec::new();
    }

    let mut claimed = BTreeSet::new();
    let mut findings = Vec::new();
    for &seed in &strong {
        if !claimed.insert(seed) {
            continue;
        }
        let mut cluster = vec![seed];
        for &other in &strong {
            if claimed.contains(&other) {
                continue;
            }
            if interactions[seed].shares_component(&interactions[other]) {
                cluster.push(other);
                claimed.insert(other);
            }
        }
        if cluster.len() > 1 {
            let capability = infer_capability(cluster.iter().map(|&i| interactions[i].kind));
            findings.push(Finding::Function { cluster, capability });
        }
    }
    findings
}

fn infer_capability(kinds: impl Iterator<Item = InteractionKind>) -> FunctionKind {
    let kinds: BTreeSet<InteractionKind> = kinds.collect();
    if kinds.contains(&InteractionKind::Feedback) && kinds.contains(&InteractionKind::Amplification) {
        FunctionKind::SelfRegulation
    } else if kinds.contains(&InteractionKind::Synchronization) && kinds.contains(&InteractionKind::Coordination) {
        FunctionKind::CollectiveBehavior
    } else {
        FunctionKind::UnknownFunction
    }
}

/// Every distinct triangle in the connection graph, in id order
pub fn structures(components: &[EmergenceComponent]) -> Vec<Finding> {
    let mut triangles = BTreeSet::new();
    for component in components {
        for neighbour_id in &component.connections {
            let Some(neighbour) = components.iter().find(|c| &c.id == neighbour_id) else {
                continue;
            };
            for third in &neighbour.connections {
                if third != &component.id && third != neighbour_id && component.connections.contains(third) {
                    let mut triple = [component.id.clone(), neighbour_id.clone(), third.clone()];
                    triple.sort();
                    triangles.insert(triple);
                }
            }
        }
    }
    triangles
        .into_iter()
        .map(|triangle| Finding::Structure { triangle })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emergence::{ComponentProfile, ComponentState};

    fn component(id: &str, activity: f32, connections: &[&str]) -> EmergenceComponent {
        EmergenceComponent {
            id: ComponentId::new(id),
            profile: ComponentProfile::new("cognitive", "test"),
            state: ComponentState {
                activity,
                ..ComponentState::default()
            },
            connections: connections.iter().map(|c| ComponentId::new(*c)).collect(),
        }
    }

    fn interaction(a: &str, b: &str, kind: InteractionKind, strength: f32) -> Interaction {
        Interaction::new(ComponentId::new(a), ComponentId::new(b), kind, strength, 0)
    }

    #[test]
    fn test_synchronization_needs_three_active() {
        let two = vec![component("a", 0.9, &[]), component("b", 0.9, &[])];
        assert!(synchronization(&two).is_none());

        let three = vec![component("a", 0.9, &[]), component("b", 0.8, &[]), component("c", 0.7, &[])];
        match synchronization(&three) {
            Some(Finding::Synchronization { participants, level }) => {
                assert_eq!(participants, 3);
                assert!(level > 0.99);
            }
            other => panic!("expected synchronization, got {:?}", other),
        }
    }

    #[test]
    fn test_hierarchy_levels() {
        let components = vec![
            component("hub", 0.5, &["a", "b", "c", "d"]),
            component("a", 0.5, &["hub"]),
        ];
        match hierarchy(&components) {
            Some(Finding::Hierarchy { hubs, levels }) => {
                assert_eq!(hubs, vec![ComponentId::new("hub")]);
                // ceil(log2(5))
                assert_eq!(levels, 3);
            }
            other => panic!("expected hierarchy, got {:?}", other),
        }
        assert!(hierarchy(&components[1..]).is_none());
    }

    #[test]
    fn test_agent_wiring_yields_self_regulation() {
        let interactions = vec![
            interaction("creativity", "decision", InteractionKind::Feedback, 0.8),
            interaction("decision", "consciousness", InteractionKind::Synchronization, 0.7),
            interaction("creativity", "consciousness", InteractionKind::Amplification, 0.75),
            interaction("learning", "decision", InteractionKind::Reinforcement, 0.85),
        ];
        let findings = functions(&interactions);
        assert_eq!(findings.len(), 1);
        match &findings[0] {
            Finding::Function { cluster, capability } => {
                assert_eq!(cluster, &vec![0, 2, 3]);
                assert_eq!(*capability, FunctionKind::SelfRegulation);
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_strong_interactions() {
        let interactions = vec![
            interaction("a", "b", InteractionKind::Feedback, 0.8),
            interaction("b", "c", InteractionKind::Amplification, 0.9),
        ];
        assert!(functions(&interactions).is_empty());
    }

    #[test]
    fn test_triangles_deduplicated() {
        let components = vec![
            component("a", 0.5, &["b", "c"]),
            component("b", 0.5, &["a", "c"]),
            component("c", 0.5, &["a", "b", "d"]),
            component("d", 0.5, &["c"]),
        ];
        let findings = structures(&components);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0],
            Finding::Structure {
                triangle: [ComponentId::new("a"), ComponentId::new("b"), ComponentId::new("c")]
            }
        );
    }
}
