//! Perception - turning environment entries into features and stimuli

use serde::{Deserialize, Serialize};

use crate::agent::environment::{EntryKind, Environment, EnvironmentEntry};
use crate::consciousness::{QualiaKind, Stimulus};
use crate::creativity::Concept;

const RELEVANCE_GATE: f32 = 0.5;
const INTENSITY_GATE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// `0.1 × populated fields + intensity`; may exceed 1
    pub complexity: f32,
    pub valence: f32,
    pub relevance: f32,
}

/// A perceived environment entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Percept {
    pub id: String,
    pub kind: EntryKind,
    pub intensity: f32,
    pub features: Features,
    pub description: String,
    pub stimulus: Stimulus,
}

impl Percept {
    pub fn from_entry(entry: &EnvironmentEntry) -> Self {
        Self {
            id: entry.id.clone(),
            kind: entry.kind,
            intensity: entry.intensity,
            features: extract_features(entry),
            description: entry.description.clone(),
            stimulus: stimulus(entry),
        }
    }

    /// The concept the creativity system learns from this percept
    pub fn concept(&self) -> Concept {
        Concept::new(
            self.id.clone(),
            self.kind.name(),
            self.kind.name(),
            self.features.complexity,
        )
    }
}

/// Entries that are relevant or intense enough to notice, in environment order
pub fn perceive(environment: &Environment) -> Vec<Percept> {
    environment
        .entries()
        .iter()
        .filter(|e| e.relevance > RELEVANCE_GATE || e.intensity > INTENSITY_GATE)
        .map(Percept::from_entry)
        .collect()
}

pub fn extract_features(entry: &EnvironmentEntry) -> Features {
    Features {
        complexity: entry.field_count() as f32 * 0.1 + entry.intensity,
        valence: valence(entry),
        relevance: entry.relevance,
    }
}

fn valence(entry: &EnvironmentEntry) -> f32 {
    let tone = |text: &str| {
        if text.contains("positive") {
            Some(0.7)
        } else if text.contains("negative") {
            Some(0.3)
        } else {
            None
        }
    };
    tone(&entry.description)
        .or_else(|| entry.attribute("emotion").and_then(tone))
        .unwrap_or(0.5)
}

fn qualia_kind(entry: &EnvironmentEntry) -> QualiaKind {
    if entry.attribute("qualia") == Some("relationship") {
        return QualiaKind::Relationship;
    }
    match entry.kind {
        EntryKind::Opportunity => QualiaKind::Achievement,
        EntryKind::Resource => QualiaKind::Learning,
        _ => QualiaKind::Neutral,
    }
}

fn stimulus(entry: &EnvironmentEntry) -> Stimulus {
    let attribute = |key: &str| entry.attribute(key).map(str::to_string);
    Stimulus {
        id: entry.id.clone(),
        intensity: entry.intensity,
        relevance: entry.relevance,
        description: entry.description.clone(),
        color: attribute("color"),
        texture: attribute("texture"),
        emotion: attribute("emotion"),
        meaning: attribute("meaning"),
        qualia_kind: qualia_kind(entry),
    }
}
