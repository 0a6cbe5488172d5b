//! Synthesized ideas

use serde::{Deserialize, Serialize};

use crate::core::types::{ConceptId, SimTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaKind {
    Combinatorial,
    Exploratory,
    Transformational,
}

impl IdeaKind {
    pub fn label(&self) -> &'static str {
        match self {
            IdeaKind::Combinatorial => "combinatorial",
            IdeaKind::Exploratory => "exploratory",
            IdeaKind::Transformational => "transformational",
        }
    }
}

/// Properties of an idea that neither source concept had on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergentTraits {
    pub description: String,
    pub unpredictability: f32,
    /// Present only for combinatorial ideas
    pub synergy: Option<f32>,
    /// Present only for combinatorial ideas
    pub complexity: Option<f32>,
    pub paradigm_shift: bool,
}

/// How an exploratory or transformational idea departs from its base concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Elaboration {
    Extension { direction: String, intensity: f32 },
    Transformation { aspect: String, magnitude: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: String,
    pub kind: IdeaKind,
    pub source_concepts: Vec<ConceptId>,
    pub novelty_score: f32,
    pub emergent: EmergentTraits,
    pub elaboration: Option<Elaboration>,
    pub created_at: SimTime,
}

impl Idea {
    pub fn references(&self, id: &ConceptId) -> bool {
        self.source_concepts.iter().any(|c| c == id)
    }
}
