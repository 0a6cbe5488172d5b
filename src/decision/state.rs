//! Internal state consulted by deliberate decisions

use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    pub id: String,
    pub statement: String,
    pub confidence: f32,
    pub evidence: Vec<String>,
    pub previous_statement: Option<String>,
}

impl Belief {
    /// Confidence weighted by the amount of evidence
    pub fn strength(&self) -> f32 {
        self.confidence * self.evidence.len() as f32
    }

    /// Merge new information: confidences average, evidence accumulates
    pub fn merge(&mut self, statement: String, confidence: f32, evidence: Vec<String>) {
        self.confidence = ((self.confidence + confidence.clamp(0.0, 1.0)) / 2.0).clamp(0.0, 1.0);
        self.evidence.extend(evidence);
        let previous = std::mem::replace(&mut self.statement, statement);
        self.previous_statement = Some(previous);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desire {
    pub id: String,
    pub content: String,
    pub strength: f32,
    pub urgency: f32,
    pub fulfillment_attempts: u32,
}

impl Desire {
    /// Weight in the desire-alignment mean
    pub fn weight(&self) -> f32 {
        self.strength * self.urgency
    }

    pub fn satisfy(&mut self) {
        self.strength *= 0.8;
        self.fulfillment_attempts += 1;
    }

    pub fn intensify(&mut self) {
        self.urgency = (self.urgency * 1.1).min(1.0);
    }
}

/// A value the agent holds, weighted by importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldValue {
    pub id: String,
    pub statement: String,
    pub importance: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Fear,
    Excitement,
    Sadness,
    Anger,
    Other(String),
}

impl EmotionKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "fear" => EmotionKind::Fear,
            "excitement" => EmotionKind::Excitement,
            "sadness" => EmotionKind::Sadness,
            "anger" => EmotionKind::Anger,
            other => EmotionKind::Other(other.to_string()),
        }
    }
}

/// A time-scoped emotion; expiry is checked lazily on read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub kind: EmotionKind,
    pub intensity: f32,
    pub created_at: SimTime,
    pub ttl: SimTime,
}

impl Emotion {
    pub fn expires_at(&self) -> SimTime {
        self.created_at.saturating_add(self.ttl)
    }

    pub fn is_alive(&self, now: SimTime) -> bool {
        now < self.expires_at()
    }
}

/// Social or situational pressure acting on every option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalInfluence {
    pub source: String,
    pub strength: f32,
}
