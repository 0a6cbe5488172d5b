//! Metacognition - watching how decisions get made

use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;

const MIN_OBSERVATIONS: usize = 5;
const PATTERN_WINDOW: usize = 10;
const MAX_OBSERVATIONS: usize = 100;
const MAX_PATTERNS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub option_count: usize,
    pub context_complexity: f32,
    pub at: SimTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Too many options considered
    AnalysisParalysis,
    /// Options narrowed too quickly
    HastyDecisions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorPattern {
    pub kind: PatternKind,
    pub description: String,
    pub confidence: f32,
    pub at: SimTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetacognitiveReflection {
    pub observation_count: usize,
    pub patterns_detected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MetacognitiveSystem {
    observations: Vec<Observation>,
    patterns: Vec<BehaviorPattern>,
}

impl MetacognitiveSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn patterns(&self) -> &[BehaviorPattern] {
        &self.patterns
    }

    /// Record one decision episode and look for patterns
    pub fn observe(&mut self, option_count: usize, context_complexity: f32, at: SimTime) {
        self.observations.push(Observation {
            option_count,
            context_complexity,
            at,
        });
        if self.observations.len() > MAX_OBSERVATIONS {
            self.observations.remove(0);
        }
        self.detect_patterns(at);
    }

    fn detect_patterns(&mut self, at: SimTime) {
        if self.observations.len() < MIN_OBSERVATIONS {
            return;
        }

        let start = self.observations.len().saturating_sub(PATTERN_WINDOW);
        let recent = &self.observations[start..];
        let mean_options =
            recent.iter().map(|o| o.option_count as f32).sum::<f32>() / recent.len() as f32;

        if mean_options > 5.0 {
            self.record(BehaviorPattern {
                kind: PatternKind::AnalysisParalysis,
                description: "Tendency to consider too many options".into(),
                confidence: 0.7,
                at,
            });
        }
        if mean_options < 2.0 {
            self.record(BehaviorPattern {
                kind: PatternKind::HastyDecisions,
                description: "Tendency to limit options too quickly".into(),
                confidence: 0.6,
                at,
            });
        }
    }

    fn record(&mut self, pattern: BehaviorPattern) {
        tracing::debug!(pattern = ?pattern.kind, "Decision pattern detected");
        self.patterns.push(pattern);
        if self.patterns.len() > MAX_PATTERNS {
            self.patterns.remove(0);
        }
    }

    pub fn reflect(&self) -> MetacognitiveReflection {
        MetacognitiveReflection {
            observation_count: self.observations.len(),
            patterns_detected: self.patterns.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_patterns_before_five_observations() {
        let mut meta = MetacognitiveSystem::new();
        for _ in 0..4 {
            meta.observe(10, 1.0, 0);
        }
        assert!(meta.patterns().is_empty());
        meta.observe(10, 1.0, 0);
        assert_eq!(meta.patterns().len(), 1);
        assert_eq!(meta.patterns()[0].kind, PatternKind::AnalysisParalysis);
    }

    #[test]
    fn test_hasty_decisions() {
        let mut meta = MetacognitiveSystem::new();
        for _ in 0..5 {
            meta.observe(1, 1.0, 0);
        }
        assert_eq!(meta.patterns().last().unwrap().kind, PatternKind::HastyDecisions);
    }

    #[test]
    fn test_patterns_accumulate_without_dedup() {
        let mut meta = MetacognitiveSystem::new();
        for _ in 0..8 {
            meta.observe(7, 1.0, 0);
        }
        assert_eq!(meta.patterns().len(), 4);
    }

    #[test]
    fn test_moderate_option_counts_are_unremarkable() {
        let mut meta = MetacognitiveSystem::new();
        for _ in 0..10 {
            meta.observe(3, 1.0, 0);
        }
        assert!(meta.patterns().is_empty());
        assert_eq!(meta.reflect().observation_count, 10);
    }
}
