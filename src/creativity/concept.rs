//! Concepts and the similarity graph between them

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::ConceptId;

/// Atomic unit of knowledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    pub name: String,
    pub category: String,
    /// 0.0 = trivial, 1.0 = maximally intricate
    pub complexity: f32,
}

impl Concept {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        complexity: f32,
    ) -> Self {
        Self {
            id: ConceptId::new(id),
            name: name.into(),
            category: category.into(),
            complexity: complexity.clamp(0.0, 1.0),
        }
    }
}

/// Unordered pair of concept ids; `(a, b)` and `(b, a)` are the same edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConceptPair(ConceptId, ConceptId);

impl ConceptPair {
    pub fn new(a: ConceptId, b: ConceptId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn endpoints(&self) -> (&ConceptId, &ConceptId) {
        (&self.0, &self.1)
    }

    pub fn contains(&self, id: &ConceptId) -> bool {
        &self.0 == id || &self.1 == id
    }
}

/// Pluggable similarity between two concepts
///
/// Implementations must return a value in `[0, 1]`.
pub trait SimilarityMeasure: Send {
    fn similarity(&self, a: &Concept, b: &Concept, rng: &mut dyn RandomSource) -> f32;
}

/// Mean of three independent draws standing in for semantic, structural
/// and contextual similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSimilarity;

impl SimilarityMeasure for RandomSimilarity {
    fn similarity(&self, _a: &Concept, _b: &Concept, rng: &mut dyn RandomSource) -> f32 {
        let semantic = rng.next_f32();
        let structural = rng.next_f32();
        let contextual = rng.next_f32();
        (semantic + structural + contextual) / 3.0
    }
}

/// Returns the same similarity for every pair
#[derive(Debug, Clone, Copy)]
pub struct FixedSimilarity(pub f32);

impl SimilarityMeasure for FixedSimilarity {
    fn similarity(&self, _a: &Concept, _b: &Concept, _rng: &mut dyn RandomSource) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;

    #[test]
    fn test_pair_is_unordered() {
        let ab = ConceptPair::new(ConceptId::new("a"), ConceptId::new("b"));
        let ba = ConceptPair::new(ConceptId::new("b"), ConceptId::new("a"));
        assert_eq!(ab, ba);
        assert!(ab.contains(&ConceptId::new("a")));
        assert!(!ab.contains(&ConceptId::new("c")));
    }

    #[test]
    fn test_random_similarity_bounded() {
        let mut rng = SeededRandom::new(3);
        let a = Concept::new("a", "A", "x", 0.5);
        let b = Concept::new("b", "B", "y", 0.5);
        for _ in 0..200 {
            let s = RandomSimilarity.similarity(&a, &b, &mut rng);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_concept_complexity_clamped() {
        assert_eq!(Concept::new("a", "A", "x", 1.7).complexity, 1.0);
    }
}
