//! Creativity - concept graph and idea synthesis
//!
//! Concepts are linked by similarity edges. Ideas are synthesized by one of
//! three strategies chosen per call:
//! - combinatorial: fuse the two endpoints of a strong edge
//! - exploratory: extend a single concept in a new direction
//! - transformational: reconceive a single concept (paradigm shift)

pub mod concept;
pub mod idea;

pub use concept::{Concept, ConceptPair, FixedSimilarity, RandomSimilarity, SimilarityMeasure};
pub use idea::{Elaboration, EmergentTraits, Idea, IdeaKind};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::{ConceptId, SimTime};

/// Similarity an edge must exceed to be recorded
pub const EDGE_THRESHOLD: f32 = 0.2;
/// Edge weight above which a pair can seed a combinatorial idea
pub const STRONG_EDGE_THRESHOLD: f32 = 0.6;
/// Inspiration intensity that immediately triggers an idea
pub const INSPIRATION_TRIGGER: f32 = 0.7;
/// Window over which inspiration counts as recent
pub const INSPIRATION_WINDOW_MS: SimTime = 10_000;

const EXTENSION_DIRECTIONS: [&str; 4] = ["practical", "theoretical", "aesthetic", "ethical"];
const TRANSFORMATION_ASPECTS: [&str; 4] = ["assumptions", "context", "purpose", "structure"];
const MAX_INSPIRATIONS: usize = 100;
/// Ideas kept for the repetition penalty; older ones are forgotten
pub const MAX_IDEA_HISTORY: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspiration {
    pub source: String,
    pub intensity: f32,
    pub at: SimTime,
}

/// Snapshot returned by `evaluate_creative_capacity`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreativeCapacity {
    pub knowledge_diversity: f32,
    pub connection_density: f32,
    pub recent_inspiration: f32,
    pub overall_capacity: f32,
}

pub struct CreativitySystem {
    concepts: Vec<Concept>,
    edges: BTreeMap<ConceptPair, f32>,
    history: Vec<Idea>,
    inspirations: Vec<Inspiration>,
    similarity: Box<dyn SimilarityMeasure>,
    next_idea_seq: u64,
}

impl Default for CreativitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CreativitySystem {
    pub fn new() -> Self {
        Self::with_similarity(Box::new(RandomSimilarity))
    }

    /// Use a custom similarity measure (e.g. a fixed one in tests)
    pub fn with_similarity(similarity: Box<dyn SimilarityMeasure>) -> Self {
        Self {
            concepts: Vec::new(),
            edges: BTreeMap::new(),
            history: Vec::new(),
            inspirations: Vec::new(),
            similarity,
            next_idea_seq: 0,
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn concept(&self, id: &ConceptId) -> Option<&Concept> {
        self.concepts.iter().find(|c| &c.id == id)
    }

    pub fn edge(&self, a: &ConceptId, b: &ConceptId) -> Option<f32> {
        self.edges.get(&ConceptPair::new(a.clone(), b.clone())).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&ConceptPair, f32)> {
        self.edges.iter().map(|(pair, w)| (pair, *w))
    }

    pub fn history(&self) -> &[Idea] {
        &self.history
    }

    /// Learn a concept and link it to every other known concept
    ///
    /// Re-learning a known id refreshes the concept and re-evaluates its
    /// edges. Edges are overwritten when the new similarity clears the
    /// threshold and are never removed.
    pub fn learn(&mut self, concept: Concept, rng: &mut dyn RandomSource) {
        let id = concept.id.clone();
        match self.concepts.iter_mut().find(|c| c.id == id) {
            Some(existing) => *existing = concept,
            None => self.concepts.push(concept),
        }

        let Some(learned) = self.concepts.iter().find(|c| c.id == id) else {
            return;
        };

        let mut new_edges = Vec::new();
        for other in self.concepts.iter().filter(|c| c.id != id) {
            let strength = self.similarity.similarity(learned, other, rng);
            if strength > EDGE_THRESHOLD {
                new_edges.push((ConceptPair::new(id.clone(), other.id.clone()), strength));
            }
        }

        for (pair, strength) in new_edges {
            self.edges.insert(pair, strength);
        }
    }

    /// Synthesize a new idea
    ///
    /// Returns `None` only when fewer than two concepts are known.
    pub fn create_idea(&mut self, rng: &mut dyn RandomSource, now: SimTime) -> Option<Idea> {
        if self.concepts.len() < 2 {
            return None;
        }

        let strategy = rng.next_f32();
        let idea = if strategy < 0.4 {
            match self.combinatorial(rng, now) {
                Some(idea) => idea,
                // No strong edge yet: explore instead of giving up
                None => self.exploratory(rng, now),
            }
        } else if strategy < 0.7 {
            self.exploratory(rng, now)
        } else {
            self.transformational(rng, now)
        };

        tracing::debug!(
            idea = %idea.id,
            novelty = idea.novelty_score,
            "Synthesized idea"
        );
        self.history.push(idea.clone());
        if self.history.len() > MAX_IDEA_HISTORY {
            let excess = self.history.len() - MAX_IDEA_HISTORY;
            self.history.drain(..excess);
        }
        Some(idea)
    }

    /// Fuse the endpoints of a random strong edge
    pub fn combinatorial(&mut self, rng: &mut dyn RandomSource, now: SimTime) -> Option<Idea> {
        let strong: Vec<(&ConceptPair, f32)> = self
            .edges
            .iter()
            .filter(|(_, w)| **w > STRONG_EDGE_THRESHOLD)
            .map(|(pair, w)| (pair, *w))
            .collect();

        if strong.is_empty() {
            return None;
        }

        let (pair, edge_strength) = strong[rng.index(strong.len())];
        let (a_id, b_id) = pair.endpoints();
        let a = self.concept(a_id)?.clone();
        let b = self.concept(b_id)?.clone();

        let novelty_score = self.assess_novelty(&a.id, Some(&b.id), rng);
        let unpredictability = rng.next_f32();
        let synergy = (edge_strength + rng.next_f32()) / 2.0;
        let complexity = ((a.complexity + b.complexity + rng.next_f32()) / 3.0).min(1.0);

        Some(Idea {
            id: self.next_id(IdeaKind::Combinatorial),
            kind: IdeaKind::Combinatorial,
            source_concepts: vec![a.id.clone(), b.id.clone()],
            novelty_score,
            emergent: EmergentTraits {
                description: format!("A fusion of {} and {} concepts", a.name, b.name),
                unpredictability,
                synergy: Some(synergy),
                complexity: Some(complexity),
                paradigm_shift: false,
            },
            elaboration: None,
            created_at: now,
        })
    }

    fn exploratory(&mut self, rng: &mut dyn RandomSource, now: SimTime) -> Idea {
        let base = self.concepts[rng.index(self.concepts.len())].clone();
        let novelty_score = (self.assess_novelty(&base.id, None, rng) * 0.7).min(1.0);
        let direction = EXTENSION_DIRECTIONS[rng.index(EXTENSION_DIRECTIONS.len())];
        let intensity = rng.next_f32();
        let unpredictability = rng.next_f32() * 0.6;

        Idea {
            id: self.next_id(IdeaKind::Exploratory),
            kind: IdeaKind::Exploratory,
            source_concepts: vec![base.id.clone()],
            novelty_score,
            emergent: EmergentTraits {
                description: format!("An exploration of {} in new directions", base.name),
                unpredictability,
                synergy: None,
                complexity: None,
                paradigm_shift: false,
            },
            elaboration: Some(Elaboration::Extension {
                direction: direction.to_string(),
                intensity,
            }),
            created_at: now,
        }
    }

    fn transformational(&mut self, rng: &mut dyn RandomSource, now: SimTime) -> Idea {
        let base = self.concepts[rng.index(self.concepts.len())].clone();
        let novelty_score = (self.assess_novelty(&base.id, None, rng) * 1.2).min(1.0);
        let aspect = TRANSFORMATION_ASPECTS[rng.index(TRANSFORMATION_ASPECTS.len())];
        let magnitude = rng.next_f32();
        let unpredictability = rng.next_f32() * 0.9;

        Idea {
            id: self.next_id(IdeaKind::Transformational),
            kind: IdeaKind::Transformational,
            source_concepts: vec![base.id.clone()],
            novelty_score,
            emergent: EmergentTraits {
                description: format!("A fundamental reimagining of {}", base.name),
                unpredictability,
                synergy: None,
                complexity: None,
                paradigm_shift: true,
            },
            elaboration: Some(Elaboration::Transformation {
                aspect: aspect.to_string(),
                magnitude,
            }),
            created_at: now,
        }
    }

    /// Novelty = mean of a repetition penalty and two random factors
    pub fn assess_novelty(
        &self,
        a: &ConceptId,
        b: Option<&ConceptId>,
        rng: &mut dyn RandomSource,
    ) -> f32 {
        let historical = self.historical_novelty(a, b);
        let contextual = rng.next_f32();
        let structural = rng.next_f32();
        (historical + contextual + structural) / 3.0
    }

    /// `1 - 0.2 × (past ideas referencing either concept)`, floored at 0
    pub fn historical_novelty(&self, a: &ConceptId, b: Option<&ConceptId>) -> f32 {
        let repeats = self
            .history
            .iter()
            .filter(|idea| idea.references(a) || b.is_some_and(|b| idea.references(b)))
            .count();
        (1.0 - repeats as f32 * 0.2).max(0.0)
    }

    /// Record a source of inspiration; strong inspiration sparks an idea
    pub fn add_inspiration(
        &mut self,
        source: impl Into<String>,
        intensity: f32,
        rng: &mut dyn RandomSource,
        now: SimTime,
    ) -> Option<Idea> {
        self.inspirations.push(Inspiration {
            source: source.into(),
            intensity,
            at: now,
        });
        if self.inspirations.len() > MAX_INSPIRATIONS {
            self.inspirations.remove(0);
        }

        if intensity > INSPIRATION_TRIGGER {
            self.create_idea(rng, now)
        } else {
            None
        }
    }

    pub fn evaluate_creative_capacity(&self, now: SimTime) -> CreativeCapacity {
        let knowledge_diversity = if self.concepts.is_empty() {
            0.0
        } else {
            let categories: BTreeSet<&str> =
                self.concepts.iter().map(|c| c.category.as_str()).collect();
            categories.len() as f32 / self.concepts.len() as f32
        };
        let connection_density = self.edges.len() as f32 / self.concepts.len().max(1) as f32;
        let recent_inspiration = self
            .inspirations
            .iter()
            .filter(|i| now.saturating_sub(i.at) < INSPIRATION_WINDOW_MS)
            .map(|i| i.intensity)
            .sum::<f32>();

        CreativeCapacity {
            knowledge_diversity,
            connection_density,
            recent_inspiration,
            overall_capacity: (knowledge_diversity + connection_density + recent_inspiration) / 3.0,
        }
    }

    fn next_id(&mut self, kind: IdeaKind) -> String {
        self.next_idea_seq += 1;
        format!("{}-{}", kind.label(), self.next_idea_seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{ScriptedRandom, SeededRandom};

    fn concept(id: &str, complexity: f32) -> Concept {
        Concept::new(id, id.to_uppercase(), "test", complexity)
    }

    #[test]
    fn test_no_idea_with_fewer_than_two_concepts() {
        let mut rng = SeededRandom::new(1);
        let mut system = CreativitySystem::new();
        assert!(system.create_idea(&mut rng, 0).is_none());
        system.learn(concept("a", 0.5), &mut rng);
        assert!(system.create_idea(&mut rng, 0).is_none());
    }

    #[test]
    fn test_idea_always_produced_with_two_concepts() {
        let mut rng = SeededRandom::new(9);
        let mut system = CreativitySystem::new();
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("b", 0.5), &mut rng);
        for t in 0..50 {
            let idea = system.create_idea(&mut rng, t);
            assert!(idea.is_some());
            let idea = idea.unwrap();
            assert!((0.0..=1.0).contains(&idea.novelty_score));
        }
    }

    #[test]
    fn test_edges_only_above_threshold() {
        let mut rng = SeededRandom::new(2);
        let mut weak = CreativitySystem::with_similarity(Box::new(FixedSimilarity(0.2)));
        weak.learn(concept("a", 0.5), &mut rng);
        weak.learn(concept("b", 0.5), &mut rng);
        assert_eq!(weak.edges().count(), 0);

        let mut strong = CreativitySystem::with_similarity(Box::new(FixedSimilarity(0.21)));
        strong.learn(concept("a", 0.5), &mut rng);
        strong.learn(concept("b", 0.5), &mut rng);
        assert_eq!(strong.edge(&ConceptId::new("b"), &ConceptId::new("a")), Some(0.21));
    }

    #[test]
    fn test_relearning_does_not_duplicate() {
        let mut rng = SeededRandom::new(2);
        let mut system = CreativitySystem::new();
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("a", 0.9), &mut rng);
        assert_eq!(system.concepts().len(), 1);
        assert_eq!(system.concepts()[0].complexity, 0.9);
        assert!(system.edge(&ConceptId::new("a"), &ConceptId::new("a")).is_none());
    }

    #[test]
    fn test_combinatorial_references_both_endpoints() {
        let mut rng = ScriptedRandom::constant(0.1);
        let mut system = CreativitySystem::with_similarity(Box::new(FixedSimilarity(0.65)));
        system.learn(Concept::new("A", "A", "x", 0.8), &mut rng);
        system.learn(Concept::new("B", "B", "y", 0.6), &mut rng);

        // 0.1 < 0.4 selects the combinatorial strategy
        let idea = system.create_idea(&mut rng, 0).unwrap();
        assert_eq!(idea.kind, IdeaKind::Combinatorial);
        let sources: BTreeSet<_> = idea.source_concepts.iter().map(|c| c.as_str()).collect();
        assert_eq!(sources, BTreeSet::from(["A", "B"]));
        assert!(idea.emergent.synergy.is_some());
    }

    #[test]
    fn test_combinatorial_falls_back_without_strong_edges() {
        let mut rng = ScriptedRandom::constant(0.1);
        let mut system = CreativitySystem::with_similarity(Box::new(FixedSimilarity(0.5)));
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("b", 0.5), &mut rng);

        assert!(system.combinatorial(&mut rng, 0).is_none());
        let idea = system.create_idea(&mut rng, 0).unwrap();
        assert_eq!(idea.kind, IdeaKind::Exploratory);
    }

    #[test]
    fn test_transformational_is_paradigm_shift() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut system = CreativitySystem::new();
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("b", 0.5), &mut rng);
        let idea = system.create_idea(&mut rng, 0).unwrap();
        assert_eq!(idea.kind, IdeaKind::Transformational);
        assert!(idea.emergent.paradigm_shift);
    }

    #[test]
    fn test_repetition_damps_novelty() {
        let mut rng = ScriptedRandom::constant(0.9);
        let mut system = CreativitySystem::new();
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("b", 0.5), &mut rng);
        let a = ConceptId::new("a");
        assert_eq!(system.historical_novelty(&a, None), 1.0);

        for _ in 0..6 {
            system.create_idea(&mut rng, 0);
        }
        // constant draws always pick the last concept ("b")
        let b = ConceptId::new("b");
        assert_eq!(system.historical_novelty(&b, None), 0.0);
        assert_eq!(system.historical_novelty(&a, None), 1.0);
    }

    #[test]
    fn test_idea_history_is_bounded() {
        let mut rng = SeededRandom::new(11);
        let mut system = CreativitySystem::new();
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("b", 0.5), &mut rng);
        for t in 0..(MAX_IDEA_HISTORY as u64 + 25) {
            system.create_idea(&mut rng, t);
        }
        assert_eq!(system.history().len(), MAX_IDEA_HISTORY);
        // oldest dropped first
        assert_eq!(system.history()[0].created_at, 25);
        assert_eq!(system.history().last().unwrap().created_at, MAX_IDEA_HISTORY as u64 + 24);
    }

    #[test]
    fn test_strong_inspiration_sparks_idea() {
        let mut rng = SeededRandom::new(4);
        let mut system = CreativitySystem::new();
        system.learn(concept("a", 0.5), &mut rng);
        system.learn(concept("b", 0.5), &mut rng);
        assert!(system.add_inspiration("debate", 0.5, &mut rng, 0).is_none());
        assert!(system.add_inspiration("debate", 0.9, &mut rng, 0).is_some());
    }

    #[test]
    fn test_creative_capacity_window() {
        let mut rng = SeededRandom::new(4);
        let mut system = CreativitySystem::new();
        system.learn(Concept::new("a", "A", "philosophy", 0.5), &mut rng);
        system.learn(Concept::new("b", "B", "society", 0.5), &mut rng);
        system.add_inspiration("debate", 0.5, &mut rng, 0);

        let fresh = system.evaluate_creative_capacity(5_000);
        assert_eq!(fresh.knowledge_diversity, 1.0);
        assert!((fresh.recent_inspiration - 0.5).abs() < 1e-6);

        let stale = system.evaluate_creative_capacity(20_000);
        assert_eq!(stale.recent_inspiration, 0.0);
    }
}
