//! Global workspace - winner-take-all competition over phenomenal experiences

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;

/// What kind of experience a quale belongs to; drives identity growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualiaKind {
    Achievement,
    Relationship,
    Learning,
    Neutral,
}

/// The felt qualities of an attended stimulus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualia {
    pub color: String,
    pub texture: String,
    pub emotion: Option<String>,
    pub meaning: Option<String>,
    pub relevance: f32,
    pub kind: QualiaKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenomenalExperience {
    pub stimulus_id: String,
    pub qualia: Qualia,
    pub valence: f32,
    pub arousal: f32,
    pub clarity: f32,
    pub at: SimTime,
}

/// One entrant in a workspace competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub experience: PhenomenalExperience,
    /// `arousal × clarity`
    pub strength: f32,
    pub coalition_size: f32,
}

impl Competitor {
    pub fn new(experience: PhenomenalExperience) -> Self {
        let strength = experience.arousal * experience.clarity;
        let coalition_size = coalition_size(&experience.qualia);
        Self {
            experience,
            strength,
            coalition_size,
        }
    }

    pub fn score(&self) -> f32 {
        self.strength * self.coalition_size
    }
}

/// Contents that would co-activate with this experience
pub fn coalition_size(qualia: &Qualia) -> f32 {
    let mut coalition = 1.0;
    if qualia.emotion.is_some() {
        coalition += 0.5;
    }
    if qualia.meaning.is_some() {
        coalition += 0.5;
    }
    if qualia.relevance > 0.7 {
        coalition += 1.0;
    }
    coalition
}

/// Result of one integration pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    pub winner: Option<Competitor>,
    pub competitors: usize,
    pub integration_success: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GlobalWorkspace {
    broadcast: Option<Competitor>,
    competitions: u64,
}

impl GlobalWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent broadcast; survives integrations with no contents
    pub fn broadcast(&self) -> Option<&Competitor> {
        self.broadcast.as_ref()
    }

    pub fn competitions(&self) -> u64 {
        self.competitions
    }

    /// Rank contents by score and broadcast the top one
    ///
    /// Equal scores keep input order, so the earliest content wins a tie.
    pub fn integrate(&mut self, contents: &[PhenomenalExperience]) -> Integration {
        self.competitions += 1;
        let mut competitors: Vec<Competitor> = contents.iter().cloned().map(Competitor::new).collect();
        competitors.sort_by_key(|c| Reverse(OrderedFloat(c.score())));

        let count = competitors.len();
        let winner = competitors.into_iter().next();
        if let Some(winner) = &winner {
            tracing::debug!(
                stimulus = %winner.experience.stimulus_id,
                score = winner.score(),
                "Global broadcast: {}",
                winner.experience.qualia.description
            );
            self.broadcast = Some(winner.clone());
        }

        Integration {
            winner,
            competitors: count,
            integration_success: count > 0,
        }
    }

    /// Broadcast score scaled into roughly [0, 1]
    pub fn integration_level(&self) -> f32 {
        self.broadcast.as_ref().map_or(0.0, |b| b.score() / 5.0)
    }
}
