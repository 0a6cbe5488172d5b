//! Emotion × action-category influence table

use crate::core::actions::ActionCategory;
use crate::decision::state::EmotionKind;

/// Raw influence of an emotion on an option of the given category
///
/// Each known emotion has a default for categories it has no opinion on.
/// Unknown emotions exert no influence.
pub fn influence(kind: &EmotionKind, category: ActionCategory) -> f32 {
    use ActionCategory::*;

    match kind {
        EmotionKind::Fear => match category {
            Risky => -0.8,
            Safe => 0.8,
            _ => 0.2,
        },
        EmotionKind::Excitement => match category {
            Risky => 0.9,
            Safe => -0.2,
            _ => 0.5,
        },
        EmotionKind::Sadness => match category {
            Social => -0.3,
            Solitary => 0.3,
            _ => 0.1,
        },
        EmotionKind::Anger => match category {
            Confrontational => 0.7,
            Peaceful => -0.3,
            _ => 0.4,
        },
        EmotionKind::Other(_) => 0.0,
    }
}
