//! Difficulty adaptation between sessions.
//!
//! ```text
//!   no questions ─────────────────────────────► unchanged
//!   knowledge gap | concept misunderstanding ─► lower
//!   acc >= 90 && pai >= 80 && streak >= 5 ────► raise
//!   acc <= 60 && !careless ───────────────────► lower
//!   otherwise ────────────────────────────────► unchanged
//! ```
//!
//! First match wins. The level is passed in and returned; callers persist it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::EraTag;
use crate::types::DifficultyLevel;

const PROMOTE_MIN_ACCURACY: u8 = 90;
const PROMOTE_MIN_PAI: u8 = 80;
const PROMOTE_MIN_STREAK: u32 = 5;
const DEMOTE_MAX_ACCURACY: u8 = 60;

/// Everything the adapter reads from a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptationInput<'a> {
    pub previous: DifficultyLevel,
    /// Rounded accuracy percentage.
    pub accuracy: u8,
    /// `None` for unmeasurable sessions; never meets the promotion bar.
    pub pai: Option<u8>,
    pub max_streak: u32,
    pub total_questions: u32,
    pub tags: &'a [EraTag],
}

/// Direction of a difficulty change, for the notice banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptationDirection {
    Increased,
    Decreased,
    Unchanged,
}

impl AdaptationDirection {
    /// Notice text, or `None` when nothing changed.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Increased => Some("Difficulty increased automatically"),
            Self::Decreased => Some("Difficulty decreased"),
            Self::Unchanged => None,
        }
    }
}

/// Result of one adaptation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adaptation {
    pub previous: DifficultyLevel,
    pub next: DifficultyLevel,
    pub changed: bool,
}

impl Adaptation {
    fn new(previous: DifficultyLevel, next: DifficultyLevel) -> Self {
        Self {
            previous,
            next,
            changed: previous != next,
        }
    }

    pub fn direction(&self) -> AdaptationDirection {
        match self.next.cmp(&self.previous) {
            std::cmp::Ordering::Greater => AdaptationDirection::Increased,
            std::cmp::Ordering::Less => AdaptationDirection::Decreased,
            std::cmp::Ordering::Equal => AdaptationDirection::Unchanged,
        }
    }
}

/// Decide the next difficulty level.
pub fn adapt(input: &AdaptationInput<'_>) -> Adaptation {
    let previous = input.previous;
    let has = |tag: EraTag| input.tags.contains(&tag);

    let next = if input.total_questions == 0 {
        previous
    } else if has(EraTag::KnowledgeGap) || has(EraTag::ConceptMisunderstanding) {
        previous.lowered()
    } else if input.accuracy >= PROMOTE_MIN_ACCURACY
        && input.pai.unwrap_or(0) >= PROMOTE_MIN_PAI
        && input.max_streak >= PROMOTE_MIN_STREAK
    {
        previous.raised()
    } else if input.accuracy <= DEMOTE_MAX_ACCURACY && !has(EraTag::CarelessMistakes) {
        previous.lowered()
    } else {
        previous
    };

    let adaptation = Adaptation::new(previous, next);
    if adaptation.changed {
        info!(
            from = %previous,
            to = %next,
            direction = ?adaptation.direction(),
            "difficulty adapted"
        );
    }
    adaptation
}
