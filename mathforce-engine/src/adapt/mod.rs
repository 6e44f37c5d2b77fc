//! Cross-session adaptation: next difficulty, weak topic, and the next
//! question set.

pub mod difficulty;
pub mod selection;
pub mod weak_topic;

pub use difficulty::{Adaptation, AdaptationDirection, AdaptationInput, adapt};
pub use selection::{
    REVIEW_LIMIT, SessionSettings, allowed_difficulties, review_questions, select_questions,
};
pub use weak_topic::{WeakTopicMarker, weak_topic};
