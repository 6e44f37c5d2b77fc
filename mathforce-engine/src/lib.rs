//! mathforce-engine - Adaptive-learning analytics for timed quiz sessions
//!
//! This crate turns per-question answer events into a Performance-Pressure
//! Index (PAI), a set of ERA diagnostic tags, a next difficulty level and a
//! weak-topic-biased question set for the following session. Completed
//! sessions are kept in a role-scoped history ledger behind a pluggable
//! key-value store.

pub mod adapt;
pub mod analysis;
pub mod config;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod session;
pub mod store;
pub mod types;

pub use config::{EngineConfig, SessionDefaults, StorageConfig};
pub use error::{EngineError, Result};
pub use pipeline::{Engine, SessionReport};
pub use types::*;

// Analysis re-exports
pub use analysis::{EraTag, Locale, PaiBreakdown, TimingMetrics};

// Adaptation re-exports
pub use adapt::{
    Adaptation, AdaptationDirection, AdaptationInput, SessionSettings, WeakTopicMarker,
    allowed_difficulties, review_questions, select_questions,
};

// Session re-exports
pub use session::{
    COUNTDOWN_SECONDS, Countdown, CountdownOutcome, PendingQuestion, PressureStage,
    QuestionEvent, SessionAggregate, SessionEndReason, SessionRecorder, run_countdown,
};

// History and storage re-exports
pub use history::{HistoryLedger, HistoryRecord, PaiTrend, Recommendation, StabilityIndex};
pub use store::{InMemoryStore, JsonFileStore, KeyValueStore};
