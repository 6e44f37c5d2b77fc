//! One completed session as stored in the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{self, EraTag, STANDARD_TIME_SECONDS};
use crate::session::SessionAggregate;

/// A ledger entry. Field names match the stored JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    /// PAI, or 0 for an unmeasurable session.
    #[serde(rename = "PAI")]
    pub pai: u8,
    /// Rounded accuracy percentage.
    pub accuracy: u8,
    /// Mean seconds per question, 0 without samples.
    #[serde(rename = "avgTime")]
    pub avg_time: f64,
    #[serde(rename = "trainingTimeLimit")]
    pub training_time_limit: f64,
    /// Stored ERA summary.
    #[serde(rename = "ERA")]
    pub era: String,
}

impl HistoryRecord {
    pub fn from_session(
        aggregate: &SessionAggregate,
        pai: Option<u8>,
        tags: &[EraTag],
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            pai: pai.unwrap_or(0),
            accuracy: aggregate.accuracy(),
            avg_time: aggregate.mean_time().unwrap_or(0.0),
            training_time_limit: STANDARD_TIME_SECONDS,
            era: analysis::summarize(tags),
        }
    }

    /// Whether this session was flagged for pressure instability.
    pub fn is_unstable(&self) -> bool {
        analysis::has_pressure_instability(&self.era)
    }

    /// Tags recovered from the stored summary.
    pub fn tags(&self) -> Vec<EraTag> {
        analysis::parse_summary(&self.era)
    }
}
