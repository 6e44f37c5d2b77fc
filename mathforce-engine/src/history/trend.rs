//! Trend and stability indicators over a ledger.

use serde::{Deserialize, Serialize};

use super::HistoryLedger;

/// Chart value for a session flagged as unstable.
pub const UNSTABLE_SERIES_VALUE: u8 = 40;
/// Chart value for a stable session.
pub const STABLE_SERIES_VALUE: u8 = 100;

/// Direction of PAI against the previous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaiTrend {
    Up,
    Down,
}

impl PaiTrend {
    /// Compare a current score with a previous one; equal scores have no
    /// trend.
    pub fn between(previous: u8, current: u8) -> Option<Self> {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Some(Self::Up),
            std::cmp::Ordering::Less => Some(Self::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

/// How often sessions were flagged for pressure instability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityIndex {
    Stable,
    Mixed,
    Unstable,
}

impl StabilityIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Mixed => "mixed",
            Self::Unstable => "unstable",
        }
    }

    /// Display label in Kazakh.
    pub fn label_kk(&self) -> &'static str {
        match self {
            Self::Stable => "Тұрақты",
            Self::Mixed => "Аралас",
            Self::Unstable => "Тұрақсыз",
        }
    }
}

impl std::fmt::Display for StabilityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HistoryLedger {
    /// Trend of `current` against the previous session's PAI.
    pub fn pai_trend(&self, current: Option<u8>) -> Option<PaiTrend> {
        PaiTrend::between(self.previous_pai()?, current?)
    }

    /// Rounded mean PAI.
    pub fn average_pai(&self) -> Option<u8> {
        self.rounded_mean(|r| r.pai)
    }

    /// Rounded mean accuracy.
    pub fn average_accuracy(&self) -> Option<u8> {
        self.rounded_mean(|r| r.accuracy)
    }

    pub fn stability_index(&self) -> Option<StabilityIndex> {
        if self.is_empty() {
            return None;
        }
        let unstable = self.records().iter().filter(|r| r.is_unstable()).count();
        let share = unstable as f64 / self.len() as f64;
        Some(if unstable == 0 {
            StabilityIndex::Stable
        } else if share > 0.5 {
            StabilityIndex::Unstable
        } else {
            StabilityIndex::Mixed
        })
    }

    /// One point per session: 40 when flagged unstable, 100 otherwise.
    pub fn stability_series(&self) -> Vec<u8> {
        self.records()
            .iter()
            .map(|r| {
                if r.is_unstable() {
                    UNSTABLE_SERIES_VALUE
                } else {
                    STABLE_SERIES_VALUE
                }
            })
            .collect()
    }

    fn rounded_mean(&self, field: impl Fn(&super::HistoryRecord) -> u8) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let sum: u32 = self.records().iter().map(|r| u32::from(field(r))).sum();
        Some((f64::from(sum) / self.len() as f64).round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::history::HistoryRecord;

    fn record(pai: u8, accuracy: u8, era: &str) -> HistoryRecord {
        HistoryRecord {
            date: Utc::now(),
            pai,
            accuracy,
            avg_time: 5.0,
            training_time_limit: 180.0,
            era: era.into(),
        }
    }

    #[test]
    fn test_pai_trend() {
        let ledger = HistoryLedger::new(vec![record(60, 70, ""), record(75, 80, "")]);
        assert_eq!(ledger.pai_trend(Some(75)), Some(PaiTrend::Up));
        assert_eq!(ledger.pai_trend(Some(50)), Some(PaiTrend::Down));
        assert_eq!(ledger.pai_trend(Some(60)), None);
        assert_eq!(ledger.pai_trend(None), None);
        assert_eq!(HistoryLedger::default().pai_trend(Some(90)), None);
    }

    #[test]
    fn test_averages_round() {
        let ledger = HistoryLedger::new(vec![record(60, 71, ""), record(75, 80, "")]);
        assert_eq!(ledger.average_pai(), Some(68));
        assert_eq!(ledger.average_accuracy(), Some(76));
        assert_eq!(HistoryLedger::default().average_pai(), None);
    }

    #[test]
    fn test_stability_index() {
        let stable = "Stable performance";
        let unstable = "Pressure instability detected";

        assert_eq!(HistoryLedger::default().stability_index(), None);
        assert_eq!(
            HistoryLedger::new(vec![record(1, 1, stable)]).stability_index(),
            Some(StabilityIndex::Stable)
        );
        assert_eq!(
            HistoryLedger::new(vec![record(1, 1, stable), record(1, 1, unstable)]).stability_index(),
            Some(StabilityIndex::Mixed)
        );
        assert_eq!(
            HistoryLedger::new(vec![
                record(1, 1, unstable),
                record(1, 1, stable),
                record(1, 1, "pressure instability: x")
            ])
            .stability_index(),
            Some(StabilityIndex::Unstable)
        );
    }

    #[test]
    fn test_stability_series() {
        let ledger = HistoryLedger::new(vec![
            record(1, 1, "Stable performance"),
            record(1, 1, "Careless mistakes | Pressure instability detected"),
        ]);
        assert_eq!(ledger.stability_series(), vec![100, 40]);
    }
}
