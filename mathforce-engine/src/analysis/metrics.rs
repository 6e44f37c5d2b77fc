//! Timing and streak statistics derived from a session aggregate.

use crate::session::SessionAggregate;

/// Std-dev of question times (seconds) above which timing counts as unstable.
pub const PRESSURE_STDDEV_THRESHOLD: f64 = 10.0;

/// Accuracy (percent) a session must exceed for instability to be flagged.
pub const HIGH_ACCURACY_THRESHOLD: f64 = 80.0;

/// Statistics the ERA rules read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingMetrics {
    /// Mean seconds per question; needs one sample.
    pub mean_time: Option<f64>,
    /// Population std-dev of question times; needs two samples.
    pub std_dev: Option<f64>,
    /// Longest run of consecutive wrong answers.
    pub longest_wrong_streak: u32,
    /// Time range exceeds the mean; needs three samples.
    pub high_variance: bool,
}

impl TimingMetrics {
    pub fn from_aggregate(aggregate: &SessionAggregate) -> Self {
        let times = &aggregate.question_times;
        let mean_time = mean(times);
        let std_dev = match mean_time {
            Some(mean) if times.len() >= 2 => Some(population_std_dev(times, mean)),
            _ => None,
        };
        let high_variance = match mean_time {
            Some(mean) if times.len() >= 3 => range(times) > mean,
            _ => false,
        };

        Self {
            mean_time,
            std_dev,
            longest_wrong_streak: longest_wrong_streak(&aggregate.answer_history),
            high_variance,
        }
    }
}

/// Whether the in-session "instability detected" hint should show.
///
/// Uses unrounded accuracy and requires at least three timed questions.
pub fn live_stability_hint(aggregate: &SessionAggregate) -> bool {
    let times = &aggregate.question_times;
    if times.len() < 3 || aggregate.total_questions == 0 {
        return false;
    }
    let Some(mean) = mean(times) else {
        return false;
    };
    aggregate.raw_accuracy() > HIGH_ACCURACY_THRESHOLD
        && population_std_dev(times, mean) > PRESSURE_STDDEV_THRESHOLD
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn range(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

fn longest_wrong_streak(history: &[bool]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    for &correct in history {
        if correct {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_times(times: &[f64]) -> SessionAggregate {
        SessionAggregate {
            question_times: times.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_times() {
        let m = TimingMetrics::from_aggregate(&SessionAggregate::default());
        assert!(m.mean_time.is_none());
        assert!(m.std_dev.is_none());
        assert!(!m.high_variance);
    }

    #[test]
    fn test_single_sample_has_mean_only() {
        let m = TimingMetrics::from_aggregate(&with_times(&[7.0]));
        assert_eq!(m.mean_time, Some(7.0));
        assert!(m.std_dev.is_none());
    }

    #[test]
    fn test_population_std_dev() {
        let m = TimingMetrics::from_aggregate(&with_times(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        assert!((m.std_dev.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_high_variance_needs_three_samples() {
        assert!(!TimingMetrics::from_aggregate(&with_times(&[1.0, 30.0])).high_variance);
        assert!(TimingMetrics::from_aggregate(&with_times(&[1.0, 2.0, 30.0])).high_variance);
        assert!(!TimingMetrics::from_aggregate(&with_times(&[10.0, 11.0, 12.0])).high_variance);
    }

    #[test]
    fn test_longest_wrong_streak() {
        assert_eq!(longest_wrong_streak(&[true, false, false, false, true]), 3);
        assert_eq!(longest_wrong_streak(&[false, true, false, false]), 2);
        assert_eq!(longest_wrong_streak(&[true, true]), 0);
        assert_eq!(longest_wrong_streak(&[]), 0);
    }

    #[test]
    fn test_live_hint_requires_accuracy_and_spread() {
        let agg = SessionAggregate {
            total_questions: 5,
            correct_count: 5,
            question_times: vec![2.0, 3.0, 40.0, 2.0, 3.0],
            answer_history: vec![true; 5],
            ..Default::default()
        };
        assert!(live_stability_hint(&agg));

        let steady = SessionAggregate {
            question_times: vec![5.0, 6.0, 5.0, 6.0, 5.0],
            ..agg.clone()
        };
        assert!(!live_stability_hint(&steady));

        let inaccurate = SessionAggregate {
            correct_count: 4,
            wrong_count: 1,
            ..agg
        };
        assert!(!live_stability_hint(&inaccurate));
    }
}
