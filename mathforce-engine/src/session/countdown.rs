//! Session countdown and time-pressure stages.
//!
//! The countdown is a plain state machine advanced one second per `tick()`;
//! [`run_countdown`] drives it from a tokio interval and can be cancelled
//! when the student finishes early.
//!
//! ```text
//! Running ──tick()──► Running ... ──tick() at 1s──► Expired
//!    │
//!    └──stop()──► Stopped
//! ```
//!
//! Terminal states ignore further ticks, so only one finalization path can
//! ever be triggered from the clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Standard session length in seconds (three minutes).
pub const COUNTDOWN_SECONDS: u32 = 3 * 60;

/// How much time pressure the student is under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureStage {
    /// A minute or more left.
    Calm = 1,
    /// Under a minute left.
    Elevated = 2,
    /// Ten seconds or less left.
    Critical = 3,
}

impl PressureStage {
    pub fn from_remaining(remaining_seconds: u32) -> Self {
        if remaining_seconds <= 10 {
            Self::Critical
        } else if remaining_seconds < 60 {
            Self::Elevated
        } else {
            Self::Calm
        }
    }

    /// Numeric stage (1-3) as shown in the status bar.
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// Countdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Running,
    Expired,
    Stopped,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    pub remaining: u32,
    pub stage: PressureStage,
    /// The stage went up with this tick.
    pub stage_increased: bool,
}

impl CountdownTick {
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

/// How a driven countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Expired,
    Cancelled,
}

/// One-second-resolution session countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    total: u32,
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    pub fn new(total_seconds: u32) -> Self {
        let state = if total_seconds == 0 {
            CountdownState::Expired
        } else {
            CountdownState::Running
        };
        Self {
            total: total_seconds,
            remaining: total_seconds,
            state,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds elapsed since the countdown started.
    pub fn elapsed(&self) -> u32 {
        self.total - self.remaining
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn stage(&self) -> PressureStage {
        PressureStage::from_remaining(self.remaining)
    }

    /// Under thirty seconds left but not yet expired.
    pub fn is_low_time(&self) -> bool {
        self.remaining > 0 && self.remaining < 30
    }

    /// Advance one second. Returns `None` once the countdown is terminal.
    pub fn tick(&mut self) -> Option<CountdownTick> {
        if !self.is_running() {
            return None;
        }

        let before = self.stage();
        self.remaining = self.remaining.saturating_sub(1);
        let stage = self.stage();
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
        }

        Some(CountdownTick {
            remaining: self.remaining,
            stage,
            stage_increased: stage > before,
        })
    }

    /// Stop the countdown (manual finish). No effect once terminal.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.state = CountdownState::Stopped;
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_SECONDS)
    }
}

/// Drive `countdown` once per second until it expires or `cancel` fires.
///
/// `on_tick` sees every tick, including the final one at zero. Cancellation
/// stops the countdown.
pub async fn run_countdown<F>(
    mut countdown: Countdown,
    cancel: CancellationToken,
    mut on_tick: F,
) -> CountdownOutcome
where
    F: FnMut(&CountdownTick),
{
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately.
    interval.tick().await;

    loop {
        if countdown.state() == CountdownState::Expired {
            return CountdownOutcome::Expired;
        }

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                countdown.stop();
                debug!(remaining = countdown.remaining(), "countdown cancelled");
                return CountdownOutcome::Cancelled;
            }
            _ = interval.tick() => {
                if let Some(tick) = countdown.tick() {
                    on_tick(&tick);
                    if tick.is_expired() {
                        debug!("countdown expired");
                        return CountdownOutcome::Expired;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_stage_thresholds() {
        assert_eq!(PressureStage::from_remaining(180), PressureStage::Calm);
        assert_eq!(PressureStage::from_remaining(60), PressureStage::Calm);
        assert_eq!(PressureStage::from_remaining(59), PressureStage::Elevated);
        assert_eq!(PressureStage::from_remaining(11), PressureStage::Elevated);
        assert_eq!(PressureStage::from_remaining(10), PressureStage::Critical);
        assert_eq!(PressureStage::from_remaining(0), PressureStage::Critical);
        assert_eq!(PressureStage::Critical.level(), 3);
    }

    #[test]
    fn test_tick_reports_stage_increase() {
        let mut countdown = Countdown::new(61);
        let tick = countdown.tick().unwrap();
        assert_eq!(tick.remaining, 60);
        assert!(!tick.stage_increased);

        let tick = countdown.tick().unwrap();
        assert_eq!(tick.remaining, 59);
        assert_eq!(tick.stage, PressureStage::Elevated);
        assert!(tick.stage_increased);
    }

    #[test]
    fn test_expiry_is_terminal() {
        let mut countdown = Countdown::new(2);
        assert!(!countdown.tick().unwrap().is_expired());
        assert!(countdown.tick().unwrap().is_expired());
        assert_eq!(countdown.state(), CountdownState::Expired);
        assert!(countdown.tick().is_none());
        assert_eq!(countdown.elapsed(), 2);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut countdown = Countdown::new(30);
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.state(), CountdownState::Stopped);
        assert!(countdown.tick().is_none());
        assert_eq!(countdown.remaining(), 29);
    }

    #[test]
    fn test_stop_after_expiry_keeps_expired() {
        let mut countdown = Countdown::new(1);
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.state(), CountdownState::Expired);
    }

    #[test]
    fn test_low_time_window() {
        let mut countdown = Countdown::new(30);
        assert!(!countdown.is_low_time());
        countdown.tick();
        assert!(countdown.is_low_time());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_countdown_expires() {
        let mut seen = Vec::new();
        let outcome = run_countdown(Countdown::new(3), CancellationToken::new(), |tick| {
            seen.push(tick.remaining)
        })
        .await;

        assert_eq!(outcome, CountdownOutcome::Expired);
        assert_eq!(seen, vec![2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_countdown_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let mut ticks = 0;
        let outcome = run_countdown(Countdown::new(180), token, |_| ticks += 1).await;

        assert_eq!(outcome, CountdownOutcome::Cancelled);
        assert_eq!(ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_countdown_zero_length() {
        let outcome = run_countdown(Countdown::new(0), CancellationToken::new(), |_| {}).await;
        assert_eq!(outcome, CountdownOutcome::Expired);
    }
}
