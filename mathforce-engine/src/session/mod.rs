//! Session recording: answer events, the aggregate they build, and the
//! countdown that bounds a session.

mod aggregate;
mod countdown;
mod recorder;

pub use aggregate::{QuestionEvent, SessionAggregate};
pub use countdown::{
    COUNTDOWN_SECONDS, Countdown, CountdownOutcome, CountdownState, CountdownTick, PressureStage,
    run_countdown,
};
pub use recorder::{PendingQuestion, SessionEndReason, SessionRecorder};
