//! Session analysis: the PAI score, timing statistics, and ERA tags.

pub mod era;
pub mod metrics;
pub mod pai;

pub use era::{EraTag, Locale, classify, has_pressure_instability, parse_summary, summarize};
pub use metrics::{TimingMetrics, live_stability_hint};
pub use pai::{PaiBreakdown, STANDARD_TIME_SECONDS};
