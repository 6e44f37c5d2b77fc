//! Session history: the role-scoped ledger and what is derived from it.

mod ledger;
mod record;
mod report;
mod trend;

pub use ledger::HistoryLedger;
pub use record::HistoryRecord;
pub use report::{Recommendation, recommendations};
pub use trend::{PaiTrend, StabilityIndex};
