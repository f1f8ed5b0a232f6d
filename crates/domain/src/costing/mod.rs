//! Cost ledger for work orders.

mod ledger;
mod rates;
mod summary;

pub use ledger::CostLedger;
pub use rates::CostingRates;
pub use summary::{CostSummary, VariancePercent, VarianceReport, VarianceStatus};
