//! Costing rates loaded from environment variables.

use crate::order::Money;

/// Valuation rates used by the cost ledger.
///
/// Reads from environment variables (all in cents):
/// - `COSTING_LABOR_RATE_CENTS` — internal labor rate per hour (default: `5000`)
/// - `COSTING_EXTERNAL_RATE_CENTS` — external labor rate per hour (default: `8500`)
/// - `COSTING_FALLBACK_UNIT_COST_CENTS` — unit cost for components without a
///   planned quantity (default: `1000`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostingRates {
    /// Internal labor, per hour.
    pub labor_rate: Money,

    /// External (vendor) labor, per hour.
    pub external_rate: Money,

    /// Unit cost applied when a component has no planned quantity to
    /// spread its estimate over.
    pub fallback_unit_cost: Money,
}

impl CostingRates {
    /// Loads rates from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            labor_rate: std::env::var("COSTING_LABOR_RATE_CENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Money::from_cents)
                .unwrap_or(defaults.labor_rate),
            external_rate: std::env::var("COSTING_EXTERNAL_RATE_CENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Money::from_cents)
                .unwrap_or(defaults.external_rate),
            fallback_unit_cost: std::env::var("COSTING_FALLBACK_UNIT_COST_CENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Money::from_cents)
                .unwrap_or(defaults.fallback_unit_cost),
        }
    }
}

impl Default for CostingRates {
    fn default() -> Self {
        Self {
            labor_rate: Money::from_dollars(50),
            external_rate: Money::from_dollars(85),
            fallback_unit_cost: Money::from_dollars(10),
        }
    }
}
