//! Per-order cost summary and variance reporting.

use serde::{Deserialize, Serialize};

use crate::order::Money;

/// Estimated and actual cost by category.
///
/// Only the six per-category figures are stored; totals and variances are
/// derived, so the total always equals the sum of its categories. The
/// figures are written exclusively by the cost ledger, which recomputes
/// them in full from the order's source documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    estimated_material: Money,
    estimated_labor: Money,
    estimated_external: Money,
    actual_material: Money,
    actual_labor: Money,
    actual_external: Money,
}

impl CostSummary {
    pub fn estimated_material(&self) -> Money {
        self.estimated_material
    }

    pub fn estimated_labor(&self) -> Money {
        self.estimated_labor
    }

    pub fn estimated_external(&self) -> Money {
        self.estimated_external
    }

    pub fn actual_material(&self) -> Money {
        self.actual_material
    }

    pub fn actual_labor(&self) -> Money {
        self.actual_labor
    }

    pub fn actual_external(&self) -> Money {
        self.actual_external
    }

    /// Sum of the three estimated categories.
    pub fn estimated_total(&self) -> Money {
        self.estimated_material + self.estimated_labor + self.estimated_external
    }

    /// Sum of the three actual categories.
    pub fn actual_total(&self) -> Money {
        self.actual_material + self.actual_labor + self.actual_external
    }

    pub fn variance_material(&self) -> Money {
        self.actual_material - self.estimated_material
    }

    pub fn variance_labor(&self) -> Money {
        self.actual_labor - self.estimated_labor
    }

    pub fn variance_external(&self) -> Money {
        self.actual_external - self.estimated_external
    }

    /// Actual total minus estimated total.
    pub fn variance_total(&self) -> Money {
        self.actual_total() - self.estimated_total()
    }

    /// Builds the variance report with percentage and banding.
    pub fn variance_report(&self) -> VarianceReport {
        let percent = VariancePercent::compute(self.variance_total(), self.estimated_total());
        VarianceReport {
            material: self.variance_material(),
            labor: self.variance_labor(),
            external: self.variance_external(),
            total: self.variance_total(),
            percent,
            status: percent.status(),
            requires_explanation: percent.requires_explanation(),
        }
    }

    pub(crate) fn set_estimate(&mut self, material: Money, labor: Money, external: Money) {
        self.estimated_material = material;
        self.estimated_labor = labor;
        self.estimated_external = external;
    }

    pub(crate) fn set_actuals(&mut self, material: Money, labor: Money, external: Money) {
        self.actual_material = material;
        self.actual_labor = labor;
        self.actual_external = external;
    }
}

/// Variance percentage in hundredths of a percent.
///
/// Fixed point throughout: `1234` reads as `12.34%`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VariancePercent {
    hundredths: i64,
}

impl VariancePercent {
    /// Computes `variance / estimated × 100` with two fractional digits.
    ///
    /// When the estimate is zero the ratio is undefined; the result is
    /// 0.00% if the variance is also zero, otherwise 100.00%.
    pub fn compute(variance: Money, estimated: Money) -> Self {
        let hundredths = if estimated.is_zero() {
            if variance.is_zero() { 0 } else { 10_000 }
        } else {
            variance.cents() * 10_000 / estimated.cents()
        };
        Self { hundredths }
    }

    pub fn hundredths(&self) -> i64 {
        self.hundredths
    }

    /// Magnitude used for banding.
    pub fn magnitude(&self) -> i64 {
        self.hundredths.abs()
    }

    /// Band by magnitude: within 5% Acceptable, within 10% Monitor,
    /// within 20% ReviewRequired, beyond that Critical.
    pub fn status(&self) -> VarianceStatus {
        match self.magnitude() {
            0..=500 => VarianceStatus::Acceptable,
            501..=1_000 => VarianceStatus::Monitor,
            1_001..=2_000 => VarianceStatus::ReviewRequired,
            _ => VarianceStatus::Critical,
        }
    }

    /// True when the magnitude exceeds 10%.
    pub fn requires_explanation(&self) -> bool {
        self.magnitude() > 1_000
    }
}

impl std::fmt::Display for VariancePercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.hundredths < 0 { "-" } else { "" };
        let magnitude = self.magnitude();
        write!(f, "{}{}.{:02}%", sign, magnitude / 100, magnitude % 100)
    }
}

/// Variance band for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceStatus {
    Acceptable,
    Monitor,
    ReviewRequired,
    Critical,
}

impl VarianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarianceStatus::Acceptable => "ACCEPTABLE",
            VarianceStatus::Monitor => "MONITOR",
            VarianceStatus::ReviewRequired => "REVIEW_REQUIRED",
            VarianceStatus::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for VarianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category and total variance with percentage and banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceReport {
    pub material: Money,
    pub labor: Money,
    pub external: Money,
    pub total: Money,
    pub percent: VariancePercent,
    pub status: VarianceStatus,
    pub requires_explanation: bool,
}
