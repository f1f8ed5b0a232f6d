//! Read-side reports assembled by the service.

use serde::Serialize;

use common::OrderId;
use domain::{CostSummary, OrderStatus, Settlement, VarianceReport};

/// One prerequisite of the order's next transition and whether the order
/// currently satisfies it.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessCheck {
    pub requirement: String,
    pub satisfied: bool,
    pub reason: Option<String>,
}

/// Where an order stands against its next lifecycle transition.
///
/// For a terminal order there is no next status and the check list is
/// empty.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub next_status: Option<OrderStatus>,
    pub ready: bool,
    pub checks: Vec<ReadinessCheck>,
}

/// Cost picture of an order: the summary ledger, the variance against
/// the estimate, and the settlement if one was posted.
#[derive(Debug, Clone, Serialize)]
pub struct CostAnalysis {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub costs: CostSummary,
    pub variance: VarianceReport,
    pub settlement: Option<Settlement>,
}
