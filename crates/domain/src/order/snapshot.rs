//! Read-only projection of an order used for transition checks.
//!
//! The lifecycle engine never touches the aggregate directly; it evaluates
//! predicates against this snapshot. Stock availability comes from outside
//! the aggregate, so the snapshot is built with an availability probe.

use serde::{Deserialize, Serialize};

use crate::lifecycle::OrderStatus;

use super::{Money, OrderKind};

/// Readiness view of a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReadiness {
    pub number: String,
    pub confirmed: bool,
    pub has_technician: bool,
}

/// Readiness view of a single component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReadiness {
    pub number: String,
    pub description: String,
    pub critical: bool,
    pub quantity_required: u32,
    pub quantity_issued: u32,
    /// Whether stock currently covers the required quantity.
    pub available: bool,
}

impl ComponentReadiness {
    /// Returns true when the issued quantity covers the requirement.
    pub fn fully_issued(&self) -> bool {
        self.quantity_issued >= self.quantity_required
    }
}

/// Point-in-time view of everything the transition predicates inspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub operations: Vec<OperationReadiness>,
    pub components: Vec<ComponentReadiness>,
    /// Names of permits not yet approved.
    pub pending_permits: Vec<String>,
    pub confirmation_count: usize,
    pub malfunction_report_count: usize,
    /// True when a material-bearing purchase order has been placed.
    pub material_on_order: bool,
    pub estimated_total: Money,
}
