//! Domain error types.

use thiserror::Error;

use crate::lifecycle::OrderStatus;
use crate::order::{Hours, Money};

/// Errors that can occur during work order operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested `(from, to)` pair is not in the lifecycle adjacency table.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// One or more transition prerequisites failed. Carries the complete
    /// list of failing reasons, never a truncated one.
    #[error("Prerequisites not met: {}", .reasons.join("; "))]
    PrerequisiteNotMet { reasons: Vec<String> },

    /// Operation not found on the order.
    #[error("Operation not found: {number}")]
    OperationNotFound { number: String },

    /// Component not found on the order.
    #[error("Component not found: {number}")]
    ComponentNotFound { number: String },

    /// Purchase order not found on the order.
    #[error("Purchase order not found: {number}")]
    PurchaseOrderNotFound { number: String },

    /// Permit not found on the order.
    #[error("Permit not found: {number}")]
    PermitNotFound { number: String },

    /// Finally confirmed operations can no longer be changed.
    #[error("Operation {number} is finally confirmed and can no longer be changed")]
    OperationConfirmed { number: String },

    /// Components with posted goods issues cannot be removed.
    #[error("Component {number} has goods issues posted and cannot be removed")]
    ComponentHasIssues { number: String },

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid hours value.
    #[error("Invalid hours: {hours} (must be greater than 0)")]
    InvalidHours { hours: Hours },

    /// Invalid money amount.
    #[error("Invalid amount: {amount} (must not be negative)")]
    InvalidAmount { amount: Money },

    /// Description text is required.
    #[error("Description must not be empty")]
    EmptyDescription,

    /// Breakdown orders must reference the notification they were raised from.
    #[error("Breakdown orders require a notification reference")]
    NotificationRequired,

    /// Goods movements and confirmations require a released order.
    #[error("Order is not released: status is {status}")]
    NotReleased { status: OrderStatus },

    /// No changes are accepted on a technically completed order.
    #[error("Order is technically complete; no further changes are allowed")]
    OrderClosed,

    /// Settlement requires technical completion.
    #[error("Order is not technically complete: status is {status}")]
    NotTechnicallyComplete { status: OrderStatus },

    /// Settlement requires a positive actual total.
    #[error("Order has no actual costs to settle")]
    NoActualCosts,

    /// The order has already been settled.
    #[error("Order is already settled under {document}")]
    AlreadySettled { document: String },

    /// Breakdown completion requires a malfunction report on file.
    #[error("Breakdown order requires at least one malfunction report before completion")]
    MalfunctionReportRequired,

    /// An enum wire value failed to parse at the boundary.
    #[error("Invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: String },
}
