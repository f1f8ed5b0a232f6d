//! Orchestrator error types.

use common::{OrderId, Version};
use docflow::FlowError;
use domain::DomainError;
use thiserror::Error;

/// Errors from the order repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order changed between load and save. Reload and retry.
    #[error("Version conflict for order {order_id}: expected {expected}, actual {actual}")]
    VersionConflict {
        order_id: OrderId,
        expected: Version,
        actual: Version,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur during orchestrator commands.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A domain rule rejected the command.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Repository error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Document flow error.
    #[error("Document flow error: {0}")]
    Flow(#[from] FlowError),

    /// The technician availability collaborator declined the assignment.
    #[error("Technician unavailable: {reason}")]
    TechnicianUnavailable { reason: String },

    /// The cost center validation collaborator declined the settlement.
    #[error("Invalid cost center: {reason}")]
    InvalidCostCenter { reason: String },
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
