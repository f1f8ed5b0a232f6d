//! Domain layer for the maintenance work order system.
//!
//! This crate provides the core domain model:
//! - WorkOrder aggregate with its child documents and cost summary
//! - Lifecycle engine with per-transition prerequisite predicates
//! - Cost ledger for estimation, actuals accumulation, and settlement

pub mod costing;
pub mod error;
pub mod lifecycle;
pub mod order;

pub use costing::{
    CostLedger, CostSummary, CostingRates, VariancePercent, VarianceReport, VarianceStatus,
};
pub use error::DomainError;
pub use lifecycle::{
    BlockCategory, Blocker, LifecycleEngine, OrderStatus, OverrideCheck, Predicate, Transition,
    TransitionCheck, TransitionTable,
};
pub use order::{
    Component, ComponentReadiness, Confirmation, ConfirmationKind, GoodsIssue, GoodsReceipt,
    Hours, MalfunctionReport, Money, Operation, OperationReadiness, OperationStatus, OrderKind,
    OrderSnapshot, Permit, Priority, PurchaseOrder, PurchaseOrderKind, PurchaseOrderStatus,
    Settlement, WorkOrder,
};
