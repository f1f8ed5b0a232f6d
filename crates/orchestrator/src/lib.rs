//! Transactional command layer for maintenance work orders.
//!
//! This crate composes the domain model, the cost ledger, and the
//! document flow recorder into a command surface:
//! 1. Commands load the order through the repository
//! 2. Order children and cost summary mutate together
//! 3. The save is guarded by an optimistic version check
//! 4. Document flow entries are appended once the save succeeds
//!
//! Read-only collaborators (material availability, technician
//! availability, cost center validity) answer with a boolean and a
//! reason, never with raw master data.

pub mod collaborators;
pub mod commands;
pub mod error;
pub mod reports;
pub mod repository;
pub mod service;

pub use collaborators::{
    CapabilityCheck, CostCenterValidation, InMemoryCostCenterValidation,
    InMemoryMaterialAvailability, InMemoryTechnicianAvailability, MaterialAvailability,
    TechnicianAvailability,
};
pub use commands::{
    AddComponent, AddOperation, AddPermit, ApprovePermit, AssignTechnician, ConfirmOrder,
    CreateOrder, CreatePurchaseOrder, EstimateCosts, FileMalfunctionReport, PlanOrder,
    PostConfirmation, PostGoodsIssue, PostGoodsReceipt, ReleaseOrder, RemoveComponent,
    RemoveOperation, SettleCosts, StartOrder, TecoOrder, UpdateComponent, UpdateOperation,
    UpdatePurchaseOrderStatus,
};
pub use error::{OrchestratorError, Result, StoreError};
pub use reports::{CostAnalysis, ReadinessCheck, ReadinessReport};
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::WorkOrderService;
