//! Work order aggregate and related types.

mod aggregate;
mod documents;
mod snapshot;
mod value_objects;

pub use aggregate::WorkOrder;
pub use documents::{
    Component, Confirmation, ConfirmationKind, GoodsIssue, GoodsReceipt, MalfunctionReport,
    Operation, OperationStatus, Permit, PurchaseOrder, PurchaseOrderKind, PurchaseOrderStatus,
    Settlement,
};
pub use snapshot::{ComponentReadiness, OperationReadiness, OrderSnapshot};
pub use value_objects::{Hours, Money, OrderKind, Priority};
