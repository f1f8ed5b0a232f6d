//! Work order commands.
//!
//! Each command is a plain value handed to [`WorkOrderService`]; the service
//! loads the order, applies the command, and persists the result under the
//! version it loaded.
//!
//! [`WorkOrderService`]: crate::WorkOrderService

use common::{DocumentNumber, OrderId, UserId};
use domain::{
    ConfirmationKind, Hours, Money, OrderKind, Priority, PurchaseOrderKind, PurchaseOrderStatus,
};

/// Command to create a new work order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// Kind of order to create.
    pub kind: OrderKind,

    /// What the work is about.
    pub description: String,

    /// Equipment the work targets.
    pub equipment: String,

    /// Functional location of the equipment.
    pub functional_location: String,

    /// Scheduling priority. Ignored for breakdown orders, which are
    /// always created as emergencies.
    pub priority: Priority,

    /// Triggering malfunction notification, required for breakdown orders.
    pub notification: Option<String>,

    /// User creating the order.
    pub by: UserId,
}

impl CreateOrder {
    /// Creates a command for a planned general maintenance order.
    pub fn general(
        description: impl Into<String>,
        equipment: impl Into<String>,
        functional_location: impl Into<String>,
        priority: Priority,
        by: UserId,
    ) -> Self {
        Self {
            kind: OrderKind::General,
            description: description.into(),
            equipment: equipment.into(),
            functional_location: functional_location.into(),
            priority,
            notification: None,
            by,
        }
    }

    /// Creates a command for a breakdown order raised from a notification.
    pub fn breakdown(
        description: impl Into<String>,
        equipment: impl Into<String>,
        functional_location: impl Into<String>,
        notification: impl Into<String>,
        by: UserId,
    ) -> Self {
        Self {
            kind: OrderKind::Breakdown,
            description: description.into(),
            equipment: equipment.into(),
            functional_location: functional_location.into(),
            priority: Priority::Emergency,
            notification: Some(notification.into()),
            by,
        }
    }
}

/// Command to add an operation to an order.
#[derive(Debug, Clone)]
pub struct AddOperation {
    /// The order to add the operation to.
    pub order_id: OrderId,

    /// What the operation does.
    pub description: String,

    /// Planned labor hours.
    pub planned_hours: Hours,

    /// User issuing the command.
    pub by: UserId,
}

impl AddOperation {
    /// Creates a new AddOperation command.
    pub fn new(
        order_id: OrderId,
        description: impl Into<String>,
        planned_hours: Hours,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            description: description.into(),
            planned_hours,
            by,
        }
    }
}

/// Command to update an unconfirmed operation.
#[derive(Debug, Clone)]
pub struct UpdateOperation {
    /// The order holding the operation.
    pub order_id: OrderId,

    /// The operation to update.
    pub operation: DocumentNumber,

    /// New description, if changing.
    pub description: Option<String>,

    /// New planned hours, if changing.
    pub planned_hours: Option<Hours>,

    /// User issuing the command.
    pub by: UserId,
}

impl UpdateOperation {
    /// Creates a new UpdateOperation command.
    pub fn new(
        order_id: OrderId,
        operation: DocumentNumber,
        description: Option<String>,
        planned_hours: Option<Hours>,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            operation,
            description,
            planned_hours,
            by,
        }
    }
}

/// Command to remove an unconfirmed operation.
#[derive(Debug, Clone)]
pub struct RemoveOperation {
    /// The order holding the operation.
    pub order_id: OrderId,

    /// The operation to remove.
    pub operation: DocumentNumber,

    /// User issuing the command.
    pub by: UserId,
}

impl RemoveOperation {
    /// Creates a new RemoveOperation command.
    pub fn new(order_id: OrderId, operation: DocumentNumber, by: UserId) -> Self {
        Self {
            order_id,
            operation,
            by,
        }
    }
}

/// Command to assign a technician to an operation.
#[derive(Debug, Clone)]
pub struct AssignTechnician {
    /// The order holding the operation.
    pub order_id: OrderId,

    /// The operation to staff.
    pub operation: DocumentNumber,

    /// Technician to assign.
    pub technician: String,

    /// User issuing the command.
    pub by: UserId,
}

impl AssignTechnician {
    /// Creates a new AssignTechnician command.
    pub fn new(
        order_id: OrderId,
        operation: DocumentNumber,
        technician: impl Into<String>,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            operation,
            technician: technician.into(),
            by,
        }
    }
}

/// Command to add a component requirement to an order.
#[derive(Debug, Clone)]
pub struct AddComponent {
    /// The order to add the component to.
    pub order_id: OrderId,

    /// What the component is.
    pub description: String,

    /// Material master number, when the material is catalogued.
    pub material_number: Option<String>,

    /// Whether the component gates release.
    pub critical: bool,

    /// Quantity the work requires.
    pub quantity_required: u32,

    /// Estimated cost for the required quantity.
    pub estimated_cost: Money,

    /// User issuing the command.
    pub by: UserId,
}

impl AddComponent {
    /// Creates a new AddComponent command.
    pub fn new(
        order_id: OrderId,
        description: impl Into<String>,
        material_number: Option<String>,
        critical: bool,
        quantity_required: u32,
        estimated_cost: Money,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            description: description.into(),
            material_number,
            critical,
            quantity_required,
            estimated_cost,
            by,
        }
    }
}

/// Command to update a component's planning fields.
#[derive(Debug, Clone)]
pub struct UpdateComponent {
    /// The order holding the component.
    pub order_id: OrderId,

    /// The component to update.
    pub component: DocumentNumber,

    /// New description, if changing.
    pub description: Option<String>,

    /// New criticality, if changing.
    pub critical: Option<bool>,

    /// New required quantity, if changing.
    pub quantity_required: Option<u32>,

    /// New estimated cost, if changing.
    pub estimated_cost: Option<Money>,

    /// User issuing the command.
    pub by: UserId,
}

impl UpdateComponent {
    /// Creates a new UpdateComponent command.
    pub fn new(
        order_id: OrderId,
        component: DocumentNumber,
        description: Option<String>,
        critical: Option<bool>,
        quantity_required: Option<u32>,
        estimated_cost: Option<Money>,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            component,
            description,
            critical,
            quantity_required,
            estimated_cost,
            by,
        }
    }
}

/// Command to remove a component with no posted issues.
#[derive(Debug, Clone)]
pub struct RemoveComponent {
    /// The order holding the component.
    pub order_id: OrderId,

    /// The component to remove.
    pub component: DocumentNumber,

    /// User issuing the command.
    pub by: UserId,
}

impl RemoveComponent {
    /// Creates a new RemoveComponent command.
    pub fn new(order_id: OrderId, component: DocumentNumber, by: UserId) -> Self {
        Self {
            order_id,
            component,
            by,
        }
    }
}

/// Command to add a required work permit.
#[derive(Debug, Clone)]
pub struct AddPermit {
    /// The order requiring the permit.
    pub order_id: OrderId,

    /// Permit name, e.g. "Hot work".
    pub name: String,

    /// User issuing the command.
    pub by: UserId,
}

impl AddPermit {
    /// Creates a new AddPermit command.
    pub fn new(order_id: OrderId, name: impl Into<String>, by: UserId) -> Self {
        Self {
            order_id,
            name: name.into(),
            by,
        }
    }
}

/// Command to approve a permit.
#[derive(Debug, Clone)]
pub struct ApprovePermit {
    /// The order holding the permit.
    pub order_id: OrderId,

    /// The permit to approve.
    pub permit: DocumentNumber,

    /// Approving user.
    pub by: UserId,
}

impl ApprovePermit {
    /// Creates a new ApprovePermit command.
    pub fn new(order_id: OrderId, permit: DocumentNumber, by: UserId) -> Self {
        Self {
            order_id,
            permit,
            by,
        }
    }
}

/// Command to create a purchase order against an order.
#[derive(Debug, Clone)]
pub struct CreatePurchaseOrder {
    /// The order to procure for.
    pub order_id: OrderId,

    /// What the purchase order covers.
    pub kind: PurchaseOrderKind,

    /// Vendor receiving the order.
    pub vendor: String,

    /// What is being procured.
    pub description: String,

    /// User issuing the command.
    pub by: UserId,
}

impl CreatePurchaseOrder {
    /// Creates a new CreatePurchaseOrder command.
    pub fn new(
        order_id: OrderId,
        kind: PurchaseOrderKind,
        vendor: impl Into<String>,
        description: impl Into<String>,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            kind,
            vendor: vendor.into(),
            description: description.into(),
            by,
        }
    }
}

/// Command to move a purchase order to a new status.
#[derive(Debug, Clone)]
pub struct UpdatePurchaseOrderStatus {
    /// The order holding the purchase order.
    pub order_id: OrderId,

    /// The purchase order to update.
    pub purchase_order: DocumentNumber,

    /// Status to set.
    pub status: PurchaseOrderStatus,

    /// User issuing the command.
    pub by: UserId,
}

impl UpdatePurchaseOrderStatus {
    /// Creates a new UpdatePurchaseOrderStatus command.
    pub fn new(
        order_id: OrderId,
        purchase_order: DocumentNumber,
        status: PurchaseOrderStatus,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            purchase_order,
            status,
            by,
        }
    }
}

/// Command to post a goods receipt for a delivered purchase order.
#[derive(Debug, Clone)]
pub struct PostGoodsReceipt {
    /// The order the delivery belongs to.
    pub order_id: OrderId,

    /// The purchase order that was delivered.
    pub purchase_order: DocumentNumber,

    /// User posting the receipt.
    pub by: UserId,
}

impl PostGoodsReceipt {
    /// Creates a new PostGoodsReceipt command.
    pub fn new(order_id: OrderId, purchase_order: DocumentNumber, by: UserId) -> Self {
        Self {
            order_id,
            purchase_order,
            by,
        }
    }
}

/// Command to issue material from stock against a component.
#[derive(Debug, Clone)]
pub struct PostGoodsIssue {
    /// The order consuming the material.
    pub order_id: OrderId,

    /// The component being issued to.
    pub component: DocumentNumber,

    /// Quantity issued.
    pub quantity: u32,

    /// User posting the issue.
    pub by: UserId,
}

impl PostGoodsIssue {
    /// Creates a new PostGoodsIssue command.
    pub fn new(order_id: OrderId, component: DocumentNumber, quantity: u32, by: UserId) -> Self {
        Self {
            order_id,
            component,
            quantity,
            by,
        }
    }
}

/// Command to post a labor confirmation against an operation.
#[derive(Debug, Clone)]
pub struct PostConfirmation {
    /// The order the work was done on.
    pub order_id: OrderId,

    /// The operation being confirmed.
    pub operation: DocumentNumber,

    /// Whether the hours are internal labor or contracted.
    pub kind: ConfirmationKind,

    /// Hours actually worked.
    pub actual_hours: Hours,

    /// Whether this confirmation closes the operation.
    pub final_confirmation: bool,

    /// Service purchase order the contracted work was bought under.
    pub service_purchase_order: Option<DocumentNumber>,

    /// User posting the confirmation.
    pub by: UserId,
}

impl PostConfirmation {
    /// Creates a confirmation of internal labor.
    pub fn internal(
        order_id: OrderId,
        operation: DocumentNumber,
        actual_hours: Hours,
        final_confirmation: bool,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            operation,
            kind: ConfirmationKind::Internal,
            actual_hours,
            final_confirmation,
            service_purchase_order: None,
            by,
        }
    }

    /// Creates a confirmation of contracted work, optionally tied to the
    /// service purchase order it was bought under.
    pub fn external(
        order_id: OrderId,
        operation: DocumentNumber,
        actual_hours: Hours,
        final_confirmation: bool,
        service_purchase_order: Option<DocumentNumber>,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            operation,
            kind: ConfirmationKind::External,
            actual_hours,
            final_confirmation,
            service_purchase_order,
            by,
        }
    }
}

/// Command to file a malfunction report.
#[derive(Debug, Clone)]
pub struct FileMalfunctionReport {
    /// The order the malfunction belongs to.
    pub order_id: OrderId,

    /// What was damaged.
    pub damage: String,

    /// What caused the damage.
    pub cause: String,

    /// User filing the report.
    pub by: UserId,
}

impl FileMalfunctionReport {
    /// Creates a new FileMalfunctionReport command.
    pub fn new(
        order_id: OrderId,
        damage: impl Into<String>,
        cause: impl Into<String>,
        by: UserId,
    ) -> Self {
        Self {
            order_id,
            damage: damage.into(),
            cause: cause.into(),
            by,
        }
    }
}

/// Command to recompute an order's cost estimate from its operations
/// and components.
#[derive(Debug, Clone)]
pub struct EstimateCosts {
    /// The order to estimate.
    pub order_id: OrderId,

    /// User issuing the command.
    pub by: UserId,
}

impl EstimateCosts {
    /// Creates a new EstimateCosts command.
    pub fn new(order_id: OrderId, by: UserId) -> Self {
        Self { order_id, by }
    }
}

/// Command to move an order from CREATED to PLANNED.
#[derive(Debug, Clone)]
pub struct PlanOrder {
    /// The order to plan.
    pub order_id: OrderId,

    /// User issuing the command.
    pub by: UserId,
}

impl PlanOrder {
    /// Creates a new PlanOrder command.
    pub fn new(order_id: OrderId, by: UserId) -> Self {
        Self { order_id, by }
    }
}

/// Command to move an order from PLANNED to RELEASED.
#[derive(Debug, Clone)]
pub struct ReleaseOrder {
    /// The order to release.
    pub order_id: OrderId,

    /// User issuing the command.
    pub by: UserId,

    /// Whether overridable blockers may be bypassed.
    pub override_blocks: bool,

    /// Justification recorded when blockers are bypassed.
    pub override_reason: Option<String>,
}

impl ReleaseOrder {
    /// Creates a new ReleaseOrder command with no override.
    pub fn new(order_id: OrderId, by: UserId) -> Self {
        Self {
            order_id,
            by,
            override_blocks: false,
            override_reason: None,
        }
    }

    /// Creates a release that bypasses overridable blockers, recording
    /// the given reason.
    pub fn with_override(order_id: OrderId, by: UserId, reason: impl Into<String>) -> Self {
        Self {
            order_id,
            by,
            override_blocks: true,
            override_reason: Some(reason.into()),
        }
    }
}

/// Command to move an order from RELEASED to IN_PROGRESS.
#[derive(Debug, Clone)]
pub struct StartOrder {
    /// The order to start.
    pub order_id: OrderId,

    /// User issuing the command.
    pub by: UserId,
}

impl StartOrder {
    /// Creates a new StartOrder command.
    pub fn new(order_id: OrderId, by: UserId) -> Self {
        Self { order_id, by }
    }
}

/// Command to move an order from IN_PROGRESS to CONFIRMED.
#[derive(Debug, Clone)]
pub struct ConfirmOrder {
    /// The order to confirm.
    pub order_id: OrderId,

    /// User issuing the command.
    pub by: UserId,
}

impl ConfirmOrder {
    /// Creates a new ConfirmOrder command.
    pub fn new(order_id: OrderId, by: UserId) -> Self {
        Self { order_id, by }
    }
}

/// Command to technically complete an order.
#[derive(Debug, Clone)]
pub struct TecoOrder {
    /// The order to complete.
    pub order_id: OrderId,

    /// User issuing the command.
    pub by: UserId,
}

impl TecoOrder {
    /// Creates a new TecoOrder command.
    pub fn new(order_id: OrderId, by: UserId) -> Self {
        Self { order_id, by }
    }
}

/// Command to settle a completed order's actual costs to a cost center.
#[derive(Debug, Clone)]
pub struct SettleCosts {
    /// The order to settle.
    pub order_id: OrderId,

    /// Cost center receiving the settlement.
    pub cost_center: String,

    /// User issuing the command.
    pub by: UserId,
}

impl SettleCosts {
    /// Creates a new SettleCosts command.
    pub fn new(order_id: OrderId, cost_center: impl Into<String>, by: UserId) -> Self {
        Self {
            order_id,
            cost_center: cost_center.into(),
            by,
        }
    }
}
