//! Child documents of a work order.

use chrono::{DateTime, Utc};
use common::{DocumentNumber, UserId};
use serde::{Deserialize, Serialize};

use crate::DomainError;

use super::{Hours, Money};

/// Status of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[default]
    Planned,
    InProgress,
    Confirmed,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Planned => "PLANNED",
            OperationStatus::InProgress => "IN_PROGRESS",
            OperationStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A work step on an order. Mutable until finally confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Business number (`OP-` prefix).
    pub number: DocumentNumber,

    /// What the step does.
    pub description: String,

    /// Current status; driven by confirmations.
    pub status: OperationStatus,

    /// Planned effort.
    pub planned_hours: Hours,

    /// Actual effort accumulated from confirmations.
    pub actual_hours: Hours,

    /// Assigned technician, if any.
    pub technician: Option<String>,
}

impl Operation {
    pub const NUMBER_PREFIX: &'static str = "OP";

    /// Creates a new planned operation.
    pub fn new(number: DocumentNumber, description: impl Into<String>, planned_hours: Hours) -> Self {
        Self {
            number,
            description: description.into(),
            status: OperationStatus::Planned,
            planned_hours,
            actual_hours: Hours::zero(),
            technician: None,
        }
    }

    /// Returns true once the operation is finally confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.status == OperationStatus::Confirmed
    }

    /// Returns true if a technician is assigned.
    pub fn has_technician(&self) -> bool {
        self.technician.is_some()
    }
}

/// A material requirement on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Business number (`MAT-` prefix).
    pub number: DocumentNumber,

    /// What the material is.
    pub description: String,

    /// Catalog material number; None for ad-hoc materials.
    pub material_number: Option<String>,

    /// False marks an ad-hoc (non-catalog) material.
    pub has_master_data: bool,

    /// Critical components gate release when not available or on order.
    pub critical: bool,

    /// Quantity required by planning.
    pub quantity_required: u32,

    /// Quantity issued so far.
    pub quantity_issued: u32,

    /// Estimated cost for the full required quantity.
    pub estimated_cost: Money,

    /// Actual cost accumulated from goods issues.
    pub actual_cost: Money,
}

impl Component {
    pub const NUMBER_PREFIX: &'static str = "MAT";

    /// Creates a new component requirement.
    pub fn new(
        number: DocumentNumber,
        description: impl Into<String>,
        material_number: Option<String>,
        critical: bool,
        quantity_required: u32,
        estimated_cost: Money,
    ) -> Self {
        let has_master_data = material_number.is_some();
        Self {
            number,
            description: description.into(),
            material_number,
            has_master_data,
            critical,
            quantity_required,
            quantity_issued: 0,
            estimated_cost,
            actual_cost: Money::zero(),
        }
    }

    /// Returns true when the issued quantity covers the requirement.
    pub fn fully_issued(&self) -> bool {
        self.quantity_issued >= self.quantity_required
    }

    /// Unit cost used for goods issue valuation: the estimate spread over
    /// the required quantity, or the fallback rate when no quantity is
    /// planned.
    pub fn unit_cost(&self, fallback: Money) -> Money {
        if self.quantity_required == 0 {
            fallback
        } else {
            self.estimated_cost.divide(self.quantity_required)
        }
    }
}

/// Kind of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderKind {
    Material,
    Service,
    Combined,
}

impl PurchaseOrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderKind::Material => "MATERIAL",
            PurchaseOrderKind::Service => "SERVICE",
            PurchaseOrderKind::Combined => "COMBINED",
        }
    }

    /// Returns true if this purchase order can deliver material.
    pub fn covers_material(&self) -> bool {
        matches!(self, PurchaseOrderKind::Material | PurchaseOrderKind::Combined)
    }
}

impl std::fmt::Display for PurchaseOrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PurchaseOrderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MATERIAL" => Ok(PurchaseOrderKind::Material),
            "SERVICE" => Ok(PurchaseOrderKind::Service),
            "COMBINED" => Ok(PurchaseOrderKind::Combined),
            _ => Err(DomainError::InvalidValue {
                field: "purchase order kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    #[default]
    Created,
    Ordered,
    PartiallyDelivered,
    Delivered,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Created => "CREATED",
            PurchaseOrderStatus::Ordered => "ORDERED",
            PurchaseOrderStatus::PartiallyDelivered => "PARTIALLY_DELIVERED",
            PurchaseOrderStatus::Delivered => "DELIVERED",
        }
    }

    /// Returns true once the order has been placed with the vendor.
    pub fn is_placed(&self) -> bool {
        !matches!(self, PurchaseOrderStatus::Created)
    }
}

impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PurchaseOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(PurchaseOrderStatus::Created),
            "ORDERED" => Ok(PurchaseOrderStatus::Ordered),
            "PARTIALLY_DELIVERED" => Ok(PurchaseOrderStatus::PartiallyDelivered),
            "DELIVERED" => Ok(PurchaseOrderStatus::Delivered),
            _ => Err(DomainError::InvalidValue {
                field: "purchase order status",
                value: s.to_string(),
            }),
        }
    }
}

/// An external procurement document tied to the order.
///
/// Goods receipts and external service entries posted against it flip the
/// status to delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Business number (`PO-` prefix).
    pub number: DocumentNumber,

    pub kind: PurchaseOrderKind,

    pub status: PurchaseOrderStatus,

    pub vendor: String,

    pub description: String,
}

impl PurchaseOrder {
    pub const NUMBER_PREFIX: &'static str = "PO";

    /// Creates a new purchase order in Created status.
    pub fn new(
        number: DocumentNumber,
        kind: PurchaseOrderKind,
        vendor: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            number,
            kind,
            status: PurchaseOrderStatus::Created,
            vendor: vendor.into(),
            description: description.into(),
        }
    }
}

/// An incoming delivery posted against a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsReceipt {
    /// Business number (`GR-` prefix).
    pub number: DocumentNumber,

    /// The purchase order the delivery fulfils.
    pub purchase_order: DocumentNumber,

    pub posted_by: UserId,

    pub posted_at: DateTime<Utc>,
}

impl GoodsReceipt {
    pub const NUMBER_PREFIX: &'static str = "GR";
}

/// Material consumed from stock against the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsIssue {
    /// Business number (`GI-` prefix).
    pub number: DocumentNumber,

    /// The component the material was issued for.
    pub component: DocumentNumber,

    pub quantity: u32,

    pub posted_by: UserId,

    pub posted_at: DateTime<Utc>,
}

impl GoodsIssue {
    pub const NUMBER_PREFIX: &'static str = "GI";
}

/// Distinguishes own labor from vendor labor for costing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationKind {
    Internal,
    External,
}

impl ConfirmationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationKind::Internal => "INTERNAL",
            ConfirmationKind::External => "EXTERNAL",
        }
    }
}

impl std::fmt::Display for ConfirmationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConfirmationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INTERNAL" => Ok(ConfirmationKind::Internal),
            "EXTERNAL" => Ok(ConfirmationKind::External),
            _ => Err(DomainError::InvalidValue {
                field: "confirmation kind",
                value: s.to_string(),
            }),
        }
    }
}

/// A labor posting against an operation.
///
/// A final confirmation sets the operation to Confirmed; a partial one
/// sets it to InProgress. External confirmations may reference the service
/// purchase order they were entered against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Business number (`CNF-` prefix).
    pub number: DocumentNumber,

    /// The operation being confirmed.
    pub operation: DocumentNumber,

    pub kind: ConfirmationKind,

    pub actual_hours: Hours,

    /// Final confirmations close the operation.
    pub final_confirmation: bool,

    /// Service purchase order for external service entries.
    pub service_purchase_order: Option<DocumentNumber>,

    pub posted_by: UserId,

    pub posted_at: DateTime<Utc>,
}

impl Confirmation {
    pub const NUMBER_PREFIX: &'static str = "CNF";
}

/// Damage and cause record for a breakdown.
///
/// Breakdown orders require at least one before technical completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalfunctionReport {
    /// Business number (`MLF-` prefix).
    pub number: DocumentNumber,

    pub damage: String,

    pub cause: String,

    pub reported_by: UserId,

    pub reported_at: DateTime<Utc>,
}

impl MalfunctionReport {
    pub const NUMBER_PREFIX: &'static str = "MLF";
}

/// A work permit required before release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    /// Business number (`PRM-` prefix).
    pub number: DocumentNumber,

    /// Permit name, e.g. "hot work".
    pub name: String,

    pub approved: bool,

    pub approved_by: Option<UserId>,

    pub approved_at: Option<DateTime<Utc>>,
}

impl Permit {
    pub const NUMBER_PREFIX: &'static str = "PRM";

    /// Creates a new unapproved permit.
    pub fn new(number: DocumentNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            approved: false,
            approved_by: None,
            approved_at: None,
        }
    }
}

/// Record of settling the order's actual costs to a cost center.
///
/// The document number is deterministic (`SET-{order id}`), so retrying a
/// completed settlement is detectable rather than duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub document: DocumentNumber,

    pub cost_center: String,

    /// Actual total at settlement time; informational only, the cost
    /// summary itself is not altered by settling.
    pub amount: Money,

    pub settled_by: UserId,

    pub settled_at: DateTime<Utc>,
}
