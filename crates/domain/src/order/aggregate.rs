//! Work order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{DocumentNumber, OrderId, UserId, Version};
use serde::{Deserialize, Serialize};

use crate::DomainError;
use crate::costing::CostSummary;
use crate::lifecycle::{OrderStatus, Transition};

use super::{
    Component, ComponentReadiness, Confirmation, ConfirmationKind, GoodsIssue, GoodsReceipt,
    Hours, MalfunctionReport, Money, Operation, OperationReadiness, OperationStatus, OrderKind,
    OrderSnapshot, Permit, Priority, PurchaseOrder, PurchaseOrderKind, PurchaseOrderStatus,
    Settlement,
};

/// Work order aggregate root.
///
/// Holds the order header, all child documents, and the cost summary.
/// Lifecycle transitions are validated by the lifecycle engine against a
/// snapshot; the aggregate itself only enforces the source-status guard
/// when a transition is applied. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Business identifier (`PM-` or `BD-` prefix).
    id: OrderId,

    /// Current version for optimistic concurrency.
    #[serde(default)]
    version: Version,

    /// General (planned) or breakdown (emergency) order.
    kind: OrderKind,

    /// Current lifecycle status.
    status: OrderStatus,

    priority: Priority,

    /// What needs to be done.
    description: String,

    /// Equipment the work is performed on.
    equipment: String,

    /// Functional location of the equipment.
    functional_location: String,

    /// Notification the order was raised from; breakdown orders only.
    notification: Option<String>,

    operations: Vec<Operation>,

    components: Vec<Component>,

    purchase_orders: Vec<PurchaseOrder>,

    goods_receipts: Vec<GoodsReceipt>,

    goods_issues: Vec<GoodsIssue>,

    confirmations: Vec<Confirmation>,

    malfunction_reports: Vec<MalfunctionReport>,

    permits: Vec<Permit>,

    /// Estimated and actual cost by category; maintained by the cost ledger.
    costs: CostSummary,

    /// Present once actual costs have been settled to a cost center.
    settlement: Option<Settlement>,

    created_by: UserId,

    created_at: DateTime<Utc>,

    released_by: Option<UserId>,

    released_at: Option<DateTime<Utc>>,

    completed_by: Option<UserId>,

    completed_at: Option<DateTime<Utc>>,
}

// Construction
impl WorkOrder {
    /// Creates a general maintenance order with a freshly minted `PM-` id.
    pub fn general(
        description: impl Into<String>,
        equipment: impl Into<String>,
        functional_location: impl Into<String>,
        priority: Priority,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::create(
            OrderId::general(),
            OrderKind::General,
            description,
            equipment,
            functional_location,
            priority,
            None,
            created_by,
            now,
        )
    }

    /// Creates a breakdown order with a freshly minted `BD-` id.
    ///
    /// Breakdown orders must reference the malfunction notification they
    /// were raised from and are always created with Emergency priority.
    pub fn breakdown(
        description: impl Into<String>,
        equipment: impl Into<String>,
        functional_location: impl Into<String>,
        notification: impl Into<String>,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let notification = notification.into();
        if notification.trim().is_empty() {
            return Err(DomainError::NotificationRequired);
        }

        Self::create(
            OrderId::breakdown(),
            OrderKind::Breakdown,
            description,
            equipment,
            functional_location,
            Priority::Emergency,
            Some(notification),
            created_by,
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn create(
        id: OrderId,
        kind: OrderKind,
        description: impl Into<String>,
        equipment: impl Into<String>,
        functional_location: impl Into<String>,
        priority: Priority,
        notification: Option<String>,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }

        Ok(Self {
            id,
            version: Version::initial(),
            kind,
            status: OrderStatus::Created,
            priority,
            description,
            equipment: equipment.into(),
            functional_location: functional_location.into(),
            notification,
            operations: Vec::new(),
            components: Vec::new(),
            purchase_orders: Vec::new(),
            goods_receipts: Vec::new(),
            goods_issues: Vec::new(),
            confirmations: Vec::new(),
            malfunction_reports: Vec::new(),
            permits: Vec::new(),
            costs: CostSummary::default(),
            settlement: None,
            created_by,
            created_at: now,
            released_by: None,
            released_at: None,
            completed_by: None,
            completed_at: None,
        })
    }
}

// Query methods
impl WorkOrder {
    /// Returns the business identifier.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the current version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Sets the version; called by the repository on save.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Returns the order kind.
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    /// Returns true for breakdown orders.
    pub fn is_breakdown(&self) -> bool {
        self.kind.is_breakdown()
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns true once the order is technically complete.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn equipment(&self) -> &str {
        &self.equipment
    }

    pub fn functional_location(&self) -> &str {
        &self.functional_location
    }

    /// Returns the notification reference; None on general orders.
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Returns all operations.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Returns an operation by number.
    pub fn operation(&self, number: &DocumentNumber) -> Option<&Operation> {
        self.operations.iter().find(|op| &op.number == number)
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Returns all components.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Returns a component by number.
    pub fn component(&self, number: &DocumentNumber) -> Option<&Component> {
        self.components.iter().find(|c| &c.number == number)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns all purchase orders.
    pub fn purchase_orders(&self) -> impl Iterator<Item = &PurchaseOrder> {
        self.purchase_orders.iter()
    }

    /// Returns a purchase order by number.
    pub fn purchase_order(&self, number: &DocumentNumber) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|po| &po.number == number)
    }

    pub fn goods_receipts(&self) -> impl Iterator<Item = &GoodsReceipt> {
        self.goods_receipts.iter()
    }

    pub fn goods_issues(&self) -> impl Iterator<Item = &GoodsIssue> {
        self.goods_issues.iter()
    }

    pub fn confirmations(&self) -> impl Iterator<Item = &Confirmation> {
        self.confirmations.iter()
    }

    pub fn malfunction_reports(&self) -> impl Iterator<Item = &MalfunctionReport> {
        self.malfunction_reports.iter()
    }

    pub fn permits(&self) -> impl Iterator<Item = &Permit> {
        self.permits.iter()
    }

    /// Returns a permit by number.
    pub fn permit(&self, number: &DocumentNumber) -> Option<&Permit> {
        self.permits.iter().find(|p| &p.number == number)
    }

    /// Returns the cost summary.
    pub fn costs(&self) -> &CostSummary {
        &self.costs
    }

    /// Returns the settlement record, if settled.
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn released_by(&self) -> Option<&UserId> {
        self.released_by.as_ref()
    }

    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        self.released_at
    }

    pub fn completed_by(&self) -> Option<&UserId> {
        self.completed_by.as_ref()
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True when a material-bearing purchase order has been placed with a
    /// vendor; feeds the critical-component coverage check.
    pub fn material_on_order(&self) -> bool {
        self.purchase_orders
            .iter()
            .any(|po| po.kind.covers_material() && po.status.is_placed())
    }

    /// Builds the read-only projection the lifecycle predicates evaluate.
    ///
    /// Stock availability lives outside the aggregate, so the caller
    /// supplies the answer per component.
    pub fn snapshot(&self, is_available: impl Fn(&Component) -> bool) -> OrderSnapshot {
        OrderSnapshot {
            kind: self.kind,
            status: self.status,
            operations: self
                .operations
                .iter()
                .map(|op| OperationReadiness {
                    number: op.number.as_str().to_string(),
                    confirmed: op.is_confirmed(),
                    has_technician: op.has_technician(),
                })
                .collect(),
            components: self
                .components
                .iter()
                .map(|c| ComponentReadiness {
                    number: c.number.as_str().to_string(),
                    description: c.description.clone(),
                    critical: c.critical,
                    quantity_required: c.quantity_required,
                    quantity_issued: c.quantity_issued,
                    available: is_available(c),
                })
                .collect(),
            pending_permits: self
                .permits
                .iter()
                .filter(|p| !p.approved)
                .map(|p| p.name.clone())
                .collect(),
            confirmation_count: self.confirmations.len(),
            malfunction_report_count: self.malfunction_reports.len(),
            material_on_order: self.material_on_order(),
            estimated_total: self.costs.estimated_total(),
        }
    }
}

// Command methods: operations
impl WorkOrder {
    /// Adds a planned operation and returns its minted number.
    pub fn add_operation(
        &mut self,
        description: impl Into<String>,
        planned_hours: Hours,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_open()?;

        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }
        if !planned_hours.is_positive() {
            return Err(DomainError::InvalidHours {
                hours: planned_hours,
            });
        }

        let number = DocumentNumber::generate(Operation::NUMBER_PREFIX);
        self.operations
            .push(Operation::new(number.clone(), description, planned_hours));
        Ok(number)
    }

    /// Updates an operation's description and/or planned hours.
    pub fn update_operation(
        &mut self,
        number: &DocumentNumber,
        description: Option<String>,
        planned_hours: Option<Hours>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        if let Some(ref text) = description
            && text.trim().is_empty()
        {
            return Err(DomainError::EmptyDescription);
        }
        if let Some(hours) = planned_hours
            && !hours.is_positive()
        {
            return Err(DomainError::InvalidHours { hours });
        }

        let operation = self.operation_mut(number)?;
        if operation.is_confirmed() {
            return Err(DomainError::OperationConfirmed {
                number: number.as_str().to_string(),
            });
        }

        if let Some(text) = description {
            operation.description = text;
        }
        if let Some(hours) = planned_hours {
            operation.planned_hours = hours;
        }
        Ok(())
    }

    /// Removes an operation. Finally confirmed operations cannot be removed.
    pub fn remove_operation(&mut self, number: &DocumentNumber) -> Result<(), DomainError> {
        self.ensure_open()?;

        let operation = self.operation_mut(number)?;
        if operation.is_confirmed() {
            return Err(DomainError::OperationConfirmed {
                number: number.as_str().to_string(),
            });
        }

        self.operations.retain(|op| &op.number != number);
        Ok(())
    }

    /// Assigns a technician to an operation.
    ///
    /// Availability is checked by the orchestrator before this is called.
    pub fn assign_technician(
        &mut self,
        number: &DocumentNumber,
        technician: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        let operation = self.operation_mut(number)?;
        if operation.is_confirmed() {
            return Err(DomainError::OperationConfirmed {
                number: number.as_str().to_string(),
            });
        }

        operation.technician = Some(technician.into());
        Ok(())
    }
}

// Command methods: components
impl WorkOrder {
    /// Adds a component requirement and returns its minted number.
    pub fn add_component(
        &mut self,
        description: impl Into<String>,
        material_number: Option<String>,
        critical: bool,
        quantity_required: u32,
        estimated_cost: Money,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_open()?;

        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }
        if estimated_cost.is_negative() {
            return Err(DomainError::InvalidAmount {
                amount: estimated_cost,
            });
        }

        let number = DocumentNumber::generate(Component::NUMBER_PREFIX);
        self.components.push(Component::new(
            number.clone(),
            description,
            material_number,
            critical,
            quantity_required,
            estimated_cost,
        ));
        Ok(number)
    }

    /// Updates a component's planning fields.
    pub fn update_component(
        &mut self,
        number: &DocumentNumber,
        description: Option<String>,
        critical: Option<bool>,
        quantity_required: Option<u32>,
        estimated_cost: Option<Money>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        if let Some(ref text) = description
            && text.trim().is_empty()
        {
            return Err(DomainError::EmptyDescription);
        }
        if let Some(amount) = estimated_cost
            && amount.is_negative()
        {
            return Err(DomainError::InvalidAmount { amount });
        }

        let component = self.component_mut(number)?;
        if let Some(text) = description {
            component.description = text;
        }
        if let Some(flag) = critical {
            component.critical = flag;
        }
        if let Some(quantity) = quantity_required {
            component.quantity_required = quantity;
        }
        if let Some(amount) = estimated_cost {
            component.estimated_cost = amount;
        }
        Ok(())
    }

    /// Removes a component. Components with posted goods issues stay, since
    /// their issues value the actual material cost.
    pub fn remove_component(&mut self, number: &DocumentNumber) -> Result<(), DomainError> {
        self.ensure_open()?;

        self.component_mut(number)?;
        if self.goods_issues.iter().any(|gi| &gi.component == number) {
            return Err(DomainError::ComponentHasIssues {
                number: number.as_str().to_string(),
            });
        }

        self.components.retain(|c| &c.number != number);
        Ok(())
    }
}

// Command methods: procurement
impl WorkOrder {
    /// Creates a purchase order and returns its minted number.
    pub fn create_purchase_order(
        &mut self,
        kind: PurchaseOrderKind,
        vendor: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_open()?;

        let number = DocumentNumber::generate(PurchaseOrder::NUMBER_PREFIX);
        self.purchase_orders
            .push(PurchaseOrder::new(number.clone(), kind, vendor, description));
        Ok(number)
    }

    /// Sets a purchase order's status.
    pub fn update_purchase_order_status(
        &mut self,
        number: &DocumentNumber,
        status: PurchaseOrderStatus,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        let purchase_order = self.purchase_order_mut(number)?;
        purchase_order.status = status;
        Ok(())
    }

    /// Posts a goods receipt against a purchase order, flipping the
    /// purchase order to Delivered. Returns the minted receipt number.
    pub fn post_goods_receipt(
        &mut self,
        purchase_order: &DocumentNumber,
        posted_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_open()?;

        let po = self.purchase_order_mut(purchase_order)?;
        po.status = PurchaseOrderStatus::Delivered;

        let number = DocumentNumber::generate(GoodsReceipt::NUMBER_PREFIX);
        self.goods_receipts.push(GoodsReceipt {
            number: number.clone(),
            purchase_order: purchase_order.clone(),
            posted_by,
            posted_at: now,
        });
        Ok(number)
    }
}

// Command methods: execution postings
impl WorkOrder {
    /// Issues material from stock against a component. Requires a released
    /// order. Returns the minted goods issue number.
    pub fn post_goods_issue(
        &mut self,
        component: &DocumentNumber,
        quantity: u32,
        posted_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_released()?;

        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }

        let target = self.component_mut(component)?;
        target.quantity_issued += quantity;

        let number = DocumentNumber::generate(GoodsIssue::NUMBER_PREFIX);
        self.goods_issues.push(GoodsIssue {
            number: number.clone(),
            component: component.clone(),
            quantity,
            posted_by,
            posted_at: now,
        });
        Ok(number)
    }

    /// Posts a labor confirmation against an operation. Requires a released
    /// order. A final confirmation sets the operation Confirmed; a partial
    /// one sets it InProgress. External confirmations may reference a
    /// service purchase order, which is flipped to Delivered.
    #[allow(clippy::too_many_arguments)]
    pub fn post_confirmation(
        &mut self,
        operation: &DocumentNumber,
        kind: ConfirmationKind,
        actual_hours: Hours,
        final_confirmation: bool,
        service_purchase_order: Option<DocumentNumber>,
        posted_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_released()?;

        if !actual_hours.is_positive() {
            return Err(DomainError::InvalidHours {
                hours: actual_hours,
            });
        }

        if self
            .operation(operation)
            .ok_or_else(|| DomainError::OperationNotFound {
                number: operation.as_str().to_string(),
            })?
            .is_confirmed()
        {
            return Err(DomainError::OperationConfirmed {
                number: operation.as_str().to_string(),
            });
        }

        if let Some(ref po_number) = service_purchase_order {
            let po = self.purchase_order_mut(po_number)?;
            po.status = PurchaseOrderStatus::Delivered;
        }

        let target = self.operation_mut(operation)?;
        target.actual_hours += actual_hours;
        target.status = if final_confirmation {
            OperationStatus::Confirmed
        } else {
            OperationStatus::InProgress
        };

        let number = DocumentNumber::generate(Confirmation::NUMBER_PREFIX);
        self.confirmations.push(Confirmation {
            number: number.clone(),
            operation: operation.clone(),
            kind,
            actual_hours,
            final_confirmation,
            service_purchase_order,
            posted_by,
            posted_at: now,
        });
        Ok(number)
    }

    /// Files a malfunction report. Returns the minted report number.
    pub fn file_malfunction_report(
        &mut self,
        damage: impl Into<String>,
        cause: impl Into<String>,
        reported_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<DocumentNumber, DomainError> {
        self.ensure_open()?;

        let damage = damage.into();
        if damage.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }

        let number = DocumentNumber::generate(MalfunctionReport::NUMBER_PREFIX);
        self.malfunction_reports.push(MalfunctionReport {
            number: number.clone(),
            damage,
            cause: cause.into(),
            reported_by,
            reported_at: now,
        });
        Ok(number)
    }
}

// Command methods: permits
impl WorkOrder {
    /// Adds a required work permit. Returns the minted permit number.
    pub fn add_permit(&mut self, name: impl Into<String>) -> Result<DocumentNumber, DomainError> {
        self.ensure_open()?;

        let number = DocumentNumber::generate(Permit::NUMBER_PREFIX);
        self.permits.push(Permit::new(number.clone(), name));
        Ok(number)
    }

    /// Approves a permit.
    pub fn approve_permit(
        &mut self,
        number: &DocumentNumber,
        approved_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        let permit = self.permit_mut(number)?;
        permit.approved = true;
        permit.approved_by = Some(approved_by);
        permit.approved_at = Some(now);
        Ok(())
    }
}

// Command methods: lifecycle
impl WorkOrder {
    /// Applies a validated transition, stamping releaser or completer as
    /// appropriate. The caller must have run the transition through the
    /// lifecycle engine first; this only guards the source status.
    pub fn apply_transition(
        &mut self,
        transition: Transition,
        by: &UserId,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status != transition.source() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: transition.target(),
            });
        }

        self.status = transition.target();
        match transition {
            Transition::Release => {
                self.released_by = Some(by.clone());
                self.released_at = Some(now);
            }
            Transition::Complete => {
                self.completed_by = Some(by.clone());
                self.completed_at = Some(now);
            }
            Transition::Plan | Transition::Start | Transition::Confirm => {}
        }
        Ok(())
    }
}

// Internal helpers
impl WorkOrder {
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::OrderClosed);
        }
        Ok(())
    }

    fn ensure_released(&self) -> Result<(), DomainError> {
        self.ensure_open()?;
        if !self.status.has_been_released() {
            return Err(DomainError::NotReleased {
                status: self.status,
            });
        }
        Ok(())
    }

    fn operation_mut(&mut self, number: &DocumentNumber) -> Result<&mut Operation, DomainError> {
        self.operations
            .iter_mut()
            .find(|op| &op.number == number)
            .ok_or_else(|| DomainError::OperationNotFound {
                number: number.as_str().to_string(),
            })
    }

    fn component_mut(&mut self, number: &DocumentNumber) -> Result<&mut Component, DomainError> {
        self.components
            .iter_mut()
            .find(|c| &c.number == number)
            .ok_or_else(|| DomainError::ComponentNotFound {
                number: number.as_str().to_string(),
            })
    }

    fn purchase_order_mut(
        &mut self,
        number: &DocumentNumber,
    ) -> Result<&mut PurchaseOrder, DomainError> {
        self.purchase_orders
            .iter_mut()
            .find(|po| &po.number == number)
            .ok_or_else(|| DomainError::PurchaseOrderNotFound {
                number: number.as_str().to_string(),
            })
    }

    fn permit_mut(&mut self, number: &DocumentNumber) -> Result<&mut Permit, DomainError> {
        self.permits
            .iter_mut()
            .find(|p| &p.number == number)
            .ok_or_else(|| DomainError::PermitNotFound {
                number: number.as_str().to_string(),
            })
    }

    pub(crate) fn costs_mut(&mut self) -> &mut CostSummary {
        &mut self.costs
    }

    pub(crate) fn apply_component_actuals(&mut self, actuals: Vec<(DocumentNumber, Money)>) {
        for (number, cost) in actuals {
            if let Some(component) = self.components.iter_mut().find(|c| c.number == number) {
                component.actual_cost = cost;
            }
        }
    }

    pub(crate) fn set_settlement(&mut self, settlement: Settlement) {
        self.settlement = Some(settlement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> UserId {
        UserId::new("planner")
    }

    fn general_order() -> WorkOrder {
        WorkOrder::general(
            "overhaul pump",
            "PUMP-001",
            "PLANT-A/PUMPS",
            Priority::Medium,
            planner(),
            Utc::now(),
        )
        .unwrap()
    }

    fn released_order() -> WorkOrder {
        let mut order = general_order();
        order
            .apply_transition(Transition::Plan, &planner(), Utc::now())
            .unwrap();
        order
            .apply_transition(Transition::Release, &planner(), Utc::now())
            .unwrap();
        order
    }

    #[test]
    fn test_create_general_order() {
        let order = general_order();
        assert!(order.id().as_str().starts_with("PM-"));
        assert_eq!(order.kind(), OrderKind::General);
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.version(), Version::initial());
        assert!(order.notification().is_none());
        assert!(!order.is_breakdown());
    }

    #[test]
    fn test_create_breakdown_order() {
        let order = WorkOrder::breakdown(
            "motor seized",
            "MOTOR-7",
            "PLANT-B/DRIVES",
            "NOTIF-991",
            planner(),
            Utc::now(),
        )
        .unwrap();
        assert!(order.id().as_str().starts_with("BD-"));
        assert!(order.is_breakdown());
        assert_eq!(order.priority(), Priority::Emergency);
        assert_eq!(order.notification(), Some("NOTIF-991"));
    }

    #[test]
    fn test_breakdown_requires_notification() {
        let result = WorkOrder::breakdown(
            "motor seized",
            "MOTOR-7",
            "PLANT-B/DRIVES",
            "  ",
            planner(),
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::NotificationRequired)));
    }

    #[test]
    fn test_empty_description_rejected() {
        let result = WorkOrder::general(
            "",
            "PUMP-001",
            "PLANT-A/PUMPS",
            Priority::Low,
            planner(),
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::EmptyDescription)));
    }

    #[test]
    fn test_add_operation() {
        let mut order = general_order();
        let number = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        assert!(number.as_str().starts_with("OP-"));
        assert_eq!(order.operation_count(), 1);
        assert_eq!(order.operation(&number).unwrap().status, OperationStatus::Planned);
    }

    #[test]
    fn test_add_operation_rejects_zero_hours() {
        let mut order = general_order();
        let result = order.add_operation("replace bearing", Hours::zero());
        assert!(matches!(result, Err(DomainError::InvalidHours { .. })));
    }

    #[test]
    fn test_update_operation() {
        let mut order = general_order();
        let number = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();

        order
            .update_operation(&number, None, Some(Hours::from_hours(3)))
            .unwrap();
        assert_eq!(
            order.operation(&number).unwrap().planned_hours,
            Hours::from_hours(3)
        );
    }

    #[test]
    fn test_update_missing_operation_fails() {
        let mut order = general_order();
        let result = order.update_operation(&DocumentNumber::from("OP-missing"), None, None);
        assert!(matches!(result, Err(DomainError::OperationNotFound { .. })));
    }

    #[test]
    fn test_confirmed_operation_is_immutable() {
        let mut order = released_order();
        let op = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();

        let update = order.update_operation(&op, Some("new text".to_string()), None);
        assert!(matches!(update, Err(DomainError::OperationConfirmed { .. })));

        let remove = order.remove_operation(&op);
        assert!(matches!(remove, Err(DomainError::OperationConfirmed { .. })));
    }

    #[test]
    fn test_remove_operation() {
        let mut order = general_order();
        let number = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        order.remove_operation(&number).unwrap();
        assert_eq!(order.operation_count(), 0);
    }

    #[test]
    fn test_assign_technician() {
        let mut order = general_order();
        let number = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        order.assign_technician(&number, "tech-42").unwrap();
        assert_eq!(
            order.operation(&number).unwrap().technician.as_deref(),
            Some("tech-42")
        );
    }

    #[test]
    fn test_add_component() {
        let mut order = general_order();
        let number = order
            .add_component("bearing", Some("MAT-100".to_string()), true, 2, Money::from_dollars(150))
            .unwrap();
        assert!(number.as_str().starts_with("MAT-"));
        assert!(order.component(&number).unwrap().critical);
    }

    #[test]
    fn test_add_component_rejects_negative_estimate() {
        let mut order = general_order();
        let result =
            order.add_component("bearing", None, false, 1, Money::from_cents(-100));
        assert!(matches!(result, Err(DomainError::InvalidAmount { .. })));
    }

    #[test]
    fn test_remove_component_with_issues_fails() {
        let mut order = released_order();
        let component = order
            .add_component("bearing", None, false, 2, Money::from_dollars(100))
            .unwrap();
        order
            .post_goods_issue(&component, 1, planner(), Utc::now())
            .unwrap();

        let result = order.remove_component(&component);
        assert!(matches!(result, Err(DomainError::ComponentHasIssues { .. })));
        assert_eq!(order.component_count(), 1);
    }

    #[test]
    fn test_goods_issue_requires_released_order() {
        let mut order = general_order();
        let component = order
            .add_component("bearing", None, false, 2, Money::from_dollars(100))
            .unwrap();

        let result = order.post_goods_issue(&component, 1, planner(), Utc::now());
        assert!(matches!(result, Err(DomainError::NotReleased { .. })));
    }

    #[test]
    fn test_goods_issue_bumps_issued_quantity() {
        let mut order = released_order();
        let component = order
            .add_component("bearing", None, false, 2, Money::from_dollars(100))
            .unwrap();

        let gi = order
            .post_goods_issue(&component, 2, planner(), Utc::now())
            .unwrap();
        assert!(gi.as_str().starts_with("GI-"));
        assert!(order.component(&component).unwrap().fully_issued());
    }

    #[test]
    fn test_goods_issue_rejects_zero_quantity() {
        let mut order = released_order();
        let component = order
            .add_component("bearing", None, false, 2, Money::from_dollars(100))
            .unwrap();

        let result = order.post_goods_issue(&component, 0, planner(), Utc::now());
        assert!(matches!(result, Err(DomainError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_goods_receipt_flips_purchase_order_delivered() {
        let mut order = general_order();
        let po = order
            .create_purchase_order(PurchaseOrderKind::Material, "ACME", "bearings")
            .unwrap();

        let gr = order.post_goods_receipt(&po, planner(), Utc::now()).unwrap();
        assert!(gr.as_str().starts_with("GR-"));
        assert_eq!(
            order.purchase_order(&po).unwrap().status,
            PurchaseOrderStatus::Delivered
        );
    }

    #[test]
    fn test_partial_then_final_confirmation() {
        let mut order = released_order();
        let op = order
            .add_operation("replace bearing", Hours::from_hours(4))
            .unwrap();

        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(2),
                false,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(
            order.operation(&op).unwrap().status,
            OperationStatus::InProgress
        );

        order
            .post_confirmation(
                &op,
                ConfirmationKind::Internal,
                Hours::from_hours(3),
                true,
                None,
                planner(),
                Utc::now(),
            )
            .unwrap();
        let operation = order.operation(&op).unwrap();
        assert_eq!(operation.status, OperationStatus::Confirmed);
        assert_eq!(operation.actual_hours, Hours::from_hours(5));
    }

    #[test]
    fn test_external_confirmation_flips_service_po() {
        let mut order = released_order();
        let op = order
            .add_operation("vendor inspection", Hours::from_hours(1))
            .unwrap();
        let po = order
            .create_purchase_order(PurchaseOrderKind::Service, "ServiceCo", "inspection")
            .unwrap();

        order
            .post_confirmation(
                &op,
                ConfirmationKind::External,
                Hours::from_hours(1),
                true,
                Some(po.clone()),
                planner(),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(
            order.purchase_order(&po).unwrap().status,
            PurchaseOrderStatus::Delivered
        );
    }

    #[test]
    fn test_file_malfunction_report() {
        let mut order = general_order();
        let number = order
            .file_malfunction_report("shaft worn", "fatigue", planner(), Utc::now())
            .unwrap();
        assert!(number.as_str().starts_with("MLF-"));
        assert_eq!(order.malfunction_reports().count(), 1);
    }

    #[test]
    fn test_permit_lifecycle() {
        let mut order = general_order();
        let number = order.add_permit("hot work").unwrap();
        assert!(number.as_str().starts_with("PRM-"));
        assert!(!order.permit(&number).unwrap().approved);

        order
            .approve_permit(&number, UserId::new("safety"), Utc::now())
            .unwrap();
        assert!(order.permit(&number).unwrap().approved);
    }

    #[test]
    fn test_apply_transition_guards_source_status() {
        let mut order = general_order();
        let result = order.apply_transition(Transition::Release, &planner(), Utc::now());
        assert!(matches!(
            result,
            Err(DomainError::InvalidTransition {
                from: OrderStatus::Created,
                to: OrderStatus::Released,
            })
        ));
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn test_release_stamps_releaser() {
        let order = released_order();
        assert_eq!(order.status(), OrderStatus::Released);
        assert!(order.released_by().is_some());
        assert!(order.released_at().is_some());
        assert!(order.completed_at().is_none());
    }

    #[test]
    fn test_material_on_order_needs_placed_material_po() {
        let mut order = general_order();
        assert!(!order.material_on_order());

        let po = order
            .create_purchase_order(PurchaseOrderKind::Service, "ServiceCo", "inspection")
            .unwrap();
        order
            .update_purchase_order_status(&po, PurchaseOrderStatus::Ordered)
            .unwrap();
        assert!(!order.material_on_order());

        let material_po = order
            .create_purchase_order(PurchaseOrderKind::Material, "ACME", "bearings")
            .unwrap();
        assert!(!order.material_on_order());
        order
            .update_purchase_order_status(&material_po, PurchaseOrderStatus::Ordered)
            .unwrap();
        assert!(order.material_on_order());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut order = general_order();
        let op = order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        order.assign_technician(&op, "tech-42").unwrap();
        order
            .add_component("bearing", None, true, 2, Money::from_dollars(100))
            .unwrap();
        order.add_permit("hot work").unwrap();

        let snapshot = order.snapshot(|_| true);
        assert_eq!(snapshot.operations.len(), 1);
        assert!(snapshot.operations[0].has_technician);
        assert_eq!(snapshot.components.len(), 1);
        assert!(snapshot.components[0].available);
        assert_eq!(snapshot.pending_permits, vec!["hot work".to_string()]);
        assert_eq!(snapshot.confirmation_count, 0);
    }

    #[test]
    fn test_no_mutation_after_technical_completion() {
        let mut order = released_order();
        order
            .apply_transition(Transition::Start, &planner(), Utc::now())
            .unwrap();
        order
            .apply_transition(Transition::Confirm, &planner(), Utc::now())
            .unwrap();
        order
            .apply_transition(Transition::Complete, &planner(), Utc::now())
            .unwrap();
        assert!(order.is_terminal());
        assert!(order.completed_by().is_some());

        let result = order.add_operation("late work", Hours::from_hours(1));
        assert!(matches!(result, Err(DomainError::OrderClosed)));
    }

    #[test]
    fn test_work_order_round_trips_through_serde() {
        let mut order = general_order();
        order
            .add_operation("replace bearing", Hours::from_hours(2))
            .unwrap();
        order
            .add_component("bearing", Some("MAT-100".to_string()), true, 2, Money::from_dollars(150))
            .unwrap();

        let json = serde_json::to_string(&order).unwrap();
        let back: WorkOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
