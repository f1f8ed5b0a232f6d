//! Work order service composing the domain model, cost ledger, and
//! document flow into transactional commands.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use common::{DocumentNumber, OrderId, UserId, Version};
use docflow::{DocumentFlowEntry, DocumentType, FlowStore};
use domain::{
    Component, CostLedger, CostSummary, CostingRates, DomainError, LifecycleEngine, OrderKind,
    OrderSnapshot, Settlement, Transition, TransitionTable, WorkOrder,
};

use crate::collaborators::{CostCenterValidation, MaterialAvailability, TechnicianAvailability};
use crate::commands::{
    AddComponent, AddOperation, AddPermit, ApprovePermit, AssignTechnician, ConfirmOrder,
    CreateOrder, CreatePurchaseOrder, EstimateCosts, FileMalfunctionReport, PlanOrder,
    PostConfirmation, PostGoodsIssue, PostGoodsReceipt, ReleaseOrder, RemoveComponent,
    RemoveOperation, SettleCosts, StartOrder, TecoOrder, UpdateComponent, UpdateOperation,
    UpdatePurchaseOrderStatus,
};
use crate::error::{OrchestratorError, Result};
use crate::reports::{CostAnalysis, ReadinessCheck, ReadinessReport};
use crate::repository::OrderRepository;

/// Key under which a component's availability is looked up: the material
/// master number when catalogued, the free-text description otherwise.
fn availability_key(component: &Component) -> String {
    component
        .material_number
        .clone()
        .unwrap_or_else(|| component.description.clone())
}

/// Orchestrates work order commands.
///
/// Every command is one logical transaction: it loads the order, mutates
/// it (order children and cost summary together), and persists under the
/// version observed at load. A concurrent writer makes the save fail with
/// a version conflict instead of silently losing updates. Document flow
/// entries are appended only after the order has been persisted.
pub struct WorkOrderService<R, F, M, T, C>
where
    R: OrderRepository,
    F: FlowStore,
    M: MaterialAvailability,
    T: TechnicianAvailability,
    C: CostCenterValidation,
{
    repository: R,
    flow: F,
    materials: M,
    technicians: T,
    cost_centers: C,
    engine: LifecycleEngine,
    ledger: CostLedger,
}

impl<R, F, M, T, C> WorkOrderService<R, F, M, T, C>
where
    R: OrderRepository,
    F: FlowStore,
    M: MaterialAvailability,
    T: TechnicianAvailability,
    C: CostCenterValidation,
{
    /// Creates a service with the standard transition table and default
    /// costing rates.
    pub fn new(repository: R, flow: F, materials: M, technicians: T, cost_centers: C) -> Self {
        Self::with_config(
            repository,
            flow,
            materials,
            technicians,
            cost_centers,
            TransitionTable::standard(),
            CostingRates::default(),
        )
    }

    /// Creates a service with an explicit transition table and rates.
    pub fn with_config(
        repository: R,
        flow: F,
        materials: M,
        technicians: T,
        cost_centers: C,
        table: TransitionTable,
        rates: CostingRates,
    ) -> Self {
        Self {
            repository,
            flow,
            materials,
            technicians,
            cost_centers,
            engine: LifecycleEngine::new(table),
            ledger: CostLedger::new(rates),
        }
    }

    /// Creates a new work order and records it in the document flow.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<WorkOrder> {
        let now = Utc::now();
        let by = cmd.by.clone();

        let mut order = match cmd.kind {
            OrderKind::General => WorkOrder::general(
                cmd.description,
                cmd.equipment,
                cmd.functional_location,
                cmd.priority,
                cmd.by,
                now,
            )?,
            OrderKind::Breakdown => WorkOrder::breakdown(
                cmd.description,
                cmd.equipment,
                cmd.functional_location,
                cmd.notification.unwrap_or_default(),
                cmd.by,
                now,
            )?,
        };

        let version = self.persist(&order).await?;
        order.set_version(version);

        self.record_flow(
            order.id(),
            DocumentType::OrderCreated,
            DocumentNumber::from(order.id().as_str()),
            by,
            "CREATED",
            None,
        )
        .await?;

        metrics::counter!("work_orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), kind = ?order.kind(), "work order created");
        Ok(order)
    }

    /// Adds an operation and returns its minted number.
    #[tracing::instrument(skip(self))]
    pub async fn add_operation(&self, cmd: AddOperation) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number = order.add_operation(cmd.description, cmd.planned_hours)?;
        self.persist(&order).await?;
        Ok(number)
    }

    /// Updates an unconfirmed operation.
    #[tracing::instrument(skip(self))]
    pub async fn update_operation(&self, cmd: UpdateOperation) -> Result<()> {
        let mut order = self.load_order(&cmd.order_id).await?;
        order.update_operation(&cmd.operation, cmd.description, cmd.planned_hours)?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Removes an unconfirmed operation.
    #[tracing::instrument(skip(self))]
    pub async fn remove_operation(&self, cmd: RemoveOperation) -> Result<()> {
        let mut order = self.load_order(&cmd.order_id).await?;
        order.remove_operation(&cmd.operation)?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Assigns a technician to an operation after checking availability.
    #[tracing::instrument(skip(self))]
    pub async fn assign_technician(&self, cmd: AssignTechnician) -> Result<()> {
        let check = self.technicians.check(&cmd.technician).await;
        if !check.available {
            return Err(OrchestratorError::TechnicianUnavailable {
                reason: check
                    .reason
                    .unwrap_or_else(|| format!("{} is not available", cmd.technician)),
            });
        }

        let mut order = self.load_order(&cmd.order_id).await?;
        order.assign_technician(&cmd.operation, cmd.technician)?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Adds a component requirement and returns its minted number.
    #[tracing::instrument(skip(self))]
    pub async fn add_component(&self, cmd: AddComponent) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number = order.add_component(
            cmd.description,
            cmd.material_number,
            cmd.critical,
            cmd.quantity_required,
            cmd.estimated_cost,
        )?;
        self.persist(&order).await?;
        Ok(number)
    }

    /// Updates a component's planning fields.
    #[tracing::instrument(skip(self))]
    pub async fn update_component(&self, cmd: UpdateComponent) -> Result<()> {
        let mut order = self.load_order(&cmd.order_id).await?;
        order.update_component(
            &cmd.component,
            cmd.description,
            cmd.critical,
            cmd.quantity_required,
            cmd.estimated_cost,
        )?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Removes a component with no posted goods issues.
    #[tracing::instrument(skip(self))]
    pub async fn remove_component(&self, cmd: RemoveComponent) -> Result<()> {
        let mut order = self.load_order(&cmd.order_id).await?;
        order.remove_component(&cmd.component)?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Adds a required work permit and returns its minted number.
    #[tracing::instrument(skip(self))]
    pub async fn add_permit(&self, cmd: AddPermit) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number = order.add_permit(cmd.name)?;
        self.persist(&order).await?;
        Ok(number)
    }

    /// Approves a permit.
    #[tracing::instrument(skip(self))]
    pub async fn approve_permit(&self, cmd: ApprovePermit) -> Result<()> {
        let mut order = self.load_order(&cmd.order_id).await?;
        order.approve_permit(&cmd.permit, cmd.by, Utc::now())?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Creates a purchase order and records it in the document flow.
    #[tracing::instrument(skip(self))]
    pub async fn create_purchase_order(&self, cmd: CreatePurchaseOrder) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number = order.create_purchase_order(cmd.kind, cmd.vendor, cmd.description)?;
        self.persist(&order).await?;

        self.record_flow(
            &cmd.order_id,
            DocumentType::PurchaseOrder,
            number.clone(),
            cmd.by,
            "CREATED",
            None,
        )
        .await?;
        Ok(number)
    }

    /// Moves a purchase order to a new status.
    #[tracing::instrument(skip(self))]
    pub async fn update_purchase_order_status(
        &self,
        cmd: UpdatePurchaseOrderStatus,
    ) -> Result<()> {
        let mut order = self.load_order(&cmd.order_id).await?;
        order.update_purchase_order_status(&cmd.purchase_order, cmd.status)?;
        self.persist(&order).await?;
        Ok(())
    }

    /// Posts a goods receipt for a purchase order delivery.
    #[tracing::instrument(skip(self))]
    pub async fn post_goods_receipt(&self, cmd: PostGoodsReceipt) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number = order.post_goods_receipt(&cmd.purchase_order, cmd.by.clone(), Utc::now())?;
        self.persist(&order).await?;

        self.record_flow(
            &cmd.order_id,
            DocumentType::GoodsReceipt,
            number.clone(),
            cmd.by,
            "POSTED",
            Some(cmd.purchase_order),
        )
        .await?;
        Ok(number)
    }

    /// Issues material against a component and recomputes actual costs.
    #[tracing::instrument(skip(self))]
    pub async fn post_goods_issue(&self, cmd: PostGoodsIssue) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number =
            order.post_goods_issue(&cmd.component, cmd.quantity, cmd.by.clone(), Utc::now())?;
        self.ledger.accumulate_actuals(&mut order);
        self.persist(&order).await?;

        self.record_flow(
            &cmd.order_id,
            DocumentType::GoodsIssue,
            number.clone(),
            cmd.by,
            "POSTED",
            Some(cmd.component),
        )
        .await?;
        Ok(number)
    }

    /// Posts a labor confirmation and recomputes actual costs.
    #[tracing::instrument(skip(self))]
    pub async fn post_confirmation(&self, cmd: PostConfirmation) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number = order.post_confirmation(
            &cmd.operation,
            cmd.kind,
            cmd.actual_hours,
            cmd.final_confirmation,
            cmd.service_purchase_order,
            cmd.by.clone(),
            Utc::now(),
        )?;
        self.ledger.accumulate_actuals(&mut order);
        self.persist(&order).await?;

        let status = if cmd.final_confirmation {
            "FINAL"
        } else {
            "PARTIAL"
        };
        self.record_flow(
            &cmd.order_id,
            DocumentType::Confirmation,
            number.clone(),
            cmd.by,
            status,
            Some(cmd.operation),
        )
        .await?;
        Ok(number)
    }

    /// Files a malfunction report and records it in the document flow.
    #[tracing::instrument(skip(self))]
    pub async fn file_malfunction_report(
        &self,
        cmd: FileMalfunctionReport,
    ) -> Result<DocumentNumber> {
        let mut order = self.load_order(&cmd.order_id).await?;
        let number =
            order.file_malfunction_report(cmd.damage, cmd.cause, cmd.by.clone(), Utc::now())?;
        self.persist(&order).await?;

        self.record_flow(
            &cmd.order_id,
            DocumentType::MalfunctionReport,
            number.clone(),
            cmd.by,
            "FILED",
            None,
        )
        .await?;
        Ok(number)
    }

    /// Recomputes the cost estimate from the order's operations and
    /// components, replacing any previous estimate.
    #[tracing::instrument(skip(self))]
    pub async fn estimate_costs(&self, cmd: EstimateCosts) -> Result<CostSummary> {
        let mut order = self.load_order(&cmd.order_id).await?;
        self.ledger.estimate(&mut order)?;
        self.persist(&order).await?;
        Ok(*order.costs())
    }

    /// Moves an order from CREATED to PLANNED.
    #[tracing::instrument(skip(self))]
    pub async fn plan_order(&self, cmd: PlanOrder) -> Result<WorkOrder> {
        let now = Utc::now();
        let mut order = self.load_order(&cmd.order_id).await?;
        let snapshot = self.snapshot(&order).await;

        self.advance(&mut order, Transition::Plan, &snapshot, &cmd.by, now)?;
        let version = self.persist(&order).await?;
        order.set_version(version);

        self.record_flow(
            &cmd.order_id,
            DocumentType::OrderPlanned,
            DocumentNumber::from(order.id().as_str()),
            cmd.by,
            "PLANNED",
            None,
        )
        .await?;

        tracing::info!(order_id = %cmd.order_id, "work order planned");
        Ok(order)
    }

    /// Moves an order from PLANNED to RELEASED.
    ///
    /// Without override, any blocking reason fails the command with the
    /// complete reason list. With override, permit and material blockers
    /// are bypassed and recorded in the document flow with the override
    /// reason verbatim; the technician blocker still denies the release.
    #[tracing::instrument(skip(self))]
    pub async fn release_order(&self, cmd: ReleaseOrder) -> Result<WorkOrder> {
        let now = Utc::now();
        let mut order = self.load_order(&cmd.order_id).await?;
        let snapshot = self.snapshot(&order).await;

        if order.status() != Transition::Release.source() {
            return Err(DomainError::InvalidTransition {
                from: order.status(),
                to: Transition::Release.target(),
            }
            .into());
        }

        let bypassed = if cmd.override_blocks {
            let check = self
                .engine
                .check_with_override(Transition::Release, &snapshot);
            if !check.allowed {
                return Err(DomainError::PrerequisiteNotMet {
                    reasons: check
                        .hard_blockers
                        .iter()
                        .map(|b| b.message.clone())
                        .collect(),
                }
                .into());
            }
            check.bypassed
        } else {
            let check = self.engine.check(Transition::Release, &snapshot);
            if !check.allowed {
                return Err(DomainError::PrerequisiteNotMet {
                    reasons: check.reasons(),
                }
                .into());
            }
            Vec::new()
        };

        order.apply_transition(Transition::Release, &cmd.by, now)?;
        let version = self.persist(&order).await?;
        order.set_version(version);

        if !bypassed.is_empty() {
            let reason = cmd.override_reason.clone().unwrap_or_default();
            self.record_flow(
                &cmd.order_id,
                DocumentType::Override,
                DocumentNumber::generate("OVR"),
                cmd.by.clone(),
                reason,
                None,
            )
            .await?;

            metrics::counter!("work_order_release_overrides_total").increment(1);
            tracing::info!(
                order_id = %cmd.order_id,
                bypassed = bypassed.len(),
                "release blockers overridden"
            );
        }

        self.record_flow(
            &cmd.order_id,
            DocumentType::OrderReleased,
            DocumentNumber::from(order.id().as_str()),
            cmd.by,
            "RELEASED",
            None,
        )
        .await?;

        metrics::counter!("work_order_releases_total").increment(1);
        tracing::info!(order_id = %cmd.order_id, "work order released");
        Ok(order)
    }

    /// Moves an order from RELEASED to IN_PROGRESS.
    #[tracing::instrument(skip(self))]
    pub async fn start_order(&self, cmd: StartOrder) -> Result<WorkOrder> {
        let now = Utc::now();
        let mut order = self.load_order(&cmd.order_id).await?;
        let snapshot = self.snapshot(&order).await;

        self.advance(&mut order, Transition::Start, &snapshot, &cmd.by, now)?;
        let version = self.persist(&order).await?;
        order.set_version(version);
        Ok(order)
    }

    /// Moves an order from IN_PROGRESS to CONFIRMED.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_order(&self, cmd: ConfirmOrder) -> Result<WorkOrder> {
        let now = Utc::now();
        let mut order = self.load_order(&cmd.order_id).await?;
        let snapshot = self.snapshot(&order).await;

        self.advance(&mut order, Transition::Confirm, &snapshot, &cmd.by, now)?;
        let version = self.persist(&order).await?;
        order.set_version(version);
        Ok(order)
    }

    /// Technically completes an order via the lifecycle engine.
    #[tracing::instrument(skip(self))]
    pub async fn teco_order(&self, cmd: TecoOrder) -> Result<WorkOrder> {
        let order = self.load_order(&cmd.order_id).await?;
        self.complete(order, cmd.by, false).await
    }

    /// Technically completes a breakdown order.
    ///
    /// Hard-fails when no malfunction report is on file, before the
    /// lifecycle engine runs, and marks the order for post-completion
    /// review in the document flow.
    #[tracing::instrument(skip(self))]
    pub async fn teco_breakdown_order(&self, cmd: TecoOrder) -> Result<WorkOrder> {
        let order = self.load_order(&cmd.order_id).await?;
        if order.malfunction_reports().next().is_none() {
            return Err(DomainError::MalfunctionReportRequired.into());
        }
        self.complete(order, cmd.by, true).await
    }

    /// Settles a completed order's actual costs to a cost center.
    #[tracing::instrument(skip(self))]
    pub async fn settle_costs(&self, cmd: SettleCosts) -> Result<Settlement> {
        let check = self.cost_centers.check(&cmd.cost_center).await;
        if !check.available {
            return Err(OrchestratorError::InvalidCostCenter {
                reason: check
                    .reason
                    .unwrap_or_else(|| format!("{} is not valid", cmd.cost_center)),
            });
        }

        let mut order = self.load_order(&cmd.order_id).await?;
        let settlement = self
            .ledger
            .settle(&mut order, cmd.cost_center, cmd.by.clone(), Utc::now())?;
        self.persist(&order).await?;

        self.record_flow(
            &cmd.order_id,
            DocumentType::Settlement,
            settlement.document.clone(),
            cmd.by,
            "SETTLED",
            None,
        )
        .await?;

        metrics::counter!("work_order_settlements_total").increment(1);
        tracing::info!(order_id = %cmd.order_id, amount = %settlement.amount, "order settled");
        Ok(settlement)
    }

    /// Fetches an order with all its children.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Option<WorkOrder>> {
        Ok(self.repository.load(order_id).await?)
    }

    /// Builds the readiness checklist for the order's next transition.
    #[tracing::instrument(skip(self))]
    pub async fn readiness(&self, order_id: &OrderId) -> Result<ReadinessReport> {
        let order = self.load_order(order_id).await?;
        let snapshot = self.snapshot(&order).await;

        let next = Transition::ALL
            .into_iter()
            .find(|t| t.source() == order.status());

        let checks: Vec<ReadinessCheck> = match next {
            Some(transition) => self
                .engine
                .prerequisites(transition)
                .iter()
                .map(|predicate| {
                    let blocker = predicate.evaluate(&snapshot);
                    ReadinessCheck {
                        requirement: predicate.describe().to_string(),
                        satisfied: blocker.is_none(),
                        reason: blocker.map(|b| b.message),
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(ReadinessReport {
            order_id: order_id.clone(),
            status: order.status(),
            next_status: next.map(|t| t.target()),
            ready: next.is_some() && checks.iter().all(|c| c.satisfied),
            checks,
        })
    }

    /// Builds the cost analysis for an order.
    #[tracing::instrument(skip(self))]
    pub async fn cost_analysis(&self, order_id: &OrderId) -> Result<CostAnalysis> {
        let order = self.load_order(order_id).await?;
        Ok(CostAnalysis {
            order_id: order_id.clone(),
            status: order.status(),
            costs: *order.costs(),
            variance: self.ledger.variance(&order),
            settlement: order.settlement().cloned(),
        })
    }

    /// Returns an order's document flow, optionally filtered by type.
    ///
    /// An order with no entries yields an empty sequence rather than a
    /// not-found error.
    #[tracing::instrument(skip(self))]
    pub async fn document_flow(
        &self,
        order_id: &OrderId,
        document_type: Option<DocumentType>,
    ) -> Result<Vec<DocumentFlowEntry>> {
        let entries = match document_type {
            Some(doc_type) => self.flow.flow_by_type(order_id, doc_type).await?,
            None => self.flow.flow(order_id).await?,
        };
        Ok(entries)
    }

    async fn load_order(&self, order_id: &OrderId) -> Result<WorkOrder> {
        self.repository
            .load(order_id)
            .await?
            .ok_or_else(|| OrchestratorError::OrderNotFound(order_id.clone()))
    }

    async fn persist(&self, order: &WorkOrder) -> Result<Version> {
        let version = self.repository.save(order.clone(), order.version()).await?;
        Ok(version)
    }

    /// Builds the order's readiness snapshot, pre-fetching material
    /// availability so predicate evaluation itself does no I/O.
    async fn snapshot(&self, order: &WorkOrder) -> OrderSnapshot {
        let mut availability = HashMap::new();
        for component in order.components() {
            let key = availability_key(component);
            let check = self
                .materials
                .check(&key, component.quantity_required)
                .await;
            availability.insert(key, check.available);
        }

        order.snapshot(|component| {
            availability
                .get(&availability_key(component))
                .copied()
                .unwrap_or(false)
        })
    }

    /// Runs the structural guard and the prerequisite check, then applies
    /// the transition to the order.
    fn advance(
        &self,
        order: &mut WorkOrder,
        transition: Transition,
        snapshot: &OrderSnapshot,
        by: &UserId,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if order.status() != transition.source() {
            return Err(DomainError::InvalidTransition {
                from: order.status(),
                to: transition.target(),
            }
            .into());
        }

        let check = self.engine.check(transition, snapshot);
        if !check.allowed {
            return Err(DomainError::PrerequisiteNotMet {
                reasons: check.reasons(),
            }
            .into());
        }

        order.apply_transition(transition, by, now)?;
        Ok(())
    }

    /// Shared completion path. The post-review marker is appended before
    /// the completion entry so the TECO entry stays last in the flow.
    async fn complete(
        &self,
        mut order: WorkOrder,
        by: UserId,
        post_review: bool,
    ) -> Result<WorkOrder> {
        let now = Utc::now();
        let snapshot = self.snapshot(&order).await;

        self.advance(&mut order, Transition::Complete, &snapshot, &by, now)?;
        let version = self.persist(&order).await?;
        order.set_version(version);

        if post_review {
            self.record_flow(
                order.id(),
                DocumentType::PostReview,
                DocumentNumber::generate("REV"),
                by.clone(),
                "REQUIRED",
                None,
            )
            .await?;
        }

        self.record_flow(
            order.id(),
            DocumentType::TechnicalCompletion,
            DocumentNumber::from(order.id().as_str()),
            by,
            "TECO",
            None,
        )
        .await?;

        metrics::counter!("work_order_tecos_total").increment(1);
        tracing::info!(order_id = %order.id(), "work order technically completed");
        Ok(order)
    }

    async fn record_flow(
        &self,
        order_id: &OrderId,
        document_type: DocumentType,
        document_number: DocumentNumber,
        user: UserId,
        status: impl Into<String>,
        related_document: Option<DocumentNumber>,
    ) -> Result<()> {
        let mut builder = DocumentFlowEntry::builder()
            .order_id(order_id.clone())
            .document_type(document_type)
            .document_number(document_number)
            .user(user)
            .status(status);
        if let Some(related) = related_document {
            builder = builder.related_document(related);
        }

        self.flow.append(builder.build()).await?;
        Ok(())
    }
}
