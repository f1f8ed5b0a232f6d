//! Prerequisite predicate library.
//!
//! Each predicate is a pure function over a read-only [`OrderSnapshot`].
//! No predicate performs I/O; capability answers (material availability)
//! are fetched by the orchestrator and injected into the snapshot before
//! evaluation.

use serde::{Deserialize, Serialize};

use crate::order::{OrderKind, OrderSnapshot};

/// Category of a blocking reason.
///
/// The category decides override behavior: only Permits and Materials
/// blocks may be bypassed by a caller-requested override. Staffing blocks
/// (technician assignment) can never be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockCategory {
    /// The `(from, to)` pair itself is not in the adjacency table.
    Lifecycle,
    /// Planning data is incomplete (operations, estimate).
    Planning,
    /// Work permits are pending approval.
    Permits,
    /// Material coverage is missing.
    Materials,
    /// No technician assigned.
    Staffing,
    /// Execution documents are incomplete (confirmations, issues).
    Execution,
    /// Post-completion reporting is missing.
    Reporting,
}

impl BlockCategory {
    /// Returns true if blocks of this category may be bypassed by an
    /// explicit override request.
    pub fn is_overridable(&self) -> bool {
        matches!(self, BlockCategory::Permits | BlockCategory::Materials)
    }

    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Lifecycle => "LIFECYCLE",
            BlockCategory::Planning => "PLANNING",
            BlockCategory::Permits => "PERMITS",
            BlockCategory::Materials => "MATERIALS",
            BlockCategory::Staffing => "STAFFING",
            BlockCategory::Execution => "EXECUTION",
            BlockCategory::Reporting => "REPORTING",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single blocking reason returned by a failed predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    pub category: BlockCategory,
    pub message: String,
}

impl Blocker {
    /// Creates a blocker with the given category and message.
    pub fn new(category: BlockCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Blocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The closed set of transition prerequisites.
///
/// Evaluation returns None when the prerequisite is satisfied, or the
/// blocking reason when it is not. Breakdown orders structurally skip the
/// permit and material predicates; this waiver lives inside the predicate
/// itself and is independent of the override mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// At least one operation exists.
    HasOperations,
    /// The estimated total cost is positive.
    PositiveCostEstimate,
    /// Every permit on the order is approved. Waived for breakdown orders.
    PermitsApproved,
    /// Every critical component is available or on order.
    /// Waived for breakdown orders.
    CriticalComponentsCovered,
    /// At least one operation has an assigned technician. Never waived.
    TechnicianAssigned,
    /// At least one confirmation has been posted.
    HasConfirmation,
    /// Every operation is finally confirmed.
    AllOperationsConfirmed,
    /// Every component's issued quantity covers its required quantity.
    ComponentsFullyIssued,
    /// At least one malfunction report is on file.
    /// Passes structurally for general orders.
    MalfunctionReportOnFile,
}

impl Predicate {
    /// Evaluates the predicate against a snapshot.
    pub fn evaluate(&self, snapshot: &OrderSnapshot) -> Option<Blocker> {
        match self {
            Predicate::HasOperations => {
                if snapshot.operations.is_empty() {
                    Some(Blocker::new(BlockCategory::Planning, "order has no operations"))
                } else {
                    None
                }
            }
            Predicate::PositiveCostEstimate => {
                if snapshot.estimated_total.is_positive() {
                    None
                } else {
                    Some(Blocker::new(
                        BlockCategory::Planning,
                        "estimated total cost is zero",
                    ))
                }
            }
            Predicate::PermitsApproved => {
                if snapshot.kind == OrderKind::Breakdown {
                    return None;
                }
                let pending = &snapshot.pending_permits;
                if pending.is_empty() {
                    None
                } else {
                    Some(Blocker::new(
                        BlockCategory::Permits,
                        format!(
                            "{} permit(s) pending approval: {}",
                            pending.len(),
                            pending.join(", ")
                        ),
                    ))
                }
            }
            Predicate::CriticalComponentsCovered => {
                if snapshot.kind == OrderKind::Breakdown {
                    return None;
                }
                let uncovered: Vec<&str> = snapshot
                    .components
                    .iter()
                    .filter(|c| c.critical && !c.available && !snapshot.material_on_order)
                    .map(|c| c.description.as_str())
                    .collect();
                if uncovered.is_empty() {
                    None
                } else {
                    Some(Blocker::new(
                        BlockCategory::Materials,
                        format!(
                            "{} critical component(s) neither available nor on order: {}",
                            uncovered.len(),
                            uncovered.join(", ")
                        ),
                    ))
                }
            }
            Predicate::TechnicianAssigned => {
                if snapshot.operations.iter().any(|op| op.has_technician) {
                    None
                } else {
                    Some(Blocker::new(
                        BlockCategory::Staffing,
                        "no operation has an assigned technician",
                    ))
                }
            }
            Predicate::HasConfirmation => {
                if snapshot.confirmation_count == 0 {
                    Some(Blocker::new(
                        BlockCategory::Execution,
                        "no confirmation has been posted",
                    ))
                } else {
                    None
                }
            }
            Predicate::AllOperationsConfirmed => {
                let unconfirmed = snapshot.operations.iter().filter(|op| !op.confirmed).count();
                if unconfirmed == 0 {
                    None
                } else {
                    Some(Blocker::new(
                        BlockCategory::Execution,
                        format!("{unconfirmed} operation(s) not finally confirmed"),
                    ))
                }
            }
            Predicate::ComponentsFullyIssued => {
                let open = snapshot
                    .components
                    .iter()
                    .filter(|c| !c.fully_issued())
                    .count();
                if open == 0 {
                    None
                } else {
                    Some(Blocker::new(
                        BlockCategory::Execution,
                        format!("{open} component(s) not fully issued"),
                    ))
                }
            }
            Predicate::MalfunctionReportOnFile => {
                if snapshot.kind == OrderKind::General {
                    return None;
                }
                if snapshot.malfunction_report_count == 0 {
                    Some(Blocker::new(
                        BlockCategory::Reporting,
                        "no malfunction report on file",
                    ))
                } else {
                    None
                }
            }
        }
    }

    /// Human-readable description of what the predicate requires,
    /// used in readiness checklists.
    pub fn describe(&self) -> &'static str {
        match self {
            Predicate::HasOperations => "at least one operation exists",
            Predicate::PositiveCostEstimate => "estimated total cost is positive",
            Predicate::PermitsApproved => "all permits approved (waived for breakdown orders)",
            Predicate::CriticalComponentsCovered => {
                "critical components available or on order (waived for breakdown orders)"
            }
            Predicate::TechnicianAssigned => "a technician is assigned",
            Predicate::HasConfirmation => "at least one confirmation posted",
            Predicate::AllOperationsConfirmed => "all operations finally confirmed",
            Predicate::ComponentsFullyIssued => "all components fully issued",
            Predicate::MalfunctionReportOnFile => {
                "malfunction report on file (breakdown orders only)"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{ComponentReadiness, Money, OperationReadiness};

    fn empty_snapshot(kind: OrderKind) -> OrderSnapshot {
        OrderSnapshot {
            kind,
            status: Default::default(),
            operations: Vec::new(),
            components: Vec::new(),
            pending_permits: Vec::new(),
            confirmation_count: 0,
            malfunction_report_count: 0,
            material_on_order: false,
            estimated_total: Money::zero(),
        }
    }

    fn operation(confirmed: bool, has_technician: bool) -> OperationReadiness {
        OperationReadiness {
            number: "OP-1-ABCDEF".to_string(),
            confirmed,
            has_technician,
        }
    }

    fn component(critical: bool, required: u32, issued: u32, available: bool) -> ComponentReadiness {
        ComponentReadiness {
            number: "MAT-1-ABCDEF".to_string(),
            description: "bearing".to_string(),
            critical,
            quantity_required: required,
            quantity_issued: issued,
            available,
        }
    }

    #[test]
    fn test_has_operations_blocks_empty_order() {
        let snapshot = empty_snapshot(OrderKind::General);
        let blocker = Predicate::HasOperations.evaluate(&snapshot).unwrap();
        assert_eq!(blocker.category, BlockCategory::Planning);
        assert_eq!(blocker.message, "order has no operations");
    }

    #[test]
    fn test_positive_cost_estimate() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        assert!(Predicate::PositiveCostEstimate.evaluate(&snapshot).is_some());

        snapshot.estimated_total = Money::from_cents(100);
        assert!(Predicate::PositiveCostEstimate.evaluate(&snapshot).is_none());
    }

    #[test]
    fn test_permits_approved_lists_pending_names() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.pending_permits = vec!["hot work".to_string(), "confined space".to_string()];

        let blocker = Predicate::PermitsApproved.evaluate(&snapshot).unwrap();
        assert_eq!(blocker.category, BlockCategory::Permits);
        assert_eq!(
            blocker.message,
            "2 permit(s) pending approval: hot work, confined space"
        );
    }

    #[test]
    fn test_permits_waived_for_breakdown() {
        let mut snapshot = empty_snapshot(OrderKind::Breakdown);
        snapshot.pending_permits = vec!["hot work".to_string()];
        assert!(Predicate::PermitsApproved.evaluate(&snapshot).is_none());
    }

    #[test]
    fn test_critical_components_blocked_when_unavailable() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.components = vec![component(true, 2, 0, false)];

        let blocker = Predicate::CriticalComponentsCovered
            .evaluate(&snapshot)
            .unwrap();
        assert_eq!(blocker.category, BlockCategory::Materials);
        assert!(blocker.message.contains("bearing"));
    }

    #[test]
    fn test_critical_components_covered_by_availability_or_po() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.components = vec![component(true, 2, 0, true)];
        assert!(
            Predicate::CriticalComponentsCovered
                .evaluate(&snapshot)
                .is_none()
        );

        snapshot.components = vec![component(true, 2, 0, false)];
        snapshot.material_on_order = true;
        assert!(
            Predicate::CriticalComponentsCovered
                .evaluate(&snapshot)
                .is_none()
        );
    }

    #[test]
    fn test_non_critical_components_never_block_coverage() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.components = vec![component(false, 5, 0, false)];
        assert!(
            Predicate::CriticalComponentsCovered
                .evaluate(&snapshot)
                .is_none()
        );
    }

    #[test]
    fn test_materials_waived_for_breakdown() {
        let mut snapshot = empty_snapshot(OrderKind::Breakdown);
        snapshot.components = vec![component(true, 2, 0, false)];
        assert!(
            Predicate::CriticalComponentsCovered
                .evaluate(&snapshot)
                .is_none()
        );
    }

    #[test]
    fn test_technician_assigned_needs_one_staffed_operation() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.operations = vec![operation(false, false), operation(false, false)];

        let blocker = Predicate::TechnicianAssigned.evaluate(&snapshot).unwrap();
        assert_eq!(blocker.category, BlockCategory::Staffing);

        snapshot.operations.push(operation(false, true));
        assert!(Predicate::TechnicianAssigned.evaluate(&snapshot).is_none());
    }

    #[test]
    fn test_technician_rule_not_waived_for_breakdown() {
        let mut snapshot = empty_snapshot(OrderKind::Breakdown);
        snapshot.operations = vec![operation(false, false)];
        assert!(Predicate::TechnicianAssigned.evaluate(&snapshot).is_some());
    }

    #[test]
    fn test_unconfirmed_operation_count_in_message() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.operations = vec![
            operation(true, true),
            operation(false, true),
            operation(false, false),
            operation(false, false),
        ];

        let blocker = Predicate::AllOperationsConfirmed
            .evaluate(&snapshot)
            .unwrap();
        assert_eq!(blocker.message, "3 operation(s) not finally confirmed");
    }

    #[test]
    fn test_components_fully_issued() {
        let mut snapshot = empty_snapshot(OrderKind::General);
        snapshot.components = vec![component(false, 3, 3, true), component(false, 2, 1, true)];

        let blocker = Predicate::ComponentsFullyIssued.evaluate(&snapshot).unwrap();
        assert_eq!(blocker.message, "1 component(s) not fully issued");

        snapshot.components[1].quantity_issued = 2;
        assert!(Predicate::ComponentsFullyIssued.evaluate(&snapshot).is_none());
    }

    #[test]
    fn test_malfunction_report_required_for_breakdown_only() {
        let general = empty_snapshot(OrderKind::General);
        assert!(Predicate::MalfunctionReportOnFile.evaluate(&general).is_none());

        let mut breakdown = empty_snapshot(OrderKind::Breakdown);
        let blocker = Predicate::MalfunctionReportOnFile
            .evaluate(&breakdown)
            .unwrap();
        assert_eq!(blocker.category, BlockCategory::Reporting);

        breakdown.malfunction_report_count = 1;
        assert!(
            Predicate::MalfunctionReportOnFile
                .evaluate(&breakdown)
                .is_none()
        );
    }

    #[test]
    fn test_only_permits_and_materials_are_overridable() {
        assert!(BlockCategory::Permits.is_overridable());
        assert!(BlockCategory::Materials.is_overridable());
        assert!(!BlockCategory::Lifecycle.is_overridable());
        assert!(!BlockCategory::Planning.is_overridable());
        assert!(!BlockCategory::Staffing.is_overridable());
        assert!(!BlockCategory::Execution.is_overridable());
        assert!(!BlockCategory::Reporting.is_overridable());
    }
}
