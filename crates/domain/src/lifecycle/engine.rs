//! Lifecycle transition engine.

use serde::{Deserialize, Serialize};

use crate::order::OrderSnapshot;

use super::{BlockCategory, Blocker, OrderStatus, Predicate, Transition};

/// Immutable mapping from transition to its ordered prerequisite list.
///
/// Constructed once at startup and injected into the engine. There is no
/// global registry and no runtime mutation.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entries: Vec<(Transition, Vec<Predicate>)>,
}

impl TransitionTable {
    /// Builds the standard maintenance order transition table.
    pub fn standard() -> Self {
        let entries = Transition::ALL
            .into_iter()
            .map(|transition| {
                let predicates = match transition {
                    Transition::Plan => {
                        vec![Predicate::HasOperations, Predicate::PositiveCostEstimate]
                    }
                    Transition::Release => vec![
                        Predicate::PermitsApproved,
                        Predicate::CriticalComponentsCovered,
                        Predicate::TechnicianAssigned,
                    ],
                    Transition::Start => vec![Predicate::HasConfirmation],
                    Transition::Confirm => vec![Predicate::AllOperationsConfirmed],
                    Transition::Complete => vec![
                        Predicate::AllOperationsConfirmed,
                        Predicate::ComponentsFullyIssued,
                        Predicate::MalfunctionReportOnFile,
                    ],
                };
                (transition, predicates)
            })
            .collect();
        Self { entries }
    }

    /// Returns the ordered predicate list for a transition.
    pub fn predicates(&self, transition: Transition) -> &[Predicate] {
        self.entries
            .iter()
            .find(|(t, _)| *t == transition)
            .map(|(_, predicates)| predicates.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of a transition check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionCheck {
    /// True when the transition may proceed.
    pub allowed: bool,

    /// The complete list of blocking reasons; empty when allowed.
    pub blockers: Vec<Blocker>,
}

impl TransitionCheck {
    /// Returns the blocker messages as plain strings.
    pub fn reasons(&self) -> Vec<String> {
        self.blockers.iter().map(|b| b.message.clone()).collect()
    }
}

/// Result of a transition check under an override request.
///
/// Hard blockers always deny the transition; bypassed blockers are the
/// overridable ones the caller chose to waive, returned so the override
/// can be recorded in the document flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideCheck {
    /// True when no hard (non-overridable) blocker remains.
    pub allowed: bool,

    /// Blockers that cannot be overridden.
    pub hard_blockers: Vec<Blocker>,

    /// Overridable blockers waived by the caller.
    pub bypassed: Vec<Blocker>,
}

/// Validates lifecycle transitions against the transition table.
#[derive(Debug, Clone, Default)]
pub struct LifecycleEngine {
    table: TransitionTable,
}

impl LifecycleEngine {
    /// Creates an engine over the given transition table.
    pub fn new(table: TransitionTable) -> Self {
        Self { table }
    }

    /// Checks whether `from -> to` may proceed for the given order snapshot.
    ///
    /// A pair absent from the adjacency table is denied with a single
    /// structural reason and no predicate is evaluated. Otherwise every
    /// registered predicate runs, in table order, and all failing reasons
    /// are returned together.
    pub fn can_transition(
        &self,
        from: OrderStatus,
        to: OrderStatus,
        snapshot: &OrderSnapshot,
    ) -> TransitionCheck {
        match Transition::between(from, to) {
            Some(transition) => self.check(transition, snapshot),
            None => TransitionCheck {
                allowed: false,
                blockers: vec![Blocker::new(
                    BlockCategory::Lifecycle,
                    format!("transition from {from} to {to} is not allowed"),
                )],
            },
        }
    }

    /// Checks a known transition against the snapshot.
    pub fn check(&self, transition: Transition, snapshot: &OrderSnapshot) -> TransitionCheck {
        let blockers: Vec<Blocker> = self
            .table
            .predicates(transition)
            .iter()
            .filter_map(|predicate| predicate.evaluate(snapshot))
            .collect();
        TransitionCheck {
            allowed: blockers.is_empty(),
            blockers,
        }
    }

    /// Checks a transition under an override request, splitting blockers
    /// into hard ones (deny regardless) and bypassed ones.
    pub fn check_with_override(
        &self,
        transition: Transition,
        snapshot: &OrderSnapshot,
    ) -> OverrideCheck {
        let check = self.check(transition, snapshot);
        let (bypassed, hard_blockers): (Vec<Blocker>, Vec<Blocker>) = check
            .blockers
            .into_iter()
            .partition(|b| b.category.is_overridable());
        OverrideCheck {
            allowed: hard_blockers.is_empty(),
            hard_blockers,
            bypassed,
        }
    }

    /// Returns the statuses reachable from `from` in one transition.
    pub fn valid_next_states(&self, from: OrderStatus) -> Vec<OrderStatus> {
        Transition::ALL
            .into_iter()
            .filter(|t| t.source() == from)
            .map(|t| t.target())
            .collect()
    }

    /// Returns the action names available from `from`, for declarative
    /// UI gating.
    pub fn enabled_actions(&self, from: OrderStatus) -> Vec<&'static str> {
        Transition::ALL
            .into_iter()
            .filter(|t| t.source() == from)
            .map(|t| t.action())
            .collect()
    }

    /// Returns the prerequisite list registered for a transition.
    pub fn prerequisites(&self, transition: Transition) -> &[Predicate] {
        self.table.predicates(transition)
    }
}
