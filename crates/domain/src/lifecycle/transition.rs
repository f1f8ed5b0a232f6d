//! The closed set of lifecycle transitions.

use super::OrderStatus;

/// A single arc in the lifecycle adjacency table.
///
/// The enum is closed: every transition the system supports is a variant
/// here, and the engine's predicate table matches on it exhaustively. A new
/// transition without a predicate list is a compile error, not a silent
/// runtime gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Created -> Planned
    Plan,
    /// Planned -> Released
    Release,
    /// Released -> InProgress
    Start,
    /// InProgress -> Confirmed
    Confirm,
    /// Confirmed -> Teco
    Complete,
}

impl Transition {
    /// Every transition, in lifecycle order.
    pub const ALL: [Transition; 5] = [
        Transition::Plan,
        Transition::Release,
        Transition::Start,
        Transition::Confirm,
        Transition::Complete,
    ];

    /// The status this transition leaves.
    pub fn source(&self) -> OrderStatus {
        match self {
            Transition::Plan => OrderStatus::Created,
            Transition::Release => OrderStatus::Planned,
            Transition::Start => OrderStatus::Released,
            Transition::Confirm => OrderStatus::InProgress,
            Transition::Complete => OrderStatus::Confirmed,
        }
    }

    /// The status this transition enters.
    pub fn target(&self) -> OrderStatus {
        match self {
            Transition::Plan => OrderStatus::Planned,
            Transition::Release => OrderStatus::Released,
            Transition::Start => OrderStatus::InProgress,
            Transition::Confirm => OrderStatus::Confirmed,
            Transition::Complete => OrderStatus::Teco,
        }
    }

    /// The action name exposed to callers.
    pub fn action(&self) -> &'static str {
        match self {
            Transition::Plan => "plan",
            Transition::Release => "release",
            Transition::Start => "start",
            Transition::Confirm => "confirm",
            Transition::Complete => "complete",
        }
    }

    /// Looks up the transition for a `(from, to)` pair.
    ///
    /// Returns None for every pair not in the adjacency table.
    pub fn between(from: OrderStatus, to: OrderStatus) -> Option<Transition> {
        Transition::ALL
            .into_iter()
            .find(|t| t.source() == from && t.target() == to)
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.action())
    }
}
