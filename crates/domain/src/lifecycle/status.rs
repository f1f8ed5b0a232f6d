//! Order lifecycle statuses.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// The lifecycle status of a maintenance work order.
///
/// Status only ever advances along the fixed sequence:
/// ```text
/// Created ──► Planned ──► Released ──► InProgress ──► Confirmed ──► Teco
/// ```
/// Teco (technical completion) is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order exists, operations and components are being captured.
    #[default]
    Created,

    /// Planning is complete, cost estimate stands.
    Planned,

    /// Order is released for execution; goods movements and
    /// confirmations may now be posted.
    Released,

    /// Work has started (at least one confirmation posted).
    InProgress,

    /// All operations are finally confirmed.
    Confirmed,

    /// Technically complete (terminal state). Costs are final.
    Teco,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Created,
        OrderStatus::Planned,
        OrderStatus::Released,
        OrderStatus::InProgress,
        OrderStatus::Confirmed,
        OrderStatus::Teco,
    ];

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Teco)
    }

    /// Returns true if the order has passed release, i.e. goods movements
    /// and confirmations may be posted against it.
    pub fn has_been_released(&self) -> bool {
        matches!(
            self,
            OrderStatus::Released
                | OrderStatus::InProgress
                | OrderStatus::Confirmed
                | OrderStatus::Teco
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Planned => "PLANNED",
            OrderStatus::Released => "RELEASED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Teco => "TECO",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "PLANNED" => Ok(OrderStatus::Planned),
            "RELEASED" => Ok(OrderStatus::Released),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "TECO" => Ok(OrderStatus::Teco),
            _ => Err(DomainError::InvalidValue {
                field: "order status",
                value: s.to_string(),
            }),
        }
    }
}
