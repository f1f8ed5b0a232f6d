use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order id prefix for planned (general) maintenance orders.
pub const GENERAL_ORDER_PREFIX: &str = "PM";

/// Order id prefix for breakdown orders.
pub const BREAKDOWN_ORDER_PREFIX: &str = "BD";

/// Returns six uppercase hex characters seeded from a fresh v4 UUID.
fn random6() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..6].to_uppercase()
}

fn timestamped(prefix: &str) -> String {
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), random6())
}

/// Business identifier for a maintenance work order.
///
/// The prefix encodes the order kind: `PM-` for planned maintenance,
/// `BD-` for breakdown orders. The rest is an epoch-millisecond timestamp
/// and a six-character random suffix, e.g. `PM-1733836800000-4F2A1C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Mints a new id for a general (planned) maintenance order.
    pub fn general() -> Self {
        Self(timestamped(GENERAL_ORDER_PREFIX))
    }

    /// Mints a new id for a breakdown order.
    pub fn breakdown() -> Self {
        Self(timestamped(BREAKDOWN_ORDER_PREFIX))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id carries the breakdown prefix.
    pub fn is_breakdown(&self) -> bool {
        self.0.starts_with(BREAKDOWN_ORDER_PREFIX)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Business identifier for a sub-document of an order.
///
/// Format is `{prefix}-{epoch_millis}-{RANDOM6}`, with the prefix naming the
/// document kind (`OP`, `MAT`, `PO`, `GR`, `GI`, `CNF`, `MLF`, `PRM`).
/// Settlement documents are the exception: they are derived from the order
/// id so a repeated settlement attempt produces the same number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Mints a new document number with the given kind prefix.
    pub fn generate(prefix: &str) -> Self {
        Self(timestamped(prefix))
    }

    /// Returns the deterministic settlement document number for an order.
    pub fn settlement(order_id: &OrderId) -> Self {
        Self(format!("SET-{}", order_id))
    }

    /// Returns the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<DocumentNumber> for String {
    fn from(number: DocumentNumber) -> Self {
        number.0
    }
}

/// Identifier of the user acting on an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id from a login name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
