use chrono::{DateTime, Utc};

use common::{OrderId, UserId};

use crate::DocumentType;

/// Builder for constructing document flow queries.
///
/// Allows filtering flow entries by order, document type, acting user,
/// and time range.
#[derive(Debug, Clone, Default)]
pub struct FlowQuery {
    /// Filter by order ID.
    pub order_id: Option<OrderId>,

    /// Filter by document types (any of these types).
    pub document_types: Option<Vec<DocumentType>>,

    /// Filter by the acting user.
    pub user: Option<UserId>,

    /// Filter by entries after this timestamp (inclusive).
    pub from_timestamp: Option<DateTime<Utc>>,

    /// Filter by entries before this timestamp (inclusive).
    pub to_timestamp: Option<DateTime<Utc>>,

    /// Maximum number of entries to return.
    pub limit: Option<usize>,

    /// Number of entries to skip.
    pub offset: Option<usize>,
}

impl FlowQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for a specific order.
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            order_id: Some(order_id),
            ..Default::default()
        }
    }

    /// Creates a query for entries of a specific document type.
    pub fn for_document_type(document_type: DocumentType) -> Self {
        Self {
            document_types: Some(vec![document_type]),
            ..Default::default()
        }
    }

    /// Filters by order ID.
    pub fn order_id(mut self, id: OrderId) -> Self {
        self.order_id = Some(id);
        self
    }

    /// Filters by document type.
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_types = Some(vec![document_type]);
        self
    }

    /// Filters by multiple document types (any of these).
    pub fn document_types(mut self, document_types: Vec<DocumentType>) -> Self {
        self.document_types = Some(document_types);
        self
    }

    /// Filters by the acting user.
    pub fn user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    /// Filters to entries after this timestamp (inclusive).
    pub fn from_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.from_timestamp = Some(timestamp);
        self
    }

    /// Filters to entries before this timestamp (inclusive).
    pub fn to_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.to_timestamp = Some(timestamp);
        self
    }

    /// Limits the number of entries returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many entries before returning results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}
