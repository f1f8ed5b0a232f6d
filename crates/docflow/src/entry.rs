use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{DocumentNumber, OrderId, UserId};

/// Unique identifier for a document flow entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EntryId> for Uuid {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

/// Kind of business document recorded in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    OrderCreated,
    OrderPlanned,
    OrderReleased,
    PurchaseOrder,
    GoodsReceipt,
    GoodsIssue,
    Confirmation,
    MalfunctionReport,
    Override,
    TechnicalCompletion,
    PostReview,
    Settlement,
}

impl DocumentType {
    /// Returns the document type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::OrderCreated => "OrderCreated",
            DocumentType::OrderPlanned => "OrderPlanned",
            DocumentType::OrderReleased => "OrderReleased",
            DocumentType::PurchaseOrder => "PurchaseOrder",
            DocumentType::GoodsReceipt => "GoodsReceipt",
            DocumentType::GoodsIssue => "GoodsIssue",
            DocumentType::Confirmation => "Confirmation",
            DocumentType::MalfunctionReport => "MalfunctionReport",
            DocumentType::Override => "Override",
            DocumentType::TechnicalCompletion => "TechnicalCompletion",
            DocumentType::PostReview => "PostReview",
            DocumentType::Settlement => "Settlement",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single record in an order's document flow.
///
/// Entries are immutable once appended. The flow store offers no update or
/// delete, so the recorded history of an order can only ever grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFlowEntry {
    /// Unique identifier for this entry.
    pub entry_id: EntryId,

    /// The order this entry belongs to.
    pub order_id: OrderId,

    /// The kind of document recorded.
    pub document_type: DocumentType,

    /// Business number of the recorded document.
    pub document_number: DocumentNumber,

    /// The user who produced the document.
    pub user: UserId,

    /// Free-text status of the document at recording time
    /// (e.g. "CREATED", "POSTED", or an override reason).
    pub status: String,

    /// Number of a related document, if any (e.g. the purchase order
    /// a goods receipt was posted against).
    pub related_document: Option<DocumentNumber>,

    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}

impl DocumentFlowEntry {
    /// Creates a new document flow entry builder.
    pub fn builder() -> DocumentFlowEntryBuilder {
        DocumentFlowEntryBuilder::default()
    }
}

/// Builder for constructing document flow entries.
#[derive(Debug, Default)]
pub struct DocumentFlowEntryBuilder {
    entry_id: Option<EntryId>,
    order_id: Option<OrderId>,
    document_type: Option<DocumentType>,
    document_number: Option<DocumentNumber>,
    user: Option<UserId>,
    status: Option<String>,
    related_document: Option<DocumentNumber>,
    timestamp: Option<DateTime<Utc>>,
}

impl DocumentFlowEntryBuilder {
    /// Sets the entry ID. If not set, a new ID will be generated.
    pub fn entry_id(mut self, id: EntryId) -> Self {
        self.entry_id = Some(id);
        self
    }

    /// Sets the order the entry belongs to.
    pub fn order_id(mut self, id: OrderId) -> Self {
        self.order_id = Some(id);
        self
    }

    /// Sets the document type.
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Sets the document number.
    pub fn document_number(mut self, number: DocumentNumber) -> Self {
        self.document_number = Some(number);
        self
    }

    /// Sets the acting user.
    pub fn user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the status text.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets a related document number.
    pub fn related_document(mut self, number: DocumentNumber) -> Self {
        self.related_document = Some(number);
        self
    }

    /// Sets the timestamp. If not set, the current time will be used.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the document flow entry.
    ///
    /// # Panics
    ///
    /// Panics if required fields (order_id, document_type, document_number,
    /// user, status) are not set.
    pub fn build(self) -> DocumentFlowEntry {
        DocumentFlowEntry {
            entry_id: self.entry_id.unwrap_or_default(),
            order_id: self.order_id.expect("order_id is required"),
            document_type: self.document_type.expect("document_type is required"),
            document_number: self.document_number.expect("document_number is required"),
            user: self.user.expect("user is required"),
            status: self.status.expect("status is required"),
            related_document: self.related_document,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }

    /// Tries to build the entry, returning None if required fields are missing.
    pub fn try_build(self) -> Option<DocumentFlowEntry> {
        Some(DocumentFlowEntry {
            entry_id: self.entry_id.unwrap_or_default(),
            order_id: self.order_id?,
            document_type: self.document_type?,
            document_number: self.document_number?,
            user: self.user?,
            status: self.status?,
            related_document: self.related_document,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_new_creates_unique_ids() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn document_type_as_str_roundtrips_through_serde() {
        let json = serde_json::to_string(&DocumentType::GoodsIssue).unwrap();
        assert_eq!(json, "\"GoodsIssue\"");
        let parsed: DocumentType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DocumentType::GoodsIssue);
        assert_eq!(parsed.as_str(), "GoodsIssue");
    }

    #[test]
    fn entry_builder() {
        let order_id = OrderId::general();
        let number = DocumentNumber::generate("GI");

        let entry = DocumentFlowEntry::builder()
            .order_id(order_id.clone())
            .document_type(DocumentType::GoodsIssue)
            .document_number(number.clone())
            .user(UserId::new("storekeeper"))
            .status("POSTED")
            .related_document(DocumentNumber::from("MAT-1-ABCDEF"))
            .build();

        assert_eq!(entry.order_id, order_id);
        assert_eq!(entry.document_type, DocumentType::GoodsIssue);
        assert_eq!(entry.document_number, number);
        assert_eq!(entry.user.as_str(), "storekeeper");
        assert_eq!(entry.status, "POSTED");
        assert_eq!(
            entry.related_document,
            Some(DocumentNumber::from("MAT-1-ABCDEF"))
        );
    }

    #[test]
    fn entry_try_build_returns_none_on_missing_fields() {
        let result = DocumentFlowEntry::builder()
            .document_type(DocumentType::Confirmation)
            .try_build();
        assert!(result.is_none());
    }

    #[test]
    fn entry_serialization_roundtrip() {
        let entry = DocumentFlowEntry::builder()
            .order_id(OrderId::breakdown())
            .document_type(DocumentType::MalfunctionReport)
            .document_number(DocumentNumber::generate("MLF"))
            .user(UserId::new("technician7"))
            .status("REPORTED")
            .build();

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: DocumentFlowEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
