use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use common::OrderId;

use crate::{DocumentFlowEntry, DocumentType, EntryId, FlowQuery, Result};

/// A stream of document flow entries.
pub type FlowStream = Pin<Box<dyn Stream<Item = Result<DocumentFlowEntry>> + Send>>;

/// Core trait for document flow store implementations.
///
/// The flow is strictly append-only: the trait exposes no way to update or
/// delete an entry. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Appends an entry to the flow.
    ///
    /// Returns the id of the appended entry.
    async fn append(&self, entry: DocumentFlowEntry) -> Result<EntryId>;

    /// Retrieves the full flow for an order in chronological order
    /// (oldest first). Entries recorded in the same millisecond keep their
    /// append order.
    async fn flow(&self, order_id: &OrderId) -> Result<Vec<DocumentFlowEntry>>;

    /// Retrieves an order's flow entries of a specific document type,
    /// in chronological order.
    async fn flow_by_type(
        &self,
        order_id: &OrderId,
        document_type: DocumentType,
    ) -> Result<Vec<DocumentFlowEntry>>;

    /// Retrieves entries matching a query.
    async fn query(&self, query: FlowQuery) -> Result<Vec<DocumentFlowEntry>>;

    /// Retrieves a single entry by id.
    ///
    /// Returns None if no such entry exists.
    async fn get(&self, entry_id: EntryId) -> Result<Option<DocumentFlowEntry>>;

    /// Streams every entry in the store in chronological order.
    ///
    /// Used for compliance exports across all orders.
    async fn stream_all(&self) -> Result<FlowStream>;
}

/// Extension trait providing convenience methods for flow stores.
#[async_trait]
pub trait FlowStoreExt: FlowStore {
    /// Returns the chronologically last entry of an order's flow.
    async fn last_entry(&self, order_id: &OrderId) -> Result<Option<DocumentFlowEntry>> {
        Ok(self.flow(order_id).await?.into_iter().next_back())
    }

    /// Checks whether an order's flow contains at least one entry of the
    /// given document type.
    async fn contains_type(&self, order_id: &OrderId, document_type: DocumentType) -> Result<bool> {
        Ok(!self.flow_by_type(order_id, document_type).await?.is_empty())
    }
}

// Blanket implementation for all FlowStore implementations
impl<T: FlowStore + ?Sized> FlowStoreExt for T {}
