use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::OrderId;

use crate::{
    DocumentFlowEntry, DocumentType, EntryId, FlowQuery, Result,
    store::{FlowStore, FlowStream},
};

/// In-memory flow store implementation.
///
/// Stores entries in append order and serves reads sorted chronologically.
/// Backs the orchestrator in tests and single-process deployments.
#[derive(Clone, Default)]
pub struct InMemoryFlowStore {
    entries: Arc<RwLock<Vec<DocumentFlowEntry>>>,
}

impl InMemoryFlowStore {
    /// Creates a new empty in-memory flow store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries stored.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Clears all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl FlowStore for InMemoryFlowStore {
    async fn append(&self, entry: DocumentFlowEntry) -> Result<EntryId> {
        let entry_id = entry.entry_id;
        tracing::debug!(
            order_id = %entry.order_id,
            document_type = %entry.document_type,
            document_number = %entry.document_number,
            "document flow entry appended"
        );
        self.entries.write().await.push(entry);
        Ok(entry_id)
    }

    async fn flow(&self, order_id: &OrderId) -> Result<Vec<DocumentFlowEntry>> {
        let store = self.entries.read().await;
        let mut entries: Vec<_> = store
            .iter()
            .filter(|e| &e.order_id == order_id)
            .cloned()
            .collect();
        // Stable sort keeps append order for identical timestamps
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    async fn flow_by_type(
        &self,
        order_id: &OrderId,
        document_type: DocumentType,
    ) -> Result<Vec<DocumentFlowEntry>> {
        let store = self.entries.read().await;
        let mut entries: Vec<_> = store
            .iter()
            .filter(|e| &e.order_id == order_id && e.document_type == document_type)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    async fn query(&self, query: FlowQuery) -> Result<Vec<DocumentFlowEntry>> {
        let store = self.entries.read().await;
        let mut entries: Vec<_> = store
            .iter()
            .filter(|e| {
                if let Some(ref id) = query.order_id
                    && &e.order_id != id
                {
                    return false;
                }
                if let Some(ref types) = query.document_types
                    && !types.contains(&e.document_type)
                {
                    return false;
                }
                if let Some(ref user) = query.user
                    && &e.user != user
                {
                    return false;
                }
                if let Some(from) = query.from_timestamp
                    && e.timestamp < from
                {
                    return false;
                }
                if let Some(to) = query.to_timestamp
                    && e.timestamp > to
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        entries.sort_by_key(|e| e.timestamp);

        // Apply offset and limit
        let offset = query.offset.unwrap_or(0);
        let entries: Vec<_> = entries.into_iter().skip(offset).collect();

        let entries = if let Some(limit) = query.limit {
            entries.into_iter().take(limit).collect()
        } else {
            entries
        };

        Ok(entries)
    }

    async fn get(&self, entry_id: EntryId) -> Result<Option<DocumentFlowEntry>> {
        let store = self.entries.read().await;
        Ok(store.iter().find(|e| e.entry_id == entry_id).cloned())
    }

    async fn stream_all(&self) -> Result<FlowStream> {
        use futures_util::stream;

        let store = self.entries.read().await;
        let mut entries = store.clone();
        entries.sort_by_key(|e| e.timestamp);

        let stream = stream::iter(entries.into_iter().map(Ok));
        Ok(Box::pin(stream))
    }
}
