use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{OrderId, Version};
use domain::WorkOrder;

use crate::error::StoreError;

/// Storage abstraction for work orders with optimistic concurrency control.
///
/// Every save carries the version the writer observed when it loaded the
/// order. The store rejects the save with `VersionConflict` when another
/// writer got there first, so callers can reload and retry.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Loads an order by its id, or `None` if it does not exist.
    async fn load(&self, id: &OrderId) -> Result<Option<WorkOrder>, StoreError>;

    /// Persists an order, expecting the stored copy to be at `expected`.
    ///
    /// A missing order counts as version 0, so creating an order saves with
    /// `Version::initial()`. On success the stored copy is stamped with the
    /// incremented version, which is also returned.
    async fn save(&self, order: WorkOrder, expected: Version) -> Result<Version, StoreError>;

    /// Returns whether an order with the given id exists.
    async fn exists(&self, id: &OrderId) -> Result<bool, StoreError>;

    /// Returns the total number of stored orders.
    async fn count(&self) -> Result<usize, StoreError>;
}

/// In-memory order repository implementation for testing.
///
/// Stores all orders in memory behind an async lock and enforces the same
/// version check a database-backed implementation would.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, WorkOrder>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn load(&self, id: &OrderId) -> Result<Option<WorkOrder>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.get(id).cloned())
    }

    async fn save(&self, mut order: WorkOrder, expected: Version) -> Result<Version, StoreError> {
        let mut orders = self.orders.write().await;

        let actual = orders
            .get(order.id())
            .map(|stored| stored.version())
            .unwrap_or(Version::initial());

        if actual != expected {
            return Err(StoreError::VersionConflict {
                order_id: order.id().clone(),
                expected,
                actual,
            });
        }

        let new_version = expected.next();
        order.set_version(new_version);
        orders.insert(order.id().clone(), order);

        Ok(new_version)
    }

    async fn exists(&self, id: &OrderId) -> Result<bool, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.contains_key(id))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.len())
    }
}
