//! Cost center validation trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::collaborators::CapabilityCheck;

/// Trait for validating settlement cost centers.
///
/// Consulted before settlement to confirm the receiving cost center exists
/// and accepts postings.
#[async_trait]
pub trait CostCenterValidation: Send + Sync {
    /// Checks whether the cost center can receive a settlement posting.
    async fn check(&self, cost_center: &str) -> CapabilityCheck;
}

#[derive(Debug, Default)]
struct InMemoryCostCenterState {
    invalid: HashMap<String, String>,
}

/// In-memory cost center validation for testing.
///
/// Every cost center is valid unless marked otherwise.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCostCenterValidation {
    state: Arc<RwLock<InMemoryCostCenterState>>,
}

impl InMemoryCostCenterValidation {
    /// Creates a new in-memory cost center validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a cost center as invalid with the given reason.
    pub fn mark_invalid(&self, cost_center: impl Into<String>, reason: impl Into<String>) {
        self.state
            .write()
            .unwrap()
            .invalid
            .insert(cost_center.into(), reason.into());
    }

    /// Marks a cost center as valid again.
    pub fn mark_valid(&self, cost_center: &str) {
        self.state.write().unwrap().invalid.remove(cost_center);
    }
}

#[async_trait]
impl CostCenterValidation for InMemoryCostCenterValidation {
    async fn check(&self, cost_center: &str) -> CapabilityCheck {
        let state = self.state.read().unwrap();
        match state.invalid.get(cost_center) {
            Some(reason) => CapabilityCheck::unavailable(reason.clone()),
            None => CapabilityCheck::available(),
        }
    }
}
