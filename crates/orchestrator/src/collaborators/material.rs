//! Material availability check trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::collaborators::CapabilityCheck;

/// Trait for checking whether a material is in stock.
///
/// The orchestrator consults this check when building release readiness
/// snapshots. It never mutates stock levels; reserving and issuing stock
/// happen in the warehouse system, outside this crate.
#[async_trait]
pub trait MaterialAvailability: Send + Sync {
    /// Checks whether `quantity` units of the material are available.
    async fn check(&self, material: &str, quantity: u32) -> CapabilityCheck;
}

#[derive(Debug, Default)]
struct InMemoryMaterialState {
    unavailable: HashMap<String, String>,
}

/// In-memory material availability check for testing.
///
/// Every material is available unless marked otherwise.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaterialAvailability {
    state: Arc<RwLock<InMemoryMaterialState>>,
}

impl InMemoryMaterialAvailability {
    /// Creates a new in-memory material availability check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a material as unavailable with the given reason.
    pub fn mark_unavailable(&self, material: impl Into<String>, reason: impl Into<String>) {
        self.state
            .write()
            .unwrap()
            .unavailable
            .insert(material.into(), reason.into());
    }

    /// Marks a material as available again.
    pub fn mark_available(&self, material: &str) {
        self.state.write().unwrap().unavailable.remove(material);
    }
}

#[async_trait]
impl MaterialAvailability for InMemoryMaterialAvailability {
    async fn check(&self, material: &str, _quantity: u32) -> CapabilityCheck {
        let state = self.state.read().unwrap();
        match state.unavailable.get(material) {
            Some(reason) => CapabilityCheck::unavailable(reason.clone()),
            None => CapabilityCheck::available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_materials_available_by_default() {
        let service = InMemoryMaterialAvailability::new();

        let check = service.check("BRG-6205", 4).await;
        assert!(check.available);
        assert!(check.reason.is_none());
    }

    #[tokio::test]
    async fn test_marked_material_reports_reason() {
        let service = InMemoryMaterialAvailability::new();
        service.mark_unavailable("BRG-6205", "out of stock until 2026-09-01");

        let check = service.check("BRG-6205", 1).await;
        assert!(!check.available);
        assert_eq!(
            check.reason.as_deref(),
            Some("out of stock until 2026-09-01")
        );

        service.mark_available("BRG-6205");
        assert!(service.check("BRG-6205", 1).await.available);
    }
}
