//! Technician availability check trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::collaborators::CapabilityCheck;

/// Trait for checking whether a technician can take on work.
#[async_trait]
pub trait TechnicianAvailability: Send + Sync {
    /// Checks whether the technician is available for assignment.
    async fn check(&self, technician: &str) -> CapabilityCheck;
}

#[derive(Debug, Default)]
struct InMemoryTechnicianState {
    unavailable: HashMap<String, String>,
}

/// In-memory technician availability check for testing.
///
/// Every technician is available unless marked otherwise.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTechnicianAvailability {
    state: Arc<RwLock<InMemoryTechnicianState>>,
}

impl InMemoryTechnicianAvailability {
    /// Creates a new in-memory technician availability check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a technician as unavailable with the given reason.
    pub fn mark_unavailable(&self, technician: impl Into<String>, reason: impl Into<String>) {
        self.state
            .write()
            .unwrap()
            .unavailable
            .insert(technician.into(), reason.into());
    }

    /// Marks a technician as available again.
    pub fn mark_available(&self, technician: &str) {
        self.state.write().unwrap().unavailable.remove(technician);
    }
}

#[async_trait]
impl TechnicianAvailability for InMemoryTechnicianAvailability {
    async fn check(&self, technician: &str) -> CapabilityCheck {
        let state = self.state.read().unwrap();
        match state.unavailable.get(technician) {
            Some(reason) => CapabilityCheck::unavailable(reason.clone()),
            None => CapabilityCheck::available(),
        }
    }
}
