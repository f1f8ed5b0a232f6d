//! Read-only capability checks consulted before lifecycle decisions.

pub mod cost_center;
pub mod material;
pub mod technician;

pub use cost_center::{CostCenterValidation, InMemoryCostCenterValidation};
pub use material::{InMemoryMaterialAvailability, MaterialAvailability};
pub use technician::{InMemoryTechnicianAvailability, TechnicianAvailability};

/// Answer from a capability check: whether the capability is available,
/// and when it is not, a human-readable reason.
#[derive(Debug, Clone)]
pub struct CapabilityCheck {
    /// Whether the checked capability is available.
    pub available: bool,
    /// Reason the capability is unavailable, when it is.
    pub reason: Option<String>,
}

impl CapabilityCheck {
    /// Creates a positive answer.
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    /// Creates a negative answer carrying the reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
        }
    }
}
