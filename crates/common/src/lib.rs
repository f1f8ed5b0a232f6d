pub mod ids;
pub mod version;

pub use ids::{DocumentNumber, OrderId, UserId};
pub use version::Version;
