//! Order lifecycle: statuses, transitions, prerequisites, and the engine.

mod engine;
mod predicates;
mod status;
mod transition;

pub use engine::{LifecycleEngine, OverrideCheck, TransitionCheck, TransitionTable};
pub use predicates::{BlockCategory, Blocker, Predicate};
pub use status::OrderStatus;
pub use transition::Transition;
