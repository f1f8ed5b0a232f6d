pub mod entry;
pub mod error;
pub mod memory;
pub mod query;
pub mod store;

pub use common::OrderId;
pub use entry::{DocumentFlowEntry, DocumentFlowEntryBuilder, DocumentType, EntryId};
pub use error::{FlowError, Result};
pub use memory::InMemoryFlowStore;
pub use query::FlowQuery;
pub use store::{FlowStore, FlowStoreExt, FlowStream};
