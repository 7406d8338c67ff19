pub mod memory_store;
pub mod sql_store;

pub use memory_store::MemoryStore;
pub use sql_store::SqlEntityStore;
