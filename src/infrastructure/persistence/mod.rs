pub mod connection;
pub mod entities;
pub mod repositories;

pub use connection::DbPool;
pub use repositories::{MemoryStore, SqlEntityStore};
