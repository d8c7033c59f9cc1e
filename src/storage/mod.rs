//! Persistence layer — key-value storage behind the `StorageBackend` trait.

pub mod libsql_backend;
pub mod memory;
pub mod traits;

pub use libsql_backend::LibSqlStorage;
pub use memory::MemoryStorage;
pub use traits::StorageBackend;
