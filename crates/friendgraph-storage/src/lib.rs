//! Persistence for the friendgraph user graph.
//!
//! Provides the [`UserStore`] trait defining the load/save contract, plus the
//! [`JsonFileStore`] and [`InMemoryStore`] backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`document`]: the on-disk JSON document shape
//! - [`traits`]: UserStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`json_file`]: JsonFileStore implementation

pub mod document;
pub mod error;
pub mod json_file;
pub mod memory;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::UserStore;
