//! Infrastructure adapters for dsinit.
//!
//! This crate implements the ports defined in `dsinit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod serializer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ScriptedProcessRunner, SystemProcessRunner};
pub use serializer::SerdeDocuments;
