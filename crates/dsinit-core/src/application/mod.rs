//! Application layer for dsinit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, SetupService, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CreatedFile, Materializer, NoopObserver, ScaffoldOutcome, ScaffoldService, ScriptRun,
    ScriptService, SetupObserver, SetupOptions, SetupReport, SetupService, SnapshotConfig,
    SnapshotReport, SnapshotService, SnapshotStatus, StepRunner,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DocumentSerializer, Filesystem, ProcessRunner};

pub use error::ApplicationError;
