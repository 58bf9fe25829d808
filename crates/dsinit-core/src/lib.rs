//! dsinit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the dsinit
//! data-science project scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            dsinit-cli (CLI)             │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Scaffold, Snapshot, Script, Setup)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ProcessRunner, Documents)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    dsinit-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemProcessRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (Layout, Templates, Pipeline stages)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use dsinit_core::prelude::*;
//! # fn demo(filesystem: Arc<dyn Filesystem>) -> DsinitResult<()> {
//! let today = chrono::Local::now().date_naive();
//! let service = ScaffoldService::new(Materializer::new(filesystem), ProjectLayout::data_science());
//! service.generate("river-turbidity", Path::new("/work"), today)?;
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Materializer, NoopObserver, ScaffoldService, ScriptService, SetupObserver, SetupOptions,
        SetupReport, SetupService, SnapshotConfig, SnapshotService, StepRunner,
        ports::{DocumentSerializer, Filesystem, ProcessRunner},
    };
    pub use crate::domain::{
        Invocation, ProcessOutput, ProjectIdentity, ProjectLayout, ScriptKind, SecondarySession,
        Stage, StepOutcome, StepRecord, VcsInit,
    };
    pub use crate::error::{DsinitError, DsinitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
