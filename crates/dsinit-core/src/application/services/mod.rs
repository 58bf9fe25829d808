//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "set up a project".

pub mod materializer;
pub mod scaffold_service;
pub mod script_service;
pub mod setup_service;
pub mod snapshot_service;
pub mod step_runner;

#[cfg(test)]
pub(crate) mod test_support;

pub use materializer::Materializer;
pub use scaffold_service::{ScaffoldOutcome, ScaffoldService};
pub use script_service::{CreatedFile, ScriptService};
pub use setup_service::{NoopObserver, SetupObserver, SetupOptions, SetupReport, SetupService};
pub use snapshot_service::{SnapshotConfig, SnapshotReport, SnapshotService, SnapshotStatus};
pub use step_runner::{ScriptRun, StepRunner};
