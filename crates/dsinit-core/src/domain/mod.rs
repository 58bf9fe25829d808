// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for dsinit.
//!
//! Pure data and rules: the project layout, names, typed templates, the
//! notebook and environment-manifest models, pipeline stages and script
//! recipes. No filesystem or process access happens here; the application
//! layer reaches the outside world through ports.
//!
//! - **No I/O**: rendering and validation are pure functions
//! - **Explicit inputs**: dates, base directories and session flags are arguments
//! - **Immutable entities**: all domain objects are Clone + PartialEq
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    artifact::{GeneratedArtifact, WriteOutcome, WritePolicy},
    environment::{DependencyEntry, EnvironmentManifest, package_name},
    identity::{ProjectIdentity, ProjectName},
    layout::{LayoutEntry, ProjectLayout, Subdirectory},
    notebook::{Cell, CellType, Metadata, Notebook},
    pipeline::{PipelineState, Stage, StepOutcome, StepRecord},
    process::{Invocation, ProcessOutput, ScriptRecipe, VcsInit},
    template::{
        DATE_FORMAT, GitignoreTemplate, LoggingSetupTemplate, ModuleTemplate, NotebookTemplate,
        ReadmeTemplate, ScriptTemplate, TextTemplate,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ScriptKind, SecondarySession};
