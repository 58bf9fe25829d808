pub mod artifact;
pub mod environment;
pub mod identity;
pub mod layout;
pub mod notebook;
pub mod pipeline;
pub mod process;
pub mod template;

pub use crate::domain::DomainError;
pub use identity::{ProjectIdentity, ProjectName};
pub use layout::ProjectLayout;
