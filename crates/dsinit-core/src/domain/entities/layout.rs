use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Ordered directory layout of a generated project.
///
/// Insertion order is documentation order: the README tree, the directory
/// breakdown and the ignore file all walk the entries front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayoutEntry>", into = "Vec<LayoutEntry>")]
pub struct ProjectLayout {
    entries: Vec<LayoutEntry>,
}

/// A top-level directory and its immediate children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subdirs: Vec<Subdirectory>,
    /// Listed as an ignore rule rather than a tracked directory.
    #[serde(default)]
    pub ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdirectory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl LayoutEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            subdirs: Vec::new(),
            ignored: false,
        }
    }

    pub fn with_subdir(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.subdirs.push(Subdirectory {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

impl ProjectLayout {
    /// Build a layout, rejecting duplicate or malformed directory names.
    pub fn new(entries: Vec<LayoutEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::InvalidLayout(
                "layout has no directories".into(),
            ));
        }

        let mut top_level = HashSet::new();
        for entry in &entries {
            validate_segment(&entry.name)?;
            if !top_level.insert(entry.name.as_str()) {
                return Err(DomainError::DuplicateDirectory {
                    parent: ".".into(),
                    name: entry.name.clone(),
                });
            }

            let mut children = HashSet::new();
            for sub in &entry.subdirs {
                validate_segment(&sub.name)?;
                if !children.insert(sub.name.as_str()) {
                    return Err(DomainError::DuplicateDirectory {
                        parent: entry.name.clone(),
                        name: sub.name.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// The standard data-science workspace.
    pub fn data_science() -> Self {
        Self {
            entries: vec![
                LayoutEntry::new("data", "Stores all datasets for the project.")
                    .with_subdir("raw", "Unprocessed data as received from the source.")
                    .with_subdir("processed", "Data that has been cleaned and preprocessed.")
                    .with_subdir(
                        "metadata",
                        "Data dictionaries, schemas, or metadata about datasets.",
                    )
                    .ignored(),
                LayoutEntry::new(
                    "notebooks",
                    "Jupyter notebooks for analysis, data exploration, and experimentation.",
                ),
                LayoutEntry::new(
                    "scripts",
                    "Python scripts for automation, data preprocessing, and model training.",
                ),
                LayoutEntry::new("src", "Source code for the project.")
                    .with_subdir(
                        "utils",
                        "Helper functions such as logging, preprocessing utilities, and feature engineering.",
                    )
                    .with_subdir("models", "Model definitions and training code."),
                LayoutEntry::new(
                    "tests",
                    "Unit tests to validate scripts and model performance.",
                ),
                LayoutEntry::new("logs", "Logging files for tracking the execution of scripts.")
                    .ignored(),
                LayoutEntry::new(
                    "outputs",
                    "Generated reports, plots, visualizations, and final results.",
                )
                .ignored(),
                LayoutEntry::new(
                    "config",
                    "Configuration files (e.g., `.yaml`, `.json`) and dependency manifests.",
                ),
                LayoutEntry::new(
                    "models",
                    "Saved machine learning models and model checkpoints.",
                ),
            ],
        }
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Top-level directory names in layout order.
    pub fn top_level(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Every directory as a path relative to the project root, parents first.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        for entry in &self.entries {
            let parent = PathBuf::from(&entry.name);
            dirs.push(parent.clone());
            dirs.extend(entry.subdirs.iter().map(|sub| parent.join(&sub.name)));
        }
        dirs
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::data_science()
    }
}

impl TryFrom<Vec<LayoutEntry>> for ProjectLayout {
    type Error = DomainError;

    fn try_from(entries: Vec<LayoutEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ProjectLayout> for Vec<LayoutEntry> {
    fn from(layout: ProjectLayout) -> Self {
        layout.entries
    }
}

fn validate_segment(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidLayout(
            "directory names cannot be empty".into(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(DomainError::InvalidLayout(format!(
            "directory name '{name}' contains a path separator"
        )));
    }
    if name == "." || name == ".." {
        return Err(DomainError::InvalidLayout(format!(
            "directory name '{name}' is reserved"
        )));
    }
    Ok(())
}
