//! `serde_json` / `serde_yaml` implementation of [`DocumentSerializer`].

use dsinit_core::{
    application::{ApplicationError, ports::DocumentSerializer},
    domain::{EnvironmentManifest, Notebook},
    error::DsinitResult,
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const NOTEBOOK_INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeDocuments;

impl SerdeDocuments {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSerializer for SerdeDocuments {
    fn notebook_to_json(&self, notebook: &Notebook) -> DsinitResult<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(NOTEBOOK_INDENT));
        notebook
            .serialize(&mut ser)
            .map_err(|e| serialization_failed("notebook", e))?;
        String::from_utf8(buf).map_err(|e| serialization_failed("notebook", e).into())
    }

    fn parse_environment(&self, yaml: &str) -> DsinitResult<EnvironmentManifest> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ApplicationError::ParseFailed {
                what: "environment export".into(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn environment_to_yaml(&self, manifest: &EnvironmentManifest) -> DsinitResult<String> {
        serde_yaml::to_string(manifest)
            .map_err(|e| serialization_failed("environment manifest", e).into())
    }
}

fn serialization_failed(what: &str, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::SerializationFailed {
        what: what.into(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dsinit_core::domain::{DependencyEntry, NotebookTemplate};

    const CONDA_EXPORT: &str = "\
name: river
channels:
  - conda-forge
  - defaults
dependencies:
  - numpy=1.26.0=py311h64a7726_0
  - scipy=1.11.0
  - pip=23.2.1
  - pip:
      - requests==2.31.0
prefix: /opt/conda/envs/river
";

    #[test]
    fn notebook_json_is_four_space_indented() {
        let notebook = NotebookTemplate {
            notebook_name: "eda",
            created_on: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        }
        .render();

        let json = SerdeDocuments.notebook_to_json(&notebook).unwrap();
        assert!(json.starts_with("{\n    \"cells\": [\n        {\n"));
        assert!(json.contains("\"metadata\": {}"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["cells", "metadata", "nbformat", "nbformat_minor"]);
        assert_eq!(value["nbformat"], 4);
        assert_eq!(value["nbformat_minor"], 2);
        assert_eq!(value["cells"][0]["cell_type"], "markdown");
        assert_eq!(value["cells"][1]["cell_type"], "code");
    }

    #[test]
    fn parses_conda_export_with_pip_group() {
        let manifest = SerdeDocuments.parse_environment(CONDA_EXPORT).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("river"));
        assert_eq!(manifest.channels, ["conda-forge", "defaults"]);
        assert_eq!(manifest.dependencies.len(), 4);
        assert!(matches!(
            &manifest.dependencies[3],
            DependencyEntry::Group(g) if g["pip"] == ["requests==2.31.0"]
        ));
    }

    #[test]
    fn stripped_manifest_renders_bare_names() {
        let manifest = SerdeDocuments
            .parse_environment(CONDA_EXPORT)
            .unwrap()
            .strip_version_pins();
        let yaml = SerdeDocuments.environment_to_yaml(&manifest).unwrap();

        assert!(yaml.contains("- numpy\n"));
        assert!(yaml.contains("- scipy\n"));
        assert!(!yaml.contains("1.26.0"));
        assert!(yaml.contains("requests==2.31.0"));
        assert!(yaml.find("channels:").unwrap() < yaml.find("dependencies:").unwrap());
    }

    #[test]
    fn unmodelled_export_keys_survive_stripping() {
        let export = format!("{CONDA_EXPORT}variables:\n  MPLBACKEND: Agg\n");
        let manifest = SerdeDocuments
            .parse_environment(&export)
            .unwrap()
            .strip_version_pins();
        let yaml = SerdeDocuments.environment_to_yaml(&manifest).unwrap();

        assert!(yaml.contains("variables:\n  MPLBACKEND: Agg\n"), "{yaml}");
        assert!(yaml.contains("- numpy\n"));
        assert!(yaml.find("prefix:").unwrap() < yaml.find("variables:").unwrap());
    }

    #[test]
    fn invalid_yaml_is_parse_failure() {
        let err = SerdeDocuments
            .parse_environment("dependencies: [unterminated")
            .unwrap_err();
        assert!(err.to_string().starts_with("Could not parse environment export"));
    }
}
