use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A secondary package-manager environment export (conda `environment.yml`).
///
/// Field order matches the sorted-key layout conda tooling emits. Keys other
/// than the four modelled here (`variables:` and the like) are carried through
/// untouched in `extra` and written after them in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One entry of the `dependencies` list.
///
/// Either a package spec (`numpy=1.26.0=py311h...`) or a nested group such
/// as `pip: [requests==2.31.0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Package(String),
    Group(BTreeMap<String, Vec<String>>),
}

impl EnvironmentManifest {
    /// Reduce every package spec to its bare name. Nested groups are kept as-is.
    pub fn strip_version_pins(mut self) -> Self {
        for entry in &mut self.dependencies {
            if let DependencyEntry::Package(spec) = entry {
                let name = package_name(spec).to_string();
                *spec = name;
            }
        }
        self
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter_map(|entry| match entry {
            DependencyEntry::Package(spec) => Some(spec.as_str()),
            DependencyEntry::Group(_) => None,
        })
    }
}

/// Text before the first `=` of a package spec.
pub fn package_name(spec: &str) -> &str {
    spec.split('=').next().unwrap_or(spec).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(deps: &[&str]) -> EnvironmentManifest {
        EnvironmentManifest {
            dependencies: deps
                .iter()
                .map(|d| DependencyEntry::Package((*d).to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn strips_exact_pins() {
        let stripped = manifest(&["numpy=1.26.0", "scipy=1.11.0"]).strip_version_pins();
        assert_eq!(stripped.package_names().collect::<Vec<_>>(), ["numpy", "scipy"]);
    }

    #[test]
    fn strips_build_strings_and_double_equals() {
        let stripped =
            manifest(&["python=3.11.5=h955ad1f_0", "pandas==2.1.0", "pip"]).strip_version_pins();
        assert_eq!(
            stripped.package_names().collect::<Vec<_>>(),
            ["python", "pandas", "pip"]
        );
    }

    #[test]
    fn leaves_nested_groups_untouched() {
        let group = DependencyEntry::Group(BTreeMap::from([(
            "pip".to_string(),
            vec!["requests==2.31.0".to_string()],
        )]));
        let mut m = manifest(&["numpy=1.26.0"]);
        m.dependencies.push(group.clone());

        let stripped = m.strip_version_pins();
        assert_eq!(stripped.dependencies[1], group);
    }

    #[test]
    fn stripping_keeps_unmodelled_keys() {
        let mut m = manifest(&["numpy=1.26.0"]);
        m.extra.insert(
            "variables".to_string(),
            serde_json::json!({ "MPLBACKEND": "Agg" }),
        );

        let stripped = m.strip_version_pins();
        assert_eq!(stripped.extra["variables"]["MPLBACKEND"], "Agg");
    }
}
