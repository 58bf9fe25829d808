use serde::{Deserialize, Serialize};

/// nbformat major version written by dsinit.
pub const NBFORMAT: u32 = 4;
/// nbformat minor version written by dsinit.
pub const NBFORMAT_MINOR: u32 = 2;

/// A Jupyter notebook document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    pub metadata: Metadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub metadata: Metadata,
    pub source: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Markdown,
    Code,
}

/// Always-empty metadata object (`{}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: Metadata::default(),
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }
}

impl Cell {
    pub fn markdown(text: &str) -> Self {
        Self::new(CellType::Markdown, text)
    }

    pub fn code(text: &str) -> Self {
        Self::new(CellType::Code, text)
    }

    fn new(cell_type: CellType, text: &str) -> Self {
        Self {
            cell_type,
            metadata: Metadata::default(),
            source: split_source(text),
        }
    }
}

/// Split cell text into nbformat source lines.
///
/// Every line keeps its trailing newline except the last; a trailing newline
/// on the whole text does not produce an empty final line.
pub fn split_source(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_owned).collect();
    if let Some(last) = lines.last_mut() {
        if last.ends_with('\n') {
            last.truncate(last.len() - 1);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_newlines_except_last() {
        assert_eq!(split_source("a\nb\nc"), vec!["a\n", "b\n", "c"]);
        assert_eq!(split_source("a\nb\n"), vec!["a\n", "b"]);
    }

    #[test]
    fn split_preserves_blank_lines() {
        assert_eq!(split_source("a\n\nb"), vec!["a\n", "\n", "b"]);
    }

    #[test]
    fn split_of_empty_text_is_empty() {
        assert!(split_source("").is_empty());
    }

    #[test]
    fn cell_type_serializes_lowercase() {
        let json = serde_json::to_value(Cell::markdown("# Title")).unwrap();
        assert_eq!(json["cell_type"], "markdown");
        assert_eq!(json["metadata"], serde_json::json!({}));
        assert_eq!(json["source"], serde_json::json!(["# Title"]));
    }
}
