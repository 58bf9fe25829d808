//! Typed templates for every generated artifact.
//!
//! Each template is a record with one field per token, so a template can
//! only be rendered once every value it needs has been supplied. Rendering
//! is pure: dates are fields, not clock reads.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::domain::entities::layout::ProjectLayout;
use crate::domain::entities::notebook::{Cell, Notebook};

/// Date format embedded in generated files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A template that renders to flat text.
pub trait TextTemplate {
    fn render(&self) -> String;
}

// ============================================================================
// README
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ReadmeTemplate<'a> {
    pub project_name: &'a str,
    pub generated_on: NaiveDate,
    pub layout: &'a ProjectLayout,
}

impl ReadmeTemplate<'_> {
    /// `│── dir/` lines with subdirectories indented one level.
    pub fn structure_text(&self) -> String {
        let mut out = format!("{}/\n", self.project_name);
        for entry in self.layout.entries() {
            let _ = writeln!(out, "│── {}/", entry.name);
            for sub in &entry.subdirs {
                let _ = writeln!(out, "│   ├── {}/", sub.name);
            }
        }
        out.push_str("│── README.md\n│── .gitignore\n");
        out
    }

    /// One paragraph per top-level directory, followed by its subdirectories.
    pub fn breakdown_text(&self) -> String {
        let mut out = String::new();
        for entry in self.layout.entries() {
            let _ = write!(out, "📌 **`{}/`**", entry.name);
            push_description(&mut out, &entry.description);
            for sub in &entry.subdirs {
                let _ = write!(out, "- **`{}/`**", sub.name);
                push_description(&mut out, &sub.description);
            }
            out.push('\n');
        }
        out
    }
}

fn push_description(out: &mut String, description: &str) {
    if description.is_empty() {
        out.push('\n');
    } else {
        let _ = writeln!(out, " → {description}");
    }
}

impl TextTemplate for ReadmeTemplate<'_> {
    fn render(&self) -> String {
        format!(
            "# {name}\n\
             ## Overview\n\
             This project is structured for efficient data science and machine learning \
             workflows. It includes well-organized directories for raw and processed data, \
             notebooks, scripts, models, and outputs.\n\
             \n\
             _Generated on {date}._\n\
             \n\
             ## 📂 Project Structure\n\
             \n\
             ```text\n\
             {structure}\
             ```\n\
             \n\
             ### **🔹 Directory Breakdown**\n\
             {breakdown}\
             ---\n",
            name = self.project_name,
            date = self.generated_on.format(DATE_FORMAT),
            structure = self.structure_text(),
            breakdown = self.breakdown_text(),
        )
    }
}

// ============================================================================
// .gitignore
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct GitignoreTemplate<'a> {
    pub layout: &'a ProjectLayout,
}

const GITIGNORE_BASE: &str = "\
# Ignore virtual environments and caches
venv/
.venv/
__pycache__/
.ipynb_checkpoints/
.DS_Store
cache
";

impl TextTemplate for GitignoreTemplate<'_> {
    fn render(&self) -> String {
        let mut out = String::from(GITIGNORE_BASE);
        out.push_str("\n# Project directories (! = tracked)\n");
        for entry in self.layout.entries() {
            if entry.ignored {
                let _ = writeln!(out, "{}/", entry.name);
            } else {
                let _ = writeln!(out, "!{}/", entry.name);
            }
        }
        out
    }
}

// ============================================================================
// Python script boilerplate
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ScriptTemplate<'a> {
    pub script_name: &'a str,
    pub created_on: NaiveDate,
}

impl TextTemplate for ScriptTemplate<'_> {
    fn render(&self) -> String {
        format!(
            r#"#!/usr/bin/env python3
"""
TITLE: {name}
AUTHOR: [Your Name]
DATE: {date}
DESCRIPTION: [Brief description of what this script does]
"""
import os
import sys

# Set project directory dynamically
PROJECT_DIR = os.path.abspath(os.path.join(os.path.dirname(__file__), ".."))

# Ensure PROJECT_DIR is in sys.path for module imports
if PROJECT_DIR not in sys.path:
    sys.path.insert(0, PROJECT_DIR)

# Append src/ to Python's module search path
sys.path.append(os.path.join(PROJECT_DIR, "src"))

# Define subdirectories
DATA_DIR = os.path.join(PROJECT_DIR, "data")
FIGURE_DIR = os.path.join(PROJECT_DIR, "outputs", "figures")

# Import logging
from logging_setup import setup_logging
logger = setup_logging(log_dir="logs", log_filename="{name}.log")
logger.info(f"Script initialized: {{os.path.basename(__file__)}}")

# Your code here...
"#,
            name = self.script_name,
            date = self.created_on.format(DATE_FORMAT),
        )
    }
}

// ============================================================================
// src/ module boilerplate
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ModuleTemplate<'a> {
    pub module_name: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub created_on: NaiveDate,
}

impl TextTemplate for ModuleTemplate<'_> {
    fn render(&self) -> String {
        format!(
            r#""""
TITLE: {title}
AUTHOR: [Your Name]
DATE: {date}
DESCRIPTION: {description}
"""
import os
import sys

# Get project directory dynamically
PROJECT_DIR = os.path.dirname(os.path.dirname(os.path.abspath(__file__)))

# Ensure PROJECT_DIR is in sys.path for imports
if PROJECT_DIR not in sys.path:
    sys.path.insert(0, PROJECT_DIR)

# Append src/ to Python's module search path
sys.path.append(os.path.join(PROJECT_DIR, "src"))

# Import logging
from logging_setup import setup_logging
logger = setup_logging(log_dir="logs", log_filename="{module}.log")
logger.info(f"Module initialized: {{os.path.basename(__file__)}}")

# Your module functions here...
"#,
            title = self.title,
            description = self.description,
            module = self.module_name,
            date = self.created_on.format(DATE_FORMAT),
        )
    }
}

// ============================================================================
// logging_setup.py
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct LoggingSetupTemplate<'a> {
    pub default_log_file: &'a str,
}

impl TextTemplate for LoggingSetupTemplate<'_> {
    fn render(&self) -> String {
        format!(
            r#"import logging
import os


def setup_logging(log_dir="logs", log_filename="{log_file}"):
    # Project root is the parent of this file's directory
    try:
        project_root = os.path.abspath(os.path.join(os.path.dirname(__file__), ".."))
    except NameError:
        project_root = os.getcwd()

    log_dir = os.path.join(project_root, log_dir)
    os.makedirs(log_dir, exist_ok=True)
    log_path = os.path.join(log_dir, log_filename)

    # Prevent duplicate handlers
    if not logging.getLogger().hasHandlers():
        logging.basicConfig(
            filename=log_path,
            filemode="a",
            format="%(asctime)s - %(levelname)s - %(message)s",
            level=logging.INFO,
        )

    return logging.getLogger("project")


if __name__ == "__main__":
    logger = setup_logging()
    logger.info("Logging setup is working!")
"#,
            log_file = self.default_log_file,
        )
    }
}

// ============================================================================
// Notebook (structured)
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct NotebookTemplate<'a> {
    pub notebook_name: &'a str,
    pub created_on: NaiveDate,
}

impl NotebookTemplate<'_> {
    pub fn markdown_text(&self) -> String {
        format!(
            "## TITLE: {name}\n\
             ### AUTHOR: [Your Name]\n\
             ### DATE: {date}\n\
             ##### DESCRIPTION: [Brief description of what this notebook does]\n",
            name = self.notebook_name,
            date = self.created_on.format(DATE_FORMAT),
        )
    }

    pub fn code_text(&self) -> String {
        format!(
            r#"import os
import sys

# Project directory structure
PROJECT_DIR = os.path.dirname(os.path.abspath(""))
DATA_DIR = os.path.join(PROJECT_DIR, "data")
FIGURE_DIR = os.path.join(PROJECT_DIR, "outputs", "figures")

# Append src/ to Python's module search path
sys.path.append(os.path.join(PROJECT_DIR, "src"))

# Setup logging
from logging_setup import setup_logging
logger = setup_logging(log_dir="logs", log_filename="{name}.log")
logger.info("Notebook initialized")

# Your code here...
"#,
            name = self.notebook_name,
        )
    }

    /// One markdown cell, then one code cell.
    pub fn render(&self) -> Notebook {
        Notebook::new(vec![
            Cell::markdown(&self.markdown_text()),
            Cell::code(&self.code_text()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::layout::LayoutEntry;
    use crate::domain::entities::notebook::CellType;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
    }

    #[test]
    fn readme_mentions_project_and_date() {
        let layout = ProjectLayout::data_science();
        let readme = ReadmeTemplate {
            project_name: "river-turbidity",
            generated_on: date(),
            layout: &layout,
        }
        .render();

        assert!(readme.starts_with("# river-turbidity\n"));
        assert!(readme.contains("2026-03-14"));
    }

    #[test]
    fn readme_lists_top_level_entries_in_layout_order() {
        let layout = ProjectLayout::data_science();
        let readme = ReadmeTemplate {
            project_name: "p",
            generated_on: date(),
            layout: &layout,
        }
        .render();

        let breakdown = &readme[position(&readme, "Directory Breakdown")..];
        let positions: Vec<_> = layout
            .top_level()
            .map(|name| position(breakdown, &format!("📌 **`{name}/`**")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn structure_text_indents_subdirectories() {
        let layout = ProjectLayout::new(vec![
            LayoutEntry::new("data", "").with_subdir("raw", ""),
            LayoutEntry::new("notebooks", ""),
        ])
        .unwrap();
        let tree = ReadmeTemplate {
            project_name: "demo",
            generated_on: date(),
            layout: &layout,
        }
        .structure_text();

        assert!(tree.starts_with("demo/\n│── data/\n│   ├── raw/\n│── notebooks/\n"));
    }

    #[test]
    fn breakdown_omits_arrow_without_description() {
        let layout = ProjectLayout::new(vec![LayoutEntry::new("scratch", "")]).unwrap();
        let text = ReadmeTemplate {
            project_name: "demo",
            generated_on: date(),
            layout: &layout,
        }
        .breakdown_text();
        assert_eq!(text, "📌 **`scratch/`**\n\n");
    }

    #[test]
    fn gitignore_lists_every_top_level_entry_in_order() {
        let layout = ProjectLayout::data_science();
        let ignore = GitignoreTemplate { layout: &layout }.render();

        let section = &ignore[position(&ignore, "# Project directories")..];
        let lines: Vec<_> = section.lines().skip(1).collect();
        assert_eq!(
            lines,
            [
                "data/",
                "!notebooks/",
                "!scripts/",
                "!src/",
                "!tests/",
                "logs/",
                "outputs/",
                "!config/",
                "!models/"
            ]
        );
        assert!(ignore.contains("__pycache__/"));
    }

    #[test]
    fn script_template_embeds_date_and_log_name() {
        let text = ScriptTemplate {
            script_name: "clean_data",
            created_on: date(),
        }
        .render();
        assert!(text.contains("DATE: 2026-03-14"));
        assert!(text.contains(r#"log_filename="clean_data.log""#));
        assert!(text.contains("{os.path.basename(__file__)}"));
    }

    #[test]
    fn module_template_embeds_title_and_description() {
        let text = ModuleTemplate {
            module_name: "features",
            title: "Feature engineering",
            description: "Builds model features",
            created_on: date(),
        }
        .render();
        assert!(text.starts_with("\"\"\"\nTITLE: Feature engineering\n"));
        assert!(text.contains("DESCRIPTION: Builds model features"));
    }

    #[test]
    fn logging_template_uses_default_file() {
        let text = LoggingSetupTemplate {
            default_log_file: "river.log",
        }
        .render();
        assert!(text.contains(r#"def setup_logging(log_dir="logs", log_filename="river.log"):"#));
    }

    #[test]
    fn notebook_has_markdown_then_code_with_line_sources() {
        let nb = NotebookTemplate {
            notebook_name: "eda",
            created_on: date(),
        }
        .render();

        assert_eq!(nb.cells.len(), 2);
        assert_eq!(nb.cells[0].cell_type, CellType::Markdown);
        assert_eq!(nb.cells[1].cell_type, CellType::Code);
        assert_eq!(nb.cells[0].source[0], "## TITLE: eda\n");
        assert!(nb.cells.iter().all(|c| c.source.len() > 1));
        assert_eq!(nb.nbformat, 4);
        assert_eq!(nb.nbformat_minor, 2);
    }

    #[test]
    fn rendering_is_deterministic() {
        let layout = ProjectLayout::data_science();
        let readme = ReadmeTemplate {
            project_name: "same",
            generated_on: date(),
            layout: &layout,
        };
        assert_eq!(readme.render(), readme.render());
    }
}
