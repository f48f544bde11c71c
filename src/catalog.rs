//! Content catalog data model.
//!
//! The viewer renders a fixed catalog of sections, each holding subsections
//! with code examples, tips and warnings. A catalog can also be supplied as
//! a JSON file on the command line; serde handles deserialization.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// A single code snippet inside a subsection
#[derive(Debug, Clone, Deserialize)]
pub struct CodeExample {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub code: String,
}

fn default_language() -> String {
    "rust".to_string()
}

/// A titled block of examples under a section
#[derive(Debug, Clone, Deserialize)]
pub struct Subsection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub examples: Vec<CodeExample>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A top-level, anchorable content block; these are what the sidebar lists
/// and what the scroll-spy controller tracks
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

/// The whole cheat sheet
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub sections: Vec<Section>,
}

impl Catalog {
    /// Load a catalog from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the structural requirements the rest of the app relies on:
    /// at least one section, every section id non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("Catalog has no sections");
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                bail!("Section {:?} has an empty id", section.title);
            }
            if !seen.insert(section.id.as_str()) {
                bail!("Duplicate section id {:?}", section.id);
            }
        }
        Ok(())
    }

    /// Ordered section id sequence, as consumed by the scroll spy
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Look up a section by id
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// First code example of a section, if any; used by copy-to-clipboard
    pub fn first_example(&self, section_id: &str) -> Option<&CodeExample> {
        self.section(section_id)?
            .subsections
            .iter()
            .find_map(|sub| sub.examples.first())
    }

    /// Total number of code examples across the catalog
    pub fn example_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.subsections)
            .map(|sub| sub.examples.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            subsections: Vec::new(),
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let catalog = Catalog { sections: vec![] };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalog = Catalog {
            sections: vec![section("intro"), section("intro")],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_empty_id_rejected() {
        let catalog = Catalog {
            sections: vec![section("  ")],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_section_ids_preserve_order() {
        let catalog = Catalog {
            sections: vec![section("b"), section("a"), section("c")],
        };
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.section_ids(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_catalog_json_parsing() {
        let json = r#"{
            "sections": [{
                "id": "basics",
                "title": "Basics",
                "subsections": [{
                    "id": "hello",
                    "title": "Hello",
                    "examples": [{ "code": "fn main() {}" }]
                }]
            }]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.sections[0].subsections[0].examples[0].language, "rust");
        assert_eq!(catalog.first_example("basics").unwrap().code, "fn main() {}");
        assert_eq!(catalog.example_count(), 1);
    }
}
