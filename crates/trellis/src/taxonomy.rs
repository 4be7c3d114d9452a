//! Hierarchy level taxonomy and title-based level inference.
//!
//! Levels classify a node's abstraction tier: 0 is the most abstract,
//! increasing numbers are more concrete. When a node declaration omits an
//! explicit level, a best-effort level can be inferred from keywords in
//! its title. The keyword table is domain-specific, so it is ordinary
//! data: callers may deserialize their own table from YAML instead of
//! using the built-in default.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One level of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Numeric level, 0 = most abstract
    pub level: u8,

    /// Display name, e.g. "vision"
    pub name: String,

    /// Title keywords that suggest this level (matched case-insensitively)
    pub keywords: Vec<String>,
}

/// Ordered table of hierarchy levels with title keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Level definitions in ascending level order
    pub levels: Vec<LevelDef>,
}

impl Taxonomy {
    /// Load a taxonomy from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Taxonomy`] if the document does not
    /// deserialize into a level table.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Infer a hierarchy level from a node title.
    ///
    /// Scans levels in ascending order and returns the first level with a
    /// keyword contained in the title (case-insensitive). Returns `None`
    /// when no keyword matches.
    #[must_use]
    pub fn infer_level(&self, title: &str) -> Option<u8> {
        let title = title.to_lowercase();
        for def in &self.levels {
            if def
                .keywords
                .iter()
                .any(|kw| title.contains(&kw.to_lowercase()))
            {
                return Some(def.level);
            }
        }
        None
    }

    /// Display name for a level, if the taxonomy defines it
    #[must_use]
    pub fn level_name(&self, level: u8) -> Option<&str> {
        self.levels
            .iter()
            .find(|def| def.level == level)
            .map(|def| def.name.as_str())
    }
}

impl Default for Taxonomy {
    /// The reference five-tier taxonomy: vision, architecture, module,
    /// component, task.
    fn default() -> Self {
        fn def(level: u8, name: &str, keywords: &[&str]) -> LevelDef {
            LevelDef {
                level,
                name: name.to_string(),
                keywords: keywords.iter().map(ToString::to_string).collect(),
            }
        }

        Self {
            levels: vec![
                def(0, "vision", &["vision", "goal"]),
                def(1, "architecture", &["architecture", "design"]),
                def(2, "module", &["module", "subsystem"]),
                def(3, "component", &["component", "service"]),
                def(4, "task", &["task", "implement"]),
            ],
        }
    }
}
