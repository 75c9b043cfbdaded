//! Catalog data types
//!
//! Both JSON documents are objects keyed by category name. Key order in the
//! source document is render order, so they deserialize into an `IndexMap`
//! instead of a hash map. A repeated key keeps its first position and takes
//! the last value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One tool card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    /// Relative path, used verbatim in both the source and hosted links
    pub url: String,
    /// Banner image path; kept on rewrite, not rendered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl ToolEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            banner: None,
        }
    }
}

/// Category name to ordered tool list.
pub type ToolCatalog = IndexMap<String, Vec<ToolEntry>>;

/// Category name to icon class token (e.g. `bi-speedometer`).
pub type IconMap = IndexMap<String, String>;

pub trait ToolCatalogExt {
    /// Total number of tools across all categories.
    fn tool_count(&self) -> usize;
}

impl ToolCatalogExt for ToolCatalog {
    fn tool_count(&self) -> usize {
        self.values().map(Vec::len).sum()
    }
}

pub trait IconMapExt {
    /// Icon for a category; empty when the category has none.
    fn icon_for(&self, category: &str) -> &str;
}

impl IconMapExt for IconMap {
    fn icon_for(&self, category: &str) -> &str {
        self.get(category).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preserves_document_order() {
        let catalog: ToolCatalog = serde_json::from_str(
            r#"{
                "Zeta": [],
                "Alpha": [{"name": "A", "description": "d", "url": "tools/a"}],
                "Mid": []
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.keys().map(String::as_str).collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(catalog.tool_count(), 1);
    }

    #[test]
    fn test_repeated_key_keeps_position_takes_last_value() {
        let icons: IconMap = serde_json::from_str(r#"{"A": "bi-1", "B": "bi-2", "A": "bi-3"}"#).unwrap();
        assert_eq!(icons.keys().map(String::as_str).collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(icons.icon_for("A"), "bi-3");
    }

    #[test]
    fn test_icon_for_missing_category_is_empty() {
        let icons: IconMap = serde_json::from_str(r#"{"Multimeters": "bi-speedometer"}"#).unwrap();
        assert_eq!(icons.icon_for("Multimeters"), "bi-speedometer");
        assert_eq!(icons.icon_for("Oscilloscopes"), "");
    }

    #[test]
    fn test_entry_requires_url() {
        let result: Result<ToolCatalog, _> = serde_json::from_str(r#"{"A": [{"name": "x", "description": "y"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_array_document_rejected() {
        let result: Result<IconMap, _> = serde_json::from_str(r#"["bi-1"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_banner_kept_but_optional() {
        let catalog: ToolCatalog = serde_json::from_str(
            r#"{"A": [{"name": "x", "description": "y", "url": "u", "banner": "images/a/x.png"}]}"#,
        )
        .unwrap();
        let entry = &catalog.get("A").unwrap()[0];
        assert_eq!(entry.banner.as_deref(), Some("images/a/x.png"));

        let plain = serde_json::to_string(&ToolEntry::new("n", "d", "u")).unwrap();
        assert!(!plain.contains("banner"));
    }

    #[test]
    fn test_serialize_keeps_order() {
        let mut icons = IconMap::new();
        icons.insert("Second".to_string(), "bi-2".to_string());
        icons.insert("First".to_string(), "bi-1".to_string());
        assert_eq!(serde_json::to_string(&icons).unwrap(), r#"{"Second":"bi-2","First":"bi-1"}"#);
    }
}
