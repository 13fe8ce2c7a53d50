//! The taxonomy node type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Free-form attribute map attached to a concept.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A named node in the ontology: category tag, attributes, and a single optional parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    /// Classification tag such as "root", "main_category" or "attribute". Not validated.
    pub category: String,
    pub attributes: Attributes,
    /// `None` only for the root.
    pub parent: Option<String>,
    /// Names of concepts whose `parent` is this concept. Maintained by the store.
    pub children: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Concept {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        attributes: Attributes,
        parent: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            category: category.into(),
            attributes,
            parent,
            children: BTreeSet::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Merge `attributes` into this concept (new keys win) and bump `modified_at`.
    pub fn update(&mut self, attributes: Attributes) {
        self.attributes.extend(attributes);
        self.modified_at = Utc::now();
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_concept_timestamps_match() {
        let c = Concept::new("Silk", "attribute", Attributes::new(), Some("Material".into()));
        assert_eq!(c.created_at, c.modified_at);
        assert!(c.children.is_empty());
        assert!(!c.is_root());
    }

    #[test]
    fn test_update_merges_and_bumps_modified() {
        let mut attrs = Attributes::new();
        attrs.insert("origin".into(), json!("China"));
        attrs.insert("weight".into(), json!("light"));
        let mut c = Concept::new("Silk", "attribute", attrs, Some("Material".into()));
        let created = c.created_at;

        let mut patch = Attributes::new();
        patch.insert("weight".into(), json!("medium"));
        patch.insert("sheen".into(), json!(true));
        c.update(patch);

        assert_eq!(c.attributes["origin"], json!("China"));
        assert_eq!(c.attributes["weight"], json!("medium"));
        assert_eq!(c.attributes["sheen"], json!(true));
        assert_eq!(c.created_at, created);
        assert!(c.modified_at >= created);
    }
}
