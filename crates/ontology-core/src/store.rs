//! Concept registry and the parent/child graph derived from it.

use crate::concept::{Attributes, Concept};
use crate::error::{ConstructionError, OntologyError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Conventional name of the root concept.
pub const DEFAULT_ROOT: &str = "Fashion";

static NO_CHILDREN: BTreeSet<String> = BTreeSet::new();

/// Owns every concept and the directed parent → child edges between them.
///
/// `edges` is keyed by parent name and may hold entries for parents that are
/// not (yet) in `concepts`. Those dangling edges are adopted into the parent's
/// `children` set as soon as the parent is added.
#[derive(Debug, Clone)]
pub struct ConceptStore {
    root: String,
    concepts: BTreeMap<String, Concept>,
    edges: BTreeMap<String, BTreeSet<String>>,
}

/// A referential problem found by [`ConceptStore::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// The root label does not name a concept in the store.
    MissingRoot { root: String },
    /// A concept points at a parent that is not in the store.
    DanglingParent { concept: String, parent: String },
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRoot { root } => write!(f, "root concept '{}' is missing", root),
            Self::DanglingParent { concept, parent } => {
                write!(f, "'{}' references unknown parent '{}'", concept, parent)
            }
        }
    }
}

impl Default for ConceptStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl ConceptStore {
    /// Create an empty store whose root concept will be called `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            concepts: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Name of the root concept (the only concept allowed to have no parent).
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.concepts.contains_key(name)
    }

    pub fn get_concept(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }

    /// All concepts, ordered by name.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Add a concept, overwriting any existing concept with the same name.
    ///
    /// An unknown `parent` is accepted: the edge is recorded and the parent
    /// picks the child up once it is added. Placement is checked before any
    /// mutation, so an error leaves the store untouched.
    pub fn add_concept(
        &mut self,
        name: &str,
        category: &str,
        attributes: Attributes,
        parent: Option<&str>,
    ) -> Result<()> {
        self.insert(Concept::new(
            name,
            category,
            attributes,
            parent.map(str::to_string),
        ))
    }

    /// Insert a fully built concept. Its `children` are recomputed from the edge set.
    pub(crate) fn insert(&mut self, mut concept: Concept) -> Result<()> {
        self.check_placement(&concept.name, concept.parent.as_deref())
            .map_err(|reason| OntologyError::construction(&concept.name, reason))?;

        let name = concept.name.clone();
        if let Some(old_parent) = self.concepts.get(&name).and_then(|c| c.parent.clone())
            && concept.parent.as_ref() != Some(&old_parent)
        {
            self.unlink(&old_parent, &name);
        }

        concept.children = self.edges.get(&name).cloned().unwrap_or_default();

        if let Some(parent) = &concept.parent {
            self.edges
                .entry(parent.clone())
                .or_default()
                .insert(name.clone());
            match self.concepts.get_mut(parent) {
                Some(p) => {
                    p.children.insert(name.clone());
                }
                None => tracing::warn!("concept {} added under unknown parent {}", name, parent),
            }
        }

        tracing::debug!("added concept {} under parent {:?}", name, concept.parent);
        self.concepts.insert(name, concept);
        Ok(())
    }

    fn check_placement(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> std::result::Result<(), ConstructionError> {
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        let Some(parent) = parent else {
            if name != self.root {
                return Err(ConstructionError::MissingParent {
                    root: self.root.clone(),
                });
            }
            return Ok(());
        };
        if name == self.root {
            return Err(ConstructionError::RootWithParent);
        }
        if parent == name {
            return Err(ConstructionError::SelfParent);
        }
        // Walk up from the proposed parent; meeting `name` means the edge closes a loop.
        let mut current = self.concepts.get(parent);
        while let Some(c) = current
            && let Some(up) = c.parent.as_deref()
        {
            if up == name {
                return Err(ConstructionError::Cycle {
                    parent: parent.to_string(),
                });
            }
            current = self.concepts.get(up);
        }
        Ok(())
    }

    fn unlink(&mut self, parent: &str, child: &str) {
        if let Some(set) = self.edges.get_mut(parent) {
            set.remove(child);
            if set.is_empty() {
                self.edges.remove(parent);
            }
        }
        if let Some(p) = self.concepts.get_mut(parent) {
            p.children.remove(child);
        }
    }

    /// Merge attributes into an existing concept. Returns false if `name` is unknown.
    pub fn update_concept(&mut self, name: &str, attributes: Attributes) -> bool {
        match self.concepts.get_mut(name) {
            Some(concept) => {
                concept.update(attributes);
                tracing::debug!("updated attributes of {}", name);
                true
            }
            None => false,
        }
    }

    /// Direct children of `name`; empty when the name is unknown.
    pub fn get_children(&self, name: &str) -> &BTreeSet<String> {
        self.concepts
            .get(name)
            .map_or(&NO_CHILDREN, |c| &c.children)
    }

    /// Root-first path of names from the root down to `name`.
    ///
    /// The root label appears exactly once: `ancestry(root) == [root]`, and an
    /// unknown name yields `[root]`. If the walk stops at a concept whose parent
    /// is missing, the root label is still prepended.
    pub fn get_ancestry(&self, name: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.concepts.get(name);
        while let Some(c) = current {
            path.push(c.name.clone());
            current = c.parent.as_deref().and_then(|p| self.concepts.get(p));
        }
        if path.last() != Some(&self.root) {
            path.push(self.root.clone());
        }
        path.reverse();
        path
    }

    /// Whether `name` is a graph node: a concept, or a parent some concept points at.
    pub(crate) fn is_node(&self, name: &str) -> bool {
        self.concepts.contains_key(name) || self.edges.contains_key(name)
    }

    /// Outgoing edges of `name`, present for dangling parents as well.
    pub(crate) fn edge_children(&self, name: &str) -> &BTreeSet<String> {
        self.edges.get(name).unwrap_or(&NO_CHILDREN)
    }

    /// Every parent → child edge, including edges whose parent is not yet a concept.
    pub fn relationships(&self) -> Vec<(String, String)> {
        self.edges
            .iter()
            .flat_map(|(parent, children)| {
                children
                    .iter()
                    .map(move |child| (parent.clone(), child.clone()))
            })
            .collect()
    }

    /// Report referential problems: a missing root or parents that never arrived.
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        if !self.concepts.is_empty() && !self.concepts.contains_key(&self.root) {
            issues.push(IntegrityIssue::MissingRoot {
                root: self.root.clone(),
            });
        }
        for concept in self.concepts.values() {
            if let Some(parent) = &concept.parent
                && !self.concepts.contains_key(parent)
            {
                issues.push(IntegrityIssue::DanglingParent {
                    concept: concept.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        issues
    }

    /// Concept names that look like `query`, best match first.
    pub fn closest_names(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .concepts
            .keys()
            .map(|name| {
                (
                    strsim::normalized_levenshtein(&query, &name.to_lowercase()),
                    name.as_str(),
                )
            })
            .filter(|(sim, _)| *sim > 0.5)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Drop every concept and edge and switch to a new root label.
    pub(crate) fn reset(&mut self, root: String) {
        self.concepts.clear();
        self.edges.clear();
        self.root = root;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_store() -> ConceptStore {
        let mut store = ConceptStore::default();
        store
            .add_concept("Fashion", "root", Attributes::new(), None)
            .unwrap();
        store
            .add_concept("Apparel", "main_category", Attributes::new(), Some("Fashion"))
            .unwrap();
        store
            .add_concept("Dresses", "sub_category", Attributes::new(), Some("Apparel"))
            .unwrap();
        store
    }

    #[test]
    fn test_unknown_parent_is_adopted_later() {
        let mut store = ConceptStore::default();
        store
            .add_concept("Silk", "attribute", Attributes::new(), Some("Material"))
            .unwrap();
        assert_eq!(
            store.relationships(),
            vec![("Material".to_string(), "Silk".to_string())]
        );
        assert!(store.get_children("Material").is_empty());

        store
            .add_concept("Fashion", "root", Attributes::new(), None)
            .unwrap();
        store
            .add_concept("Material", "attribute_category", Attributes::new(), Some("Fashion"))
            .unwrap();
        assert!(store.get_children("Material").contains("Silk"));
        assert!(store.validate().is_empty());
    }

    #[test]
    fn test_overwrite_moves_child_between_parents() {
        let mut store = small_store();
        store
            .add_concept("Footwear", "main_category", Attributes::new(), Some("Fashion"))
            .unwrap();
        store
            .add_concept("Dresses", "sub_category", Attributes::new(), Some("Footwear"))
            .unwrap();

        assert!(!store.get_children("Apparel").contains("Dresses"));
        assert!(store.get_children("Footwear").contains("Dresses"));
        assert!(
            !store
                .relationships()
                .contains(&("Apparel".to_string(), "Dresses".to_string()))
        );
    }

    #[test]
    fn test_overwrite_keeps_existing_children() {
        let mut store = small_store();
        store
            .add_concept("Apparel", "main_category", Attributes::new(), Some("Fashion"))
            .unwrap();
        assert!(store.get_children("Apparel").contains("Dresses"));
    }

    #[test]
    fn test_rejects_cycle_without_mutation() {
        let mut store = small_store();
        let before = store.get_concept("Apparel").cloned();
        let err = store
            .add_concept("Apparel", "main_category", Attributes::new(), Some("Dresses"))
            .unwrap_err();
        assert!(matches!(
            err,
            OntologyError::Construction {
                reason: ConstructionError::Cycle { .. },
                ..
            }
        ));
        assert_eq!(store.get_concept("Apparel").cloned(), before);
    }

    #[test]
    fn test_rejects_bad_placements() {
        let mut store = small_store();
        let reasons: Vec<ConstructionError> = [
            ("", Some("Fashion")),
            ("Tops", None),
            ("Tops", Some("Tops")),
            ("Fashion", Some("Apparel")),
        ]
        .into_iter()
        .map(|(name, parent)| {
            match store.add_concept(name, "x", Attributes::new(), parent) {
                Err(OntologyError::Construction { reason, .. }) => reason,
                other => panic!("expected construction error, got {:?}", other),
            }
        })
        .collect();
        assert_eq!(
            reasons,
            vec![
                ConstructionError::EmptyName,
                ConstructionError::MissingParent {
                    root: "Fashion".into()
                },
                ConstructionError::SelfParent,
                ConstructionError::RootWithParent,
            ]
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_closest_names() {
        let store = small_store();
        assert_eq!(store.closest_names("dress", 3), vec!["Dresses".to_string()]);
        assert!(store.closest_names("zzzz", 3).is_empty());
    }

    #[test]
    fn test_validate_reports_missing_root_and_dangling_parent() {
        let mut store = ConceptStore::new("Fashion");
        store
            .add_concept("Denim", "attribute", Attributes::new(), Some("Material"))
            .unwrap();
        let issues = store.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&IntegrityIssue::MissingRoot {
            root: "Fashion".into()
        }));
        assert!(issues.contains(&IntegrityIssue::DanglingParent {
            concept: "Denim".into(),
            parent: "Material".into()
        }));
    }
}
