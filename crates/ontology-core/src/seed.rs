//! Populate a store from a [`SeedTaxonomy`].

use crate::concept::Attributes;
use crate::config::SeedTaxonomy;
use crate::error::Result;
use crate::store::ConceptStore;

impl ConceptStore {
    /// Build a store containing the root and every seed group, in declaration order.
    ///
    /// Names that appear in more than one group are overwritten, so they end up
    /// under the last group that lists them.
    pub fn seeded(taxonomy: &SeedTaxonomy) -> Result<Self> {
        let mut store = Self::new(taxonomy.root.clone());
        store.seed(taxonomy)?;
        Ok(store)
    }

    fn seed(&mut self, taxonomy: &SeedTaxonomy) -> Result<()> {
        self.add_concept(&taxonomy.root, "root", Attributes::new(), None)?;
        for group in &taxonomy.groups {
            let parent = group.parent.as_deref().unwrap_or(&taxonomy.root);
            self.add_concept(&group.name, &group.category, Attributes::new(), Some(parent))?;
            for child in &group.children {
                self.add_concept(
                    child,
                    &group.child_category,
                    Attributes::new(),
                    Some(&group.name),
                )?;
            }
        }
        tracing::debug!("seeded {} concepts under {}", self.len(), taxonomy.root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedGroup;

    #[test]
    fn test_default_seed_shape() {
        let store = ConceptStore::seeded(&SeedTaxonomy::default()).unwrap();
        // 1 root + 4 main + 8 sub + 8 attribute categories + 38 distinct attribute values
        // (Casual and Formal are listed twice)
        assert_eq!(store.len(), 59);
        assert_eq!(store.get_children("Fashion").len(), 12);
        assert_eq!(store.get_concept("Denim").unwrap().category, "attribute");
        assert_eq!(store.get_concept("Tops").unwrap().category, "sub_category");
        assert!(store.validate().is_empty());
    }

    #[test]
    fn test_repeated_seed_names_land_under_last_group() {
        let store = ConceptStore::seeded(&SeedTaxonomy::default()).unwrap();
        assert_eq!(
            store.get_concept("Casual").unwrap().parent.as_deref(),
            Some("Occasion")
        );
        assert!(!store.get_children("Style").contains("Casual"));
        assert!(store.get_children("Occasion").contains("Casual"));
    }

    #[test]
    fn test_nested_group_parent() {
        let taxonomy = SeedTaxonomy {
            root: "Fashion".into(),
            groups: vec![
                SeedGroup {
                    name: "Apparel".into(),
                    category: "main_category".into(),
                    parent: None,
                    children: vec!["Dresses".into()],
                    child_category: "sub_category".into(),
                },
                SeedGroup {
                    name: "Dress Length".into(),
                    category: "attribute_category".into(),
                    parent: Some("Dresses".into()),
                    children: vec!["Mini".into(), "Maxi".into()],
                    child_category: "attribute".into(),
                },
            ],
        };
        let store = ConceptStore::seeded(&taxonomy).unwrap();
        assert_eq!(
            store.get_ancestry("Maxi"),
            vec!["Fashion", "Apparel", "Dresses", "Dress Length", "Maxi"]
        );
    }
}
