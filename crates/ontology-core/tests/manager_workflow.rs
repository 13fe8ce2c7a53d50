use ontology_core::config::SeedTaxonomy;
use ontology_core::store::ConceptStore;
use ontology_core::{Attributes, OntologyManager};
use serde_json::json;

fn manager() -> OntologyManager {
    OntologyManager::with_seed(&SeedTaxonomy::default()).unwrap()
}

#[test]
fn test_suggest_existing_concept_is_refused() {
    let mut m = manager();
    assert!(!m.suggest_new_concept("Denim", "attribute", None, Some("Material")));
    assert_eq!(m.pending_count(), 0);
}

#[test]
fn test_suggest_new_concept_is_queued() {
    let mut m = manager();
    assert!(m.suggest_new_concept("Linen", "attribute", None, Some("Material")));
    let pending = m.review_pending_concepts();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "Linen");
    assert_eq!(pending[0].parent.as_deref(), Some("Material"));
    assert!(!m.store().contains("Linen"));
}

#[test]
fn test_approve_on_empty_queue_is_false() {
    let mut m = manager();
    assert!(!m.approve_concept("Linen").unwrap());
    let mut bare = OntologyManager::new(ConceptStore::default());
    assert!(!bare.approve_concept("Anything").unwrap());
}

#[test]
fn test_approve_commits_and_dequeues() {
    let mut m = manager();
    let mut attrs = Attributes::new();
    attrs.insert("season".into(), json!("summer"));
    m.suggest_new_concept("Linen", "attribute", Some(attrs), Some("Material"));
    m.suggest_new_concept("Kaftans", "sub_category", None, Some("Apparel"));

    assert!(m.approve_concept("Linen").unwrap());
    assert_eq!(m.pending_count(), 1);
    assert_eq!(m.review_pending_concepts()[0].name, "Kaftans");

    let store = m.store();
    assert!(store.get_children("Material").contains("Linen"));
    assert_eq!(store.get_concept("Linen").unwrap().attributes["season"], "summer");
    assert_eq!(
        store.get_ancestry("Linen"),
        vec!["Fashion", "Material", "Linen"]
    );

    // Once committed the name can no longer be suggested.
    assert!(!m.suggest_new_concept("Linen", "attribute", None, Some("Material")));
}

#[test]
fn test_approve_unknown_name_leaves_queue() {
    let mut m = manager();
    m.suggest_new_concept("Linen", "attribute", None, Some("Material"));
    assert!(!m.approve_concept("Hemp").unwrap());
    assert_eq!(m.pending_count(), 1);
}

#[test]
fn test_same_name_proposals_approved_one_per_call() {
    let mut m = manager();
    m.suggest_new_concept("Linen", "attribute", None, Some("Material"));
    m.suggest_new_concept("Linen", "fabric", None, Some("Material"));
    assert_eq!(m.pending_count(), 2);

    assert!(m.approve_concept("Linen").unwrap());
    assert!(m.approve_concept("Linen").unwrap());
    assert!(!m.approve_concept("Linen").unwrap());
    // The later proposal overwrote the earlier commit.
    assert_eq!(m.store().get_concept("Linen").unwrap().category, "fabric");
}

#[test]
fn test_into_store_keeps_approved_concepts() {
    let mut m = manager();
    m.suggest_new_concept("Clogs", "sub_category", None, Some("Footwear"));
    m.approve_concept("Clogs").unwrap();
    let store = m.into_store();
    assert!(store.get_children("Footwear").contains("Clogs"));
}
