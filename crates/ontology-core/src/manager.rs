//! Moderation queue in front of a [`ConceptStore`].

use crate::concept::Attributes;
use crate::config::SeedTaxonomy;
use crate::error::Result;
use crate::store::ConceptStore;
use serde::{Deserialize, Serialize};

/// A proposed concept waiting for approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConcept {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub attributes: Option<Attributes>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// Wraps a store with a propose → approve workflow.
///
/// Proposals are deduplicated on their full content, so two proposals with the
/// same name but different fields are both kept. Approval takes the oldest
/// proposal with a matching name.
#[derive(Debug, Clone, Default)]
pub struct OntologyManager {
    store: ConceptStore,
    pending: Vec<PendingConcept>,
}

impl OntologyManager {
    pub fn new(store: ConceptStore) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    /// Manager over a freshly seeded store.
    pub fn with_seed(taxonomy: &SeedTaxonomy) -> Result<Self> {
        Ok(Self::new(ConceptStore::seeded(taxonomy)?))
    }

    /// Restore a previously persisted queue, dropping exact duplicates.
    #[must_use]
    pub fn with_pending(mut self, pending: Vec<PendingConcept>) -> Self {
        for proposal in pending {
            self.enqueue(proposal);
        }
        self
    }

    pub fn store(&self) -> &ConceptStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConceptStore {
        &mut self.store
    }

    pub fn into_store(self) -> ConceptStore {
        self.store
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Queue a proposal. Returns false, without queuing, if `name` is already committed.
    pub fn suggest_new_concept(
        &mut self,
        name: &str,
        category: &str,
        attributes: Option<Attributes>,
        parent: Option<&str>,
    ) -> bool {
        if self.store.contains(name) {
            return false;
        }
        self.enqueue(PendingConcept {
            name: name.to_string(),
            category: category.to_string(),
            attributes,
            parent: parent.map(str::to_string),
        });
        tracing::debug!("queued proposal for {}", name);
        true
    }

    fn enqueue(&mut self, proposal: PendingConcept) {
        if !self.pending.contains(&proposal) {
            self.pending.push(proposal);
        }
    }

    /// Proposals awaiting review, oldest first.
    pub fn review_pending_concepts(&self) -> &[PendingConcept] {
        &self.pending
    }

    /// Commit the oldest pending proposal named `name`.
    ///
    /// Returns `Ok(false)` if nothing named `name` is pending. If the store
    /// rejects the concept the error is returned and the proposal stays queued.
    pub fn approve_concept(&mut self, name: &str) -> Result<bool> {
        let Some(index) = self.pending.iter().position(|p| p.name == name) else {
            return Ok(false);
        };
        let proposal = &self.pending[index];
        self.store.add_concept(
            &proposal.name,
            &proposal.category,
            proposal.attributes.clone().unwrap_or_default(),
            proposal.parent.as_deref(),
        )?;
        self.pending.remove(index);
        tracing::info!("approved concept {}", name);
        Ok(true)
    }
}
