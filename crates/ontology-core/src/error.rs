//! Error types for ontology construction and document handling.

/// Why a concept could not be added to the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("concept name must not be empty")]
    EmptyName,
    #[error("a concept cannot be its own parent")]
    SelfParent,
    #[error("only the root '{root}' may be added without a parent")]
    MissingParent { root: String },
    #[error("the root concept cannot have a parent")]
    RootWithParent,
    #[error("parent '{parent}' is a descendant, the edge would close a cycle")]
    Cycle { parent: String },
}

/// Errors surfaced by the concept store and the moderation manager.
#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    #[error("failed to add concept '{name}': {reason}")]
    Construction {
        name: String,
        reason: ConstructionError,
    },
    #[error("malformed ontology document: {0}")]
    MalformedDocument(String),
    #[error("failed to serialize ontology: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OntologyError {
    pub(crate) fn construction(name: &str, reason: ConstructionError) -> Self {
        Self::Construction {
            name: name.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, OntologyError>;
