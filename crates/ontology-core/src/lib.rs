//! Core types for the fashion ontology.
//!
//! Provides the concept model ([`concept::Concept`]), the concept registry and
//! its parent/child graph ([`store::ConceptStore`]), ancestry and bounded
//! relatedness queries, JSON export/import, a seed taxonomy, and the
//! propose/approve moderation workflow ([`manager::OntologyManager`]).

pub mod concept;
pub mod config;
pub mod error;
pub mod manager;
pub mod schema;
pub mod seed;
pub mod storage;
pub mod store;
pub mod traversal;

pub use concept::{Attributes, Concept};
pub use error::{ConstructionError, OntologyError};
pub use manager::{OntologyManager, PendingConcept};
pub use store::ConceptStore;
pub use traversal::Direction;
