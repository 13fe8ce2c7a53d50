//! JSON document format for exporting and importing an ontology.

use crate::concept::{Attributes, Concept};
use crate::error::{OntologyError, Result};
use crate::store::ConceptStore;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// On-disk shape: every concept keyed by name plus the parent → child edge list.
///
/// `relationships` is informational. Import rebuilds edges from each concept's
/// `parent` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub concepts: BTreeMap<String, ConceptRecord>,
    #[serde(default)]
    pub relationships: Vec<(String, String)>,
}

/// Serialized snapshot of one concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub category: String,
    #[serde(default)]
    pub attributes: Option<Attributes>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub modified_at: DateTime<Utc>,
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

impl From<&Concept> for ConceptRecord {
    fn from(c: &Concept) -> Self {
        Self {
            name: Some(c.name.clone()),
            category: c.category.clone(),
            attributes: Some(c.attributes.clone()),
            parent: c.parent.clone(),
            children: c.children.iter().cloned().collect(),
            created_at: c.created_at,
            modified_at: c.modified_at,
        }
    }
}

impl ConceptRecord {
    fn into_concept(self, key: &str) -> Result<Concept> {
        if let Some(name) = &self.name
            && name != key
        {
            return Err(OntologyError::MalformedDocument(format!(
                "concept stored under '{}' is named '{}'",
                key, name
            )));
        }
        let mut concept = Concept::new(
            key,
            self.category,
            self.attributes.unwrap_or_default(),
            self.parent,
        );
        concept.created_at = self.created_at;
        concept.modified_at = self.modified_at;
        Ok(concept)
    }
}

impl OntologyDocument {
    pub fn from_store(store: &ConceptStore) -> Self {
        Self {
            root: Some(store.root().to_string()),
            concepts: store
                .concepts()
                .map(|c| (c.name.clone(), ConceptRecord::from(c)))
                .collect(),
            relationships: store.relationships(),
        }
    }

    /// Root label for import: the explicit `root` field, else the single parentless concept.
    ///
    /// Every parentless record must be the root and the root record must not
    /// declare a parent.
    fn resolve_root(&self) -> Result<Option<String>> {
        let parentless: Vec<&String> = self
            .concepts
            .iter()
            .filter(|(_, record)| record.parent.is_none())
            .map(|(name, _)| name)
            .collect();
        let root = match (&self.root, parentless.as_slice()) {
            (_, [a, b, ..]) => {
                return Err(OntologyError::MalformedDocument(format!(
                    "multiple root concepts ('{}', '{}')",
                    a, b
                )));
            }
            (Some(root), [only]) if root != *only => {
                return Err(OntologyError::MalformedDocument(format!(
                    "root is '{}' but '{}' has no parent",
                    root, only
                )));
            }
            (Some(root), _) => Some(root.clone()),
            (None, [only]) => Some((*only).clone()),
            (None, []) => None,
        };
        if let Some(root) = &root
            && let Some(parent) = self.concepts.get(root).and_then(|r| r.parent.as_ref())
        {
            return Err(OntologyError::MalformedDocument(format!(
                "root '{}' declares parent '{}'",
                root, parent
            )));
        }
        Ok(root)
    }
}

/// Serialize a document to pretty-printed JSON.
pub fn to_json(doc: &OntologyDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse a document from a JSON string.
pub fn from_json(json: &str) -> Result<OntologyDocument> {
    serde_json::from_str(json).map_err(|e| OntologyError::MalformedDocument(e.to_string()))
}

impl ConceptStore {
    /// Write every concept and edge to `sink` as pretty JSON.
    pub fn export<W: Write>(&self, mut sink: W) -> Result<()> {
        let json = to_json(&OntologyDocument::from_store(self))?;
        sink.write_all(json.as_bytes())?;
        sink.flush()?;
        tracing::info!("exported {} concepts", self.len());
        Ok(())
    }

    /// Replace the store's contents with the document read from `source`.
    ///
    /// The document is parsed and every record checked before the store is
    /// cleared, so a malformed document leaves it untouched. A concept the
    /// store rejects aborts the replay and leaves the store partially
    /// repopulated.
    pub fn import<R: Read>(&mut self, mut source: R) -> Result<()> {
        let mut json = String::new();
        source.read_to_string(&mut json)?;
        let doc = from_json(&json)?;
        self.load_document(doc)
    }

    pub fn load_document(&mut self, doc: OntologyDocument) -> Result<()> {
        let root = doc
            .resolve_root()?
            .unwrap_or_else(|| self.root().to_string());
        let concepts = doc
            .concepts
            .into_iter()
            .map(|(name, record)| record.into_concept(&name))
            .collect::<Result<Vec<Concept>>>()?;

        self.reset(root);
        let count = concepts.len();
        for concept in concepts {
            self.insert(concept)?;
        }
        tracing::info!("imported {} concepts", count);
        Ok(())
    }
}
