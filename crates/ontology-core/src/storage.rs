//! Read/write ontology and moderation-queue files from disk.

use crate::manager::PendingConcept;
use crate::store::ConceptStore;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const ONTOLOGY_DIR: &str = ".ontology";
const ONTOLOGY_FILE: &str = "ontology.json";
const PENDING_FILE: &str = "pending.json";

/// Get the path to the ontology directory for a given project root.
pub fn ontology_dir(project_root: &Path) -> PathBuf {
    project_root.join(ONTOLOGY_DIR)
}

/// Get the path to the ontology document for a given project root.
pub fn ontology_file(project_root: &Path) -> PathBuf {
    ontology_dir(project_root).join(ONTOLOGY_FILE)
}

pub fn pending_file(project_root: &Path) -> PathBuf {
    ontology_dir(project_root).join(PENDING_FILE)
}

/// Check if an ontology exists for the given project root.
pub fn ontology_exists(project_root: &Path) -> bool {
    ontology_file(project_root).exists()
}

/// Export `store` to an arbitrary file path.
pub fn export_to(path: &Path, store: &ConceptStore) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    store
        .export(BufWriter::new(file))
        .with_context(|| format!("failed to write ontology to {}", path.display()))
}

/// Import a store from an arbitrary file path.
pub fn import_from(path: &Path) -> Result<ConceptStore> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut store = ConceptStore::default();
    store
        .import(BufReader::new(file))
        .with_context(|| format!("failed to read ontology from {}", path.display()))?;
    Ok(store)
}

/// Load the project's ontology from disk.
pub fn load(project_root: &Path) -> Result<ConceptStore> {
    import_from(&ontology_file(project_root))
}

/// Save the project's ontology, creating the .ontology directory if needed.
pub fn save(project_root: &Path, store: &ConceptStore) -> Result<()> {
    export_to(&ontology_file(project_root), store)
}

/// Load the moderation queue. A missing file means nothing is pending.
pub fn load_pending(project_root: &Path) -> Result<Vec<PendingConcept>> {
    let path = pending_file(project_root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(&path)
        .with_context(|| format!("failed to read pending proposals from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("malformed pending proposals in {}", path.display()))
}

pub fn save_pending(project_root: &Path, pending: &[PendingConcept]) -> Result<()> {
    let dir = ontology_dir(project_root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create ontology directory {}", dir.display()))?;

    let path = pending_file(project_root);
    let json = serde_json::to_string_pretty(pending)
        .context("failed to serialize pending proposals")?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write pending proposals to {}", path.display()))?;

    Ok(())
}
