//! CLI binary for the fashion ontology: browse, export/import, and moderate concepts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ontology_core::config::OntologyConfig;
use ontology_core::{Attributes, ConceptStore, Direction, OntologyManager, storage};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fashion-ontology", about = "Fashion concept ontology")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .ontology/ontology.json from the configured seed taxonomy
    Init {
        /// Overwrite an existing ontology
        #[arg(long)]
        force: bool,
    },

    /// Show ontology statistics
    Info,

    /// List the direct children of a concept
    Children { name: String },

    /// Show the root-to-concept path
    Ancestry { name: String },

    /// List concepts within a number of hops
    Related {
        name: String,

        /// Maximum distance (defaults to navigation.default_max_distance)
        #[arg(short, long)]
        distance: Option<usize>,

        /// Direction: down, up, both
        #[arg(long, default_value = "down")]
        direction: Direction,
    },

    /// Propose a new concept for review
    Suggest {
        name: String,

        #[arg(short, long)]
        category: String,

        #[arg(long)]
        parent: Option<String>,

        /// Attribute as key=value (value parsed as JSON when possible; repeatable)
        #[arg(long = "attr", value_parser = parse_attr)]
        attrs: Vec<(String, serde_json::Value)>,
    },

    /// List proposals awaiting review
    Pending,

    /// Approve the oldest pending proposal with this name
    Approve { name: String },

    /// Export the ontology document to a file
    Export { path: PathBuf },

    /// Replace the ontology with a document read from a file
    Import { path: PathBuf },

    /// Check referential integrity (missing root, dangling parents)
    Validate,
}

fn parse_attr(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty attribute key in '{}'", raw));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = OntologyConfig::load(&project_root)?;
    tracing::debug!("project root {}", project_root.display());

    match cli.command {
        Commands::Init { force } => cmd_init(&project_root, &config, force),
        Commands::Info => cmd_info(&project_root),
        Commands::Children { name } => cmd_children(&project_root, &config, &name),
        Commands::Ancestry { name } => cmd_ancestry(&project_root, &config, &name),
        Commands::Related {
            name,
            distance,
            direction,
        } => cmd_related(
            &project_root,
            &config,
            &name,
            distance.unwrap_or(config.navigation.default_max_distance),
            direction,
        ),
        Commands::Suggest {
            name,
            category,
            parent,
            attrs,
        } => cmd_suggest(&project_root, &name, &category, parent.as_deref(), attrs),
        Commands::Pending => cmd_pending(&project_root),
        Commands::Approve { name } => cmd_approve(&project_root, &name),
        Commands::Export { path } => cmd_export(&project_root, &path),
        Commands::Import { path } => cmd_import(&project_root, &path),
        Commands::Validate => cmd_validate(&project_root),
    }
}

fn load_store(project_root: &Path) -> Result<ConceptStore> {
    if !storage::ontology_exists(project_root) {
        anyhow::bail!("No ontology found. Run `fashion-ontology init` first.");
    }
    storage::load(project_root)
}

fn load_manager(project_root: &Path) -> Result<OntologyManager> {
    let store = load_store(project_root)?;
    let pending = storage::load_pending(project_root)?;
    Ok(OntologyManager::new(store).with_pending(pending))
}

/// Print a "did you mean" hint. Returns true when `name` is unknown.
fn report_unknown(store: &ConceptStore, config: &OntologyConfig, name: &str) -> bool {
    if store.contains(name) {
        return false;
    }
    eprintln!("Unknown concept: {}", name);
    let close = store.closest_names(name, config.navigation.suggestion_limit);
    if !close.is_empty() {
        eprintln!("Did you mean: {}?", close.join(", "));
    }
    true
}

fn cmd_init(project_root: &Path, config: &OntologyConfig, force: bool) -> Result<()> {
    if storage::ontology_exists(project_root) && !force {
        anyhow::bail!(
            "Ontology already exists at {}. Use --force to overwrite.",
            storage::ontology_file(project_root).display()
        );
    }
    let store = ConceptStore::seeded(&config.seed)?;
    storage::save(project_root, &store)?;
    storage::save_pending(project_root, &[])?;
    eprintln!(
        "Initialized ontology with {} concepts under '{}'.",
        store.len(),
        store.root()
    );
    Ok(())
}

fn cmd_info(project_root: &Path) -> Result<()> {
    if !storage::ontology_exists(project_root) {
        eprintln!("No ontology found. Run `fashion-ontology init` first.");
        return Ok(());
    }
    let manager = load_manager(project_root)?;
    let store = manager.store();

    println!("Root: {}", store.root());
    println!("Concepts: {}", store.len());
    println!("Relationships: {}", store.relationships().len());
    println!("Pending proposals: {}", manager.pending_count());

    let mut by_category: std::collections::BTreeMap<&str, usize> =
        std::collections::BTreeMap::new();
    for concept in store.concepts() {
        *by_category.entry(concept.category.as_str()).or_default() += 1;
    }
    println!("\nCategories:");
    for (category, count) in by_category {
        println!("  {} ({})", category, count);
    }
    Ok(())
}

fn cmd_children(project_root: &Path, config: &OntologyConfig, name: &str) -> Result<()> {
    let store = load_store(project_root)?;
    if report_unknown(&store, config, name) {
        return Ok(());
    }
    for child in store.get_children(name) {
        println!("{}", child);
    }
    Ok(())
}

fn cmd_ancestry(project_root: &Path, config: &OntologyConfig, name: &str) -> Result<()> {
    let store = load_store(project_root)?;
    report_unknown(&store, config, name);
    println!("{}", store.get_ancestry(name).join(" > "));
    Ok(())
}

fn cmd_related(
    project_root: &Path,
    config: &OntologyConfig,
    name: &str,
    distance: usize,
    direction: Direction,
) -> Result<()> {
    let store = load_store(project_root)?;
    if report_unknown(&store, config, name) {
        return Ok(());
    }
    let related = store.related_with_distance(name, distance, direction);
    if related.is_empty() {
        eprintln!("No concepts within {} hop(s) of {}.", distance, name);
    }
    for (concept, hops) in related {
        println!("{}\t{}", hops, concept);
    }
    Ok(())
}

fn cmd_suggest(
    project_root: &Path,
    name: &str,
    category: &str,
    parent: Option<&str>,
    attrs: Vec<(String, serde_json::Value)>,
) -> Result<()> {
    let mut manager = load_manager(project_root)?;
    let attributes = if attrs.is_empty() {
        None
    } else {
        Some(attrs.into_iter().collect::<Attributes>())
    };
    if !manager.suggest_new_concept(name, category, attributes, parent) {
        anyhow::bail!("'{}' already exists in the ontology", name);
    }
    storage::save_pending(project_root, manager.review_pending_concepts())?;
    eprintln!(
        "Queued '{}' for review ({} pending).",
        name,
        manager.pending_count()
    );
    Ok(())
}

fn cmd_pending(project_root: &Path) -> Result<()> {
    let manager = load_manager(project_root)?;
    let pending = manager.review_pending_concepts();
    if pending.is_empty() {
        eprintln!("No pending proposals.");
        return Ok(());
    }
    for proposal in pending {
        println!(
            "{} [{}] parent={}",
            proposal.name,
            proposal.category,
            proposal.parent.as_deref().unwrap_or("-")
        );
        if let Some(attrs) = &proposal.attributes
            && !attrs.is_empty()
        {
            println!("  attributes: {}", serde_json::to_string(attrs)?);
        }
    }
    Ok(())
}

fn cmd_approve(project_root: &Path, name: &str) -> Result<()> {
    let mut manager = load_manager(project_root)?;
    if !manager.approve_concept(name)? {
        anyhow::bail!("No pending proposal named '{}'", name);
    }
    storage::save(project_root, manager.store())?;
    storage::save_pending(project_root, manager.review_pending_concepts())?;
    eprintln!("Approved '{}'.", name);
    Ok(())
}

fn cmd_export(project_root: &Path, path: &Path) -> Result<()> {
    let store = load_store(project_root)?;
    storage::export_to(path, &store)?;
    eprintln!("Exported {} concepts to {}.", store.len(), path.display());
    Ok(())
}

fn cmd_import(project_root: &Path, path: &Path) -> Result<()> {
    let store = storage::import_from(path)?;
    storage::save(project_root, &store)?;
    eprintln!("Imported {} concepts from {}.", store.len(), path.display());
    Ok(())
}

fn cmd_validate(project_root: &Path) -> Result<()> {
    let store = load_store(project_root)?;
    let issues = store.validate();
    if issues.is_empty() {
        eprintln!("Ontology is valid. No integrity issues found.");
        eprintln!(
            "  {} concepts, {} relationships",
            store.len(),
            store.relationships().len()
        );
    } else {
        for issue in &issues {
            println!("WARN: {}", issue);
        }
        eprintln!("\nFound {} integrity issue(s).", issues.len());
    }
    Ok(())
}
