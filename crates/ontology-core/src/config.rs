//! Configuration for the ontology: seed taxonomy and navigation defaults.
//!
//! Load order: `.ontology/config.toml` → environment variables → defaults.

use crate::store::DEFAULT_ROOT;
use crate::traversal::DEFAULT_MAX_DISTANCE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level ontology configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    pub seed: SeedTaxonomy,
    pub navigation: NavigationConfig,
}

/// Navigation and lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Hop limit used by `related` when none is given.
    pub default_max_distance: usize,
    /// Maximum "did you mean" suggestions shown for unknown names.
    pub suggestion_limit: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_max_distance: DEFAULT_MAX_DISTANCE,
            suggestion_limit: 5,
        }
    }
}

/// Starting taxonomy: a root plus groups of children added beneath named parents.
///
/// Groups are applied in order. A group adds itself under `parent` (the root
/// when unset) and then each of `children` beneath itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedTaxonomy {
    pub root: String,
    pub groups: Vec<SeedGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedGroup {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub child_category: String,
}

impl SeedGroup {
    fn new(name: &str, category: &str, child_category: &str, children: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            parent: None,
            children: children.iter().map(|c| (*c).to_string()).collect(),
            child_category: child_category.to_string(),
        }
    }
}

impl Default for SeedTaxonomy {
    fn default() -> Self {
        let mut groups = vec![SeedGroup::new(
            "Apparel",
            "main_category",
            "sub_category",
            &[
                "Dresses",
                "Tops",
                "Bottoms",
                "Outerwear",
                "Suits",
                "Activewear",
                "Intimates",
                "Swimwear",
            ],
        )];
        groups.extend(
            ["Footwear", "Accessories", "Beauty"]
                .into_iter()
                .map(|name| SeedGroup::new(name, "main_category", "", &[])),
        );

        let attribute_categories: [(&str, &[&str]); 8] = [
            (
                "Material",
                &["Cotton", "Silk", "Wool", "Polyester", "Leather", "Denim"],
            ),
            (
                "Pattern",
                &["Solid", "Striped", "Floral", "Checked", "Geometric"],
            ),
            (
                "Style",
                &["Casual", "Formal", "Athletic", "Bohemian", "Classic"],
            ),
            ("Fit", &["Regular", "Slim", "Loose", "Tailored", "Oversized"]),
            ("Length", &["Mini", "Midi", "Maxi", "Cropped", "Full-length"]),
            (
                "Occasion",
                &["Casual", "Formal", "Party", "Workwear", "Sports"],
            ),
            ("Feature", &["Pockets", "Buttons", "Zippers", "Collar", "Hood"]),
            ("Construction", &["Woven", "Knitted", "Quilted", "Seamless"]),
        ];
        groups.extend(
            attribute_categories
                .into_iter()
                .map(|(name, values)| SeedGroup::new(name, "attribute_category", "attribute", values)),
        );

        Self {
            root: DEFAULT_ROOT.to_string(),
            groups,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl OntologyConfig {
    /// Load config from `.ontology/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".ontology").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        env_override("ONTOLOGY_ROOT", &mut config.seed.root);
        env_override(
            "ONTOLOGY_MAX_DISTANCE",
            &mut config.navigation.default_max_distance,
        );
        env_override(
            "ONTOLOGY_SUGGESTION_LIMIT",
            &mut config.navigation.suggestion_limit,
        );

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.seed.root.trim().is_empty() {
            anyhow::bail!("seed.root must not be empty");
        }
        if self.navigation.default_max_distance == 0 {
            anyhow::bail!("navigation.default_max_distance must be at least 1");
        }
        Ok(())
    }
}
