//! JSON configuration loading and shape validation

use crate::collection::combination::{BuildPlan, CategoryId, OptionalAxis, VariableAxis};
use crate::collection::design::Design;
use crate::collection::rarity::{RarityTable, RarityVariation};
use crate::io::configuration::NAME_FORMAT_SLOT;
use crate::io::error::{BuildError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw configuration file as written by the user
///
/// Map entries keep their declaration order; order is semantically
/// significant for variable axes, rarity variations, and the design list.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Trait axis declarations grouped by kind
    pub build_config: BuildConfig,
    /// Bottom-to-top stacking order of dotted category identifiers
    pub design: Vec<String>,
    /// Output filename template with one `{}` slot for the unique index
    pub name_format: String,
}

/// Trait axis declarations, keyed by category name in declaration order
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Variable categories: name to (variant name to layer path)
    #[serde(default)]
    pub variable: IndexMap<String, IndexMap<String, PathBuf>>,
    /// Static categories: name to layer path
    #[serde(default, rename = "static")]
    pub statics: IndexMap<String, PathBuf>,
    /// Optional categories: name to rarity declaration
    #[serde(default)]
    pub optional: IndexMap<String, OptionalConfig>,
}

/// Rarity declaration for one optional category
#[derive(Debug, Clone, Deserialize)]
pub struct OptionalConfig {
    /// Threshold string to variation, in declaration order
    pub variations: IndexMap<String, VariationConfig>,
    /// Extra static layers applied only when this category is chosen
    #[serde(default, rename = "static")]
    pub statics: IndexMap<String, PathBuf>,
}

/// One rarity variation: payload layer and unique-index suffix
#[derive(Debug, Clone, Deserialize)]
pub struct VariationConfig {
    /// Layer image contributed when this variation is selected
    pub data: PathBuf,
    /// Fragment appended to the unique index when selected
    pub suffix: String,
}

/// Validated, fully typed runtime plan derived from a configuration file
#[derive(Debug, Clone)]
pub struct CollectionPlan {
    /// Axis declarations feeding combination generation
    pub build: BuildPlan,
    /// Stacking order for design mapping
    pub design: Design,
    /// Output filename template
    pub name_format: String,
}

impl CollectionConfig {
    /// Load and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parse a configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON for the expected
    /// configuration shape.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| BuildError::ConfigParse { source: e })
    }

    /// Validate the configuration shape and resolve it into a runtime plan
    ///
    /// Shape requirements checked here, before any dispatch: every declared
    /// variable category has at least one variant, every optional category
    /// has at least one variation with a numeric threshold, the design list
    /// is non-empty with known kind prefixes, and the name template carries
    /// a substitution slot. A configuration with no variable categories at
    /// all is valid and produces an empty collection.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error for the first violated requirement.
    pub fn into_plan(self) -> Result<CollectionPlan> {
        let variable = self
            .build_config
            .variable
            .into_iter()
            .map(|(name, variants)| {
                if variants.is_empty() {
                    return Err(shape_error(format!(
                        "variable category '{name}' declares no variants"
                    )));
                }
                Ok(VariableAxis {
                    name,
                    variants: variants.into_iter().collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let statics = self.build_config.statics.into_iter().collect();

        let optional = self
            .build_config
            .optional
            .into_iter()
            .map(|(name, declaration)| {
                let table = parse_rarity_table(&name, declaration.variations)?;
                Ok(OptionalAxis {
                    name,
                    table,
                    bundled: declaration.statics.into_iter().collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if self.design.is_empty() {
            return Err(shape_error("design declares no categories".to_string()));
        }
        let design = self
            .design
            .iter()
            .map(|identifier| {
                CategoryId::parse(identifier).ok_or_else(|| {
                    shape_error(format!(
                        "design entry '{identifier}' is not a known category identifier"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if !self.name_format.contains(NAME_FORMAT_SLOT) {
            return Err(shape_error(format!(
                "name_format '{}' carries no '{NAME_FORMAT_SLOT}' substitution slot",
                self.name_format
            )));
        }

        Ok(CollectionPlan {
            build: BuildPlan {
                variable,
                statics,
                optional,
            },
            design: Design::new(design),
            name_format: self.name_format,
        })
    }
}

fn parse_rarity_table(
    category: &str,
    variations: IndexMap<String, VariationConfig>,
) -> Result<RarityTable> {
    if variations.is_empty() {
        return Err(shape_error(format!(
            "optional category '{category}' declares no variations"
        )));
    }

    let parsed = variations
        .into_iter()
        .map(|(threshold, variation)| {
            let threshold_value: f64 = threshold.parse().map_err(|_| {
                shape_error(format!(
                    "optional category '{category}' has non-numeric threshold '{threshold}'"
                ))
            })?;
            if !threshold_value.is_finite() {
                return Err(shape_error(format!(
                    "optional category '{category}' has non-finite threshold '{threshold}'"
                )));
            }
            Ok(RarityVariation {
                threshold: threshold_value,
                suffix: variation.suffix,
                layer: variation.data,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RarityTable::new(parsed))
}

fn shape_error(reason: String) -> BuildError {
    BuildError::ConfigShape { reason }
}
