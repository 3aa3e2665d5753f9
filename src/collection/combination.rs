//! Cartesian expansion of trait axes into uniquely indexed combinations

use crate::collection::rarity::RarityTable;
use rand::Rng;
use std::fmt;
use std::path::PathBuf;

/// The three kinds of trait axes a category can declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Multiple named variants, one chosen per combination
    Variable,
    /// Exactly one value, present in every combination
    Static,
    /// Zero or one value chosen by rarity draw
    Optional,
}

impl CategoryKind {
    /// Dotted-identifier prefix for this kind
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Static => "static",
            Self::Optional => "optional",
        }
    }
}

/// Identifier of a trait axis, combining its kind and declared name
///
/// Renders as the dotted form used in design lists, e.g. `variable.background`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CategoryId {
    /// Which kind of axis this identifies
    pub kind: CategoryKind,
    /// Declared category name
    pub name: String,
}

impl CategoryId {
    /// Construct an identifier from kind and name
    pub fn new(kind: CategoryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Parse a dotted identifier such as `optional.hat`
    ///
    /// Returns `None` when the kind prefix is unknown or the name is empty.
    pub fn parse(identifier: &str) -> Option<Self> {
        let (prefix, name) = identifier.split_once('.')?;
        if name.is_empty() {
            return None;
        }
        let kind = match prefix {
            "variable" => CategoryKind::Variable,
            "static" => CategoryKind::Static,
            "optional" => CategoryKind::Optional,
            _ => return None,
        };
        Some(Self::new(kind, name))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.prefix(), self.name)
    }
}

/// One layer of a combination: the category it fills and the image it uses
#[derive(Clone, Debug, PartialEq)]
pub struct LayerEntry {
    /// Category this layer belongs to
    pub category: CategoryId,
    /// Path of the layer image on disk
    pub path: PathBuf,
}

/// One generated item: its unique index and its layers in generation order
///
/// Layers hold exactly one entry per variable category, one per static
/// category, and at most one primary entry per chosen optional category
/// followed by that category's bundled statics.
#[derive(Clone, Debug, PartialEq)]
pub struct Combination {
    /// Sequence number plus the suffixes of every chosen optional variation
    pub unique_index: String,
    /// Layer entries in generation order
    pub layers: Vec<LayerEntry>,
}

/// One variable axis: declared name and its variants in declaration order
#[derive(Clone, Debug)]
pub struct VariableAxis {
    /// Category name
    pub name: String,
    /// (variant name, layer path) pairs in declaration order
    pub variants: Vec<(String, PathBuf)>,
}

/// One optional axis: declared name, rarity table, and bundled static layers
#[derive(Clone, Debug)]
pub struct OptionalAxis {
    /// Category name
    pub name: String,
    /// Ordered rarity table for this axis
    pub table: RarityTable,
    /// Extra layers attached only when a variation of this axis is chosen,
    /// as (category name, layer path) pairs in declaration order
    pub bundled: Vec<(String, PathBuf)>,
}

/// Fully resolved axis declarations feeding combination generation
#[derive(Clone, Debug, Default)]
pub struct BuildPlan {
    /// Variable axes in declaration order
    pub variable: Vec<VariableAxis>,
    /// Static layers in declaration order, as (category name, layer path)
    pub statics: Vec<(String, PathBuf)>,
    /// Optional axes in declaration order
    pub optional: Vec<OptionalAxis>,
}

/// Expand the build plan into the full combination collection
///
/// The cartesian product runs over variable axes in declaration order with
/// the last-declared axis varying fastest. Base unique indices are the
/// 1-based product positions and are unaffected by optional selection. One
/// rarity draw is taken from `rng` per optional axis per combination; a
/// chosen axis contributes its primary layer, its bundled statics, and its
/// suffix, while an unchosen axis contributes nothing.
///
/// A plan with no variable axes produces an empty collection.
pub fn generate<R: Rng>(plan: &BuildPlan, rng: &mut R) -> Vec<Combination> {
    let axes: Vec<Vec<LayerEntry>> = plan
        .variable
        .iter()
        .map(|axis| {
            axis.variants
                .iter()
                .map(|(_, path)| LayerEntry {
                    category: CategoryId::new(CategoryKind::Variable, axis.name.clone()),
                    path: path.clone(),
                })
                .collect()
        })
        .collect();

    let statics: Vec<LayerEntry> = plan
        .statics
        .iter()
        .map(|(name, path)| LayerEntry {
            category: CategoryId::new(CategoryKind::Static, name.clone()),
            path: path.clone(),
        })
        .collect();

    let mut collection = Vec::new();
    for (position, variable_layers) in CartesianProduct::new(&axes).enumerate() {
        let mut unique_index = (position + 1).to_string();
        let mut layers = variable_layers;
        layers.extend(statics.iter().cloned());

        for axis in &plan.optional {
            let draw = rng.random::<f64>();
            let Some(variation) = axis.table.choose(draw) else {
                continue;
            };
            layers.push(LayerEntry {
                category: CategoryId::new(CategoryKind::Optional, axis.name.clone()),
                path: variation.layer.clone(),
            });
            for (bundle_name, bundle_path) in &axis.bundled {
                layers.push(LayerEntry {
                    category: CategoryId::new(CategoryKind::Optional, bundle_name.clone()),
                    path: bundle_path.clone(),
                });
            }
            unique_index.push_str(&variation.suffix);
        }

        collection.push(Combination {
            unique_index,
            layers,
        });
    }

    collection
}

/// Odometer over the variable axes, last axis varying fastest
struct CartesianProduct<'a> {
    axes: &'a [Vec<LayerEntry>],
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> CartesianProduct<'a> {
    fn new(axes: &'a [Vec<LayerEntry>]) -> Self {
        // No axes or any empty axis yields no combinations
        let done = axes.is_empty() || axes.iter().any(Vec::is_empty);
        Self {
            axes,
            cursor: vec![0; axes.len()],
            done,
        }
    }
}

impl Iterator for CartesianProduct<'_> {
    type Item = Vec<LayerEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item: Vec<LayerEntry> = self
            .cursor
            .iter()
            .zip(self.axes)
            .filter_map(|(&index, axis)| axis.get(index).cloned())
            .collect();

        for (index, axis) in self.cursor.iter_mut().zip(self.axes).rev() {
            *index += 1;
            if *index < axis.len() {
                return Some(item);
            }
            *index = 0;
        }
        self.done = true;

        Some(item)
    }
}
