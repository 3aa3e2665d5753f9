//! Stacking-order mapping from combinations to render jobs

use crate::collection::combination::{CategoryId, Combination};
use std::path::PathBuf;

/// Declared bottom-to-top stacking order for final compositing
#[derive(Clone, Debug, Default)]
pub struct Design {
    categories: Vec<CategoryId>,
}

impl Design {
    /// Build a design from category identifiers, bottom of the stack first
    pub const fn new(categories: Vec<CategoryId>) -> Self {
        Self { categories }
    }

    /// Number of declared stack positions
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the design declares no stack positions
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Reorder a combination's layers into this design's stacking order
    ///
    /// Design order wins over generation order; within one category, entries
    /// keep the order they hold in the combination. Design categories with no
    /// matching entry (an unselected optional) are silently skipped, and
    /// combination categories absent from the design are dropped from the
    /// output stack.
    pub fn apply(&self, combination: &Combination) -> RenderJob {
        let mut layers = Vec::with_capacity(combination.layers.len());
        for category in &self.categories {
            for entry in &combination.layers {
                if entry.category == *category {
                    layers.push(entry.path.clone());
                }
            }
        }

        RenderJob {
            unique_index: combination.unique_index.clone(),
            layers,
        }
    }
}

/// A unit of rendering work: an identifier and its layer stack, bottom first
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    /// Unique index naming the output file
    pub unique_index: String,
    /// Layer image paths in stacking order
    pub layers: Vec<PathBuf>,
}
