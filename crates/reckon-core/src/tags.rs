//! Item tag vectors consumed by the content-based profile builder

use std::collections::HashMap;

use crate::error::Result;
use crate::vectors::SparseVector;

/// Tag → weight vector for one item
pub type TagVector = SparseVector<String>;

/// Source of per-item tag-weight vectors (typically a TF-IDF model)
pub trait TagVectorSource {
    /// The tag vector for `item`; an item without tags yields an empty vector
    fn item_vector(&self, item: i64) -> Result<TagVector>;
}

/// In-memory tag vectors, already weighted
#[derive(Debug, Clone, Default)]
pub struct TagModel {
    vectors: HashMap<i64, TagVector>,
}

impl TagModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to the item's entry for `tag`
    pub fn add_weight(&mut self, item: i64, tag: &str, weight: f64) {
        *self
            .vectors
            .entry(item)
            .or_default()
            .entry(tag.to_string())
            .or_insert(0.0) += weight;
    }

    /// Number of items with at least one tag
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl FromIterator<(i64, TagVector)> for TagModel {
    fn from_iter<T: IntoIterator<Item = (i64, TagVector)>>(iter: T) -> Self {
        Self {
            vectors: iter.into_iter().collect(),
        }
    }
}

impl TagVectorSource for TagModel {
    fn item_vector(&self, item: i64) -> Result<TagVector> {
        Ok(self.vectors.get(&item).cloned().unwrap_or_default())
    }
}
