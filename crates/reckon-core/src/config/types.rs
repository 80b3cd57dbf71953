//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Default number of neighbors consulted by the user-user scorer
pub const DEFAULT_USER_NEIGHBORHOOD: usize = 30;

/// Fewest contributing neighbors a user-user score may rest on; configured floors
/// can only raise it
pub const MIN_USER_NEIGHBORS: usize = 2;

/// Default number of neighbors consulted by the item-item scorer
pub const DEFAULT_ITEM_NEIGHBORHOOD: usize = 20;

/// Top-level recommender configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReckonConfig {
    /// Pseudo-count of global-mean ratings blended into every item mean
    #[serde(default)]
    pub damping: f64,

    /// User-user scorer settings
    #[serde(default)]
    pub user_user: UserUserConfig,

    /// Item-item scorer settings
    #[serde(default)]
    pub item_item: ItemItemConfig,
}

impl Default for ReckonConfig {
    fn default() -> Self {
        Self {
            damping: 0.0,
            user_user: UserUserConfig::default(),
            item_item: ItemItemConfig::default(),
        }
    }
}

/// Settings for user-based neighborhood scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUserConfig {
    /// Maximum contributing neighbors per item
    #[serde(default = "default_user_neighborhood")]
    pub neighborhood_size: usize,

    /// Items backed by fewer contributing neighbors are left unscored; never below
    /// [`MIN_USER_NEIGHBORS`]
    #[serde(default = "default_user_min_neighbors")]
    pub min_neighbors: usize,
}

impl Default for UserUserConfig {
    fn default() -> Self {
        Self {
            neighborhood_size: default_user_neighborhood(),
            min_neighbors: default_user_min_neighbors(),
        }
    }
}

/// Settings for item-based neighborhood scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemItemConfig {
    /// Maximum neighbors per candidate item
    #[serde(default = "default_item_neighborhood")]
    pub neighborhood_size: usize,

    /// Minimum contributing neighbors; 0 disables the floor, so an item with no
    /// rated neighbors is still emitted with a NaN score
    #[serde(default)]
    pub min_neighbors: usize,
}

impl Default for ItemItemConfig {
    fn default() -> Self {
        Self {
            neighborhood_size: default_item_neighborhood(),
            min_neighbors: 0,
        }
    }
}

fn default_user_neighborhood() -> usize {
    DEFAULT_USER_NEIGHBORHOOD
}

fn default_user_min_neighbors() -> usize {
    MIN_USER_NEIGHBORS
}

fn default_item_neighborhood() -> usize {
    DEFAULT_ITEM_NEIGHBORHOOD
}
