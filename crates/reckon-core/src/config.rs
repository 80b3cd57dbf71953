//! Recommender configuration
//!
//! Settings live in a TOML file; every field is optional and falls back to the
//! standard neighborhood defaults (no damping, 30 user neighbors with a
//! floor of 2, 20 item neighbors with no floor).

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{ReckonError, Result};

pub use types::{
    ItemItemConfig, ReckonConfig, UserUserConfig, DEFAULT_ITEM_NEIGHBORHOOD,
    DEFAULT_USER_NEIGHBORHOOD, MIN_USER_NEIGHBORS,
};

impl ReckonConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReckonConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), damping = config.damping, "loaded config");
        Ok(config)
    }

    /// Load configuration from an optional path, using defaults when absent
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReckonError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings no model can be built with
    pub fn validate(&self) -> Result<()> {
        if !self.damping.is_finite() || self.damping < 0.0 {
            bail_invalid!("damping", self.damping);
        }
        if self.user_user.neighborhood_size == 0 {
            bail_invalid!("user_user.neighborhood_size", 0);
        }
        if self.user_user.min_neighbors < MIN_USER_NEIGHBORS {
            bail_invalid!("user_user.min_neighbors", self.user_user.min_neighbors);
        }
        if self.item_item.neighborhood_size == 0 {
            bail_invalid!("item_item.neighborhood_size", 0);
        }
        Ok(())
    }
}
