use serde::{Deserialize, Serialize};

use crate::BvhError;

/// Depth bound used when the caller does not pick one
pub const DEFAULT_MAX_DEPTH: u32 = 32;

/// Settings for one scene build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Nodes deeper than this are never split
    pub max_depth: u32,
    /// Build the per-object hierarchies on the rayon pool
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: true,
        }
    }
}

impl BuildConfig {
    pub fn from_json(json: &str) -> Result<Self, BvhError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BvhError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
