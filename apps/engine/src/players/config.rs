//! Player configuration handling.
//!
//! Extracts the standard fields from a JSON config while preserving
//! strategy-specific fields untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for seat strategies.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "bid_margin": -10}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Optional RNG seed for reproducible decisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Strategy-specific fields not covered above.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl PlayerConfig {
    /// Build from optional JSON, falling back to an empty config when the
    /// value is missing or malformed.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_else(|_| Self::empty()),
            None => Self::empty(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::empty()
    }
}
