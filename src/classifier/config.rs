//! Tree Configuration
//!
//! Settings used when loading and classifying with a tree, and the json IO
//! shared by the serializable types of the crate.
use crate::errors::ClassificationError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_parallel() -> bool {
    false
}
fn default_num_threads() -> Option<usize> {
    None
}
fn default_strict_thresholds() -> bool {
    false
}

/// Configuration for a `ClassificationTree`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Whether batch classification runs in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Number of threads for parallel batch classification.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
    /// Require the second line of a split to carry the `Threshold` marker when loading.
    #[serde(default = "default_strict_thresholds")]
    pub strict_thresholds: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            parallel: false,
            num_threads: None,
            strict_thresholds: false,
        }
    }
}

/// IO
pub trait TreeIO: Serialize + DeserializeOwned + Sized {
    /// Save as a json object to a file.
    ///
    /// * `path` - Path to save to.
    fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ClassificationError> {
        fs::write(path, self.json_dump()?).map_err(|e| ClassificationError::UnableToWrite(e.to_string()))
    }

    /// Dump as a json object.
    fn json_dump(&self) -> Result<String, ClassificationError> {
        serde_json::to_string(self).map_err(|e| ClassificationError::UnableToWrite(e.to_string()))
    }

    /// Load from a json string.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, ClassificationError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| ClassificationError::UnableToRead(e.to_string()))
    }

    /// Load from a path to a json object.
    ///
    /// * `path` - Path to load from.
    fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ClassificationError> {
        let json_str = fs::read_to_string(path).map_err(|e| ClassificationError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl TreeIO for TreeConfig {}
