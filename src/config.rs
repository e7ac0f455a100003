//! Chess rules - Engine configuration
//!
//! Settings for the command-line front end, read from TOML. Every field has
//! a default, so an empty file is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies
    pub depth: u32,
    /// Search threads, 0 = one per logical CPU
    pub threads: usize,
    /// Turn handler notifications into errors
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 2,
            threads: 1,
            strict: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ChessError> {
        toml::from_str(s).map_err(|e| ChessError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChessError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ChessError> {
        toml::to_string(self).map_err(|e| ChessError::Config(e.to_string()))
    }

    /// Number of search workers this configuration asks for
    pub fn worker_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }
}
