// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::scorer::ScorerOptions;
use crate::types::tier::PlayerTier;

const CONFIG_FILE_NAME: &str = "valvedrill.toml";

/// Practice-directory configuration. Every field is optional; a missing
/// file means all defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stable player identifier used to namespace track records.
    pub player: String,
    pub tier: PlayerTier,
    pub scorer: ScorerOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player: "local".to_string(),
            tier: PlayerTier::Beginner,
            scorer: ScorerOptions::default(),
        }
    }
}

impl Config {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.player, "local");
        assert_eq!(config.tier, PlayerTier::Beginner);
        assert_eq!(config.scorer.question_count, 20);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let content = "player = \"sam\"\ntier = \"advanced\"\n\n[scorer]\ninterval_ms = 500\n";
        write(dir.path().join(CONFIG_FILE_NAME), content).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.player, "sam");
        assert_eq!(config.tier, PlayerTier::Advanced);
        assert_eq!(config.scorer.interval_ms, 500);
        assert_eq!(config.scorer.lives, 3);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join(CONFIG_FILE_NAME), "tier = \"wizard\"").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
