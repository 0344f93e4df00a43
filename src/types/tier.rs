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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The audience a player belongs to. Beginners get lenient evaluation and
/// slow forgetting; advanced players get strict evaluation and fast
/// tracking of recent form.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerTier {
    Beginner,
    Advanced,
}

/// The weight of the hardest difficulty tier. Weighted performance divides
/// by this, so perfect play at the hardest tier contributes 1.0.
pub const MAX_DIFFICULTY_WEIGHT: f64 = 4.0;

/// Difficulty of the practiced material, with a fixed multiplier schedule:
/// harder practice is worth proportionally more competency.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyTier {
    pub fn weight(self) -> f64 {
        match self {
            DifficultyTier::Easy => 1.0,
            DifficultyTier::Medium => 1.5,
            DifficultyTier::Hard => 2.5,
            DifficultyTier::Expert => 4.0,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Expert => "expert",
        }
    }
}

impl TryFrom<String> for DifficultyTier {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            "expert" => Ok(DifficultyTier::Expert),
            _ => fail(format!("Invalid difficulty tier: {}", value)),
        }
    }
}

impl ToSql for DifficultyTier {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for DifficultyTier {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        DifficultyTier::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Learning,
    Marathon,
    Speed,
}

impl SessionMode {
    fn as_str(self) -> &'static str {
        match self {
            SessionMode::Learning => "learning",
            SessionMode::Marathon => "marathon",
            SessionMode::Speed => "speed",
        }
    }
}

impl TryFrom<String> for SessionMode {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "learning" => Ok(SessionMode::Learning),
            "marathon" => Ok(SessionMode::Marathon),
            "speed" => Ok(SessionMode::Speed),
            _ => fail(format!("Invalid session mode: {}", value)),
        }
    }
}

impl ToSql for SessionMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SessionMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        SessionMode::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_weights_are_increasing() {
        let weights: Vec<f64> = [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
            DifficultyTier::Expert,
        ]
        .iter()
        .map(|t| t.weight())
        .collect();
        assert_eq!(weights, vec![1.0, 1.5, 2.5, 4.0]);
        assert_eq!(DifficultyTier::Expert.weight(), MAX_DIFFICULTY_WEIGHT);
    }

    #[test]
    fn test_difficulty_round_trip() {
        for tier in [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
            DifficultyTier::Expert,
        ] {
            assert_eq!(DifficultyTier::try_from(tier.as_str().to_string()).unwrap(), tier);
        }
        assert!(DifficultyTier::try_from("impossible".to_string()).is_err());
    }
}
