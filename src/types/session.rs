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

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::band::Band;
use crate::types::tier::DifficultyTier;
use crate::types::tier::SessionMode;

/// Finalized telemetry for one completed game session.
#[derive(Clone, Debug)]
pub struct SessionInput {
    pub correct_count: u32,
    pub total_count: u32,
    /// Average seconds per answer. Negative values are clamped to zero.
    pub avg_speed_seconds: f64,
    pub notes_practiced: BTreeSet<String>,
    pub difficulty: DifficultyTier,
    pub mode: SessionMode,
}

/// Outcome of recording a session against a track.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub competency: f64,
    /// `round(competency * 100)`.
    pub display_score: u32,
    pub band: Band,
    /// Difficulty-weighted performance, for diagnostics.
    pub weighted_performance: f64,
    /// False if the store rejected the write. The computed values above are
    /// still valid for immediate display; the caller may retry persistence.
    pub persisted: bool,
}

/// Read-only projection of what a track's score would show right now.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencySnapshot {
    pub competency: f64,
    pub display_score: u32,
    pub band: Band,
    pub days_since_last_practice: f64,
    pub total_sessions: usize,
    pub notes_covered_count: usize,
}
