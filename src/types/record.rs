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

use serde::Deserialize;
use serde::Serialize;

use crate::types::tier::DifficultyTier;
use crate::types::tier::SessionMode;
use crate::types::timestamp::Timestamp;

/// Competency a track starts at, so a first-time display is not a
/// discouraging zero.
pub const SEED_COMPETENCY: f64 = 0.2;

/// Storage bound on per-track session history. Oldest entries are evicted
/// first.
pub const SESSION_HISTORY_CAP: usize = 30;

/// One completed session, immutable once appended.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub timestamp: Timestamp,
    pub raw_accuracy: f64,
    pub raw_performance: f64,
    pub weighted_performance: f64,
    pub difficulty_tier: DifficultyTier,
    pub competency_after: f64,
    pub session_mode: SessionMode,
}

/// Persisted progression state for one track.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyRecord {
    /// Normalized proficiency in [0,1].
    pub competency: f64,
    #[serde(rename = "lastPracticeTimestamp")]
    pub last_practiced_at: Timestamp,
    pub session_history: Vec<SessionRecord>,
    /// Distinct note identifiers ever practiced under this track. Only
    /// grows.
    pub notes_covered: BTreeSet<String>,
    pub created_at: Timestamp,
}

impl CompetencyRecord {
    pub fn seed(now: Timestamp) -> Self {
        Self {
            competency: SEED_COMPETENCY,
            last_practiced_at: now,
            session_history: Vec::new(),
            notes_covered: BTreeSet::new(),
            created_at: now,
        }
    }

    pub fn push_session(&mut self, session: SessionRecord) {
        self.session_history.push(session);
        while self.session_history.len() > SESSION_HISTORY_CAP {
            self.session_history.remove(0);
        }
    }

    pub fn cover_notes(&mut self, notes: &BTreeSet<String>) {
        self.notes_covered.extend(notes.iter().cloned());
    }
}
