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

pub mod learning;
pub mod marathon;
pub mod speed;

use serde::Deserialize;
use serde::Serialize;

use crate::scorer::learning::LearningScorer;
use crate::scorer::marathon::MarathonScorer;
use crate::scorer::speed::SpeedScorer;
use crate::types::tier::DifficultyTier;
use crate::types::tier::PlayerTier;
use crate::types::tier::SessionMode;

/// Mode weights for the proficiency contribution. Speed is the strongest
/// fluency signal; marathon adds pressure over plain learning.
pub const LEARNING_MODE_WEIGHT: f64 = 1.0;
pub const MARATHON_MODE_WEIGHT: f64 = 1.2;
pub const SPEED_MODE_WEIGHT: f64 = 1.5;

/// Uniform result shape across all six mode/tier variants.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub display_score: u32,
    /// Accuracy% x difficulty weight x mode weight, over the mode's scoring
    /// window.
    pub proficiency_score: f64,
    pub stars: u8,
    pub correct_count: u32,
    /// Mode-specific: question count (learning), lives remaining
    /// (marathon), incorrect count (speed).
    pub secondary: u32,
}

/// Per-session accumulator. One instance per active game session, discarded
/// at session end; never shared across sessions or tracks.
pub trait SessionScorer {
    fn mark_correct(&mut self);
    fn mark_incorrect(&mut self);
    fn summary(&self) -> ScoreSummary;
    /// Back to the zero state, for a session restart.
    fn reset(&mut self);
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ScorerOptions {
    /// Learning mode: fixed total question count.
    pub question_count: u32,
    /// Marathon mode: starting lives budget.
    pub lives: u32,
    /// Speed mode: per-note time budget in milliseconds.
    pub interval_ms: u32,
}

impl Default for ScorerOptions {
    fn default() -> Self {
        Self {
            question_count: 20,
            lives: 3,
            interval_ms: 1000,
        }
    }
}

/// Factory over the six {mode} x {tier} variants.
pub fn scorer_for(
    mode: SessionMode,
    tier: PlayerTier,
    difficulty: DifficultyTier,
    options: ScorerOptions,
) -> Box<dyn SessionScorer> {
    match mode {
        SessionMode::Learning => Box::new(LearningScorer::new(tier, difficulty, options.question_count)),
        SessionMode::Marathon => Box::new(MarathonScorer::new(tier, difficulty, options.lives)),
        SessionMode::Speed => Box::new(SpeedScorer::new(tier, difficulty, options.interval_ms)),
    }
}
