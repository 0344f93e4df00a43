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

use crate::scorer::SPEED_MODE_WEIGHT;
use crate::scorer::ScoreSummary;
use crate::scorer::SessionScorer;
use crate::types::tier::DifficultyTier;
use crate::types::tier::PlayerTier;

const POINTS_PER_CORRECT: i64 = 100;
const PENALTY_PER_INCORRECT: i64 = 50;

/// Star thresholds are defined at this reference interval and scale
/// inversely with the configured one, so every speed setting has
/// comparably reachable stars.
const REFERENCE_INTERVAL_MS: f64 = 1000.0;

/// Timed session: the game loop enforces the per-note deadline and calls
/// `mark_incorrect` on expiry.
pub struct SpeedScorer {
    tier: PlayerTier,
    difficulty: DifficultyTier,
    interval_ms: u32,
    correct: u32,
    incorrect: u32,
}

impl SpeedScorer {
    pub fn new(tier: PlayerTier, difficulty: DifficultyTier, interval_ms: u32) -> Self {
        Self {
            tier,
            difficulty,
            interval_ms,
            correct: 0,
            incorrect: 0,
        }
    }

    fn points(&self) -> u32 {
        let points =
            self.correct as i64 * POINTS_PER_CORRECT - self.incorrect as i64 * PENALTY_PER_INCORRECT;
        points.max(0) as u32
    }

    fn accuracy_pct(&self) -> f64 {
        let answered = self.correct + self.incorrect;
        if answered == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / answered as f64
        }
    }

    fn stars(&self, points: u32) -> u8 {
        let scale = REFERENCE_INTERVAL_MS / self.interval_ms as f64;
        let points = points as f64;
        match self.tier {
            PlayerTier::Beginner => {
                if points >= 1000.0 * scale {
                    3
                } else if points >= 500.0 * scale {
                    2
                } else {
                    1
                }
            }
            PlayerTier::Advanced => {
                if points >= 2000.0 * scale {
                    3
                } else if points > 1000.0 * scale {
                    2
                } else {
                    1
                }
            }
        }
    }
}

impl SessionScorer for SpeedScorer {
    fn mark_correct(&mut self) {
        self.correct += 1;
    }

    fn mark_incorrect(&mut self) {
        self.incorrect += 1;
    }

    fn summary(&self) -> ScoreSummary {
        let points = self.points();
        ScoreSummary {
            display_score: points,
            proficiency_score: self.accuracy_pct() * self.difficulty.weight() * SPEED_MODE_WEIGHT,
            stars: self.stars(points),
            correct_count: self.correct,
            secondary: self.incorrect,
        }
    }

    fn reset(&mut self) {
        self.correct = 0;
        self.incorrect = 0;
    }
}
