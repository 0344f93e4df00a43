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

use crate::scorer::LEARNING_MODE_WEIGHT;
use crate::scorer::ScoreSummary;
use crate::scorer::SessionScorer;
use crate::types::tier::DifficultyTier;
use crate::types::tier::PlayerTier;

/// Fixed-length session: a set number of questions, scored on
/// correctness-out-of-total. Wrong attempts are not separately counted in
/// this mode.
pub struct LearningScorer {
    tier: PlayerTier,
    difficulty: DifficultyTier,
    question_count: u32,
    correct: u32,
}

impl LearningScorer {
    pub fn new(tier: PlayerTier, difficulty: DifficultyTier, question_count: u32) -> Self {
        Self {
            tier,
            difficulty,
            question_count,
            correct: 0,
        }
    }

    fn accuracy_pct(&self) -> f64 {
        if self.question_count == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.question_count as f64
        }
    }

    fn stars(&self) -> u8 {
        let pct = self.accuracy_pct();
        match self.tier {
            PlayerTier::Beginner => {
                if pct >= 80.0 {
                    3
                } else if pct >= 60.0 {
                    2
                } else {
                    1
                }
            }
            PlayerTier::Advanced => {
                if pct >= 90.0 {
                    3
                } else if pct > 70.0 {
                    2
                } else {
                    1
                }
            }
        }
    }
}

impl SessionScorer for LearningScorer {
    fn mark_correct(&mut self) {
        self.correct += 1;
    }

    fn mark_incorrect(&mut self) {}

    fn summary(&self) -> ScoreSummary {
        let pct = self.accuracy_pct();
        ScoreSummary {
            display_score: pct.round() as u32,
            proficiency_score: pct * self.difficulty.weight() * LEARNING_MODE_WEIGHT,
            stars: self.stars(),
            correct_count: self.correct,
            secondary: self.question_count,
        }
    }

    fn reset(&mut self) {
        self.correct = 0;
    }
}
