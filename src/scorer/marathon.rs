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

use crate::scorer::MARATHON_MODE_WEIGHT;
use crate::scorer::ScoreSummary;
use crate::scorer::SessionScorer;
use crate::types::tier::DifficultyTier;
use crate::types::tier::PlayerTier;

const POINTS_PER_CORRECT: u32 = 100;

/// Proficiency is computed over the first answers only, so a long run
/// cannot out-rank a short one purely on volume.
const PROFICIENCY_WINDOW: u32 = 30;

/// Unbounded session with a lives budget. The game loop ends the session
/// when lives reach zero.
pub struct MarathonScorer {
    tier: PlayerTier,
    difficulty: DifficultyTier,
    starting_lives: u32,
    lives: u32,
    correct: u32,
    answered: u32,
    windowed_correct: u32,
    windowed_total: u32,
}

impl MarathonScorer {
    pub fn new(tier: PlayerTier, difficulty: DifficultyTier, lives: u32) -> Self {
        Self {
            tier,
            difficulty,
            starting_lives: lives,
            lives,
            correct: 0,
            answered: 0,
            windowed_correct: 0,
            windowed_total: 0,
        }
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    fn windowed_accuracy_pct(&self) -> f64 {
        if self.windowed_total == 0 {
            0.0
        } else {
            self.windowed_correct as f64 * 100.0 / self.windowed_total as f64
        }
    }

    fn stars(&self, points: u32) -> u8 {
        match self.tier {
            PlayerTier::Beginner => {
                if points >= 1000 {
                    3
                } else if points >= 500 {
                    2
                } else {
                    1
                }
            }
            PlayerTier::Advanced => {
                if points >= 2000 {
                    3
                } else if points > 1000 {
                    2
                } else {
                    1
                }
            }
        }
    }
}

impl SessionScorer for MarathonScorer {
    fn mark_correct(&mut self) {
        self.correct += 1;
        self.answered += 1;
        if self.windowed_total < PROFICIENCY_WINDOW {
            self.windowed_total += 1;
            self.windowed_correct += 1;
        }
    }

    fn mark_incorrect(&mut self) {
        self.answered += 1;
        self.lives = self.lives.saturating_sub(1);
        if self.windowed_total < PROFICIENCY_WINDOW {
            self.windowed_total += 1;
        }
    }

    fn summary(&self) -> ScoreSummary {
        let points = self.correct * POINTS_PER_CORRECT;
        ScoreSummary {
            display_score: points,
            proficiency_score: self.windowed_accuracy_pct()
                * self.difficulty.weight()
                * MARATHON_MODE_WEIGHT,
            stars: self.stars(points),
            correct_count: self.correct,
            secondary: self.lives,
        }
    }

    fn reset(&mut self) {
        self.lives = self.starting_lives;
        self.correct = 0;
        self.answered = 0;
        self.windowed_correct = 0;
        self.windowed_total = 0;
    }
}
