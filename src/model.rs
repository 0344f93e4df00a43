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

//! Pure numeric model: performance evaluation, temporal decay, and EMA
//! smoothing. Every function here is deterministic in its arguments; tier
//! and profile selection are threaded in explicitly, never read from
//! ambient state.

use crate::types::tier::DifficultyTier;
use crate::types::tier::MAX_DIFFICULTY_WEIGHT;
use crate::types::tier::PlayerTier;
use crate::types::tier::SessionMode;

/// Normalized proficiency in [0,1].
pub type Competency = f64;

/// Evaluated session performance in [0,1].
pub type Performance = f64;

/// Early-progress reward multiplier for the lenient profile.
const LENIENT_BONUS: f64 = 1.3;

/// Boost applied to near-perfect mastery-profile results.
const MASTERY_BONUS: f64 = 1.15;
const MASTERY_BONUS_THRESHOLD: f64 = 0.85;

/// Seconds per answer at which the fluency component bottoms out.
const STANDARD_BASELINE_SPEED: f64 = 3.0;
const LENIENT_BASELINE_SPEED: f64 = 5.0;

/// Per-day forgetting rates.
const BEGINNER_DECAY_RATE: f64 = 0.01;
const ADVANCED_DECAY_RATE: f64 = 0.02;

/// EMA learning rates. Advanced sessions are treated as high-fidelity skill
/// samples; beginner sessions are noisy and get smoothed harder.
const BEGINNER_LEARNING_RATE: f64 = 0.40;
const ADVANCED_LEARNING_RATE: f64 = 0.70;

/// Learning rate for the single global record, which blends every mode and
/// instrument and therefore moves slowest.
pub const GLOBAL_LEARNING_RATE: f64 = 0.15;

/// Recent-accuracy spread at which consistency bottoms out.
const CONSISTENCY_SPREAD_CEILING: f64 = 0.3;

pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Raw metrics for one session, before evaluation.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    pub accuracy: f64,
    pub avg_speed_seconds: f64,
    pub coverage: f64,
    pub consistency: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            accuracy: 0.0,
            avg_speed_seconds: 0.0,
            // Neutral until measurable.
            coverage: 0.5,
            consistency: 0.5,
        }
    }
}

/// How a metrics tuple is weighed into a single performance value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EvalProfile {
    /// Balanced weights for standard learning practice.
    Standard,
    /// Accuracy-heavy, speed-light, with an early-progress bonus.
    Lenient,
    /// Accuracy and speed only. Each session stands alone, so coverage and
    /// consistency are dropped entirely.
    Mastery,
}

impl EvalProfile {
    pub fn for_session(tier: PlayerTier, mode: SessionMode) -> Self {
        match (tier, mode) {
            (PlayerTier::Beginner, _) => EvalProfile::Lenient,
            (PlayerTier::Advanced, SessionMode::Learning) => EvalProfile::Standard,
            (PlayerTier::Advanced, _) => EvalProfile::Mastery,
        }
    }

    fn baseline_speed(self) -> f64 {
        match self {
            EvalProfile::Standard => STANDARD_BASELINE_SPEED,
            EvalProfile::Lenient => LENIENT_BASELINE_SPEED,
            EvalProfile::Mastery => STANDARD_BASELINE_SPEED,
        }
    }
}

/// Collapse a metrics tuple into a single performance value in [0,1].
pub fn evaluate(metrics: &Metrics, profile: EvalProfile) -> Performance {
    let accuracy = clamp_unit(metrics.accuracy);
    let avg_speed = metrics.avg_speed_seconds.max(0.0);
    let coverage = clamp_unit(metrics.coverage);
    let consistency = clamp_unit(metrics.consistency);
    let norm_speed = clamp_unit(1.0 - avg_speed / profile.baseline_speed());
    let performance = match profile {
        EvalProfile::Standard => {
            0.50 * accuracy + 0.20 * norm_speed + 0.20 * coverage + 0.10 * consistency
        }
        EvalProfile::Lenient => {
            let base = 0.70 * accuracy + 0.10 * norm_speed + 0.15 * coverage + 0.05 * consistency;
            base * LENIENT_BONUS
        }
        EvalProfile::Mastery => {
            let base = 0.80 * accuracy + 0.20 * norm_speed;
            if base >= MASTERY_BONUS_THRESHOLD {
                base * MASTERY_BONUS
            } else {
                base
            }
        }
    };
    clamp_unit(performance)
}

/// Rescale raw performance by the difficulty schedule: perfect play at the
/// hardest tier maps to 1.0, perfect play at the easiest to a fraction of
/// that.
pub fn weight_performance(raw: Performance, difficulty: DifficultyTier) -> Performance {
    clamp_unit(raw * difficulty.weight() / MAX_DIFFICULTY_WEIGHT)
}

pub fn decay_rate(tier: PlayerTier) -> f64 {
    match tier {
        PlayerTier::Beginner => BEGINNER_DECAY_RATE,
        PlayerTier::Advanced => ADVANCED_DECAY_RATE,
    }
}

pub fn learning_rate(tier: PlayerTier) -> f64 {
    match tier {
        PlayerTier::Beginner => BEGINNER_LEARNING_RATE,
        PlayerTier::Advanced => ADVANCED_LEARNING_RATE,
    }
}

/// Exponential forgetting over elapsed days. Identity for non-positive
/// elapsed time.
pub fn decay(competency: Competency, days_elapsed: f64, rate: f64) -> Competency {
    if days_elapsed <= 0.0 {
        return competency;
    }
    clamp_unit(competency * (-rate * days_elapsed).exp())
}

/// Exponential moving average blend of prior competency and new evidence.
pub fn smooth(prior: Competency, current: Performance, alpha: f64) -> Competency {
    clamp_unit(prior * (1.0 - alpha) + current * alpha)
}

/// Stability of recent session accuracies: 1.0 for no spread, falling to
/// 0.0 as the standard deviation reaches the ceiling. Neutral 0.5 until
/// there are at least two data points.
pub fn consistency(accuracies: &[f64]) -> f64 {
    if accuracies.len() < 2 {
        return 0.5;
    }
    let n = accuracies.len() as f64;
    let mean = accuracies.iter().sum::<f64>() / n;
    let variance = accuracies.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance.sqrt() / CONSISTENCY_SPREAD_CEILING).max(0.0)
}

/// [0,100] display conversion of a competency value.
pub fn display_score(competency: Competency) -> u32 {
    (clamp_unit(competency) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: [EvalProfile; 3] = [
        EvalProfile::Standard,
        EvalProfile::Lenient,
        EvalProfile::Mastery,
    ];

    #[test]
    fn test_evaluate_stays_in_unit_interval() {
        let grid = [0.0, 0.25, 0.5, 0.75, 1.0];
        for profile in PROFILES {
            for &accuracy in &grid {
                for &speed in &[0.0, 1.0, 3.0, 5.0, 60.0] {
                    for &coverage in &grid {
                        for &consistency in &grid {
                            let metrics = Metrics {
                                accuracy,
                                avg_speed_seconds: speed,
                                coverage,
                                consistency,
                            };
                            let performance = evaluate(&metrics, profile);
                            assert!((0.0..=1.0).contains(&performance));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let metrics = Metrics {
            accuracy: 0.8,
            avg_speed_seconds: 2.0,
            coverage: 0.6,
            consistency: 0.7,
        };
        for profile in PROFILES {
            assert_eq!(evaluate(&metrics, profile), evaluate(&metrics, profile));
        }
    }

    #[test]
    fn test_evaluate_defends_against_malformed_input() {
        let metrics = Metrics {
            accuracy: 1.7,
            avg_speed_seconds: -4.0,
            coverage: -0.3,
            consistency: 2.0,
        };
        for profile in PROFILES {
            let performance = evaluate(&metrics, profile);
            assert!((0.0..=1.0).contains(&performance));
        }
    }

    #[test]
    fn test_standard_weights() {
        let metrics = Metrics {
            accuracy: 1.0,
            avg_speed_seconds: 3.0,
            coverage: 0.0,
            consistency: 0.0,
        };
        // Speed at the baseline scores zero fluency, so only accuracy
        // contributes.
        assert_eq!(evaluate(&metrics, EvalProfile::Standard), 0.50);
    }

    #[test]
    fn test_lenient_bonus_rewards_early_progress() {
        let metrics = Metrics {
            accuracy: 0.5,
            avg_speed_seconds: 5.0,
            coverage: 0.0,
            consistency: 0.0,
        };
        // 0.70 * 0.5 * 1.3 = 0.455.
        let performance = evaluate(&metrics, EvalProfile::Lenient);
        assert!((performance - 0.455).abs() < 1e-12);
    }

    #[test]
    fn test_lenient_bonus_clamps_at_one() {
        let metrics = Metrics {
            accuracy: 1.0,
            avg_speed_seconds: 0.0,
            coverage: 1.0,
            consistency: 1.0,
        };
        assert_eq!(evaluate(&metrics, EvalProfile::Lenient), 1.0);
    }

    #[test]
    fn test_mastery_ignores_coverage_and_consistency() {
        let low = Metrics {
            accuracy: 0.6,
            avg_speed_seconds: 3.0,
            coverage: 0.0,
            consistency: 0.0,
        };
        let high = Metrics {
            coverage: 1.0,
            consistency: 1.0,
            ..low
        };
        assert_eq!(
            evaluate(&low, EvalProfile::Mastery),
            evaluate(&high, EvalProfile::Mastery)
        );
    }

    #[test]
    fn test_mastery_boost_applies_above_threshold() {
        // 0.80 * 1.0 + 0.20 * 0.5 = 0.9, boosted to 1.0 (clamped from 1.035).
        let metrics = Metrics {
            accuracy: 1.0,
            avg_speed_seconds: 1.5,
            coverage: 0.5,
            consistency: 0.5,
        };
        assert_eq!(evaluate(&metrics, EvalProfile::Mastery), 1.0);
        // 0.80 * 0.8 + 0.20 * 0.0 = 0.64, below the threshold: no boost.
        let metrics = Metrics {
            accuracy: 0.8,
            avg_speed_seconds: 3.0,
            coverage: 0.5,
            consistency: 0.5,
        };
        assert!((evaluate(&metrics, EvalProfile::Mastery) - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_profile_selection() {
        for mode in [
            SessionMode::Learning,
            SessionMode::Marathon,
            SessionMode::Speed,
        ] {
            assert_eq!(
                EvalProfile::for_session(PlayerTier::Beginner, mode),
                EvalProfile::Lenient
            );
        }
        assert_eq!(
            EvalProfile::for_session(PlayerTier::Advanced, SessionMode::Learning),
            EvalProfile::Standard
        );
        assert_eq!(
            EvalProfile::for_session(PlayerTier::Advanced, SessionMode::Marathon),
            EvalProfile::Mastery
        );
        assert_eq!(
            EvalProfile::for_session(PlayerTier::Advanced, SessionMode::Speed),
            EvalProfile::Mastery
        );
    }

    #[test]
    fn test_weighting_makes_hard_practice_worth_more() {
        // Perfect play at the lowest tier equals 40% play at the tier whose
        // weight is 2.5x the lowest.
        let easy = weight_performance(1.0, DifficultyTier::Easy);
        let hard = weight_performance(0.4, DifficultyTier::Hard);
        assert_eq!(easy, hard);
        assert_eq!(easy, 0.25);
        // Perfect play at the hardest tier is worth the full 1.0.
        assert_eq!(weight_performance(1.0, DifficultyTier::Expert), 1.0);
    }

    #[test]
    fn test_decay_identity_at_zero_days() {
        for &x in &[0.0, 0.2, 0.5, 1.0] {
            assert_eq!(decay(x, 0.0, 0.02), x);
            assert_eq!(decay(x, -3.0, 0.02), x);
        }
    }

    #[test]
    fn test_decay_is_monotonically_non_increasing() {
        let mut previous = 1.0;
        for days in 0..120 {
            let decayed = decay(1.0, days as f64, 0.02);
            assert!(decayed <= previous);
            previous = decayed;
        }
    }

    #[test]
    fn test_decay_rates_by_tier() {
        // Slower forgetting for casual practice.
        let beginner = decay(0.8, 30.0, decay_rate(PlayerTier::Beginner));
        let advanced = decay(0.8, 30.0, decay_rate(PlayerTier::Advanced));
        assert!(beginner > advanced);
        assert!((beginner - 0.8 * (-0.3f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_identity_on_no_new_evidence() {
        for &alpha in &[0.15, 0.40, 0.70] {
            for &x in &[0.0, 0.3, 1.0] {
                assert!((smooth(x, x, alpha) - x).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_smooth_moves_toward_current() {
        let blended = smooth(0.2, 0.8, 0.40);
        assert!((blended - 0.44).abs() < 1e-12);
    }

    #[test]
    fn test_decay_then_smooth_composition_is_identity_at_rest() {
        // Zero elapsed time and zero new evidence change nothing.
        let x = 0.63;
        let alpha = 0.70;
        assert!((smooth(decay(x, 0.0, 0.02), x, alpha) - x).abs() < 1e-12);
    }

    #[test]
    fn test_consistency_neutral_below_two_points() {
        assert_eq!(consistency(&[]), 0.5);
        assert_eq!(consistency(&[0.9]), 0.5);
    }

    #[test]
    fn test_consistency_perfect_for_no_spread() {
        assert!((consistency(&[0.8, 0.8, 0.8]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_floors_at_zero_for_wild_spread() {
        assert_eq!(consistency(&[0.0, 1.0, 0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_display_score() {
        assert_eq!(display_score(0.0), 0);
        assert_eq!(display_score(0.2), 20);
        assert_eq!(display_score(0.666), 67);
        assert_eq!(display_score(1.0), 100);
    }
}
