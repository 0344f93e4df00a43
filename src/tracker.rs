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

use crate::error::Fallible;
use crate::error::fail;
use crate::model;
use crate::model::EvalProfile;
use crate::model::Metrics;
use crate::store::Store;
use crate::types::band::Band;
use crate::types::instrument::NOTE_VOCABULARY_SIZE;
use crate::types::record::CompetencyRecord;
use crate::types::record::SessionRecord;
use crate::types::session::CompetencySnapshot;
use crate::types::session::SessionInput;
use crate::types::session::SessionResult;
use crate::types::tier::PlayerTier;
use crate::types::timestamp::Timestamp;
use crate::types::track_key::TrackKey;

/// How many stored session accuracies feed the consistency metric,
/// alongside the current session.
const CONSISTENCY_WINDOW: usize = 9;

#[derive(Clone, Copy, Debug)]
pub struct TrackerConfig {
    /// Coverage denominator: the full note vocabulary of the fingering
    /// tables, not derived per track.
    pub note_vocabulary_size: usize,
    /// Fixed EMA learning rate. `None` derives it from the player tier.
    pub alpha: Option<f64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            note_vocabulary_size: NOTE_VOCABULARY_SIZE,
            alpha: None,
        }
    }
}

impl TrackerConfig {
    /// Configuration for the single all-practice record, which moves
    /// slowest.
    pub fn global() -> Self {
        Self {
            alpha: Some(model::GLOBAL_LEARNING_RATE),
            ..Self::default()
        }
    }
}

/// Owns the persisted competency record behind one opaque track key:
/// loads prior state, applies decay for elapsed time, blends in current
/// performance, persists, and exposes banded display values.
pub struct Tracker<S: Store> {
    store: S,
    config: TrackerConfig,
}

impl<S: Store> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, TrackerConfig::default())
    }

    pub fn with_config(store: S, config: TrackerConfig) -> Self {
        Self { store, config }
    }

    /// Record one completed session. Mutates and persists the track's
    /// record; the only operation that counts as practice.
    pub fn record_session(
        &self,
        key: &TrackKey,
        tier: PlayerTier,
        input: &SessionInput,
        now: Timestamp,
    ) -> Fallible<SessionResult> {
        if input.correct_count > input.total_count {
            return fail("correct count exceeds total count.");
        }
        let avg_speed = if input.avg_speed_seconds < 0.0 {
            log::warn!("negative average speed; clamping to zero.");
            0.0
        } else {
            input.avg_speed_seconds
        };

        let mut record = self.load_or_seed(key, now)?;

        let raw_accuracy = if input.total_count == 0 {
            0.0
        } else {
            model::clamp_unit(input.correct_count as f64 / input.total_count as f64)
        };

        record.cover_notes(&input.notes_practiced);
        let coverage =
            (record.notes_covered.len() as f64 / self.config.note_vocabulary_size as f64).min(1.0);

        let mut recent: Vec<f64> = record
            .session_history
            .iter()
            .rev()
            .take(CONSISTENCY_WINDOW)
            .map(|s| s.raw_accuracy)
            .collect();
        recent.push(raw_accuracy);
        let consistency = model::consistency(&recent);

        let profile = EvalProfile::for_session(tier, input.mode);
        let metrics = Metrics {
            accuracy: raw_accuracy,
            avg_speed_seconds: avg_speed,
            coverage,
            consistency,
        };
        let raw_performance = model::evaluate(&metrics, profile);
        let weighted_performance = model::weight_performance(raw_performance, input.difficulty);

        // Decay fully discounts stale history before new evidence blends
        // in; the order is load-bearing.
        let days_elapsed = now.days_since(record.last_practiced_at);
        let decayed = model::decay(record.competency, days_elapsed, model::decay_rate(tier));
        let alpha = self.config.alpha.unwrap_or_else(|| model::learning_rate(tier));
        let competency = model::smooth(decayed, weighted_performance, alpha);

        record.competency = competency;
        record.last_practiced_at = now;
        record.push_session(SessionRecord {
            timestamp: now,
            raw_accuracy,
            raw_performance,
            weighted_performance,
            difficulty_tier: input.difficulty,
            competency_after: competency,
            session_mode: input.mode,
        });

        let persisted = match self.store.save(key, &record) {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "failed to persist track {}: {e}",
                    key.track.storage_key()
                );
                false
            }
        };
        log::debug!(
            "{} perf={:.2} weighted={:.2} competency={:.2}",
            key.track.storage_key(),
            raw_performance,
            weighted_performance,
            competency
        );

        Ok(SessionResult {
            competency,
            display_score: model::display_score(competency),
            band: Band::of(competency),
            weighted_performance,
            persisted,
        })
    }

    /// What the track's score would show right now: decay-for-display
    /// without mutating anything. Viewing progress never counts as
    /// practice.
    pub fn current_competency(
        &self,
        key: &TrackKey,
        tier: PlayerTier,
        now: Timestamp,
    ) -> Fallible<CompetencySnapshot> {
        let record = match self.store.load(key)? {
            Some(record) => record,
            None => CompetencyRecord::seed(now),
        };
        let days_since_last_practice = now.days_since(record.last_practiced_at).max(0.0);
        let competency = model::decay(
            record.competency,
            days_since_last_practice,
            model::decay_rate(tier),
        );
        Ok(CompetencySnapshot {
            competency,
            display_score: model::display_score(competency),
            band: Band::of(competency),
            days_since_last_practice,
            total_sessions: record.session_history.len(),
            notes_covered_count: record.notes_covered.len(),
        })
    }

    fn load_or_seed(&self, key: &TrackKey, now: Timestamp) -> Fallible<CompetencyRecord> {
        match self.store.load(key)? {
            Some(record) => Ok(record),
            None => Ok(CompetencyRecord::seed(now)),
        }
    }
}
