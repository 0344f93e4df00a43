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

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::store::Store;
use crate::tracker::Tracker;
use crate::types::instrument::Instrument;
use crate::types::instrument::Key;
use crate::types::session::CompetencySnapshot;
use crate::types::session::SessionInput;
use crate::types::session::SessionResult;
use crate::types::tier::PlayerTier;
use crate::types::timestamp::Timestamp;
use crate::types::track_key::PlayerId;
use crate::types::track_key::TrackId;
use crate::types::track_key::TrackKey;

/// Competency snapshots for the full instrument/key grid. The native
/// combination of each instrument is `None`: it is tracked by the
/// distinguished default track, not duplicated here.
pub type TrackGrid = BTreeMap<Instrument, BTreeMap<Key, Option<CompetencySnapshot>>>;

/// Fans the tracker out across every (instrument, transposition key)
/// combination, each an independently decaying, independently smoothed
/// record. Heavy practice of one combination never inflates another; a
/// combination left untouched decays even while a sibling is practiced
/// daily.
pub struct TrackRegistry<S: Store> {
    player: PlayerId,
    tracker: Tracker<S>,
}

impl<S: Store> TrackRegistry<S> {
    pub fn new(player: PlayerId, store: S) -> Self {
        Self {
            player,
            tracker: Tracker::new(store),
        }
    }

    pub fn record_session(
        &self,
        instrument: Instrument,
        key: Key,
        tier: PlayerTier,
        input: &SessionInput,
        now: Timestamp,
    ) -> Fallible<SessionResult> {
        self.tracker
            .record_session(&self.track_key(instrument, key), tier, input, now)
    }

    pub fn current_competency(
        &self,
        instrument: Instrument,
        key: Key,
        tier: PlayerTier,
        now: Timestamp,
    ) -> Fallible<CompetencySnapshot> {
        self.tracker
            .current_competency(&self.track_key(instrument, key), tier, now)
    }

    /// The headline score: competency in the instrument's own key.
    pub fn default_track(
        &self,
        instrument: Instrument,
        tier: PlayerTier,
        now: Timestamp,
    ) -> Fallible<CompetencySnapshot> {
        self.current_competency(instrument, instrument.native_key(), tier, now)
    }

    /// Supplementary "transposition mastery" detail for every combination.
    pub fn all_tracks(&self, tier: PlayerTier, now: Timestamp) -> Fallible<TrackGrid> {
        let mut grid = TrackGrid::new();
        for instrument in Instrument::ALL {
            let mut row = BTreeMap::new();
            for key in Key::ALL {
                let snapshot = if key == instrument.native_key() {
                    None
                } else {
                    Some(self.current_competency(instrument, key, tier, now)?)
                };
                row.insert(key, snapshot);
            }
            grid.insert(instrument, row);
        }
        Ok(grid)
    }

    fn track_key(&self, instrument: Instrument, key: Key) -> TrackKey {
        TrackKey::new(
            self.player.clone(),
            TrackId::Transposition { instrument, key },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::store::MemoryStore;
    use crate::types::record::SEED_COMPETENCY;
    use crate::types::tier::DifficultyTier;
    use crate::types::tier::SessionMode;

    fn registry() -> TrackRegistry<MemoryStore> {
        TrackRegistry::new(PlayerId::new("tester"), MemoryStore::new())
    }

    fn input() -> SessionInput {
        SessionInput {
            correct_count: 18,
            total_count: 20,
            avg_speed_seconds: 1.5,
            notes_practiced: BTreeSet::from(["c4".to_string()]),
            difficulty: DifficultyTier::Hard,
            mode: SessionMode::Learning,
        }
    }

    #[test]
    fn test_tracks_evolve_independently() {
        let registry = registry();
        let now = Timestamp::now();
        registry
            .record_session(
                Instrument::Trumpet,
                Key::Eb,
                PlayerTier::Beginner,
                &input(),
                now,
            )
            .unwrap();

        let practiced = registry
            .current_competency(Instrument::Trumpet, Key::Eb, PlayerTier::Beginner, now)
            .unwrap();
        let same_instrument = registry
            .current_competency(Instrument::Trumpet, Key::C, PlayerTier::Beginner, now)
            .unwrap();
        let same_key = registry
            .current_competency(Instrument::FrenchHorn, Key::Eb, PlayerTier::Beginner, now)
            .unwrap();

        assert!(practiced.competency > SEED_COMPETENCY);
        assert_eq!(same_instrument.competency, SEED_COMPETENCY);
        assert_eq!(same_key.competency, SEED_COMPETENCY);
        assert_eq!(same_instrument.total_sessions, 0);
    }

    #[test]
    fn test_untouched_combination_decays_despite_daily_practice_elsewhere() {
        let registry = registry();
        let now = Timestamp::now();
        registry
            .record_session(
                Instrument::Trumpet,
                Key::Eb,
                PlayerTier::Advanced,
                &input(),
                now,
            )
            .unwrap();
        // A month of daily practice, all in C.
        for day in 1..=30 {
            registry
                .record_session(
                    Instrument::Trumpet,
                    Key::C,
                    PlayerTier::Advanced,
                    &input(),
                    now.plus_days(day as f64),
                )
                .unwrap();
        }
        let eb_then = registry
            .current_competency(Instrument::Trumpet, Key::Eb, PlayerTier::Advanced, now)
            .unwrap();
        let eb_now = registry
            .current_competency(
                Instrument::Trumpet,
                Key::Eb,
                PlayerTier::Advanced,
                now.plus_days(30.0),
            )
            .unwrap();
        assert!(eb_now.competency < eb_then.competency);
    }

    #[test]
    fn test_grid_diagonal_is_none() {
        let registry = registry();
        let grid = registry
            .all_tracks(PlayerTier::Beginner, Timestamp::now())
            .unwrap();
        assert_eq!(grid.len(), Instrument::ALL.len());
        for instrument in Instrument::ALL {
            let row = &grid[&instrument];
            assert_eq!(row.len(), Key::ALL.len());
            for key in Key::ALL {
                if key == instrument.native_key() {
                    assert!(row[&key].is_none());
                } else {
                    assert!(row[&key].is_some());
                }
            }
        }
    }

    #[test]
    fn test_default_track_is_the_native_combination() {
        let registry = registry();
        let now = Timestamp::now();
        registry
            .record_session(
                Instrument::Trumpet,
                Key::Bb,
                PlayerTier::Beginner,
                &input(),
                now,
            )
            .unwrap();
        let headline = registry
            .default_track(Instrument::Trumpet, PlayerTier::Beginner, now)
            .unwrap();
        let native = registry
            .current_competency(Instrument::Trumpet, Key::Bb, PlayerTier::Beginner, now)
            .unwrap();
        assert_eq!(headline, native);
        assert_eq!(headline.total_sessions, 1);
    }
}
