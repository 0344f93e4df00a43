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

use serde::Deserialize;
use serde::Serialize;

use crate::types::instrument::Instrument;
use crate::types::instrument::Key;

/// Stable player identifier, supplied by the identity collaborator. The
/// engine is agnostic to how it is produced.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The unit of independent progression. The tracker treats this as opaque;
/// only the registry knows the instrument/key cross product behind it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TrackId {
    /// The single record used when the caller wants one competency value
    /// across all practice.
    Global,
    /// One record per (instrument, transposition key) combination.
    Transposition { instrument: Instrument, key: Key },
}

impl TrackId {
    pub fn storage_key(self) -> String {
        match self {
            TrackId::Global => "global".to_string(),
            TrackId::Transposition { instrument, key } => {
                format!("{}/{}", instrument.as_str(), key.as_str())
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TrackKey {
    pub player: PlayerId,
    pub track: TrackId,
}

impl TrackKey {
    pub fn new(player: PlayerId, track: TrackId) -> Self {
        Self { player, track }
    }

    pub fn global(player: PlayerId) -> Self {
        Self {
            player,
            track: TrackId::Global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        let mut keys = vec![TrackId::Global.storage_key()];
        for instrument in Instrument::ALL {
            for key in Key::ALL {
                keys.push(TrackId::Transposition { instrument, key }.storage_key());
            }
        }
        let count = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), count);
    }
}
