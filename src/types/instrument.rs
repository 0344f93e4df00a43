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

/// Size of the note vocabulary covered by the fingering tables. This is the
/// denominator for coverage: the count of distinct notes a track can ever
/// practice.
pub const NOTE_VOCABULARY_SIZE: usize = 36;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Instrument {
    Trumpet,
    FrenchHorn,
    Euphonium,
    Tuba,
}

impl Instrument {
    pub const ALL: [Instrument; 4] = [
        Instrument::Trumpet,
        Instrument::FrenchHorn,
        Instrument::Euphonium,
        Instrument::Tuba,
    ];

    /// The key the instrument sounds in when reading untransposed parts.
    pub fn native_key(self) -> Key {
        match self {
            Instrument::Trumpet => Key::Bb,
            Instrument::FrenchHorn => Key::F,
            Instrument::Euphonium => Key::Bb,
            Instrument::Tuba => Key::C,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Instrument::Trumpet => "trumpet",
            Instrument::FrenchHorn => "french-horn",
            Instrument::Euphonium => "euphonium",
            Instrument::Tuba => "tuba",
        }
    }
}

/// A transposition key a part can be written in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Key {
    C,
    Bb,
    Eb,
    F,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::C, Key::Bb, Key::Eb, Key::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::Bb => "Bb",
            Key::Eb => "Eb",
            Key::F => "F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_keys() {
        assert_eq!(Instrument::Trumpet.native_key(), Key::Bb);
        assert_eq!(Instrument::FrenchHorn.native_key(), Key::F);
        assert_eq!(Instrument::Euphonium.native_key(), Key::Bb);
        assert_eq!(Instrument::Tuba.native_key(), Key::C);
    }

    #[test]
    fn test_every_instrument_has_a_native_key_in_the_key_set() {
        for instrument in Instrument::ALL {
            assert!(Key::ALL.contains(&instrument.native_key()));
        }
    }
}
