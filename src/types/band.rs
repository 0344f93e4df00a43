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

/// Qualitative competency level. Derived from the (possibly decayed)
/// competency value on every read; never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    EarlyLearning,
    Developing,
    Functional,
    Independent,
    Mastered,
}

impl Band {
    pub const ALL: [Band; 5] = [
        Band::EarlyLearning,
        Band::Developing,
        Band::Functional,
        Band::Independent,
        Band::Mastered,
    ];

    pub fn of(competency: f64) -> Self {
        if competency < 0.2 {
            Band::EarlyLearning
        } else if competency < 0.4 {
            Band::Developing
        } else if competency < 0.6 {
            Band::Functional
        } else if competency < 0.8 {
            Band::Independent
        } else {
            Band::Mastered
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Band::EarlyLearning => "Early Learning",
            Band::Developing => "Developing",
            Band::Functional => "Functional",
            Band::Independent => "Independent",
            Band::Mastered => "Mastered",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Band::EarlyLearning => "Just getting started with these fingerings.",
            Band::Developing => "Common fingerings are starting to stick.",
            Band::Functional => "Can play most notes with occasional hesitation.",
            Band::Independent => "Plays fluently with rare mistakes.",
            Band::Mastered => "Fingering recall is fast, accurate, and stable.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::of(0.0), Band::EarlyLearning);
        assert_eq!(Band::of(0.19), Band::EarlyLearning);
        assert_eq!(Band::of(0.2), Band::Developing);
        assert_eq!(Band::of(0.4), Band::Functional);
        assert_eq!(Band::of(0.6), Band::Independent);
        assert_eq!(Band::of(0.8), Band::Mastered);
        assert_eq!(Band::of(1.0), Band::Mastered);
    }
}
