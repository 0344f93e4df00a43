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
use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::registry::TrackGrid;
use crate::registry::TrackRegistry;
use crate::tracker::Tracker;
use crate::tracker::TrackerConfig;
use crate::types::band::Band;
use crate::types::instrument::Instrument;
use crate::types::session::CompetencySnapshot;
use crate::types::timestamp::Timestamp;
use crate::types::track_key::PlayerId;
use crate::types::track_key::TrackKey;

const DATABASE_FILE_NAME: &str = "valvedrill.db";

pub fn print_stats(directory: Option<String>) -> Fallible<()> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let config = Config::load(&directory)?;

    let db_path = directory.join(DATABASE_FILE_NAME);
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?,
    )?;

    let now = Timestamp::now();
    let player = PlayerId::new(config.player.clone());
    let registry = TrackRegistry::new(player.clone(), db.clone());

    let mut headline = BTreeMap::new();
    for instrument in Instrument::ALL {
        headline.insert(
            instrument,
            registry.default_track(instrument, config.tier, now)?,
        );
    }
    let transposition = registry.all_tracks(config.tier, now)?;

    let global_tracker = Tracker::with_config(db, TrackerConfig::global());
    let global = global_tracker.current_competency(&TrackKey::global(player), config.tier, now)?;

    let bands = Band::ALL
        .iter()
        .map(|band| BandLegend {
            band: *band,
            name: band.name(),
            description: band.describe(),
        })
        .collect();

    let report = StatsReport {
        player: config.player,
        headline,
        transposition,
        global,
        bands,
    };
    let report_json = serde_json::to_string_pretty(&report)?;
    println!("{}", report_json);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    player: String,
    /// Per-instrument competency in the instrument's own key.
    headline: BTreeMap<Instrument, CompetencySnapshot>,
    /// The full transposition grid; native combinations are null.
    transposition: TrackGrid,
    /// The single all-practice record.
    global: CompetencySnapshot,
    bands: Vec<BandLegend>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BandLegend {
    band: Band,
    name: &'static str,
    description: &'static str,
}
