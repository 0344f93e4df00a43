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

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Fallible;
use crate::types::record::CompetencyRecord;
use crate::types::track_key::TrackKey;

/// Persistence collaborator. A record is read and written as a unit; a
/// missing record is `None`, never an error.
pub trait Store {
    fn load(&self, key: &TrackKey) -> Fallible<Option<CompetencyRecord>>;
    fn save(&self, key: &TrackKey, record: &CompetencyRecord) -> Fallible<()>;
}

/// In-memory store for tests and embedders that bring their own
/// persistence.
pub struct MemoryStore {
    records: Mutex<HashMap<TrackKey, CompetencyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &TrackKey) -> Fallible<Option<CompetencyRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &TrackKey, record: &CompetencyRecord) -> Fallible<()> {
        let mut records = self.records.lock().unwrap();
        records.insert(key.clone(), record.clone());
        Ok(())
    }
}
