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

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::store::Store;
use crate::types::record::CompetencyRecord;
use crate::types::record::SESSION_HISTORY_CAP;
use crate::types::record::SessionRecord;
use crate::types::timestamp::Timestamp;
use crate::types::track_key::TrackKey;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

impl Store for Database {
    fn load(&self, key: &TrackKey) -> Fallible<Option<CompetencyRecord>> {
        let conn = self.acquire();
        let player = key.player.as_str();
        let track = key.track.storage_key();

        let sql = "select competency, last_practiced_at, created_at, notes_covered from tracks where player = ? and track = ?;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query((player, &track))?;
        let row = match rows.next()? {
            Some(row) => row,
            None => return Ok(None),
        };
        let competency: f64 = row.get(0)?;
        let last_practiced_at: Timestamp = row.get(1)?;
        let created_at: Timestamp = row.get(2)?;
        let notes_json: String = row.get(3)?;
        let notes_covered: BTreeSet<String> = match serde_json::from_str(&notes_json) {
            Ok(notes) => notes,
            Err(e) => {
                // A corrupt row is a lost record, not a dead track.
                log::warn!("corrupt notes for track {track}: {e}; starting fresh.");
                return Ok(None);
            }
        };

        let sql = "select recorded_at, raw_accuracy, raw_performance, weighted_performance, difficulty, competency_after, mode from track_sessions where player = ? and track = ? order by session_id desc limit ?;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query((player, &track, SESSION_HISTORY_CAP as i64))?;
        let mut session_history = Vec::new();
        while let Some(row) = rows.next()? {
            session_history.push(SessionRecord {
                timestamp: row.get(0)?,
                raw_accuracy: row.get(1)?,
                raw_performance: row.get(2)?,
                weighted_performance: row.get(3)?,
                difficulty_tier: row.get(4)?,
                competency_after: row.get(5)?,
                session_mode: row.get(6)?,
            });
        }
        // Chronological order.
        session_history.reverse();

        Ok(Some(CompetencyRecord {
            competency,
            last_practiced_at,
            session_history,
            notes_covered,
            created_at,
        }))
    }

    fn save(&self, key: &TrackKey, record: &CompetencyRecord) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        upsert_track(&tx, key, record)?;
        replace_sessions(&tx, key, record)?;
        tx.commit()?;
        Ok(())
    }
}

fn upsert_track(tx: &Transaction, key: &TrackKey, record: &CompetencyRecord) -> Fallible<()> {
    let notes_json = serde_json::to_string(&record.notes_covered)?;
    let sql = "insert into tracks (player, track, competency, last_practiced_at, created_at, notes_covered) values (?, ?, ?, ?, ?, ?) on conflict (player, track) do update set competency = excluded.competency, last_practiced_at = excluded.last_practiced_at, notes_covered = excluded.notes_covered;";
    tx.execute(
        sql,
        (
            key.player.as_str(),
            key.track.storage_key(),
            record.competency,
            record.last_practiced_at,
            record.created_at,
            notes_json,
        ),
    )?;
    Ok(())
}

/// The record is written as a unit: the stored history is replaced with the
/// in-memory one, which already carries the eviction cap.
fn replace_sessions(tx: &Transaction, key: &TrackKey, record: &CompetencyRecord) -> Fallible<()> {
    let player = key.player.as_str();
    let track = key.track.storage_key();
    tx.execute(
        "delete from track_sessions where player = ? and track = ?;",
        (player, &track),
    )?;
    let sql = "insert into track_sessions (player, track, recorded_at, raw_accuracy, raw_performance, weighted_performance, difficulty, competency_after, mode) values (?, ?, ?, ?, ?, ?, ?, ?, ?);";
    for session in &record.session_history {
        tx.execute(
            sql,
            (
                player,
                &track,
                session.timestamp,
                session.raw_accuracy,
                session.raw_performance,
                session.weighted_performance,
                session.difficulty_tier,
                session.competency_after,
                session.session_mode,
            ),
        )?;
    }
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["tracks"], |row| row.get(0))?;
    Ok(count > 0)
}
