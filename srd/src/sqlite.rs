// SPDX-License-Identifier: Apache-2.0
// Copyright 2024 Joe Pearson
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

//! SQLite storage of imported routes and notes.

use std::path::Path;

use log::{debug, info};
use rusqlite::{params, Connection, Transaction};
use rusqlite_migration::{Migrations, M};

use crate::import::{import, NoteRouteLink, RecordSink};
use crate::{Error, Note, Route, SrdDocument, SrdStats, TabularSource};

const SCHEMA: &str = "
CREATE TABLE srd_notes (
    id INTEGER PRIMARY KEY,
    text TEXT NOT NULL
);

CREATE TABLE srd_routes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    departure TEXT NOT NULL,
    sid TEXT,
    min_level INTEGER,
    max_level INTEGER,
    segment TEXT NOT NULL,
    star TEXT,
    arrival TEXT NOT NULL
);

CREATE TABLE srd_note_srd_route (
    srd_note_id INTEGER NOT NULL REFERENCES srd_notes (id) ON DELETE CASCADE,
    srd_route_id INTEGER NOT NULL REFERENCES srd_routes (id) ON DELETE CASCADE,
    PRIMARY KEY (srd_note_id, srd_route_id)
);

CREATE INDEX srd_routes_departure_arrival ON srd_routes (departure, arrival);
";

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<rusqlite_migration::Error> for Error {
    fn from(value: rusqlite_migration::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

/// SQLite database with the tables `srd_notes`, `srd_routes` and
/// `srd_note_srd_route`.
///
/// The schema is created or migrated when the store is opened.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the database at the `path` and creates it if it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        debug!("opening SRD database {}", path.as_ref().display());
        Self::migrate(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        Self::migrate(Connection::open_in_memory()?)
    }

    fn migrate(mut conn: Connection) -> Result<Self, Error> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Migrations::new(vec![M::up(SCHEMA)]).to_latest(&mut conn)?;
        Ok(Self { conn })
    }

    /// Replaces all records of the store with the routes and notes of the
    /// `document`.
    ///
    /// The import is written in one transaction and the previous records
    /// remain if the import fails.
    pub fn import<S: TabularSource>(&mut self, document: &SrdDocument<S>) -> Result<SrdStats, Error> {
        let mut tx = self.conn.transaction()?;
        let stats = import(document, &mut tx)?;
        tx.commit()?;
        info!("committed SRD import");
        Ok(stats)
    }

    /// The underlying connection to query the imported records.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn to_sql_int(value: u64) -> Result<i64, Error> {
    i64::try_from(value).map_err(|_| Error::Storage(format!("{value} exceeds the integer range")))
}

impl RecordSink for Transaction<'_> {
    fn delete_all(&mut self) -> Result<(), Error> {
        self.execute_batch(
            "DELETE FROM srd_note_srd_route;
             DELETE FROM srd_routes;
             DELETE FROM srd_notes;",
        )?;
        Ok(())
    }

    fn insert_notes(&mut self, notes: &[Note]) -> Result<(), Error> {
        let mut stmt =
            self.prepare_cached("INSERT OR REPLACE INTO srd_notes (id, text) VALUES (?1, ?2)")?;

        for note in notes {
            stmt.execute(params![to_sql_int(note.id())?, note.text()])?;
        }

        Ok(())
    }

    fn insert_routes(&mut self, routes: &[Route]) -> Result<u64, Error> {
        let mut stmt = self.prepare_cached(
            "INSERT INTO srd_routes
                 (departure, sid, min_level, max_level, segment, star, arrival)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        let mut first_id = None;

        for route in routes {
            stmt.execute(params![
                route.departure(),
                route.sid(),
                route.min_level(),
                route.max_level(),
                route.segment(),
                route.star(),
                route.arrival(),
            ])?;

            first_id.get_or_insert(self.last_insert_rowid());
        }

        let first_id = first_id.unwrap_or_else(|| self.last_insert_rowid() + 1);
        u64::try_from(first_id).map_err(|_| Error::Storage(format!("invalid route id {first_id}")))
    }

    fn insert_links(&mut self, links: &[NoteRouteLink]) -> Result<(), Error> {
        let mut stmt = self.prepare_cached(
            "INSERT OR IGNORE INTO srd_note_srd_route (srd_note_id, srd_route_id) VALUES (?1, ?2)",
        )?;

        for link in links {
            stmt.execute(params![to_sql_int(link.note_id)?, to_sql_int(link.route_id)?])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sheet, Workbook};

    fn document(routes: &[[&str; 8]]) -> SrdDocument<Workbook> {
        let mut rows = vec![vec!["ADEP"; 8]];
        rows.extend(routes.iter().map(|route| route.to_vec()));

        let workbook = Workbook::new().with_sheet(Sheet::Routes, rows).with_sheet(
            Sheet::Notes,
            [
                vec!["Note 1"],
                vec!["Not available H24."],
                vec!["Note 2"],
                vec!["Only for jets."],
            ],
        );

        SrdDocument::new(workbook).expect("sheets should exist")
    }

    fn count(store: &SqliteStore, table: &str) -> i64 {
        store
            .connection()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("table should exist")
    }

    #[test]
    fn imports_routes_notes_and_links() {
        let document = document(&[
            ["EGLL", "", "MC", "245", "DCT BPK", "", "EGKK", "Notes: 1-2"],
            ["EGKK", "", "50", "MC", "DCT", "", "EGLL", "Notes: 2-7"],
        ]);

        let mut store = SqliteStore::open_in_memory().expect("store should open");
        let stats = store.import(&document).expect("import should succeed");

        assert_eq!(stats.route_count, 2);
        assert_eq!(stats.note_count, 2);
        assert_eq!(count(&store, "srd_routes"), 2);
        assert_eq!(count(&store, "srd_notes"), 2);
        assert_eq!(count(&store, "srd_note_srd_route"), 3);

        let (max_level, min_level): (Option<u32>, Option<u32>) = store
            .connection()
            .query_row(
                "SELECT max_level, min_level FROM srd_routes WHERE departure = 'EGLL'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .expect("route should exist");
        assert_eq!(max_level, Some(24500));
        assert_eq!(min_level, None);

        let text: String = store
            .connection()
            .query_row("SELECT text FROM srd_notes WHERE id = 2", [], |row| row.get(0))
            .expect("note should exist");
        assert_eq!(text, "Only for jets.");
    }

    #[test]
    fn import_replaces_previous_records() {
        let mut store = SqliteStore::open_in_memory().expect("store should open");

        store
            .import(&document(&[
                ["EGLL", "", "MC", "MC", "DCT", "", "EGKK", "Notes: 1"],
                ["EGKK", "", "MC", "MC", "DCT", "", "EGLL", "Notes: 1"],
            ]))
            .expect("import should succeed");
        store
            .import(&document(&[[
                "EGSS", "", "MC", "MC", "DCT", "", "EGGW", "",
            ]]))
            .expect("import should succeed");

        assert_eq!(count(&store, "srd_routes"), 1);
        assert_eq!(count(&store, "srd_note_srd_route"), 0);
    }

    #[test]
    fn opens_file_database_twice() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("srd.sqlite");

        {
            let mut store = SqliteStore::open(&path).expect("store should open");
            store
                .import(&document(&[[
                    "EGLL", "", "MC", "MC", "DCT", "", "EGKK", "",
                ]]))
                .expect("import should succeed");
        }

        let store = SqliteStore::open(&path).expect("migrated store should reopen");
        assert_eq!(count(&store, "srd_routes"), 1);
    }
}
