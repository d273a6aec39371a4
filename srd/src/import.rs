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

//! Import of a document into a record store.

use std::collections::BTreeMap;

use log::{debug, info, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Note, Route, SrdDocument, SrdStats, TabularSource};

/// The number of records written to a sink at once.
pub const BATCH_SIZE: usize = 250;

/// Link between a note and a route that references the note.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoteRouteLink {
    pub note_id: u64,
    pub route_id: u64,
}

/// A store that receives the records of an import.
///
/// All methods are called within one import and a store that supports
/// transactions should commit only after the import succeeded.
pub trait RecordSink {
    /// Removes all notes, routes and links of a previous import.
    fn delete_all(&mut self) -> Result<(), Error>;

    fn insert_notes(&mut self, notes: &[Note]) -> Result<(), Error>;

    /// Inserts the routes and returns the ID assigned to the first route.
    ///
    /// The following routes of the batch must have consecutive IDs.
    fn insert_routes(&mut self, routes: &[Route]) -> Result<u64, Error>;

    fn insert_links(&mut self, links: &[NoteRouteLink]) -> Result<(), Error>;
}

/// Imports all notes and routes of the `document` into the `sink`.
///
/// Previous records of the sink are deleted first. Notes and routes that are
/// invalid are logged and skipped. A route is linked only to notes that are
/// defined by the document and references to unknown notes are dropped.
///
/// Returns the statistics of the document after reading all records.
///
/// # Errors
///
/// Returns an error if the sink fails to store records.
pub fn import<S, K>(document: &SrdDocument<S>, sink: &mut K) -> Result<SrdStats, Error>
where
    S: TabularSource,
    K: RecordSink + ?Sized,
{
    info!("importing SRD");
    sink.delete_all()?;

    // routes of each defined note
    let mut route_notes = insert_notes(document, sink)?;
    insert_routes(document, sink, &mut route_notes)?;
    insert_links(sink, &route_notes)?;

    let stats = document.stats();
    info!("imported {stats}");
    Ok(stats)
}

fn insert_notes<S, K>(
    document: &SrdDocument<S>,
    sink: &mut K,
) -> Result<BTreeMap<u64, Vec<u64>>, Error>
where
    S: TabularSource,
    K: RecordSink + ?Sized,
{
    let mut route_notes = BTreeMap::new();
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    for note in document.notes() {
        let note = match note {
            Ok(note) => note,
            Err(e) => {
                warn!("invalid note detected: {e}");
                continue;
            }
        };

        route_notes.insert(note.id(), Vec::new());
        batch.push(note);

        if batch.len() >= BATCH_SIZE {
            trace!("inserting batch of {} notes", batch.len());
            sink.insert_notes(&batch)?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        trace!("inserting batch of {} notes", batch.len());
        sink.insert_notes(&batch)?;
    }

    Ok(route_notes)
}

fn insert_routes<S, K>(
    document: &SrdDocument<S>,
    sink: &mut K,
    route_notes: &mut BTreeMap<u64, Vec<u64>>,
) -> Result<(), Error>
where
    S: TabularSource,
    K: RecordSink + ?Sized,
{
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    for route in document.routes() {
        match route {
            Ok(route) => batch.push(route),
            Err(e) => {
                warn!("invalid route detected: {e}");
                continue;
            }
        }

        if batch.len() >= BATCH_SIZE {
            insert_route_batch(sink, &batch, route_notes)?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_route_batch(sink, &batch, route_notes)?;
    }

    Ok(())
}

fn insert_route_batch<K>(
    sink: &mut K,
    batch: &[Route],
    route_notes: &mut BTreeMap<u64, Vec<u64>>,
) -> Result<(), Error>
where
    K: RecordSink + ?Sized,
{
    trace!("inserting batch of {} routes", batch.len());
    let first_id = sink.insert_routes(batch)?;

    for (route_id, route) in (first_id..).zip(batch) {
        for note_id in route.note_ids() {
            match route_notes.get_mut(note_id) {
                Some(routes) => routes.push(route_id),
                None => debug!("route {route_id} references unknown note {note_id}"),
            }
        }
    }

    Ok(())
}

fn insert_links<K>(sink: &mut K, route_notes: &BTreeMap<u64, Vec<u64>>) -> Result<(), Error>
where
    K: RecordSink + ?Sized,
{
    let links = route_notes.iter().flat_map(|(&note_id, routes)| {
        routes
            .iter()
            .map(move |&route_id| NoteRouteLink { note_id, route_id })
    });

    let mut batch = Vec::with_capacity(BATCH_SIZE);

    for link in links {
        batch.push(link);

        if batch.len() >= BATCH_SIZE {
            trace!("inserting batch of {} links", batch.len());
            sink.insert_links(&batch)?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        trace!("inserting batch of {} links", batch.len());
        sink.insert_links(&batch)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sheet, Workbook};

    /// Sink that records all calls.
    #[derive(Default)]
    struct Recorder {
        deleted: bool,
        notes: Vec<Vec<Note>>,
        routes: Vec<Vec<Route>>,
        links: Vec<Vec<NoteRouteLink>>,
        fail_routes: bool,
    }

    impl RecordSink for Recorder {
        fn delete_all(&mut self) -> Result<(), Error> {
            self.deleted = true;
            Ok(())
        }

        fn insert_notes(&mut self, notes: &[Note]) -> Result<(), Error> {
            self.notes.push(notes.to_vec());
            Ok(())
        }

        fn insert_routes(&mut self, routes: &[Route]) -> Result<u64, Error> {
            if self.fail_routes {
                return Err(Error::Storage("disk full".to_string()));
            }

            let first_id = 1 + self.routes.iter().map(Vec::len).sum::<usize>() as u64;
            self.routes.push(routes.to_vec());
            Ok(first_id)
        }

        fn insert_links(&mut self, links: &[NoteRouteLink]) -> Result<(), Error> {
            self.links.push(links.to_vec());
            Ok(())
        }
    }

    fn route(notes: &str) -> Vec<String> {
        ["EGLL", "", "MC", "MC", "DCT", "", "EGKK", notes]
            .map(String::from)
            .to_vec()
    }

    fn document(routes: usize, notes: &str) -> SrdDocument<Workbook> {
        let mut rows = vec![vec!["header".to_string()]];
        rows.extend((0..routes).map(|_| route(notes)));

        let workbook = Workbook::new().with_sheet(Sheet::Routes, rows).with_sheet(
            Sheet::Notes,
            [["Note 1"], ["One"], ["Note 2"], ["Two"], ["Note 3"]],
        );

        SrdDocument::new(workbook).expect("sheets should exist")
    }

    #[test]
    fn links_defined_notes_only() {
        let document = document(2, "Notes: 2-1-9");
        let mut sink = Recorder::default();

        let stats = import(&document, &mut sink).expect("import should succeed");

        assert!(sink.deleted);
        assert_eq!(stats.note_count, 2);
        assert_eq!(stats.note_error_count, 1);
        assert_eq!(stats.route_count, 2);
        assert_eq!(
            sink.links.concat(),
            vec![
                NoteRouteLink { note_id: 1, route_id: 1 },
                NoteRouteLink { note_id: 1, route_id: 2 },
                NoteRouteLink { note_id: 2, route_id: 1 },
                NoteRouteLink { note_id: 2, route_id: 2 },
            ]
        );
    }

    #[test]
    fn inserts_in_batches() {
        let document = document(BATCH_SIZE * 2 + 1, "Notes: 1");
        let mut sink = Recorder::default();

        import(&document, &mut sink).expect("import should succeed");

        let sizes: Vec<usize> = sink.routes.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![BATCH_SIZE, BATCH_SIZE, 1]);

        let links: Vec<usize> = sink.links.iter().map(Vec::len).collect();
        assert_eq!(links, vec![BATCH_SIZE, BATCH_SIZE, 1]);

        let last = sink.links.concat().last().copied();
        assert_eq!(
            last,
            Some(NoteRouteLink {
                note_id: 1,
                route_id: BATCH_SIZE as u64 * 2 + 1
            })
        );
    }

    #[test]
    fn skips_invalid_routes() {
        let document = document(3, "Notes: x");
        let mut sink = Recorder::default();

        let stats = import(&document, &mut sink).expect("import should succeed");

        assert!(sink.routes.is_empty());
        assert!(sink.links.is_empty());
        assert_eq!(stats.route_error_count, 3);
    }

    #[test]
    fn sink_error_aborts_import() {
        let document = document(1, "");
        let mut sink = Recorder {
            fail_routes: true,
            ..Default::default()
        };

        assert_eq!(
            import(&document, &mut sink),
            Err(Error::Storage("disk full".to_string()))
        );
        assert!(sink.links.is_empty());
    }
}
