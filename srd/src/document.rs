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

use std::cell::Cell;
use std::iter::Skip;

use log::debug;

use crate::assembler::NoteAssembler;
use crate::source::Rows;
use crate::{Error, Note, Route, Sheet, SrdStats, TabularSource};

/// A Standard Route Document.
///
/// The document reads the routes and notes of the SRD workbook lazily. Each
/// traversal of the [routes] or [notes] starts at the first row of the
/// respective sheet and counts the records in the document's [stats] as they
/// are read. Stopping a traversal early stops reading the sheet.
///
/// A document keeps its statistics in a [`Cell`] and can't be shared between
/// threads. Two traversals of the same sheet that are interleaved count into
/// the same statistics.
///
/// # Examples
///
/// ```
/// use srd::{Sheet, SrdDocument, Workbook};
///
/// # fn main() -> Result<(), srd::Error> {
/// let workbook = Workbook::new()
///     .with_sheet(Sheet::Routes, vec![
///         vec!["ADEP", "SID", "Min", "Max", "Route", "STAR", "ADES", "Remarks"],
///         vec!["EGLL", "", "MC", "245", "CPT Q41 SAM", "", "EGHH", "Notes: 1"],
///     ])
///     .with_sheet(Sheet::Notes, vec![vec!["Note 1"], vec!["Not available H24."]]);
///
/// let document = SrdDocument::new(workbook)?;
///
/// for route in document.routes() {
///     let route = route?;
///     println!("{} -> {} via {}", route.departure(), route.arrival(), route.segment());
/// }
///
/// let stats = document.stats();
/// assert_eq!(stats.route_count, 1);
/// # Ok(())
/// # }
/// ```
///
/// [routes]: SrdDocument::routes
/// [notes]: SrdDocument::notes
/// [stats]: SrdDocument::stats
#[derive(Debug)]
pub struct SrdDocument<S> {
    source: S,
    stats: Cell<SrdStats>,
}

impl<S> SrdDocument<S>
where
    S: TabularSource,
{
    /// Creates the document from a workbook.
    ///
    /// # Errors
    ///
    /// Returns an error if the routes or notes sheet doesn't exist.
    pub fn new(source: S) -> Result<Self, Error> {
        for sheet in [Sheet::Routes, Sheet::Notes] {
            if !source.has_sheet(sheet) {
                return Err(Error::SheetNotFound { sheet });
            }
        }

        Ok(Self {
            source,
            stats: Cell::default(),
        })
    }

    /// Returns an iterator over the routes of the document.
    ///
    /// The first row of the sheet is the header and is skipped. Every other
    /// row yields the route or the error why the row is not a valid route.
    pub fn routes(&self) -> Routes<'_> {
        debug!("reading routes from sheet {}", Sheet::Routes);
        self.update(SrdStats::reset_routes);

        Routes {
            rows: self.source.rows(Sheet::Routes).skip(1),
            stats: &self.stats,
        }
    }

    /// Returns an iterator over the notes of the document.
    pub fn notes(&self) -> Notes<'_> {
        debug!("reading notes from sheet {}", Sheet::Notes);
        self.update(SrdStats::reset_notes);

        Notes {
            notes: NoteAssembler::new(self.source.rows(Sheet::Notes)),
            stats: &self.stats,
        }
    }

    /// Returns the statistics of the last traversal of routes and notes.
    pub fn stats(&self) -> SrdStats {
        self.stats.get()
    }

    /// Reads all routes and notes and returns the statistics.
    pub fn parse(&self) -> SrdStats {
        self.routes().for_each(drop);
        self.notes().for_each(drop);

        let stats = self.stats();
        debug!("parsed {stats}");
        stats
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn update(&self, f: impl FnOnce(&mut SrdStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

/// Iterator over the routes of a [`SrdDocument`].
pub struct Routes<'a> {
    rows: Skip<Rows<'a>>,
    stats: &'a Cell<SrdStats>,
}

impl Iterator for Routes<'_> {
    type Item = Result<Route, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let route = Route::try_from(row.as_slice());

        if let Err(e) = &route {
            debug!("invalid route: {e}");
        }

        let mut stats = self.stats.get();
        stats.count_route(&route);
        self.stats.set(stats);

        Some(route)
    }
}

/// Iterator over the notes of a [`SrdDocument`].
pub struct Notes<'a> {
    notes: NoteAssembler<Rows<'a>>,
    stats: &'a Cell<SrdStats>,
}

impl Iterator for Notes<'_> {
    type Item = Result<Note, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let note = self.notes.next()?;

        if let Err(e) = &note {
            debug!("invalid note: {e}");
        }

        let mut stats = self.stats.get();
        stats.count_note(&note);
        self.stats.set(stats);

        Some(note)
    }
}
