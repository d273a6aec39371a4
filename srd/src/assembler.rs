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

//! Assembly of notes from the rows of the notes sheet.
//!
//! The notes sheet has no fixed layout. A note starts with a header row
//! `Note <id>` followed by the rows of its text. Notes are grouped into
//! scenarios, each starting with a row `Scenario S<n> ...`. The rows between a
//! scenario and the next note describe the scenario and are not part of any
//! note. Blank rows are ignored altogether.
//!
//! ```text
//! Note 1          <- header
//! Line A          <- text of note 1
//! Line B          <- text of note 1
//! Scenario S1     <- ends note 1
//! Description     <- ignored
//! Note 2          <- header
//! Line C          <- text of note 2
//! Note 3          <- header, ends note 2
//! ```

use std::mem;

use log::trace;

use crate::fields::cell;
use crate::note::header_ident;
use crate::{Error, Note};

/// The kind of a row in the notes sheet.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum RowKind {
    Blank,
    Header,
    Scenario,
    Content,
}

impl RowKind {
    fn of(row: &[String]) -> Self {
        match cell(row, 0) {
            "" => Self::Blank,
            first if header_ident(first).is_some() => Self::Header,
            first if is_scenario(first) => Self::Scenario,
            _ => Self::Content,
        }
    }
}

/// Returns `true` if the cell starts with `Scenario S<digit>`.
fn is_scenario(cell: &str) -> bool {
    cell.strip_prefix("Scenario S")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Iterator that groups the rows of the notes sheet into notes.
///
/// Each note block yields exactly one item, either the note or the error why
/// the block is not a valid note. Rows are read as the iterator advances.
pub struct NoteAssembler<I> {
    rows: I,
    lines: Vec<String>,
    in_note: bool,
}

impl<I> NoteAssembler<I>
where
    I: Iterator<Item = Vec<String>>,
{
    pub fn new(rows: I) -> Self {
        Self {
            rows,
            lines: Vec::new(),
            in_note: false,
        }
    }

    fn finalize(lines: &[String]) -> Result<Note, Error> {
        let note = Note::from_block(lines);
        trace!("note block of {} line(s) finalized", lines.len());
        note
    }
}

impl<I> Iterator for NoteAssembler<I>
where
    I: Iterator<Item = Vec<String>>,
{
    type Item = Result<Note, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.rows.by_ref() {
            let kind = RowKind::of(&row);

            // only the first cell of a row is part of a note
            let Some(first) = row.into_iter().next() else {
                continue;
            };

            match kind {
                RowKind::Blank => {}

                RowKind::Header => {
                    self.in_note = true;

                    if self.lines.is_empty() {
                        self.lines.push(first);
                    } else {
                        let block = mem::replace(&mut self.lines, vec![first]);
                        return Some(Self::finalize(&block));
                    }
                }

                RowKind::Scenario => {
                    self.in_note = false;

                    if !self.lines.is_empty() {
                        let block = mem::take(&mut self.lines);
                        return Some(Self::finalize(&block));
                    }
                }

                RowKind::Content => {
                    if self.in_note {
                        self.lines.push(first);
                    }
                }
            }
        }

        if self.lines.is_empty() {
            None
        } else {
            let block = mem::take(&mut self.lines);
            Some(Self::finalize(&block))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(rows: &[&[&str]]) -> Vec<Result<Note, Error>> {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        NoteAssembler::new(rows.into_iter()).collect()
    }

    fn ok(result: &Result<Note, Error>) -> (u64, &str) {
        let note = result.as_ref().expect("note should be valid");
        (note.id(), note.text())
    }

    #[test]
    fn classifies_rows() {
        let row = |c: &str| vec![c.to_string()];

        assert_eq!(RowKind::of(&[]), RowKind::Blank);
        assert_eq!(RowKind::of(&row("   ")), RowKind::Blank);
        assert_eq!(RowKind::of(&row("Note 1")), RowKind::Header);
        assert_eq!(RowKind::of(&row(" Note 1 ")), RowKind::Header);
        assert_eq!(RowKind::of(&row("Note 1 applies")), RowKind::Content);
        assert_eq!(RowKind::of(&row("Scenario S12 - Heathrow")), RowKind::Scenario);
        assert_eq!(RowKind::of(&row("Scenario S")), RowKind::Content);
        assert_eq!(RowKind::of(&row("Scenario 1")), RowKind::Content);
        assert_eq!(RowKind::of(&row("Some text")), RowKind::Content);
    }

    #[test]
    fn scenario_ends_note() {
        let notes = assemble(&[
            &["Note 1"],
            &["Line A"],
            &["Line B"],
            &["Scenario S1"],
            &["Note 2"],
            &["Line C"],
        ]);

        assert_eq!(notes.len(), 2);
        assert_eq!(ok(&notes[0]), (1, "Line A\nLine B"));
        assert_eq!(ok(&notes[1]), (2, "Line C"));
    }

    #[test]
    fn header_ends_note() {
        let notes = assemble(&[&["Note 1"], &["Line A"], &["Note 2"], &["Line B"]]);

        assert_eq!(notes.len(), 2);
        assert_eq!(ok(&notes[0]), (1, "Line A"));
        assert_eq!(ok(&notes[1]), (2, "Line B"));
    }

    #[test]
    fn consecutive_headers() {
        let notes = assemble(&[&["Note 1"], &["Note 2"], &["Body"]]);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], Err(Error::MissingNoteText { id: 1 }));
        assert_eq!(ok(&notes[1]), (2, "Body"));
    }

    #[test]
    fn ignores_rows_outside_notes() {
        let notes = assemble(&[
            &["Title of the sheet"],
            &["Scenario S1 - Heathrow"],
            &["Scenario description"],
            &["Note 1"],
            &["Text"],
            &["Scenario S2"],
            &["More description"],
        ]);

        assert_eq!(notes.len(), 1);
        assert_eq!(ok(&notes[0]), (1, "Text"));
    }

    #[test]
    fn ignores_blank_rows() {
        let notes = assemble(&[
            &["Note 1"],
            &[],
            &["", "second cell"],
            &["Line A", "ignored"],
            &["  "],
            &["Line B"],
        ]);

        assert_eq!(notes.len(), 1);
        assert_eq!(ok(&notes[0]), (1, "Line A\nLine B"));
    }

    #[test]
    fn empty_sheet() {
        assert!(assemble(&[]).is_empty());
        assert!(assemble(&[&["Scenario S1"], &["text"]]).is_empty());
    }

    #[test]
    fn header_at_end() {
        let notes = assemble(&[&["Note 1"], &["Text"], &["Note 2"]]);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1], Err(Error::MissingNoteText { id: 2 }));
    }

    #[test]
    fn stops_reading_when_dropped() {
        let mut read = 0;
        let rows = [["Note 1"], ["A"], ["Note 2"], ["B"], ["Note 3"], ["C"]]
            .into_iter()
            .inspect(|_| read += 1)
            .map(|row| row.map(String::from).to_vec());

        let first = NoteAssembler::new(rows).next();

        assert_eq!(first.map(|n| n.map(|n| n.id())), Some(Ok(1)));
        assert_eq!(read, 3);
    }
}
