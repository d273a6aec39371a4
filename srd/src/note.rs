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

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::fields::unsigned;
use crate::Error;

/// A note that applies to the routes that reference it.
///
/// Notes are only assembled from the notes sheet and, like routes, are not
/// deserializable.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Note {
    id: u64,
    text: String,
}

impl Note {
    /// The number of the note as referenced by routes.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The text of the note where lines are separated by a newline.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Creates a note from the first cells of a note block.
    ///
    /// The first line is the header `Note <id>` and all following lines are
    /// the text of the note.
    pub(crate) fn from_block(lines: &[String]) -> Result<Self, Error> {
        let (header, body) = lines.split_first().ok_or_else(|| Error::InvalidNoteIdent {
            header: String::new(),
        })?;

        let id = header_ident(header.trim())
            .and_then(unsigned)
            .ok_or_else(|| Error::InvalidNoteIdent {
                header: header.clone(),
            })?;

        if body.is_empty() {
            return Err(Error::MissingNoteText { id });
        }

        let text = body.iter().fold(String::new(), |mut text, line| {
            text.push_str(line);
            text.push('\n');
            text
        });

        Ok(Self {
            id,
            text: text.trim().to_string(),
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Note {}: {}", self.id, self.text)
    }
}

/// Returns the digits of a note header `Note <digits>`.
pub(crate) fn header_ident(cell: &str) -> Option<&str> {
    cell.strip_prefix("Note ")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn joins_lines() {
        let note = Note::from_block(&block(&["Note 7", "  Line A", "Line B  ", ""]))
            .expect("note should be created");

        assert_eq!(note.id(), 7);
        assert_eq!(note.text(), "Line A\nLine B");
    }

    #[test]
    fn header_only() {
        assert_eq!(
            Note::from_block(&block(&["Note 3"])),
            Err(Error::MissingNoteText { id: 3 })
        );
    }

    #[test]
    fn ident_out_of_range() {
        let header = "Note 99999999999999999999";
        assert_eq!(
            Note::from_block(&block(&[header, "text"])),
            Err(Error::InvalidNoteIdent {
                header: header.to_string()
            })
        );
    }

    #[test]
    fn headers() {
        assert_eq!(header_ident("Note 12"), Some("12"));
        assert_eq!(header_ident("Note 12a"), None);
        assert_eq!(header_ident("Note "), None);
        assert_eq!(header_ident("Notes: 12"), None);
        assert_eq!(header_ident("note 12"), None);
    }
}
