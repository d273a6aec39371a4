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

//! Conversion of spreadsheet cells.

use crate::Error;

/// Literal of a flight level that is not known ("MC").
const UNKNOWN_LEVEL: &str = "MC";

/// Prefix of the cell that references notes, e.g. `Notes: 12-34`.
const NOTES_PREFIX: &str = "Notes: ";

/// Returns the trimmed cell or an empty string if the row is too short.
pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", |cell| cell.trim())
}

pub(crate) fn required(row: &[String], index: usize, field: &'static str) -> Result<String, Error> {
    match cell(row, index) {
        "" => Err(Error::MissingField {
            field,
            row: render(row),
        }),
        value => Ok(value.to_string()),
    }
}

pub(crate) fn optional(row: &[String], index: usize) -> Option<String> {
    Some(cell(row, index))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Returns the altitude in feet of a flight level, or `None` if the level is
/// not known.
pub(crate) fn flight_level(
    row: &[String],
    index: usize,
    field: &'static str,
) -> Result<Option<u32>, Error> {
    match cell(row, index) {
        "" | UNKNOWN_LEVEL => Ok(None),
        token => unsigned(token)
            .and_then(|fl| fl.checked_mul(100))
            .and_then(|ft| u32::try_from(ft).ok())
            .map(Some)
            .ok_or_else(|| Error::InvalidNumber {
                field,
                token: token.to_string(),
                row: render(row),
            }),
    }
}

/// Returns the IDs of the notes referenced by a route.
///
/// Only a cell starting with `Notes: ` references notes. The IDs are separated
/// by dashes and empty IDs are skipped.
pub(crate) fn note_ids(row: &[String], index: usize) -> Result<Vec<u64>, Error> {
    let Some(ids) = cell(row, index).strip_prefix(NOTES_PREFIX) else {
        return Ok(Vec::new());
    };

    ids.split('-')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            unsigned(token).ok_or_else(|| Error::InvalidNumber {
                field: "Notes",
                token: token.to_string(),
                row: render(row),
            })
        })
        .collect()
}

/// Parses an unsigned decimal number without sign or whitespace.
pub(crate) fn unsigned(token: &str) -> Option<u64> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// Renders a row to be shown in an error.
pub(crate) fn render(row: &[String]) -> String {
    format!("[{}]", row.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn trims_cells() {
        let row = row(&[" EGLL ", "  "]);
        assert_eq!(cell(&row, 0), "EGLL");
        assert_eq!(cell(&row, 1), "");
        assert_eq!(cell(&row, 7), "");
        assert_eq!(optional(&row, 1), None);
        assert_eq!(optional(&row, 0), Some("EGLL".to_string()));
    }

    #[test]
    fn flight_levels() {
        let row = row(&["MC", "", "245", "0", "F245", "-10"]);
        assert_eq!(flight_level(&row, 0, "Min FL"), Ok(None));
        assert_eq!(flight_level(&row, 1, "Min FL"), Ok(None));
        assert_eq!(flight_level(&row, 2, "Min FL"), Ok(Some(24500)));
        assert_eq!(flight_level(&row, 3, "Min FL"), Ok(Some(0)));
        assert!(matches!(
            flight_level(&row, 4, "Min FL"),
            Err(Error::InvalidNumber { field: "Min FL", ref token, .. }) if token == "F245"
        ));
        assert!(flight_level(&row, 5, "Min FL").is_err());
    }

    #[test]
    fn flight_level_overflow() {
        let row = row(&["99999999999"]);
        assert!(flight_level(&row, 0, "Max FL").is_err());
    }

    #[test]
    fn note_references() {
        let ids = |cell: &str| note_ids(&row(&[cell]), 0);

        assert_eq!(ids("Notes: 1-2-3"), Ok(vec![1, 2, 3]));
        assert_eq!(ids("  Notes: 4 - 5 "), Ok(vec![4, 5]));
        assert_eq!(ids("Notes: -6--7-"), Ok(vec![6, 7]));
        assert_eq!(ids("Notes: 8-8"), Ok(vec![8, 8]));
        assert_eq!(ids("Notes: "), Ok(vec![]));
        assert_eq!(ids("Remarks: 1-2"), Ok(vec![]));
        assert_eq!(ids("Notes:1-2"), Ok(vec![]));
        assert_eq!(ids(""), Ok(vec![]));
    }

    #[test]
    fn invalid_note_reference() {
        let err = note_ids(&row(&["Notes: 1-x2"]), 0).expect_err("x2 should be rejected");
        assert_eq!(
            err,
            Error::InvalidNumber {
                field: "Notes",
                token: "x2".to_string(),
                row: "[Notes: 1-x2]".to_string(),
            }
        );
    }

    #[test]
    fn unsigned_numbers() {
        assert_eq!(unsigned("0042"), Some(42));
        assert_eq!(unsigned("+42"), None);
        assert_eq!(unsigned(""), None);
        assert_eq!(unsigned("18446744073709551616"), None);
    }
}
