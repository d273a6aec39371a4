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

use std::error;
use std::fmt;

use crate::Sheet;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// A route row has fewer than the seven required cells.
    MalformedRow {
        row: String,
        actual: usize,
    },
    /// A required cell is blank.
    MissingField {
        field: &'static str,
        row: String,
    },
    /// A flight level or note reference isn't an unsigned number.
    InvalidNumber {
        field: &'static str,
        token: String,
        row: String,
    },
    /// The header of a note block has no valid note number.
    InvalidNoteIdent {
        header: String,
    },
    /// A note block has a header but no text.
    MissingNoteText {
        id: u64,
    },
    SheetNotFound {
        sheet: Sheet,
    },
    /// Writing records to a sink failed.
    Storage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRow { row, actual } => {
                write!(f, "expected at least 7 cells but got {actual}, row: {row}")
            }
            Self::MissingField { field, row } => {
                write!(f, "missing value for {field}, row: {row}")
            }
            Self::InvalidNumber { field, token, row } => {
                write!(f, "{field} should be a number but is \"{token}\", row: {row}")
            }
            Self::InvalidNoteIdent { header } => {
                write!(f, "expected note header \"Note <number>\" but got \"{header}\"")
            }
            Self::MissingNoteText { id } => write!(f, "note {id} has no text"),
            Self::SheetNotFound { sheet } => write!(f, "{sheet} sheet not found"),
            Self::Storage(e) => write!(f, "failed to store records: {e}"),
        }
    }
}

impl error::Error for Error {}
