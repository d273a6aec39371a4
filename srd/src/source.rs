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

//! Spreadsheet access.
//!
//! The document doesn't read spreadsheet files itself. Any workbook that can
//! tell whether a sheet exists and produce the rows of a sheet as cells of
//! text can be read by implementing [`TabularSource`].

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The sheets of the SRD workbook that are read.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sheet {
    Routes,
    Notes,
}

impl Sheet {
    /// The zero-based index of the sheet within the published workbook.
    pub fn index(&self) -> usize {
        match self {
            Self::Routes => 2,
            Self::Notes => 4,
        }
    }

    /// The name of the sheet used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Routes => "Routes",
            Self::Notes => "Notes",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.index())
    }
}

/// Rows of a sheet where each row is a list of cells.
pub type Rows<'a> = Box<dyn Iterator<Item = Vec<String>> + 'a>;

/// A workbook with sheets of text cells.
pub trait TabularSource {
    /// Returns `true` if the workbook has the sheet.
    fn has_sheet(&self, sheet: Sheet) -> bool;

    /// Returns the rows of the sheet.
    ///
    /// Each call starts reading at the first row of the sheet again. Rows
    /// should be read lazily as the iterator advances.
    fn rows(&self, sheet: Sheet) -> Rows<'_>;
}

impl<T> TabularSource for &T
where
    T: TabularSource + ?Sized,
{
    fn has_sheet(&self, sheet: Sheet) -> bool {
        (**self).has_sheet(sheet)
    }

    fn rows(&self, sheet: Sheet) -> Rows<'_> {
        (**self).rows(sheet)
    }
}

/// A workbook that holds its sheets in memory.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Workbook {
    sheets: HashMap<Sheet, Vec<Vec<String>>>,
}

impl Workbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the sheet with its rows, replacing any previous rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use srd::{Sheet, Workbook};
    ///
    /// let workbook = Workbook::new()
    ///     .with_sheet(Sheet::Routes, [["ADEP", "SID"], ["EGLL", "CPT3F"]])
    ///     .with_sheet(Sheet::Notes, [["Note 1"], ["Text"]]);
    /// ```
    pub fn with_sheet<R, C, S>(mut self, sheet: Sheet, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_sheet(
            sheet,
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }

    /// Inserts the sheet, replacing any previous rows.
    pub fn insert_sheet(&mut self, sheet: Sheet, rows: Vec<Vec<String>>) {
        self.sheets.insert(sheet, rows);
    }
}

impl TabularSource for Workbook {
    fn has_sheet(&self, sheet: Sheet) -> bool {
        self.sheets.contains_key(&sheet)
    }

    fn rows(&self, sheet: Sheet) -> Rows<'_> {
        Box::new(self.sheets.get(&sheet).into_iter().flatten().cloned())
    }
}
