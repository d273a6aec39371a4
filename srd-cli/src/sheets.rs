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

use std::path::Path;

use srd::{Rows, Sheet, TabularSource};

use crate::csv_source::CsvWorkbook;
use crate::error::Error;
use crate::excel_source::ExcelWorkbook;

/// The source the routes and notes are read from.
#[derive(Clone, Debug)]
pub enum SheetSource {
    Excel(ExcelWorkbook),
    Csv(CsvWorkbook),
}

impl SheetSource {
    /// Opens the published workbook at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file extension isn't one of a workbook.
    pub fn workbook(path: &Path) -> Result<Self, Error> {
        if ExcelWorkbook::is_workbook(path) {
            Ok(Self::Excel(ExcelWorkbook::new(path)))
        } else {
            Err(Error::UnknownFormat(path.to_path_buf()))
        }
    }

    /// Reads the routes and notes from CSV exports of their sheets.
    pub fn csv(routes: &Path, notes: &Path) -> Self {
        Self::Csv(CsvWorkbook::new(routes, notes))
    }
}

impl TabularSource for SheetSource {
    fn has_sheet(&self, sheet: Sheet) -> bool {
        match self {
            Self::Excel(workbook) => workbook.has_sheet(sheet),
            Self::Csv(workbook) => workbook.has_sheet(sheet),
        }
    }

    fn rows(&self, sheet: Sheet) -> Rows<'_> {
        match self {
            Self::Excel(workbook) => workbook.rows(sheet),
            Self::Csv(workbook) => workbook.rows(sheet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_source_by_extension() {
        assert!(matches!(
            SheetSource::workbook(Path::new("srd.xlsx")),
            Ok(SheetSource::Excel(_))
        ));
        assert!(matches!(
            SheetSource::workbook(Path::new("routes.csv")),
            Err(Error::UnknownFormat(path)) if path == Path::new("routes.csv")
        ));
    }
}
