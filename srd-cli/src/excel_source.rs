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

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, error};
use srd::{Rows, Sheet, TabularSource};

/// The published SRD workbook in `.xls` or `.xlsx` format.
///
/// The routes and notes are read from the worksheets at the [index] of the
/// sheet. Each traversal opens the workbook again and loads the worksheet,
/// which is released when the traversal ends.
///
/// [index]: Sheet::index
#[derive(Clone, Debug)]
pub struct ExcelWorkbook {
    path: PathBuf,
}

impl ExcelWorkbook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `true` if the file extension is one of a workbook.
    pub fn is_workbook(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ["xls", "xlsx", "xlsm", "xlsb", "ods"]
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }

    fn worksheet(&self, sheet: Sheet) -> Option<Range<Data>> {
        let mut workbook = match open_workbook_auto(&self.path) {
            Ok(workbook) => workbook,
            Err(e) => {
                error!("failed to open {}: {e}", self.path.display());
                return None;
            }
        };

        match workbook.worksheet_range_at(sheet.index())? {
            Ok(range) => Some(range),
            Err(e) => {
                error!("failed to read {sheet} of {}: {e}", self.path.display());
                None
            }
        }
    }
}

impl TabularSource for ExcelWorkbook {
    fn has_sheet(&self, sheet: Sheet) -> bool {
        open_workbook_auto(&self.path)
            .map(|workbook| workbook.sheet_names().len() > sheet.index())
            .unwrap_or(false)
    }

    fn rows(&self, sheet: Sheet) -> Rows<'_> {
        debug!("reading {sheet} from {}", self.path.display());

        match self.worksheet(sheet) {
            Some(range) => Box::new(rows(range).into_iter()),
            None => Box::new(std::iter::empty::<Vec<String>>()),
        }
    }
}

/// Converts the used range of a worksheet to rows that start at cell `A1`.
fn rows(range: Range<Data>) -> Vec<Vec<String>> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let offset = vec![String::new(); first_col as usize];

    let leading = (0..first_row).map(|_| Vec::new());
    let used = range.rows().map(|row| {
        offset
            .iter()
            .cloned()
            .chain(row.iter().map(|cell| cell.to_string()))
            .collect()
    });

    leading.chain(used).collect()
}
