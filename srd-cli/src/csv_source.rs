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

use std::path::PathBuf;

use log::{debug, error, warn};
use srd::{Rows, Sheet, TabularSource};

/// Workbook of the CSV exports of the routes and notes sheet.
///
/// Each traversal opens the file again and reads its records lazily.
/// Records that can't be read are logged and skipped.
#[derive(Clone, Debug)]
pub struct CsvWorkbook {
    routes: PathBuf,
    notes: PathBuf,
}

impl CsvWorkbook {
    pub fn new(routes: impl Into<PathBuf>, notes: impl Into<PathBuf>) -> Self {
        Self {
            routes: routes.into(),
            notes: notes.into(),
        }
    }

    fn path(&self, sheet: Sheet) -> &PathBuf {
        match sheet {
            Sheet::Routes => &self.routes,
            Sheet::Notes => &self.notes,
        }
    }
}

impl TabularSource for CsvWorkbook {
    fn has_sheet(&self, sheet: Sheet) -> bool {
        self.path(sheet).is_file()
    }

    fn rows(&self, sheet: Sheet) -> Rows<'_> {
        let path = self.path(sheet);
        debug!("reading {sheet} from {}", path.display());

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path);

        let mut records = match reader {
            Ok(reader) => reader.into_byte_records(),
            Err(e) => {
                error!("failed to open {}: {e}", path.display());
                return Box::new(std::iter::empty::<Vec<String>>());
            }
        };

        let rows = std::iter::from_fn(move || match records.next()? {
            Ok(record) => Some(cells(&record)),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                error!("stopped reading {sheet}: {e}");
                None
            }
            // an empty row is still reported by the parser
            Err(e) => {
                warn!("unreadable record of {sheet}: {e}");
                Some(Vec::new())
            }
        });

        Box::new(rows.fuse())
    }
}

/// Decodes the cells of a record, replacing invalid UTF-8.
fn cells(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect()
}
