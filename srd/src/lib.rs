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

//! Standard Route Document (SRD) parser.
//!
//! The SRD is a workbook published each AIRAC cycle that lists the preferred
//! routes between aerodromes and airspace entry or exit points. The routes are
//! listed in one sheet and the notes that restrict the routes in another. An
//! [`SrdDocument`] reads both sheets lazily from any [`TabularSource`]:
//!
//! ```
//! use srd::{Sheet, SrdDocument, Workbook};
//!
//! let workbook = Workbook::new()
//!     .with_sheet(Sheet::Routes, [
//!         vec!["ADEP", "SID", "Min FL", "Max FL", "Route", "STAR", "ADES", "Notes"],
//!         vec!["EGLL", "", "MC", "245", "DCT BPK", "", "EGKK", "Notes: 1"],
//!     ])
//!     .with_sheet(Sheet::Notes, [
//!         vec!["Note 1"],
//!         vec!["Not available H24."],
//!     ]);
//!
//! let document = SrdDocument::new(workbook)?;
//! let stats = document.parse();
//!
//! assert_eq!(stats.route_count, 1);
//! assert_eq!(stats.note_count, 1);
//! # Ok::<(), srd::Error>(())
//! ```
//!
//! With the `sqlite` feature the document can be imported into an SQLite
//! database using the `SqliteStore`. Other stores implement a [`RecordSink`]
//! and receive the records from [`import()`].

mod assembler;
mod document;
mod error;
mod fields;
mod import;
mod note;
mod route;
mod source;
#[cfg(feature = "sqlite")]
mod sqlite;
mod stats;

pub use assembler::NoteAssembler;
pub use document::{Notes, Routes, SrdDocument};
pub use error::Error;
pub use import::{import, NoteRouteLink, RecordSink, BATCH_SIZE};
pub use note::Note;
pub use route::Route;
pub use source::{Rows, Sheet, TabularSource, Workbook};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use stats::SrdStats;
