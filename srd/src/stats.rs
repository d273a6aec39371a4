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
use serde::{Deserialize, Serialize};

/// Counters of the records read from a document.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SrdStats {
    pub route_count: usize,
    pub route_error_count: usize,
    pub note_count: usize,
    pub note_error_count: usize,
}

impl SrdStats {
    pub(crate) fn reset_routes(&mut self) {
        self.route_count = 0;
        self.route_error_count = 0;
    }

    pub(crate) fn reset_notes(&mut self) {
        self.note_count = 0;
        self.note_error_count = 0;
    }

    pub(crate) fn count_route<T, E>(&mut self, route: &Result<T, E>) {
        match route {
            Ok(_) => self.route_count += 1,
            Err(_) => self.route_error_count += 1,
        }
    }

    pub(crate) fn count_note<T, E>(&mut self, note: &Result<T, E>) {
        match note {
            Ok(_) => self.note_count += 1,
            Err(_) => self.note_error_count += 1,
        }
    }
}

impl fmt::Display for SrdStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} routes with {} errors, {} notes with {} errors",
            self.route_count, self.route_error_count, self.note_count, self.note_error_count
        )
    }
}
