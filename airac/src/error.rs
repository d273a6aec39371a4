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
use std::io;

use chrono::NaiveDate;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    InvalidIdent {
        ident: String,
        expected: &'static str,
    },
    /// A cycle can't start on a date that is not a cycle boundary.
    NotABoundary {
        date: NaiveDate,
    },
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdent { ident, expected } => {
                write!(f, "invalid AIRAC cycle identifier \"{ident}\", expected {expected}")
            }
            Self::NotABoundary { date } => write!(f, "no AIRAC cycle starts on {date}"),
            Self::Io(e) => write!(f, "loaded cycle file: {e}"),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
