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

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::fields::*;
use crate::Error;

/// The least number of cells of a route row.
const ROUTE_CELLS: usize = 7;

/// A route of the SRD.
///
/// A route connects a departure airfield or entry point with an arrival
/// airfield or exit point. The route is valid between the minimum and maximum
/// flight level, which are stored as altitude in feet. Levels that are not
/// known are `None`.
///
/// A route can only be parsed from a row of the routes sheet. With the
/// `serde` feature a route is serializable, but it is never deserialized.
///
/// The cells of a route row:
///
/// | Cell | Content                                 |
/// |------|-----------------------------------------|
/// | 0    | departure airfield or entry point       |
/// | 1    | SID (optional)                          |
/// | 2    | minimum flight level, `MC` if not known |
/// | 3    | maximum flight level, `MC` if not known |
/// | 4    | route segment                           |
/// | 5    | STAR (optional)                         |
/// | 6    | arrival airfield or exit point          |
/// | 7    | note references, e.g. `Notes: 12-34`    |
///
/// # Examples
///
/// ```
/// use srd::Route;
///
/// # fn main() -> Result<(), srd::Error> {
/// let row: Vec<String> = ["EGLL", "CPT3F", "MC", "245", "CPT Q41 SAM", "", "EGHH", "Notes: 2"]
///     .map(String::from)
///     .to_vec();
///
/// let route = Route::try_from(row.as_slice())?;
/// assert_eq!(route.max_level(), Some(24500));
/// assert_eq!(route.note_ids(), &[2]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Route {
    departure: String,
    sid: Option<String>,
    min_level: Option<u32>,
    max_level: Option<u32>,
    segment: String,
    star: Option<String>,
    arrival: String,
    note_ids: Vec<u64>,
}

impl Route {
    /// The departure airfield or entry point.
    pub fn departure(&self) -> &str {
        &self.departure
    }

    /// The standard instrument departure.
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// The minimum altitude in feet.
    pub fn min_level(&self) -> Option<u32> {
        self.min_level
    }

    /// The maximum altitude in feet.
    pub fn max_level(&self) -> Option<u32> {
        self.max_level
    }

    /// The route between departure and arrival, which might be empty.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The standard terminal arrival route.
    pub fn star(&self) -> Option<&str> {
        self.star.as_deref()
    }

    /// The arrival airfield or exit point.
    pub fn arrival(&self) -> &str {
        &self.arrival
    }

    /// The IDs of the notes that apply to this route in order of reference.
    pub fn note_ids(&self) -> &[u64] {
        &self.note_ids
    }
}

impl TryFrom<&[String]> for Route {
    type Error = Error;

    fn try_from(row: &[String]) -> Result<Self, Self::Error> {
        if row.len() < ROUTE_CELLS {
            return Err(Error::MalformedRow {
                row: render(row),
                actual: row.len(),
            });
        }

        Ok(Self {
            departure: required(row, 0, "ADEP or Entry")?,
            sid: optional(row, 1),
            min_level: flight_level(row, 2, "Min FL")?,
            max_level: flight_level(row, 3, "Max FL")?,
            segment: cell(row, 4).to_string(),
            star: optional(row, 5),
            arrival: required(row, 6, "ADES or Exit")?,
            note_ids: note_ids(row, 7)?,
        })
    }
}
