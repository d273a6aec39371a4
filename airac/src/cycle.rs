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
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Clock, Error, SystemClock};

/// The length of an AIRAC cycle in days.
pub const CYCLE_DAYS: i64 = 28;

/// The start of cycle 2101 from which all cycle boundaries are derived.
pub const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 28) {
    Some(date) => date,
    None => panic!("AIRAC epoch should be a valid date"),
};

/// The validity of a cycle at some instant.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CycleValidity {
    /// The cycle ended before the instant.
    Expired,
    /// The instant is within the cycle.
    Valid,
    /// The cycle starts after the instant.
    Future,
}

/// An AIRAC cycle.
///
/// A cycle is effective from its [start] at 00:00 UTC until, but not
/// including, its [end] 28 days later. Cycles follow each other without gaps
/// and are ordered by their start.
///
/// With the `serde` feature a cycle is (de)serialized as its start date,
/// e.g. `"2024-12-26"`.
///
/// Boundaries are computed within the range of [`NaiveDate`]. Resolving a
/// cycle within 28 days of either end of that range (around the years
/// -262000 and 262000) panics.
///
/// [start]: AiracCycle::start
/// [end]: AiracCycle::end
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "NaiveDate", into = "NaiveDate")
)]
pub struct AiracCycle {
    start: NaiveDate,
    year: i32,
    number: u8,
}

impl AiracCycle {
    /// Returns the cycle which is effective at the `instant`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::on(instant.date_naive())
    }

    /// Returns the cycle which is effective on the `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::starting(boundary_on_or_before(date))
    }

    /// Returns the first cycle that starts after the `instant`.
    pub fn after(instant: DateTime<Utc>) -> Self {
        Self::starting(boundary_after(instant.date_naive()))
    }

    /// Returns the cycle identified by four digits, e.g. `2413`.
    ///
    /// The first two digits are the year of the 21st century and the last two
    /// digits the number of the cycle within that year, starting at `01`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier isn't four digits or the cycle
    /// number is not within 1 to 13.
    pub fn from_ident(ident: &str) -> Result<Self, Error> {
        let invalid = |expected| Error::InvalidIdent {
            ident: ident.to_string(),
            expected,
        };

        let bytes = ident.as_bytes();

        if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_digit()) {
            return Err(invalid("four digits"));
        }

        let year = 2000 + i32::from(bytes[0] & 0x0F) * 10 + i32::from(bytes[1] & 0x0F);
        let number = (bytes[2] & 0x0F) * 10 + (bytes[3] & 0x0F);

        if !(1..=13).contains(&number) {
            return Err(invalid("a cycle number from 01 to 13"));
        }

        let jan_1 = NaiveDate::from_yo_opt(year, 1).ok_or_else(|| invalid("a valid year"))?;
        let start = first_boundary_of_year(jan_1) + cycles(i64::from(number - 1));

        Ok(Self {
            start,
            year,
            number,
        })
    }

    /// The four digit identifier of this cycle.
    pub fn ident(&self) -> String {
        format_ident(self.year, self.number)
    }

    /// The year the cycle is numbered in.
    ///
    /// This is not necessarily the year of the [start] since the last cycle
    /// of a year may start in the following year.
    ///
    /// [start]: AiracCycle::start
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The one-based number of the cycle within its year.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// The first day of the cycle.
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// The instant at which the cycle becomes effective.
    pub fn start(&self) -> DateTime<Utc> {
        midnight(self.start)
    }

    /// The instant at which the cycle is superseded by the next.
    pub fn end(&self) -> DateTime<Utc> {
        midnight(self.start + cycles(1))
    }

    /// Returns `true` if the `instant` is within the cycle.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start() <= instant && instant < self.end()
    }

    /// Returns the validity of this cycle at the `instant`.
    pub fn validity_at(&self, instant: DateTime<Utc>) -> CycleValidity {
        if instant < self.start() {
            CycleValidity::Future
        } else if instant < self.end() {
            CycleValidity::Valid
        } else {
            CycleValidity::Expired
        }
    }

    /// The cycle that follows this cycle.
    pub fn next(&self) -> Self {
        Self::starting(self.start + cycles(1))
    }

    /// The cycle that precedes this cycle.
    pub fn previous(&self) -> Self {
        Self::starting(self.start - cycles(1))
    }

    // The start must be a cycle boundary.
    fn starting(start: NaiveDate) -> Self {
        let (year, number) = numbering(start);
        trace!("cycle {} starts {}", format_ident(year, number), start);

        Self {
            start,
            year,
            number,
        }
    }
}

impl FromStr for AiracCycle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ident(s)
    }
}

impl TryFrom<NaiveDate> for AiracCycle {
    type Error = Error;

    /// Returns the cycle that starts on the `date`.
    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if days_into_cycle(date) == 0 {
            Ok(Self::starting(date))
        } else {
            Err(Error::NotABoundary { date })
        }
    }
}

impl From<AiracCycle> for NaiveDate {
    fn from(cycle: AiracCycle) -> Self {
        cycle.start
    }
}

impl fmt::Display for AiracCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.ident(),
            self.start.format("%Y-%m-%d"),
            (self.start + cycles(1)).format("%Y-%m-%d")
        )
    }
}

/// AIRAC calendar that resolves cycles relative to a [`Clock`].
#[derive(Clone, Debug, Default)]
pub struct Airac<C = SystemClock> {
    clock: C,
}

impl Airac {
    /// Creates a calendar that reads the system's wall clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Airac<C> {
    /// Creates a calendar that reads the time from the `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// The cycle that is effective now.
    pub fn current_cycle(&self) -> AiracCycle {
        AiracCycle::at(self.clock.now())
    }

    /// The cycle that follows the current cycle.
    pub fn next_cycle(&self) -> AiracCycle {
        AiracCycle::after(self.clock.now())
    }

    /// The cycle that follows the `cycle`.
    pub fn next_cycle_from(&self, cycle: &AiracCycle) -> AiracCycle {
        cycle.next()
    }

    /// Returns the cycle for the identifier.
    ///
    /// # Errors
    ///
    /// See [`AiracCycle::from_ident`].
    pub fn cycle_from_ident(&self, ident: &str) -> Result<AiracCycle, Error> {
        AiracCycle::from_ident(ident)
    }

    /// Returns the validity of the `cycle` now.
    pub fn validity(&self, cycle: &AiracCycle) -> CycleValidity {
        cycle.validity_at(self.clock.now())
    }
}

/// Returns the identifier of the cycle that starts on `start`.
///
/// A start that precedes the first cycle of its year belongs to the 13th cycle
/// of the previous year.
pub fn ident_from_start_date(start: NaiveDate) -> String {
    let (year, number) = numbering(start);
    format_ident(year, number)
}

fn numbering(start: NaiveDate) -> (i32, u8) {
    let first = first_boundary_of_year(start);

    if start < first {
        return (start.year() - 1, 13);
    }

    let number = (start - first).num_days() / CYCLE_DAYS + 1;
    (start.year(), number as u8)
}

fn format_ident(year: i32, number: u8) -> String {
    format!("{:02}{:02}", year.rem_euclid(100), number)
}

fn cycles(n: i64) -> TimeDelta {
    TimeDelta::days(n * CYCLE_DAYS)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

// Days since the most recent boundary. The euclidean remainder keeps this
// within 0..28 for dates before the epoch as well.
fn days_into_cycle(date: NaiveDate) -> i64 {
    (date - EPOCH).num_days().rem_euclid(CYCLE_DAYS)
}

fn boundary_on_or_before(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(days_into_cycle(date))
}

fn boundary_after(date: NaiveDate) -> NaiveDate {
    date + TimeDelta::days(CYCLE_DAYS - days_into_cycle(date))
}

/// The first boundary of the `date`'s year, which is between 1 and 28 January.
fn first_boundary_of_year(date: NaiveDate) -> NaiveDate {
    let new_years_eve = date - TimeDelta::days(i64::from(date.ordinal()));
    boundary_after(new_years_eve)
}
