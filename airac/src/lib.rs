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

//! AIRAC cycle calendar.
//!
//! Aeronautical data is published in fixed 28-day cycles, the Aeronautical
//! Information Regulation And Control (AIRAC) cycles. Each cycle is identified
//! by four digits: the last two digits of its year followed by the one-based
//! number of the cycle within that year. Cycle `2413` for example is the 13th
//! cycle of 2024, effective from 26 December 2024 until 23 January 2025.
//!
//! All boundaries are computed from a fixed [epoch] and the [cycle length],
//! both of which are constants of the calendar.
//!
//! # Examples
//!
//! Resolve the cycle that is effective at a given instant:
//!
//! ```
//! use airac::{Airac, FixedClock};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap());
//! let airac = Airac::with_clock(clock);
//!
//! let cycle = airac.current_cycle();
//! assert_eq!(cycle.ident(), "2413");
//! assert_eq!(airac.next_cycle().ident(), "2501");
//! ```
//!
//! Or parse a cycle from its identifier:
//!
//! ```
//! # fn main() -> Result<(), airac::Error> {
//! let cycle: airac::AiracCycle = "2501".parse()?;
//! println!("{cycle}"); // => "2501 (2025-01-23 - 2025-02-20)"
//! # Ok(())
//! # }
//! ```
//!
//! [epoch]: crate::EPOCH
//! [cycle length]: crate::CYCLE_DAYS

mod clock;
mod cycle;
mod error;
mod loaded;

pub use clock::{Clock, FixedClock, SystemClock};
pub use cycle::{ident_from_start_date, Airac, AiracCycle, CycleValidity, CYCLE_DAYS, EPOCH};
pub use error::Error;
pub use loaded::{LoadedCycle, LOADED_CYCLE_FILE};
