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

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::{AiracCycle, Error};

/// Name of the file within the data directory that holds the loaded cycle.
pub const LOADED_CYCLE_FILE: &str = "ukcp-srd-import-loaded-cycle";

/// Marker of the cycle whose data was loaded last.
///
/// The marker is a file that contains nothing but the identifier of the
/// cycle. It is used to decide whether newer data needs to be loaded.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoadedCycle {
    path: PathBuf,
    ident: Option<String>,
}

impl LoadedCycle {
    /// Opens the marker in the directory `dir` and creates an empty marker if
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker can't be read or created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        let path = dir.as_ref().join(LOADED_CYCLE_FILE);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("creating loaded cycle file {}", path.display());
                fs::write(&path, "")?;
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let ident = content.split_whitespace().next().map(str::to_string);

        Ok(Self { path, ident })
    }

    /// The identifier of the loaded cycle or `None` if no cycle was loaded.
    pub fn ident(&self) -> Option<&str> {
        self.ident.as_deref()
    }

    /// Returns the loaded cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker holds an invalid identifier.
    pub fn cycle(&self) -> Result<Option<AiracCycle>, Error> {
        self.ident.as_deref().map(AiracCycle::from_ident).transpose()
    }

    /// Returns `true` if the loaded cycle has the identifier.
    pub fn is(&self, ident: &str) -> bool {
        self.ident.as_deref() == Some(ident)
    }

    /// Returns `true` if the `cycle` is loaded.
    ///
    /// A loaded cycle that isn't the cycle effective now is stale.
    pub fn is_current(&self, cycle: &AiracCycle) -> bool {
        self.is(&cycle.ident())
    }

    /// Marks the `cycle` as loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker can't be written.
    pub fn set(&mut self, cycle: &AiracCycle) -> Result<(), Error> {
        let ident = cycle.ident();
        fs::write(&self.path, &ident)?;
        debug!("loaded cycle set to {ident}");
        self.ident = Some(ident);
        Ok(())
    }
}
