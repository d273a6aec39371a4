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

use std::fs::{self, File};
use std::path::Path;

use airac::{AiracCycle, LoadedCycle};
use log::{debug, info};

use crate::error::Error;

/// Name of the file in the data directory that holds the last downloaded
/// workbook.
pub const LATEST_DOWNLOAD_FILE: &str = "ukcp-srd-import-loaded-download.xlsx";

const URL_PREFIX: &str =
    "https://www.nm.eurocontrol.int/RAD/additional%20doc/external_links/uk_srd/UK_Ireland_SRD_";

/// Returns the URL where the workbook of the `cycle` is published.
pub fn download_url(cycle: &AiracCycle) -> String {
    format!("{URL_PREFIX}{}_notes.xlsx", cycle.ident())
}

/// Returns `true` if the `cycle` is loaded already and the download isn't
/// forced.
pub fn is_up_to_date(loaded: &LoadedCycle, cycle: &AiracCycle, force: bool) -> bool {
    !force && loaded.is_current(cycle)
}

/// Downloads the file at the `url` to `dest`.
///
/// The body is written next to `dest` first and moved in place once it is
/// complete, so a failed download keeps the previous file.
pub fn download(url: &str, dest: &Path) -> Result<(), Error> {
    info!("downloading SRD from {url}");
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;

    let partial = dest.with_extension("part");
    let mut file = File::create(&partial)?;
    let bytes = response.copy_to(&mut file)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&partial, dest)?;
    debug!("downloaded {bytes} bytes to {}", dest.display());
    Ok(())
}
