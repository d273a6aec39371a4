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

use clap::{Parser, Subcommand};

use crate::error::Error;
use crate::sheets::SheetSource;

/// Parse and import the Standard Route Document of an AIRAC cycle.
#[derive(Parser)]
#[command(name = "srd", version, about = "Standard Route Document tool")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory that holds the loaded cycle marker and downloads.
    #[arg(long, global = true, env = "SRD_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current and next AIRAC cycle.
    Airac,
    /// Print the cycle of the last import.
    Loaded,
    /// Read the routes and notes and print the statistics.
    Parse(SheetArgs),
    /// Import the routes and notes of a cycle into an SQLite database.
    Import(ImportArgs),
    /// Download the SRD of a cycle and import it.
    Download(DownloadArgs),
}

/// The SRD workbook or CSV exports of its routes and notes sheets.
#[derive(clap::Args)]
pub struct SheetArgs {
    /// The SRD workbook (.xls or .xlsx).
    #[arg(required_unless_present = "routes")]
    pub workbook: Option<PathBuf>,

    /// CSV export of the routes sheet.
    #[arg(long, requires = "notes", conflicts_with = "workbook")]
    pub routes: Option<PathBuf>,

    /// CSV export of the notes sheet.
    #[arg(long, requires = "routes", conflicts_with = "workbook")]
    pub notes: Option<PathBuf>,
}

impl SheetArgs {
    pub fn source(&self) -> Result<SheetSource, Error> {
        match (&self.workbook, &self.routes, &self.notes) {
            (Some(workbook), _, _) => SheetSource::workbook(workbook),
            (None, Some(routes), Some(notes)) => Ok(SheetSource::csv(routes, notes)),
            // clap requires either the workbook or both exports
            _ => Err(Error::UnknownFormat(PathBuf::new())),
        }
    }
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Ident of the cycle, e.g. 2413.
    pub cycle: String,

    #[command(flatten)]
    pub sheets: SheetArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Import even if the cycle is already loaded.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct DownloadArgs {
    /// Download even if the cycle is already loaded.
    #[arg(short, long)]
    pub force: bool,

    /// Ident of the cycle to download instead of the current cycle.
    #[arg(short, long)]
    pub cycle: Option<String>,

    /// URL to download the workbook from instead of the published URL.
    #[arg(short, long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(clap::Args)]
pub struct DatabaseArgs {
    /// SQLite database to import into.
    #[arg(short, long, env = "SRD_DATABASE", default_value = "srd.sqlite")]
    pub database: PathBuf,
}
