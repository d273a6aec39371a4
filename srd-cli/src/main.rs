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

mod cli;
mod csv_source;
mod download;
mod error;
mod excel_source;
mod lock;
mod logging;
mod sheets;

use std::error::Error;
use std::path::Path;

use airac::{Airac, AiracCycle, CycleValidity, LoadedCycle};
use clap::Parser;
use log::{info, warn};
use srd::{SqliteStore, SrdDocument};

use crate::cli::{Cli, Command, DownloadArgs, ImportArgs, SheetArgs};
use crate::download::{download_url, is_up_to_date, LATEST_DOWNLOAD_FILE};
use crate::excel_source::ExcelWorkbook;
use crate::lock::ProcessLock;
use crate::sheets::SheetSource;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let airac = Airac::new();

    match cli.command {
        Command::Airac => print_cycles(&airac),
        Command::Loaded => print_loaded(&airac, &cli.data_dir)?,
        Command::Parse(args) => parse(&args)?,
        Command::Import(args) => import(&airac, &cli.data_dir, &args)?,
        Command::Download(args) => download(&airac, &cli.data_dir, &args)?,
    }

    Ok(())
}

fn print_cycles(airac: &Airac) {
    println!("current: {}", airac.current_cycle());
    println!("next:    {}", airac.next_cycle());
}

fn print_loaded(airac: &Airac, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let loaded = LoadedCycle::open(data_dir)?;

    match loaded.cycle()? {
        Some(cycle) if loaded.is_current(&airac.current_cycle()) => println!("{cycle}"),
        Some(cycle) => println!("{cycle} (stale)"),
        None => println!("no cycle loaded"),
    }

    Ok(())
}

fn parse(sheets: &SheetArgs) -> Result<(), Box<dyn Error>> {
    let stats = SrdDocument::new(sheets.source()?)?.parse();
    println!("{stats}");
    Ok(())
}

fn import(airac: &Airac, data_dir: &Path, args: &ImportArgs) -> Result<(), Box<dyn Error>> {
    let _lock = ProcessLock::acquire_default()?;

    let cycle = airac.cycle_from_ident(&args.cycle)?;
    let loaded = LoadedCycle::open(data_dir)?;

    if is_up_to_date(&loaded, &cycle, args.force) {
        println!("cycle {} is already loaded, use --force to import anyway", cycle.ident());
        return Ok(());
    }

    import_cycle(airac, &cycle, args.sheets.source()?, &args.database.database, loaded)
}

fn download(airac: &Airac, data_dir: &Path, args: &DownloadArgs) -> Result<(), Box<dyn Error>> {
    let _lock = ProcessLock::acquire_default()?;

    let cycle = match &args.cycle {
        Some(ident) => airac.cycle_from_ident(ident)?,
        None => airac.current_cycle(),
    };
    let loaded = LoadedCycle::open(data_dir)?;

    println!("loaded cycle is {}", loaded.ident().unwrap_or("none"));
    println!("latest cycle is {}", cycle.ident());

    if is_up_to_date(&loaded, &cycle, args.force) {
        println!("SRD is up to date, use --force to download anyway");
        return Ok(());
    }

    let url = args.url.clone().unwrap_or_else(|| download_url(&cycle));
    let path = data_dir.join(LATEST_DOWNLOAD_FILE);
    download::download(&url, &path)?;

    let source = SheetSource::Excel(ExcelWorkbook::new(path));
    import_cycle(airac, &cycle, source, &args.database.database, loaded)
}

/// Imports the `source` into the database and marks the `cycle` as loaded.
///
/// The caller holds the process lock.
fn import_cycle(
    airac: &Airac,
    cycle: &AiracCycle,
    source: SheetSource,
    database: &Path,
    mut loaded: LoadedCycle,
) -> Result<(), Box<dyn Error>> {
    if airac.validity(cycle) == CycleValidity::Expired {
        warn!("importing expired cycle {cycle}");
    }

    let document = SrdDocument::new(source)?;
    let mut store = SqliteStore::open(database)?;
    let stats = store.import(&document)?;

    loaded.set(cycle)?;
    info!("loaded cycle {cycle} into {}", database.display());
    println!("{stats}");

    Ok(())
}
