//! Converts every TZif file in a zoneinfo directory into a zone table and
//! writes the tables into a single zip archive.
//!
//! Files that are not TZif (`zone.tab`, `leapseconds`, ...) and files that
//! fail to decode are skipped; one bad file never stops the run.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod archive;
mod zones;

use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::{collections::BTreeMap, path::PathBuf};
use zonedata::{DecodeError, TableConfig, TableEncoder, TzifV1, ZoneName};

use archive::TableArchive;
use zones::ZoneFile;

#[derive(Debug, Parser)]
#[command(about, long_about = None)]
struct Args {
    /// The zoneinfo directory to convert.
    #[arg(long, default_value = "/usr/share/zoneinfo")]
    zoneinfo: PathBuf,

    /// The archive to write.
    #[arg(short, long, default_value = "zonedata.zip")]
    output: PathBuf,

    /// The directory inside the archive that holds the tables.
    #[arg(long, default_value = "zonedata")]
    prefix: String,

    /// The version written into every table. Read from the zoneinfo
    /// directory when not provided.
    #[arg(long)]
    tzdata_version: Option<String>,
}

/// The result of converting one file.
enum Conversion {
    Table(ZoneName, Vec<u8>),
    NotTzif,
    Failed(DecodeError),
}

fn convert_file(file: &ZoneFile, encoder: &TableEncoder) -> Conversion {
    match TzifV1::from_path(&file.path) {
        Ok(tzif) => Conversion::Table(file.name.clone(), encoder.encode(&tzif, &file.name)),
        Err(err) if err.is_magic_mismatch() => Conversion::NotTzif,
        Err(err) => Conversion::Failed(err),
    }
}

fn run(args: Args) -> Result<()> {
    let version = match args.tzdata_version {
        Some(version) => version,
        None => zones::detect_version(&args.zoneinfo)?,
    };
    info!(
        "converting {} with tzdata version {version}",
        args.zoneinfo.display()
    );

    let tree = zones::collect_zone_files(&args.zoneinfo)?;
    let encoder = TableEncoder::new(TableConfig::new(version));
    let conversions: Vec<(&ZoneFile, Conversion)> = tree
        .files
        .par_iter()
        .map(|file| (file, convert_file(file, &encoder)))
        .collect();

    let mut tables = BTreeMap::new();
    let (mut skipped, mut failed) = (0usize, tree.unreadable);
    for (file, conversion) in conversions {
        match conversion {
            Conversion::Table(name, table) => {
                tables.insert(name, table);
            }
            Conversion::NotTzif => {
                debug!("skipping {}: not a TZif file", file.path.display());
                skipped += 1;
            }
            Conversion::Failed(err) => {
                warn!("skipping {}: {err}", file.path.display());
                failed += 1;
            }
        }
    }

    let mut archive = TableArchive::create(&args.output, &args.prefix)?;
    for (name, table) in &tables {
        archive.add(name, table)?;
    }
    archive
        .finish()?
        .into_inner()
        .map_err(|err| err.into_error())
        .wrap_err_with(|| format!("failed to flush {}", args.output.display()))?;

    info!(
        "wrote {} zones to {} ({skipped} skipped, {failed} failed)",
        tables.len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    run(Args::parse())
}
