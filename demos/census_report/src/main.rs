//! Command-line census report over an `ArborDb` collection.
//!
//! Loads a tree census CSV file and dispatches one query per invocation.

use anyhow::{Context, Result};
use arbordb::core::census::BoroughTally;
use arbordb::core::config::Config;
use arbordb::core::types::BOROUGH_COUNT;
use arbordb::ArborDb;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "census_report", about = "Query a municipal tree census")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Census CSV file to load (overrides the configured data file).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Treat the first line of the data file as a record, not a header.
    #[arg(long)]
    no_header: bool,

    /// Abort on the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Total number of trees across all boroughs.
    Total,
    /// Number of trees of one species, optionally within one borough.
    SpeciesCount {
        name: String,
        #[arg(long)]
        borough: Option<String>,
    },
    /// Per-borough counts for one species.
    ByBorough { name: String },
    /// Total number of trees in one borough.
    BoroughTotal { borough: String },
    /// Distinct species names containing a partial name.
    Match { partial: String },
    /// Distinct species names in one zip code.
    Zipcode { zip: u32 },
    /// Distinct species names within a radius of a point.
    Near {
        latitude: f64,
        longitude: f64,
        /// Search radius in kilometres (defaults to the configured radius).
        #[arg(long)]
        distance_km: Option<f64>,
    },
    /// Every distinct species name, one per line, in index order.
    ListSpecies,
    /// Every record, one per line, in index order.
    Dump,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data_file = Some(data);
    }
    if cli.no_header {
        config.has_header = false;
    }
    if cli.strict {
        config.strict_ingest = true;
    }

    let db = ArborDb::open(config).context("failed to open census database")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Total => writeln!(out, "{}", db.total_tree_count())?,
        Command::SpeciesCount { name, borough } => {
            let count = match borough {
                Some(borough) => db.count_of_tree_species_in_boro(&name, &borough),
                None => db.count_of_tree_species(&name),
            };
            writeln!(out, "{count}")?;
        }
        Command::ByBorough { name } => {
            let mut tallies = [BoroughTally::default(); BOROUGH_COUNT];
            let total = db.get_counts_of_trees_by_boro(&name, &mut tallies);
            for tally in &tallies {
                writeln!(out, "{}: {}", tally.borough, tally.count)?;
            }
            writeln!(out, "total: {total}")?;
        }
        Command::BoroughTotal { borough } => {
            writeln!(out, "{}", db.count_of_trees_in_boro(&borough))?;
        }
        Command::Match { partial } => {
            for name in db.get_matching_species(&partial) {
                writeln!(out, "{name}")?;
            }
        }
        Command::Zipcode { zip } => {
            for name in db.get_all_in_zipcode(zip) {
                writeln!(out, "{name}")?;
            }
        }
        Command::Near { latitude, longitude, distance_km } => {
            let names = match distance_km {
                Some(distance_km) => db.get_all_near(latitude, longitude, distance_km),
                None => db.get_all_near_default(latitude, longitude),
            };
            for name in names {
                writeln!(out, "{name}")?;
            }
        }
        Command::ListSpecies => db.print_all_species(&mut out)?,
        Command::Dump => db.print_all(&mut out)?,
    }
    Ok(())
}
