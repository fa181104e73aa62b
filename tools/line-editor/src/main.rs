use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use subway_topology::prelude::*;

mod document;

use document::{LineDocument, SegmentRow};

#[derive(Parser, Debug)]
#[command(
    name = "line-editor",
    author,
    version,
    about = "Edit the segments of a subway line document",
    long_about = "Loads a line document (stations plus unordered segment rows), applies one \
                  edit and prints the stations in travel order together with the rows to \
                  create and delete.\n\n\
                  Inserting a segment that starts or ends inside an existing segment splits \
                  it; removing a station between two segments merges them."
)]
struct Args {
    /// Input line document (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Write the edited document to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stations in travel order
    Stations,

    /// Check that the segments form a single path
    Validate,

    /// Add a segment to the line
    Insert {
        /// Up station id
        #[arg(long)]
        up: String,

        /// Down station id
        #[arg(long)]
        down: String,

        /// Segment length
        #[arg(long)]
        length: u32,
    },

    /// Remove a station from the line
    Remove {
        /// Station id
        #[arg(long)]
        station: String,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    line: &'a str,
    stations: Vec<&'a Station>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delta: Option<RowDelta>,
}

#[derive(Serialize)]
struct RowDelta {
    to_create: Vec<SegmentRow>,
    to_delete: Vec<SegmentRow>,
}

impl From<&SegmentDelta> for RowDelta {
    fn from(delta: &SegmentDelta) -> Self {
        Self {
            to_create: delta.to_create.iter().map(SegmentRow::from).collect(),
            to_delete: delta.to_delete.iter().map(SegmentRow::from).collect(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }

    let mut document = LineDocument::read(&args.input)?;
    let stations = document.station_index()?;
    let before = document.topology(&stations)?;
    log::info!(
        "Loaded {} with {} stations and {} segments",
        document.name,
        stations.len(),
        before.len()
    );

    let lookup = |id: &str| -> Result<Station> {
        stations
            .get(&StationIdentifier::new(id))
            .cloned()
            .with_context(|| format!("Unknown station: {id}"))
    };

    let mut after = before.copy();
    let edited = match &args.command {
        Command::Stations => false,
        Command::Validate => {
            after.validate().context("Line is not a single path")?;
            log::info!("Line is a single path of {} segments", after.len());
            false
        }
        Command::Insert { up, down, length } => {
            let segment = Segment::new(lookup(up)?, lookup(down)?, *length)?;
            log::info!("Inserting {segment}");
            after.insert(segment).context("Insert rejected")?;
            true
        }
        Command::Remove { station } => {
            let station = lookup(station)?;
            log::info!("Removing {station}");
            after.remove_station(&station).context("Remove rejected")?;
            true
        }
    };

    let sorted = after.sorted_stations().context("Line is not a single path")?;
    let delta = edited.then(|| after.delta_since(&before));
    if let Some(delta) = &delta {
        log::info!(
            "{} segments to create, {} to delete",
            delta.to_create.len(),
            delta.to_delete.len()
        );
    }

    let report = Report {
        line: &document.name,
        stations: sorted.iter().collect(),
        delta: delta.as_ref().map(RowDelta::from),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );

    if let Some(output) = &args.output {
        document.set_segments(&after);
        document.write(output)?;
        log::info!("Wrote {}", output.display());
    }

    Ok(())
}
