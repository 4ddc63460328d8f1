/*
cargo run --bin consolidate_info

cargo run --bin consolidate_info -- \
    --source-dir public/data/anime-info \
    --output public/data/anime-info/consolidated.json
*/

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use anime_prep::{scan_entries, write_consolidated, DEFAULT_SOURCE_DIR, OUTPUT_FILE_NAME};

// Merge every <id>.json in the source directory into one consolidated file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    // Directory holding the per-item JSON files
    #[arg(short, long, default_value = DEFAULT_SOURCE_DIR)]
    source_dir: PathBuf,

    // Output file (defaults to consolidated.json inside the source directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output = args
        .output
        .unwrap_or_else(|| args.source_dir.join(OUTPUT_FILE_NAME));

    // Log file per run, detail lines go there rather than stdout
    fs::create_dir_all("logs").context("could not create logs/ directory")?;
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        fs::File::create(format!("logs/consolidate_{timestamp}.log"))
            .context("could not create log file")?,
    )
    .context("could not initialise logger")?;

    info!(
        "Started - source_dir: {:?}, output: {:?}",
        args.source_dir, output
    );

    // The output's own stem is never ingested, so re-running does not feed
    // the previous consolidated file back in
    let exclude_stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .context("output path has no file name")?
        .to_owned();

    let scanned = scan_entries(&args.source_dir, &exclude_stem)?;
    println!("read {} files", scanned.files_read);

    write_consolidated(&scanned.entries, &output)?;
    println!("consolidation complete");
    info!(
        "Wrote {} entries to {}",
        scanned.entries.len(),
        output.display()
    );

    Ok(())
}
