//! listing-melt: Flatten a directory of property listings into one CSV
//!
//! Usage:
//!   # Default columns, batches of 1000 files, 4 workers
//!   listing-melt ./propertyDetails -o listings.csv
//!
//!   # Smaller batches, more workers
//!   listing-melt ./propertyDetails -o listings.csv --batch-size 250 --workers 8
//!
//!   # Keep documents whose detail path is broken, with null columns
//!   listing-melt ./propertyDetails -o listings.csv --lenient-fields
//!
//!   # Print the run summary as JSON on stdout
//!   listing-melt ./propertyDetails -o listings.csv --summary

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use listing_melt::pipeline::{self, DEFAULT_BATCH_SIZE, DEFAULT_WORKER_COUNT};
use listing_melt::{FieldPolicy, PipelineConfig, Schema};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::sync::Arc;
use time::macros::format_description;

#[derive(Parser, Debug)]
#[command(name = "listing-melt")]
#[command(about = "Flatten property listing JSON files into a single CSV", long_about = None)]
struct Args {
    /// Directory containing one .json document per property
    #[arg(value_name = "DIR")]
    input_dir: PathBuf,

    /// CSV file to write
    #[arg(long, short = 'o', value_name = "FILE")]
    output: PathBuf,

    /// Number of files per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Number of worker threads
    #[arg(long, short = 'w', default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Fill columns with null when the detail path is broken instead of dropping the document
    #[arg(long)]
    lenient_fields: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();

    SimpleLogger::new()
        .with_level(args.log_level)
        .with_timestamp_format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .init()?;

    let mut config = PipelineConfig::new(args.input_dir, args.output);
    config.batch_size = args.batch_size;
    config.worker_count = args.workers;
    if args.lenient_fields {
        config.extract.field_policy = FieldPolicy::Independent;
    }

    let summary = pipeline::run(&config, Arc::new(Schema::default()))?;

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
