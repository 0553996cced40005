//! Batched fan-out of extraction over a fixed-size worker pool
//!
//! The file list is cut into contiguous batches, every batch runs to
//! completion on one pool thread, and the per-batch results are stitched back
//! together in submission order. Workers share nothing; each one hands its rows
//! back only once its batch is done.

use crate::error::ConfigError;
use crate::extractor::RecordExtractor;
use crate::pipeline::batch::{process_batch, BatchOutput};
use crate::types::Table;
use anyhow::{Context, Result};
use log::{error, info};
use rayon::prelude::*;
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// A batch whose worker panicked; its rows are lost
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// Position of the batch in submission order
    pub index: usize,
    pub first_path: PathBuf,
    pub len: usize,
    pub message: String,
}

#[derive(Debug)]
pub struct DispatchOutcome {
    pub table: Table,
    /// Files skipped inside batches that completed
    pub skipped: usize,
    pub failed_batches: Vec<BatchFailure>,
}

pub struct Dispatcher {
    extractor: RecordExtractor,
    batch_size: usize,
    worker_count: usize,
}

impl Dispatcher {
    pub fn new(
        extractor: RecordExtractor,
        batch_size: usize,
        worker_count: usize,
    ) -> std::result::Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        Ok(Dispatcher {
            extractor,
            batch_size,
            worker_count,
        })
    }

    /// Extract every path and merge the rows in (batch, file) order
    pub fn run(&self, paths: &[PathBuf]) -> Result<DispatchOutcome> {
        self.run_with(paths, |batch| process_batch(&self.extractor, batch))
    }

    fn run_with<F>(&self, paths: &[PathBuf], process: F) -> Result<DispatchOutcome>
    where
        F: Fn(&[PathBuf]) -> BatchOutput + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .thread_name(|i| format!("listing-melt-worker-{}", i))
            .build()
            .context("Failed to build worker pool")?;

        let batch_count = paths.len().div_ceil(self.batch_size);
        info!(
            "Dispatching {} files in {} batches across {} workers",
            paths.len(),
            batch_count,
            self.worker_count
        );

        // Indexed collect keeps submission order regardless of completion order
        let results: Vec<std::result::Result<BatchOutput, BatchFailure>> = pool.install(|| {
            paths
                .par_chunks(self.batch_size)
                .enumerate()
                .map(|(index, batch)| {
                    panic::catch_unwind(AssertUnwindSafe(|| process(batch))).map_err(|payload| {
                        BatchFailure {
                            index,
                            first_path: batch.first().cloned().unwrap_or_default(),
                            len: batch.len(),
                            message: panic_message(payload.as_ref()),
                        }
                    })
                })
                .collect()
        });

        let mut table = Table::empty(self.extractor.schema().clone());
        let mut skipped = 0;
        let mut failed_batches = Vec::new();

        for result in results {
            match result {
                Ok(output) => {
                    skipped += output.skipped;
                    table.extend(output.rows);
                }
                Err(failure) => {
                    error!(
                        "Batch {} ({} files starting at {}) failed: {}",
                        failure.index,
                        failure.len,
                        failure.first_path.display(),
                        failure.message
                    );
                    failed_batches.push(failure);
                }
            }
        }

        info!("All results collected: {} rows", table.len());

        Ok(DispatchOutcome {
            table,
            skipped,
            failed_batches,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("worker panicked")
    }
}
