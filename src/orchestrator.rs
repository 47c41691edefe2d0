//! Generation orchestrator.
//!
//! This module drives the batch plan through the allocator in order,
//! carrying the cursor from one batch to the next, and hands every
//! batch's document to the sink. A batch that fails to encode or write is
//! reported and skipped; the remaining batches still run.

use crate::config::{BatchSpec, CursorOnFailure, RunConfig, ValidationError};
use crate::ip::{generate_batch, Batch, BatchLayout, Cursor};
use crate::output::{AddressList, Encoder, SerializationError, Sink, WriteError};
use log::{debug, error, info};

/// Why a batch was not persisted
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// What happened to one batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub output_name: String,
    pub layout: BatchLayout,
    pub pool_count: usize,
    /// Name and CIDR of the first pool
    pub first_pool: Option<(String, String)>,
    /// Name and CIDR of the last pool
    pub last_pool: Option<(String, String)>,
    /// Cursor the batch started from
    pub start: Cursor,
    pub result: Result<(), BatchError>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a full run
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<BatchOutcome>,
    /// Cursor after the last batch
    pub final_cursor: Cursor,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(BatchOutcome::is_success)
    }
}

/// Run every batch of `config`, writing documents to `sink`
///
/// Documents are encoded in `config.format`. The plan is validated first;
/// an invalid plan generates nothing.
pub fn run(config: &RunConfig, sink: &mut dyn Sink) -> Result<RunReport, ValidationError> {
    run_with_encoder(config, &config.format, sink)
}

/// Same as [`run`], encoding documents with `encoder` instead of `config.format`
pub fn run_with_encoder(
    config: &RunConfig,
    encoder: &dyn Encoder,
    sink: &mut dyn Sink,
) -> Result<RunReport, ValidationError> {
    config.validate()?;

    info!(
        "Generating {} batches from {}",
        config.batches.len(),
        config.start_cursor()
    );

    let (final_cursor, outcomes) = config.batches.iter().fold(
        (config.start_cursor(), Vec::with_capacity(config.batches.len())),
        |(cursor, mut outcomes), spec| {
            let (outcome, next) = run_batch(spec, cursor, encoder, config.cursor_on_failure, sink);
            outcomes.push(outcome);
            (next, outcomes)
        },
    );

    info!("Generation finished, next free address {}", final_cursor);

    Ok(RunReport { outcomes, final_cursor })
}

/// Generate, encode and persist one batch; returns the cursor for the next one
fn run_batch(
    spec: &BatchSpec,
    start: Cursor,
    encoder: &dyn Encoder,
    on_failure: CursorOnFailure,
    sink: &mut dyn Sink,
) -> (BatchOutcome, Cursor) {
    let batch = generate_batch(spec.total_addresses, spec.pool_count, start);
    debug!(
        "Batch {}: {} pools of {} addresses (/{}), fair share {}, {} unallocated",
        spec.output_name,
        spec.pool_count,
        batch.layout.block_size,
        batch.layout.prefix_len,
        batch.layout.per_pool,
        batch.layout.remainder
    );

    let first_pool = batch.pools.first().map(|p| (p.name.clone(), p.cidr()));
    let last_pool = batch.pools.last().map(|p| (p.name.clone(), p.cidr()));

    let result = persist(&batch, &spec.output_name, encoder, sink);
    match (&result, &first_pool, &last_pool) {
        (Ok(()), Some((first_name, first_cidr)), Some((last_name, last_cidr))) => info!(
            "Address list successfully written to {} ({} {} .. {} {})",
            spec.output_name, first_name, first_cidr, last_name, last_cidr
        ),
        (Ok(()), _, _) => info!("Address list successfully written to {}", spec.output_name),
        (Err(e), _, _) => error!("Batch {} not written: {}", spec.output_name, e),
    }

    let next = match (&result, on_failure) {
        (Err(_), CursorOnFailure::Hold) => Cursor::new(start.address, batch.next.ordinal),
        _ => batch.next,
    };

    let outcome = BatchOutcome {
        output_name: spec.output_name.clone(),
        layout: batch.layout,
        pool_count: batch.pools.len(),
        first_pool,
        last_pool,
        start,
        result,
    };

    (outcome, next)
}

fn persist(
    batch: &Batch,
    name: &str,
    encoder: &dyn Encoder,
    sink: &mut dyn Sink,
) -> Result<(), BatchError> {
    let document = encoder.encode(&AddressList::from_pools(&batch.pools))?;
    sink.write(name, &document)?;
    Ok(())
}
