//! # Poolgen - IPv4 address pool generator
//!
//! This library partitions a contiguous IPv4 range into named,
//! power-of-two aligned subnet pools and writes them out as address list
//! documents for network address allocators.
//!
//! ## Overview
//!
//! A run is an ordered list of batches. Each batch asks for a number of
//! addresses split over a number of pools. Every pool of a batch gets the
//! same block size: the fair share rounded up to the next power of two.
//! Pools are laid out back to back from a cursor address, and the cursor
//! moves past the whole aligned span before the next batch starts, so no
//! two pools of a run ever overlap. Pool names (`Pool-Lot-<n>`) are
//! numbered across the whole run.
//!
//! ## Architecture
//!
//! - `ip`: address arithmetic and the batch allocator
//! - `config`: the batch plan and its validation
//! - `config_loader`: loading plans from YAML, CLI overrides
//! - `output`: document types, encoding and sinks
//! - `orchestrator`: runs a plan batch by batch
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use poolgen::config::RunConfig;
//! use poolgen::orchestrator;
//! use poolgen::output::FileSink;
//!
//! let mut sink = FileSink::new("pools");
//! let report = orchestrator::run(&RunConfig::default(), &mut sink)?;
//! assert!(report.all_succeeded());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Output Format
//!
//! ```yaml
//! AddressList:
//! - Address:
//!     PoolName: Pool-Lot-1
//!     IPv4Pool: 70.70.0.1/26
//! - Address:
//!     PoolName: Pool-Lot-2
//!     IPv4Pool: 70.70.0.65/26
//! ```
//!
//! ## Numeric Policies
//!
//! - Address offsets wrap modulo 2^32; nothing checks that a plan fits in
//!   the IPv4 space.
//! - Fair shares use floor division. Addresses left over when a batch does
//!   not divide evenly are not allocated.
//!
//! ## Error Handling
//!
//! Library errors are `thiserror` enums. A batch that fails to encode or
//! write does not stop the run; its error is kept in the run report. The
//! binary reports fatal errors through `color_eyre`.

pub mod config;
pub mod config_loader;
pub mod ip;
pub mod orchestrator;
pub mod output;
