use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::ip::Cursor;
use crate::output::DocumentFormat;

/// Address the first pool of the first batch starts at
pub const DEFAULT_START_ADDRESS: Ipv4Addr = Ipv4Addr::new(70, 70, 0, 1);

/// Ordinal of the first generated pool
pub const DEFAULT_START_ORDINAL: u64 = 1;

/// What the next batch starts from when a batch fails to persist
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CursorOnFailure {
    /// Continue after the failed batch's span, as if it had been written
    #[default]
    Advance,
    /// Reuse the failed batch's start address; its ordinals stay consumed
    Hold,
}

/// One output document: `total_addresses` split over `pool_count` pools
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BatchSpec {
    pub total_addresses: u64,
    pub pool_count: u64,
    pub output_name: String,
}

impl BatchSpec {
    pub fn new(total_addresses: u64, pool_count: u64, output_name: impl Into<String>) -> Self {
        BatchSpec {
            total_addresses,
            pool_count,
            output_name: output_name.into(),
        }
    }
}

/// Complete generation plan. Batch order is significant: it fixes both the
/// address layout and the pool numbering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_start_address")]
    pub start_address: Ipv4Addr,
    #[serde(default = "default_start_ordinal")]
    pub start_ordinal: u64,
    #[serde(default)]
    pub cursor_on_failure: CursorOnFailure,
    #[serde(default)]
    pub format: DocumentFormat,
    pub batches: Vec<BatchSpec>,
}

fn default_start_address() -> Ipv4Addr {
    DEFAULT_START_ADDRESS
}

fn default_start_ordinal() -> u64 {
    DEFAULT_START_ORDINAL
}

impl Default for RunConfig {
    /// The reference plan: four batches from 2 500 to 50 000 addresses.
    fn default() -> Self {
        RunConfig {
            start_address: DEFAULT_START_ADDRESS,
            start_ordinal: DEFAULT_START_ORDINAL,
            cursor_on_failure: CursorOnFailure::default(),
            format: DocumentFormat::default(),
            batches: vec![
                BatchSpec::new(2500, 50, "addresses_2500.yaml"),
                BatchSpec::new(5000, 50, "addresses_5000.yaml"),
                BatchSpec::new(10000, 100, "addresses_10000.yaml"),
                BatchSpec::new(50000, 100, "addresses_50000.yaml"),
            ],
        }
    }
}

impl RunConfig {
    /// Validate the plan
    ///
    /// Zero counts would make the allocator divide by zero, and a
    /// duplicate output name would silently overwrite an earlier batch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_ordinal == 0 {
            return Err(ValidationError::InvalidGeneral(
                "start_ordinal must be greater than 0".to_string(),
            ));
        }

        if self.batches.is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "at least one batch must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, batch) in self.batches.iter().enumerate() {
            if batch.total_addresses == 0 {
                return Err(ValidationError::InvalidBatch {
                    index,
                    reason: "total_addresses must be greater than 0".to_string(),
                });
            }
            if batch.pool_count == 0 {
                return Err(ValidationError::InvalidBatch {
                    index,
                    reason: "pool_count must be greater than 0".to_string(),
                });
            }
            if batch.output_name.trim().is_empty() {
                return Err(ValidationError::InvalidBatch {
                    index,
                    reason: "output_name cannot be empty".to_string(),
                });
            }
            if !seen.insert(batch.output_name.as_str()) {
                return Err(ValidationError::InvalidBatch {
                    index,
                    reason: format!("output_name '{}' is used by an earlier batch", batch.output_name),
                });
            }
        }

        // Ordinals of the last batch must still fit in a u64
        self.batches
            .iter()
            .try_fold(self.start_ordinal, |next, batch| next.checked_add(batch.pool_count))
            .ok_or_else(|| {
                ValidationError::InvalidGeneral(format!(
                    "start_ordinal {} leaves no room for {} pools",
                    self.start_ordinal,
                    self.total_pools()
                ))
            })?;

        Ok(())
    }

    /// Cursor the first batch starts from
    pub fn start_cursor(&self) -> Cursor {
        Cursor::new(self.start_address, self.start_ordinal)
    }

    /// Number of pools the whole plan generates
    pub fn total_pools(&self) -> u64 {
        self.batches
            .iter()
            .fold(0u64, |total, b| total.saturating_add(b.pool_count))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid batch #{index}: {reason}")]
    InvalidBatch { index: usize, reason: String },
}
