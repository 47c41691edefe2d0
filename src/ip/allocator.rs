//! Pool batch allocation.
//!
//! This file contains the partitioning algorithm: one batch request
//! (total addresses, pool count) is split into equally sized,
//! power-of-two aligned subnets laid out back to back from a cursor.
//! The cursor for the following batch is returned alongside the pools,
//! so successive batches never overlap.

use std::fmt;
use std::net::Ipv4Addr;

use super::arithmetic::{increment_address, next_power_of_two, prefix_length};

/// Prefix of every generated pool name; the ordinal follows it.
pub const POOL_NAME_PREFIX: &str = "Pool-Lot-";

/// Next unused address and next unused pool ordinal.
///
/// Passed by value from one batch to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub address: Ipv4Addr,
    pub ordinal: u64,
}

impl Cursor {
    pub fn new(address: Ipv4Addr, ordinal: u64) -> Self {
        Cursor { address, ordinal }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (next ordinal {})", self.address, self.ordinal)
    }
}

/// Sizing derived from a batch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLayout {
    /// Fair share of each pool, `total / pools` rounded down
    pub per_pool: u64,
    /// Addresses dropped by the floor division
    pub remainder: u64,
    /// Aligned size of every pool in the batch
    pub block_size: u64,
    pub prefix_len: u32,
}

impl BatchLayout {
    /// Compute the layout for `total_addresses` split over `pool_count` pools.
    ///
    /// Remainder policy: floor-divide, drop remainder. Addresses left over
    /// by the division are not assigned to any pool. Every pool gets the
    /// same block size, even when `per_pool` is already a power of two.
    pub fn compute(total_addresses: u64, pool_count: u64) -> Self {
        debug_assert!(pool_count > 0, "pool_count must be positive");
        let per_pool = total_addresses / pool_count;
        let remainder = total_addresses % pool_count;
        let block_size = next_power_of_two(i64::try_from(per_pool).unwrap_or(i64::MAX));
        BatchLayout {
            per_pool,
            remainder,
            block_size,
            prefix_len: prefix_length(block_size),
        }
    }

    /// Total address span reserved by `pool_count` aligned blocks.
    pub fn span(&self, pool_count: u64) -> u64 {
        pool_count.wrapping_mul(self.block_size)
    }
}

/// One named CIDR block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub name: String,
    pub address: Ipv4Addr,
    pub prefix_len: u32,
}

impl Pool {
    /// Subnet in `address/prefix` notation.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.address, self.prefix_len)
    }

    /// Number of addresses covered by the block.
    pub fn block_size(&self) -> u64 {
        1u64 << (32 - self.prefix_len.min(32))
    }

    /// First address past the end of the block, as an integer.
    ///
    /// Kept as `u64` so a block ending at 255.255.255.255 stays comparable.
    pub fn end(&self) -> u64 {
        u64::from(u32::from(self.address)) + self.block_size()
    }
}

/// Result of one batch: the pools plus the cursor for the next batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub layout: BatchLayout,
    pub pools: Vec<Pool>,
    pub next: Cursor,
}

/// Format a pool name from its ordinal.
pub fn pool_name(ordinal: u64) -> String {
    format!("{}{}", POOL_NAME_PREFIX, ordinal)
}

/// Partition one batch starting at `start`.
///
/// Pool `i` sits at `start.address + i * block_size` and is named after
/// ordinal `start.ordinal + i`. The returned cursor skips the whole
/// aligned span (`pool_count * block_size`), padding included, and the
/// ordinal continues where this batch stopped.
///
/// `pool_count` must be positive; callers validate the plan first.
pub fn generate_batch(total_addresses: u64, pool_count: u64, start: Cursor) -> Batch {
    let layout = BatchLayout::compute(total_addresses, pool_count);

    let pools = (0..pool_count)
        .map(|i| Pool {
            name: pool_name(start.ordinal + i),
            address: increment_address(start.address, i.wrapping_mul(layout.block_size)),
            prefix_len: layout.prefix_len,
        })
        .collect();

    let next = Cursor {
        address: increment_address(start.address, layout.span(pool_count)),
        ordinal: start.ordinal + pool_count,
    };

    Batch { layout, pools, next }
}
