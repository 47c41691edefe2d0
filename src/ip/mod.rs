//! IPv4 address arithmetic and pool allocation.
//!
//! `arithmetic` holds the integer helpers (address offsets, power-of-two
//! rounding, prefix lengths); `allocator` splits a batch request into
//! aligned CIDR pools and threads the cursor between batches.

pub mod arithmetic;
pub mod allocator;

// Re-export commonly used types
pub use allocator::{generate_batch, Batch, BatchLayout, Cursor, Pool};
pub use arithmetic::{bit_length, increment_address, next_power_of_two};
