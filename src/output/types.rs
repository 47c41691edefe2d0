//! Document structures for generated address lists.
//!
//! Field names follow the layout consumed by address allocators:
//!
//! ```yaml
//! AddressList:
//! - Address:
//!     PoolName: Pool-Lot-1
//!     IPv4Pool: 70.70.0.1/26
//! ```

use serde::{Deserialize, Serialize};

use crate::ip::Pool;

/// Root of one output document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AddressList {
    #[serde(rename = "AddressList")]
    pub addresses: Vec<AddressEntry>,
}

/// Wrapper element of the list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    #[serde(rename = "Address")]
    pub address: PoolEntry,
}

/// A named pool and its subnet
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    #[serde(rename = "PoolName")]
    pub pool_name: String,
    #[serde(rename = "IPv4Pool")]
    pub ipv4_pool: String,
}

impl From<&Pool> for PoolEntry {
    fn from(pool: &Pool) -> Self {
        PoolEntry {
            pool_name: pool.name.clone(),
            ipv4_pool: pool.cidr(),
        }
    }
}

impl AddressList {
    pub fn from_pools(pools: &[Pool]) -> Self {
        AddressList {
            addresses: pools
                .iter()
                .map(|pool| AddressEntry {
                    address: PoolEntry::from(pool),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
