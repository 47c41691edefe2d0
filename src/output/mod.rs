//! # Output Module
//!
//! Turns generated pools into documents and hands them to a [`Sink`].
//!
//! - `types.rs`: serde structures of the `AddressList` document
//! - `sink.rs`: the [`Sink`] trait, a directory-backed [`FileSink`] and an
//!   in-memory [`MemorySink`]
//!
//! Encoding is done by [`encode`], which supports YAML (the default) and
//! pretty-printed JSON. Both formats produce the same document shape.
//! [`DocumentFormat`] implements [`Encoder`], the seam the orchestrator
//! encodes through.

pub mod sink;
pub mod types;

pub use sink::{FileSink, MemorySink, Sink, WriteError};
pub use types::{AddressEntry, AddressList, PoolEntry};

use serde::{Deserialize, Serialize};

/// Text format of generated documents
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

/// Encoding a document failed
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns an address list into document bytes
pub trait Encoder {
    fn encode(&self, list: &AddressList) -> Result<Vec<u8>, SerializationError>;
}

impl Encoder for DocumentFormat {
    fn encode(&self, list: &AddressList) -> Result<Vec<u8>, SerializationError> {
        encode(list, *self)
    }
}

/// Encode an address list in the requested format
pub fn encode(list: &AddressList, format: DocumentFormat) -> Result<Vec<u8>, SerializationError> {
    match format {
        DocumentFormat::Yaml => Ok(serde_yaml::to_string(list)?.into_bytes()),
        DocumentFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(list)?;
            bytes.push(b'\n');
            Ok(bytes)
        }
    }
}
