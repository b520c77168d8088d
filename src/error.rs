//! Error types for stream construction and address resolution.

use thiserror::Error;

/// Error returned by stream construction and index resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The CIDR string could not be parsed as an IPv4 network.
    #[error("invalid CIDR {cidr:?}: {message}")]
    InvalidCidr {
        /// The rejected input.
        cidr: String,
        /// Description of what is invalid.
        message: String,
    },

    /// The shard specification is malformed or out of range.
    #[error("invalid shard spec: {0}")]
    InvalidShard(String),

    /// An index does not map to an address within the range.
    #[error("IP index {index} out of range (total {total})")]
    IndexOutOfRange {
        /// The offending zero-based index.
        index: u32,
        /// Number of addresses in the range.
        total: u64,
    },
}
