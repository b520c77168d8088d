//! Maps a CIDR network onto a zero-based index space and back.

use std::net::Ipv4Addr;
use std::str::FromStr;

use cidr_utils::cidr::Ipv4Inet;
use cidr_utils::Ipv4CidrSize;

use crate::error::Error;

/// An IPv4 network flattened to `[0, total)` indices.
///
/// `start` is the numeric value of the network address and `total` the number
/// of addresses in the network. `total` is kept as a `u64` so that a /0
/// network is an ordinary `2^32` rather than an overflowing sentinel; every
/// index in `[0, total)` then maps to the unique address `start + index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRange {
    start: u32,
    total: u64,
}

impl AddressRange {
    /// Parse a CIDR string into an address range.
    ///
    /// Only IPv4 networks are accepted; a /32 yields `total == 1` and a /0
    /// the full `2^32` address space. Host bits are tolerated and masked
    /// away, so `10.0.0.1/24` means the network `10.0.0.0/24`.
    pub fn new(cidr: &str) -> Result<Self, Error> {
        let network = Ipv4Inet::from_str(cidr)
            .map_err(|e| Error::InvalidCidr {
                cidr: cidr.to_owned(),
                message: e.to_string(),
            })?
            .network();

        Ok(Self {
            start: u32::from(network.first_address()),
            total: network.size(),
        })
    }

    /// Number of addresses in the range.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Numeric value of the first address.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Resolve a zero-based index to its address.
    pub fn address_at(&self, index: u32) -> Result<Ipv4Addr, Error> {
        if u64::from(index) >= self.total {
            return Err(Error::IndexOutOfRange {
                index,
                total: self.total,
            });
        }

        Ok(Ipv4Addr::from(self.start.wrapping_add(index)))
    }
}
