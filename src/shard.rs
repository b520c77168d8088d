//! Splits the index space across independent workers by residue class.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One worker's slice of the enumeration, written `INDEX/TOTAL` with a
/// 1-based index.
///
/// Membership is by residue class: shard `i` of `n` owns every index
/// congruent to `i - 1` modulo `n`. The classes partition `[0, total)`
/// with no overlap and no gap, so shards run with the same seed jointly
/// cover the whole network exactly once while never coordinating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSpec {
    index: u32,
    total: u32,
}

impl ShardSpec {
    /// Build a spec from a 1-based index and total worker count.
    pub fn new(index: u32, total: u32) -> Result<Self, Error> {
        if total < 1 {
            return Err(Error::InvalidShard(String::from(
                "total shards must be greater than 0",
            )));
        }
        if index < 1 || index > total {
            return Err(Error::InvalidShard(String::from(
                "shard index must be between 1 and total",
            )));
        }
        Ok(Self { index, total })
    }

    /// The single-worker spec, `1/1`.
    #[must_use]
    pub const fn solo() -> Self {
        Self { index: 1, total: 1 }
    }

    /// 1-based shard index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Total number of shards.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// 0-based index used in arithmetic (seeding and residue tests).
    #[must_use]
    pub const fn index0(&self) -> u32 {
        self.index - 1
    }

    /// Whether this shard owns the given address-space index.
    #[must_use]
    pub const fn owns(&self, index: u32) -> bool {
        self.total == 1 || index % self.total == self.index0()
    }

    /// How many addresses this shard emits for a range of `range_total`
    /// addresses. The `range_total % total` lowest-indexed shards take one
    /// extra so quotas sum exactly to `range_total`.
    #[must_use]
    pub const fn quota(&self, range_total: u64) -> u64 {
        let base = range_total / self.total as u64;
        if (self.index0() as u64) < range_total % self.total as u64 {
            base + 1
        } else {
            base
        }
    }
}

impl FromStr for ShardSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(format!(
                "invalid shard format. Expected INDEX/TOTAL, got {s:?}"
            ));
        }

        let index: u32 = parts[0]
            .trim()
            .parse()
            .map_err(|_| format!("invalid shard index {:?}", parts[0]))?;
        let total: u32 = parts[1]
            .trim()
            .parse()
            .map_err(|_| format!("invalid shard total {:?}", parts[1]))?;

        // clap and the config layer want plain strings at this seam.
        Self::new(index, total).map_err(|e| e.to_string())
    }
}

impl fmt::Display for ShardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}
