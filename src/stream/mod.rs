//! Core streaming behaviour: drives the generator, filters indices through
//! the shard predicate and resolves survivors to addresses.

use std::net::Ipv4Addr;

use log::{debug, warn};
use rand::Rng;

use crate::address::AddressRange;
use crate::checkpoint::Checkpoint;
use crate::error::Error;
use crate::generator::Lcg;
use crate::shard::ShardSpec;

/// Interval between checkpoint writes, counted in emitted addresses.
pub const CHECKPOINT_INTERVAL: u64 = 1_000;

/// A lazy, finite stream of the shard's addresses in pseudorandom order.
///
/// Built once per run; implements [`Iterator`] and emits exactly
/// `shard.quota(total)` addresses, each address of the shard's residue class
/// at most once. The consumer pulls, so backpressure and cancellation need no
/// machinery: a dropped stream simply stops, leaving at most the last written
/// checkpoint behind. A stream is not restartable; resuming means opening a
/// new one from a saved generator state.
///
/// The generator walks its full cycle and indices outside this shard's
/// residue class are discarded, so each of N shards does the full amount of
/// generator work but only its `1/N` share of emission. That is the price of
/// shards needing no coordination channel.
#[derive(Debug)]
pub struct IpStream {
    range: AddressRange,
    lcg: Lcg,
    shard: ShardSpec,
    seed: u32,
    remaining: u64,
    checkpoint: Option<Checkpoint>,
}

impl IpStream {
    /// Open a stream over `cidr` for one shard.
    ///
    /// A `seed` of 0 asks for a random seed, drawn from a locally owned
    /// `rand::rng()`; the effective seed is available via [`Self::seed`] so
    /// the run can be reproduced or resumed. When `resume` carries a
    /// previously checkpointed generator value it replaces the seeded state
    /// entirely.
    ///
    /// Fails with [`Error::InvalidCidr`] before anything streams; shard
    /// validation happens at [`ShardSpec`] construction.
    pub fn open(
        cidr: &str,
        shard: ShardSpec,
        seed: u32,
        resume: Option<u32>,
    ) -> Result<Self, Error> {
        let range = AddressRange::new(cidr)?;

        let seed = if seed == 0 {
            let mut rng = rand::rng();
            rng.random_range(1..u32::MAX)
        } else {
            seed
        };

        let lcg = match resume {
            Some(state) => Lcg::from_state(state),
            None => Lcg::new(seed.wrapping_add(shard.index0())),
        };

        let remaining = shard.quota(range.total());
        debug!(
            "opening stream over {cidr}: {} addresses, shard {shard}, quota {remaining}, seed {seed}, resume {resume:?}",
            range.total()
        );

        Ok(Self {
            checkpoint: Some(Checkpoint::new(seed, cidr, &shard)),
            range,
            lcg,
            shard,
            seed,
            remaining,
        })
    }

    /// Disable checkpoint writes, for callers that persist state themselves.
    #[must_use]
    pub fn without_checkpoints(mut self) -> Self {
        self.checkpoint = None;
        self
    }

    /// The effective seed, i.e. the randomly drawn one when 0 was passed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// The generator's current value; pass it back as `resume` to continue
    /// this stream in a later invocation.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.lcg.state()
    }

    /// Addresses still to be emitted.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Where this stream checkpoints, unless disabled.
    #[must_use]
    pub fn checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoint.as_ref()
    }

    fn persist_state(&self) {
        if let Some(checkpoint) = &self.checkpoint {
            if let Err(e) = checkpoint.save(self.lcg.state()) {
                // Best effort only: an unwritable temp dir must not kill
                // the enumeration.
                warn!(
                    "checkpoint write to {} failed: {e}",
                    checkpoint.path().display()
                );
            }
        }
    }
}

impl Iterator for IpStream {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let output = self.lcg.next_value();
            let index = (u64::from(output) % self.range.total()) as u32;

            if !self.shard.owns(index) {
                continue;
            }

            // Unreachable with index already reduced mod total, but an
            // unmappable index is skipped without consuming quota.
            let Ok(address) = self.range.address_at(index) else {
                continue;
            };

            self.remaining -= 1;
            // Deliberately also matches remaining == 0: a completed run
            // leaves its final generator value on disk.
            if self.remaining % CHECKPOINT_INTERVAL == 0 {
                self.persist_state();
            }

            return Some(address);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Exactly `remaining` items are still to come.
        usize::try_from(self.remaining).map_or((usize::MAX, None), |n| (n, Some(n)))
    }
}
