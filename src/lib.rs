//! This crate exposes the internal functionality of the
//! `iplcg` address enumerator.
//!
//! `iplcg` walks every address of an IPv4 network in a pseudorandomized,
//! non-repeating order driven by a linear congruential generator. The order
//! is deterministic for a given seed, which buys three properties at once:
//!
//! - **No sequential pattern**: scans do not sweep `x.x.x.1, x.x.x.2, ...`,
//!   so they neither telegraph their direction nor tickle rate limiters the
//!   way a linear sweep does.
//! - **Horizontal sharding**: N workers given the same seed and specs
//!   `1/N .. N/N` each emit a disjoint residue class of the index space, and
//!   together cover the network exactly once with no coordination channel.
//! - **Resumption**: the generator's single `u32` of state is checkpointed
//!   periodically; feeding it back continues the walk where it stopped.
//!
//! ## Architecture Overview
//!
//! [`stream::IpStream`] is the entry point and drives the other pieces:
//!
//! 1. [`address::AddressRange`] flattens the CIDR into `[0, total)` indices.
//! 2. [`generator::Lcg`] produces the deterministic pseudorandom walk.
//! 3. [`shard::ShardSpec`] decides which indices belong to this worker.
//! 4. [`checkpoint::Checkpoint`] persists generator state as the stream runs.
//!
//! ## Basic Usage Example
//!
//! ```rust
//! use iplcg::shard::ShardSpec;
//! use iplcg::stream::IpStream;
//!
//! fn main() -> Result<(), iplcg::error::Error> {
//!     // Second of four workers covering 10.0.0.0/24 under a shared seed.
//!     let shard = ShardSpec::new(2, 4).expect("valid shard spec");
//!     let stream = IpStream::open("10.0.0.0/24", shard, 42, None)?
//!         .without_checkpoints();
//!
//!     for address in stream {
//!         println!("{address}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! To resume an interrupted run, pass the last checkpointed value back in:
//!
//! ```rust
//! # use iplcg::shard::ShardSpec;
//! # use iplcg::stream::IpStream;
//! let mut stream = IpStream::open("10.0.0.0/24", ShardSpec::solo(), 42, None)
//!     .unwrap()
//!     .without_checkpoints();
//! let _first_half: Vec<_> = stream.by_ref().take(128).collect();
//!
//! // Later, in another process: continue from the saved state. Note that
//! // only the generator value survives, not the remaining quota, so a
//! // resumed run may revisit addresses emitted shortly before the cut.
//! let resumed = IpStream::open("10.0.0.0/24", ShardSpec::solo(), 42, Some(stream.state()))
//!     .unwrap()
//!     .without_checkpoints();
//! # let _ = resumed;
//! ```
#![allow(clippy::needless_doctest_main)]
#![warn(missing_docs)]

pub mod input;

pub mod address;

pub mod generator;

pub mod shard;

pub mod checkpoint;

pub mod stream;

pub mod error;
