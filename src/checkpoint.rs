//! Best-effort persistence of generator state between invocations.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shard::ShardSpec;

/// Locates the state file for one `(seed, cidr, shard)` run.
///
/// The file name is derived deterministically from those fields, so a later
/// invocation with identical parameters finds the same record. The file holds
/// a single decimal number, the generator's `current` value, and is
/// overwritten on every save; last write wins. Nothing here is atomic or
/// fsync'd, a checkpoint is a convenience rather than a correctness
/// requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    /// Derive the state-file path for a run, in the OS temp directory.
    #[must_use]
    pub fn new(seed: u32, cidr: &str, shard: &ShardSpec) -> Self {
        let file_name = format!(
            "iplcg_{seed}_{}_{}_{}.state",
            cidr.replace('/', "_"),
            shard.index(),
            shard.total()
        );

        Self {
            path: env::temp_dir().join(file_name),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the state file with the given generator value.
    pub fn save(&self, state: u32) -> io::Result<()> {
        fs::write(&self.path, state.to_string())
    }

    /// Read back a previously saved generator value.
    ///
    /// A missing or unparsable file is treated as "no checkpoint" rather
    /// than an error, so a fresh run and a corrupted state file behave the
    /// same way.
    #[must_use]
    pub fn load(&self) -> Option<u32> {
        fs::read_to_string(&self.path).ok()?.trim().parse().ok()
    }

    /// Delete the state file, ignoring a file that was never written.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_deterministic_and_slash_free() {
        let shard = ShardSpec::new(2, 4).unwrap();
        let a = Checkpoint::new(42, "10.0.0.0/24", &shard);
        let b = Checkpoint::new(42, "10.0.0.0/24", &shard);
        assert_eq!(a, b);

        let name = a.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "iplcg_42_10.0.0.0_24_2_4.state");
    }

    #[test]
    fn distinct_runs_get_distinct_files() {
        let shard = ShardSpec::solo();
        let a = Checkpoint::new(1, "10.0.0.0/24", &shard);
        let b = Checkpoint::new(2, "10.0.0.0/24", &shard);
        let c = Checkpoint::new(1, "10.0.1.0/24", &shard);
        assert_ne!(a.path(), b.path());
        assert_ne!(a.path(), c.path());
    }

    #[test]
    fn save_load_round_trip() {
        let shard = ShardSpec::solo();
        let checkpoint = Checkpoint::new(777_001, "172.16.0.0/16", &shard);
        checkpoint.clear();
        assert_eq!(checkpoint.load(), None);

        checkpoint.save(3_141_592_653).unwrap();
        assert_eq!(checkpoint.load(), Some(3_141_592_653));

        // Last write wins.
        checkpoint.save(7).unwrap();
        assert_eq!(checkpoint.load(), Some(7));

        checkpoint.clear();
        assert_eq!(checkpoint.load(), None);
    }

    #[test]
    fn corrupted_state_reads_as_none() {
        let shard = ShardSpec::solo();
        let checkpoint = Checkpoint::new(777_002, "172.16.0.0/16", &shard);
        fs::write(checkpoint.path(), "not-a-number").unwrap();
        assert_eq!(checkpoint.load(), None);
        checkpoint.clear();
    }
}
