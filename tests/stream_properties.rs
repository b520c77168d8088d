//! End-to-end properties of the enumeration pipeline: shard quotas partition
//! the address space, fixed seeds reproduce byte-identical output, and
//! checkpointed state resumes the walk where it stopped.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use iplcg::address::AddressRange;
use iplcg::checkpoint::Checkpoint;
use iplcg::shard::ShardSpec;
use iplcg::stream::IpStream;

fn open_quiet(cidr: &str, shard: ShardSpec, seed: u32) -> IpStream {
    IpStream::open(cidr, shard, seed, None)
        .unwrap()
        .without_checkpoints()
}

#[test]
fn shard_quotas_sum_to_range_total() {
    for cidr in ["10.0.0.0/30", "10.0.0.0/24", "10.0.0.0/16", "1.2.3.4/32"] {
        let total = AddressRange::new(cidr).unwrap().total();
        for shards in 1..=7u32 {
            let sum: u64 = (1..=shards)
                .map(|i| ShardSpec::new(i, shards).unwrap().quota(total))
                .sum();
            assert_eq!(sum, total, "{cidr} split {shards} ways");
        }
    }
}

#[test]
fn fixed_seed_runs_are_byte_identical() {
    let render = || {
        open_quiet("172.20.0.0/24", ShardSpec::new(2, 3).unwrap(), 9001)
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(render(), render());
}

#[test]
fn solo_shard_covers_network_in_scrambled_order() {
    let emitted: Vec<Ipv4Addr> = open_quiet("10.0.0.0/24", ShardSpec::solo(), 42).collect();
    assert_eq!(emitted.len(), 256);

    let unique: HashSet<Ipv4Addr> = emitted.iter().copied().collect();
    assert_eq!(unique.len(), 256, "every address exactly once");

    let sequential: Vec<Ipv4Addr> = (0..=255).map(|i| Ipv4Addr::new(10, 0, 0, i)).collect();
    assert_ne!(emitted, sequential, "order must not be the plain sweep");
}

#[test]
fn four_shards_partition_a_slash_24() {
    let mut union: Vec<Ipv4Addr> = Vec::new();
    for index in 1..=4u32 {
        let shard = ShardSpec::new(index, 4).unwrap();
        let emitted: Vec<Ipv4Addr> = open_quiet("10.0.0.0/24", shard, 42).collect();
        assert_eq!(emitted.len(), 64, "shard {index}/4 quota");
        union.extend(emitted);
    }

    let unique: HashSet<Ipv4Addr> = union.iter().copied().collect();
    assert_eq!(union.len(), 256, "no shard overlap");
    assert_eq!(unique.len(), 256, "no address dropped");
}

#[test]
fn uneven_shard_counts_still_partition() {
    // 64 addresses over 3 shards: quotas 22, 21, 21.
    let mut union: HashSet<Ipv4Addr> = HashSet::new();
    let mut emitted_total = 0usize;
    for index in 1..=3u32 {
        let shard = ShardSpec::new(index, 3).unwrap();
        let emitted: Vec<Ipv4Addr> = open_quiet("192.168.4.0/26", shard, 7).collect();
        assert_eq!(emitted.len() as u64, shard.quota(64));
        emitted_total += emitted.len();
        union.extend(emitted);
    }
    assert_eq!(emitted_total, 64);
    assert_eq!(union.len(), 64);
}

#[test]
fn resuming_from_state_completes_the_walk() {
    let mut interrupted = open_quiet("10.99.0.0/24", ShardSpec::solo(), 555);
    let mut addresses: Vec<Ipv4Addr> = interrupted.by_ref().take(90).collect();

    // A new stream from the saved generator value continues the same walk;
    // quota is recomputed, so cap the continuation at what was left.
    let resumed = IpStream::open("10.99.0.0/24", ShardSpec::solo(), 555, Some(interrupted.state()))
        .unwrap()
        .without_checkpoints();
    addresses.extend(resumed.take(166));

    let unique: HashSet<Ipv4Addr> = addresses.iter().copied().collect();
    assert_eq!(addresses.len(), 256);
    assert_eq!(unique.len(), 256);
}

#[test]
fn checkpoint_file_tracks_generator_state() {
    // 2048 addresses: the periodic write fires once remaining hits 1000.
    let cidr = "10.77.0.0/21";
    let seed = 192_837;
    let checkpoint = Checkpoint::new(seed, cidr, &ShardSpec::solo());
    checkpoint.clear();

    let mut stream = IpStream::open(cidr, ShardSpec::solo(), seed, None).unwrap();
    assert_eq!(stream.checkpoint(), Some(&checkpoint));
    for _ in 0..1_048 {
        stream.next().unwrap();
    }

    assert_eq!(stream.remaining(), 1_000);
    assert_eq!(checkpoint.load(), Some(stream.state()));

    // Draining the stream overwrites it with the final state.
    let rest: Vec<Ipv4Addr> = stream.by_ref().collect();
    assert_eq!(rest.len(), 1_000);
    assert_eq!(checkpoint.load(), Some(stream.state()));
    checkpoint.clear();
}

#[test]
fn invalid_shard_specs_fail_before_any_output() {
    for spec in ["0/4", "5/4"] {
        assert!(
            spec.parse::<ShardSpec>().is_err(),
            "{spec:?} must be rejected"
        );
    }
}

#[test]
fn invalid_cidr_fails_before_any_output() {
    assert!(IpStream::open("10.0.0.0/99", ShardSpec::solo(), 1, None).is_err());
}
