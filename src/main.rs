//! Command line front end: parses options, opens the stream and prints
//! addresses line by line.

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use colored::Colorize;
use log::debug;

use iplcg::checkpoint::Checkpoint;
use iplcg::input::{Config, Opts};
use iplcg::stream::IpStream;

fn main() {
    env_logger::init();

    let mut opts = Opts::read();
    let config = Config::read(opts.config_path.clone());
    opts.merge(&config);
    debug!("runtime options: {opts:?}");

    if let Err(e) = run(&opts) {
        // Configuration errors land on stdout before any address does.
        println!("{} {e:#}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> anyhow::Result<()> {
    let resume = match (opts.state, opts.resume) {
        (state @ Some(_), _) => state,
        (None, true) => {
            anyhow::ensure!(
                opts.seed != 0,
                "--resume needs the --seed of the interrupted run"
            );
            let checkpoint = Checkpoint::new(opts.seed, &opts.cidr, &opts.shard);
            let state = checkpoint
                .load()
                .with_context(|| format!("no checkpoint at {}", checkpoint.path().display()))?;
            Some(state)
        }
        (None, false) => None,
    };

    let mut stream = IpStream::open(&opts.cidr, opts.shard, opts.seed, resume)?;
    if opts.no_state {
        stream = stream.without_checkpoints();
    }

    if !opts.greppable {
        eprintln!(
            "iplcg {} | {} shard {} seed {}",
            env!("CARGO_PKG_VERSION"),
            opts.cidr,
            opts.shard,
            stream.seed()
        );
    }

    // Line-buffered stdout is the bottleneck for big ranges.
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for address in stream {
        // A closed pipe (e.g. `iplcg ... | head`) is normal termination.
        if writeln!(out, "{address}").is_err() {
            break;
        }
    }
    let _ = out.flush();

    Ok(())
}
