//! Provides a means to read, parse and hold configuration options for runs.
use clap::Parser;
use serde_derive::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::shard::ShardSpec;

fn parse_shard_spec(input: &str) -> Result<ShardSpec, String> {
    input.parse()
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "iplcg",
    version = env!("CARGO_PKG_VERSION"),
    max_term_width = 120,
    help_template = "{bin} {version}\n{about}\n\nUSAGE:\n    {usage}\n\nOPTIONS:\n{options}",
)]
/// Enumerates every address of an IPv4 network in a pseudorandom,
/// non-repeating order that can be sharded across independent workers and
/// resumed after interruption.
/// - Shards run with the same seed jointly cover the network exactly once.
/// - Progress is checkpointed to a state file in the temp directory.
pub struct Opts {
    /// Target IP range in CIDR notation, e.g. 10.0.0.0/8.
    #[arg(short, long)]
    pub cidr: String,

    /// Shard specification in INDEX/TOTAL form (e.g. 1/4).
    #[arg(short, long, value_parser = parse_shard_spec, default_value = "1/1")]
    pub shard: ShardSpec,

    /// Seed for the pseudorandom walk. 0 picks a random seed, reported on
    /// stderr so the run can be reproduced or resumed.
    #[arg(long, default_value = "0")]
    pub seed: u32,

    /// Resume from a specific generator state value.
    #[arg(long, conflicts_with = "resume")]
    pub state: Option<u32>,

    /// Resume from the checkpoint file of a previous identical invocation.
    /// Requires an explicit --seed.
    #[arg(long)]
    pub resume: bool,

    /// Do not write checkpoint state files.
    #[arg(long)]
    pub no_state: bool,

    /// Greppable mode. Only output the addresses, no banner or seed report.
    #[arg(short, long)]
    pub greppable: bool,

    /// Whether to ignore the configuration file or not.
    #[arg(short, long)]
    pub no_config: bool,

    /// Custom path to config file
    #[arg(long, value_parser)]
    pub config_path: Option<PathBuf>,
}

#[cfg(not(tarpaulin_include))]
impl Opts {
    pub fn read() -> Self {
        Opts::parse()
    }

    /// Merge values found within the user configuration file into the
    /// command line arguments.
    pub fn merge(&mut self, config: &Config) {
        if !self.no_config {
            macro_rules! merge_optional {
                ($($field: ident),+) => {
                    $(
                        if let Some(value) = config.$field {
                            self.$field = value;
                        }
                    )+
                }
            }

            merge_optional!(shard, seed, greppable, no_state);
        }
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            cidr: String::new(),
            shard: ShardSpec::solo(),
            seed: 0,
            state: None,
            resume: false,
            no_state: false,
            greppable: false,
            no_config: true,
            config_path: None,
        }
    }
}

/// Struct used to deserialize the options specified within our config file.
/// These will be further merged with our command line arguments in order to
/// generate the final Opts struct.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default, deserialize_with = "deserialize_shard")]
    shard: Option<ShardSpec>,
    seed: Option<u32>,
    greppable: Option<bool>,
    no_state: Option<bool>,
}

fn deserialize_shard<'de, D>(deserializer: D) -> Result<Option<ShardSpec>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    let spec: Option<String> = Option::deserialize(deserializer)?;
    spec.map(|s| s.parse().map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(not(tarpaulin_include))]
impl Config {
    /// Reads the configuration file with TOML format and parses it into a
    /// Config struct.
    ///
    /// # Format
    ///
    /// shard = "1/4"
    /// seed = 42
    /// greppable = true
    /// no_state = false
    ///
    pub fn read(custom_config_path: Option<PathBuf>) -> Self {
        let mut content = String::new();
        let config_path = custom_config_path.unwrap_or_else(default_config_path);
        if config_path.exists() {
            content = fs::read_to_string(config_path).unwrap_or_default();
        }

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                println!("Found {e} in configuration file.\nAborting.\n");
                std::process::exit(1);
            }
        }
    }
}

/// Constructs default path to config toml
pub fn default_config_path() -> PathBuf {
    let Some(mut config_path) = dirs::home_dir() else {
        panic!("Could not infer config file path.");
    };
    config_path.push(".iplcg.toml");
    config_path
}
