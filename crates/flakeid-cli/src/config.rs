use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use flakeid::{NodeConfig, SnowflakeConfig};

use crate::commands::MAX_COUNT;

/// Runtime configuration for the `flakeid` binary.
///
/// Node coordinates are parsed from CLI arguments or environment variables
/// (a `.env` file in the working directory is loaded first). They are
/// optional at this layer so a missing value is reported by name.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flakeid",
    version,
    about = "Generate and decode Snowflake-style 64-bit IDs"
)]
pub struct CliArgs {
    /// Datacenter coordinate of this node.
    ///
    /// Environment variable: `FLAKEID_DATACENTER_ID`
    #[arg(long, env = "FLAKEID_DATACENTER_ID", allow_negative_numbers = true)]
    pub datacenter_id: Option<i64>,

    /// Worker coordinate of this node, unique within its datacenter.
    ///
    /// Environment variable: `FLAKEID_WORKER_ID`
    #[arg(long, env = "FLAKEID_WORKER_ID", allow_negative_numbers = true)]
    pub worker_id: Option<i64>,

    /// Epoch in milliseconds since the Unix epoch. Missing or negative values
    /// fall back to 2025-01-01T00:00:00Z.
    ///
    /// Environment variable: `FLAKEID_EPOCH`
    #[arg(long, env = "FLAKEID_EPOCH", allow_negative_numbers = true)]
    pub epoch: Option<i64>,

    /// Time source used by the generator.
    ///
    /// Environment variable: `FLAKEID_CLOCK`
    #[arg(long, env = "FLAKEID_CLOCK", value_enum, default_value_t = ClockKind::Monotonic)]
    pub clock: ClockKind,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate IDs and print them, one per line, in ascending order.
    Generate {
        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Number of threads sharing the generator.
        #[arg(short, long, default_value_t = 1)]
        threads: usize,
    },
    /// Print the fields encoded in one or more IDs.
    ///
    /// Decoding only needs the epoch; node coordinates are ignored.
    Decode {
        /// IDs in decimal form.
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Wall clock anchored once, advanced by a monotonic ticker.
    Monotonic,
    /// Wall clock read on every call; may move backwards.
    System,
}

#[derive(Debug, Clone)]
pub enum Task {
    Generate {
        node: NodeConfig,
        clock: ClockKind,
        count: usize,
        threads: usize,
    },
    Decode {
        epoch: i64,
        ids: Vec<String>,
    },
}

impl TryFrom<CliArgs> for Task {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let config = SnowflakeConfig {
            datacenter_id: args.datacenter_id,
            worker_id: args.worker_id,
            epoch: args.epoch,
        };

        match args.command {
            Command::Generate { count, threads } => {
                if threads == 0 {
                    bail!("--threads must be greater than 0");
                }
                if count > MAX_COUNT {
                    bail!("--count ({count}) exceeds the maximum of {MAX_COUNT}");
                }
                if threads > count.max(1) {
                    bail!("--threads ({threads}) exceeds --count ({count})");
                }
                Ok(Self::Generate {
                    node: config.validate()?,
                    clock: args.clock,
                    count,
                    threads,
                })
            }
            Command::Decode { ids } => Ok(Self::Decode {
                epoch: flakeid::resolve_epoch(config.epoch),
                ids,
            }),
        }
    }
}
