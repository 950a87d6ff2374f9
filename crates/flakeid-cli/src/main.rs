mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, ClockKind, Task};
use flakeid::{MonotonicClock, SystemClock};
use std::io::{BufWriter, Write};
use telemetry::init_telemetry;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let task = Task::try_from(args)?;

    init_telemetry()?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match task {
        Task::Generate {
            node,
            clock,
            count,
            threads,
        } => match clock {
            ClockKind::Monotonic => {
                commands::generate(&node, MonotonicClock::new(), count, threads, &mut out)?;
            }
            ClockKind::System => {
                commands::generate(&node, SystemClock, count, threads, &mut out)?;
            }
        },
        Task::Decode { epoch, ids } => commands::decode(epoch, &ids, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
