//! Log output for the `flakeid` binary.
//!
//! Events go to stderr so stdout carries nothing but IDs and decoded fields.
//! Verbosity follows `RUST_LOG` and defaults to `warn`; set
//! `RUST_LOG=flakeid=debug` to see rollover waits and clock regressions as
//! they happen.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()?;
    Ok(())
}
