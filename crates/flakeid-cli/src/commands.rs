use anyhow::Context;
use flakeid::{LockSnowflakeGenerator, NodeConfig, Snowflake, SnowflakeId, TimeSource};
use std::{io::Write, thread::scope};

/// Largest `--count` a single invocation accepts. All IDs are held in memory
/// so they can be printed in order.
pub const MAX_COUNT: usize = 10_000_000;

/// Generates `count` IDs from one generator shared by `threads` workers and
/// writes them to `out` in ascending order, one per line.
pub fn generate<T, W>(
    node: &NodeConfig,
    time: T,
    count: usize,
    threads: usize,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: TimeSource + Sync,
    W: Write,
{
    anyhow::ensure!(
        count <= MAX_COUNT,
        "--count ({count}) exceeds the maximum of {MAX_COUNT}"
    );

    let generator: LockSnowflakeGenerator<SnowflakeId, T> = node
        .build(time)
        .context("failed to start generator")?;

    tracing::debug!(
        datacenter_id = generator.datacenter_id(),
        worker_id = generator.worker_id(),
        epoch = generator.epoch(),
        count,
        threads,
        "generating"
    );

    let mut ids = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                // Spread the remainder over the first workers.
                let share = count / threads + usize::from(i < count % threads);
                let generator = &generator;
                s.spawn(move || {
                    (0..share)
                        .map(|_| generator.next_id())
                        .collect::<flakeid::Result<Vec<_>>>()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            let batch = handle
                .join()
                .map_err(|_| anyhow::anyhow!("generator thread panicked"))??;
            ids.extend(batch);
        }
        anyhow::Ok(ids)
    })?;

    ids.sort_unstable();
    for id in ids {
        writeln!(out, "{id}")?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the fields of each decimal ID in `ids`, one line per ID.
pub fn decode<W: Write>(epoch: i64, ids: &[String], out: &mut W) -> anyhow::Result<()> {
    for raw in ids {
        let id: SnowflakeId = raw
            .trim()
            .parse()
            .with_context(|| format!("cannot decode {raw:?}"))?;
        writeln!(
            out,
            "{id} timestamp={} unix_ms={} datacenter_id={} worker_id={} sequence={}",
            id.timestamp(),
            id.unix_millis(epoch),
            id.datacenter_id(),
            id.worker_id(),
            id.sequence(),
        )?;
    }
    Ok(())
}
