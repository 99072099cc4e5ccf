//! Hammer the service from several threads and count what was written.

use anyhow::{ensure, Context, Result};
use colored::Colorize;
use std::fs;
use std::thread;
use std::time::Instant;
use tracelog_core::{LogConfig, LogService, Tag};

pub fn execute(config: &LogConfig, producers: usize, count: usize) -> Result<()> {
    let path = config
        .path
        .clone()
        .context("stress needs a log file")?;

    let log = LogService::new();
    log.start(config, None).context("Failed to start log service")?;

    let started = Instant::now();
    let handles: Vec<_> = (0..producers)
        .map(|producer| {
            let log = log.clone();
            thread::spawn(move || {
                for seq in 0..count {
                    tracelog_core::info!(log, Tag::new("producer", &producer), seq);
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            tracing::warn!("producer thread panicked");
        }
    }
    log.close();
    let elapsed = started.elapsed();

    let written = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {:?}", path))?
        .lines()
        .count();
    let expected = producers * count;
    ensure!(
        written == expected,
        "expected {} records in {:?}, found {}",
        expected,
        path,
        written
    );

    println!(
        "{} {} records from {} producers in {:.2}s",
        "OK".green().bold(),
        written,
        producers,
        elapsed.as_secs_f64()
    );
    Ok(())
}
