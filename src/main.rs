use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use serde::Deserialize;

use ohlcv_series::config::FileConfig;
use ohlcv_series::model::{Bar, Execution};
use ohlcv_series::Series;

/// One line of replay input: either a trade or a full bar.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayRecord {
    Bar(Bar),
    Execution(Execution),
}

fn main() -> Result<()> {
    let config_path = FileConfig::resolve_path();
    let config = FileConfig::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(&config.logging.level)
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .json()
        .init();

    let series_config = config.series.to_series_config()?;
    tracing::info!(
        config = %config_path.display(),
        interval_secs = series_config.interval_secs,
        max_bars = series_config.max_bars,
        indicators = config.indicators.len(),
        "Starting replay"
    );

    let mut series = Series::new(Vec::new(), series_config)?;
    for named in &config.indicators {
        series
            .add_indicator(named.name.clone(), named.indicator.build())
            .with_context(|| format!("failed to register indicator '{}'", named.name))?;
    }

    let stdin = io::stdin();
    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ReplayRecord = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid record", lineno + 1))?;
        let ingested = match record {
            ReplayRecord::Bar(bar) => series.add_ohlcv(bar),
            ReplayRecord::Execution(exec) => series.add_exec(exec),
        };
        ingested.with_context(|| format!("line {}: ingestion failed", lineno + 1))?;
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for bar in series.bars() {
        if let Some(interval) = series.value_for_interval(bar.start) {
            serde_json::to_writer(&mut out, &interval).context("failed to encode interval")?;
            out.write_all(b"\n").context("failed to write stdout")?;
        }
    }
    out.flush().context("failed to flush stdout")?;

    tracing::info!(bars = series.len(), "Replay complete");
    Ok(())
}
