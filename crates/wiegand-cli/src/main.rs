//! Frame replay harness.
//!
//! Reads binary frame strings (one per line, '0'/'1' characters) and pushes
//! them through the real capture/decode pipeline: a scripted edge source,
//! the inactivity-delimited frame assembler, the format and chunk decoders,
//! and the CSV log sink. Good reads are announced through the log notifier.
//!
//! ```text
//! wiegand-replay <frames-file> [config.json]
//! ```

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wiegand_capture::{CaptureTask, MockWiegand};
use wiegand_pipeline::{CsvLogSink, LogNotifier, ReaderConfig, ReaderPipeline};

struct Args {
    frames_path: PathBuf,
    config_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args_os().skip(1);
    let Some(frames_path) = args.next() else {
        bail!("usage: wiegand-replay <frames-file> [config.json]");
    };
    let config_path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        bail!("usage: wiegand-replay <frames-file> [config.json]");
    }
    Ok(Args {
        frames_path: PathBuf::from(frames_path),
        config_path,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => ReaderConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ReaderConfig::default(),
    };
    info!(
        quiet_window_us = config.quiet_window_us,
        notifications = config.enable_notifications,
        log = %config.log_path.display(),
        "reader configured"
    );

    let frames = std::fs::read_to_string(&args.frames_path)
        .with_context(|| format!("reading frames from {}", args.frames_path.display()))?;

    let (reader, handle) = MockWiegand::new();
    let (frames_tx, frames_rx) = mpsc::channel(16);
    tokio::spawn(CaptureTask::new(reader, config.quiet_window(), frames_tx).run());

    let sink = CsvLogSink::new(&config.log_path);
    let pipeline = ReaderPipeline::new(sink, LogNotifier, config.enable_notifications);
    let pipeline_task = tokio::spawn(pipeline.run(frames_rx));

    let mut presented = 0usize;
    for line in frames.lines() {
        let bits = line.trim();
        if bits.is_empty() || bits.starts_with('#') {
            continue;
        }
        handle
            .present_bits(bits)
            .await
            .with_context(|| format!("replaying frame {bits:?}"))?;
        handle.silence(config.quiet_window() * 2).await;
        presented += 1;
    }
    drop(handle);

    pipeline_task
        .await
        .context("pipeline task panicked")?
        .context("pipeline failed")?;

    info!(frames = presented, "replay complete");
    Ok(())
}
