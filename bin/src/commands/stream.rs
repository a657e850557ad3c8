//! Stream command implementation.
//!
//! Replays recorded raw events as a live feed while the trailing window of
//! bars is repainted on stdout.

use crate::StreamArgs;
use crate::display::{TableRenderer, print_stats, write_output};
use anyhow::{Context, Result};
use std::time::Duration;
use tickbar_lib::prelude::*;

/// Run a live session over the given event source.
pub(crate) async fn stream(args: &StreamArgs, quiet: bool) -> Result<()> {
    let config = args
        .input
        .session_config()
        .with_window(args.window)
        .with_render_interval(Duration::from_millis(args.interval_ms));
    let session = super::open_session(&args.input, config).await?;

    let mut replay = ReplayConfig::default();
    if let Some(ms) = args.throttle_ms {
        replay = replay.with_throttle(Duration::from_millis(ms));
    }
    let input = open_events(&args.input.events)
        .await
        .with_context(|| format!("Failed to open events {}", args.input.events.display()))?;
    let events = event_stream(input, replay);

    let title = args.input.symbol.as_deref().unwrap_or("all symbols");
    let report = if quiet {
        session.replay(events).await
    } else {
        session.run(events, TableRenderer::new(title)).await
    }
    .context("Session failed")?;

    if !quiet {
        println!();
        print_stats(&report.stats, report.series.len());
    }

    if let Some(output) = &args.output {
        write_output(&report.series.snapshot(), output, args.format)?;
        if !quiet {
            println!("Output written to: {}", output.display());
        }
    }

    Ok(())
}
