//! Aggregate command implementation.

use crate::AggregateArgs;
use crate::display::{print_stats, write_output};
use anyhow::{Context, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tickbar_lib::prelude::*;

/// Aggregate every event from the source and write the resulting bars.
pub(crate) async fn aggregate(args: &AggregateArgs, quiet: bool) -> Result<()> {
    let session = super::open_session(&args.input, args.input.session_config()).await?;

    let input = open_events(&args.input.events)
        .await
        .with_context(|| format!("Failed to open events {}", args.input.events.display()))?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} events {msg}")?,
        );
        pb.set_message(args.input.events.display().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let events = event_stream(input, ReplayConfig::default()).inspect(|_| progress.inc(1));
    let report = session.replay(events).await.context("Aggregation failed")?;

    progress.finish_with_message(format!("-> {} bars", report.series.len()));

    write_output(&report.series.snapshot(), &args.output, args.format)?;

    if !quiet {
        print_stats(&report.stats, report.series.len());
        println!("Output written to: {}", args.output.display());
    }

    Ok(())
}
