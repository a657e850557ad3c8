//! Display utilities and output formatting for the tickbar CLI.

use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::Path;
use tickbar_lib::{Bar, Frame, OutputFormat, Renderer, SessionStats, write_bars};
use tracing::debug;

/// Output format for the final bar series.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Tsv => Self::Tsv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Write bars to a file in the specified format.
pub(crate) fn write_output(bars: &[Bar], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_bars(format.into(), bars, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Print session counters.
pub(crate) fn print_stats(stats: &SessionStats, bars: usize) {
    println!("Events:         {}", stats.events);
    println!("Bars opened:    {}", stats.created);
    println!("Bars updated:   {}", stats.updated);
    println!("Partial ticks:  {}", stats.skipped_partial);
    println!("Malformed:      {}", stats.malformed);
    println!("Other symbols:  {}", stats.other_symbol);
    println!("Series length:  {bars}");
}

/// Draws the trailing window as a table on stdout.
///
/// When stdout is not a terminal only the final frame is drawn.
pub(crate) struct TableRenderer {
    title: String,
    interactive: bool,
}

impl TableRenderer {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            interactive: std::io::stdout().is_terminal(),
        }
    }

    fn draw(&self, out: &mut impl Write, frame: &Frame) -> std::io::Result<()> {
        if self.interactive {
            // Clear screen
            write!(out, "\x1B[2J\x1B[1;1H")?;
        }

        writeln!(
            out,
            "{} ({} of {} bars)\n",
            self.title,
            frame.bars.len(),
            frame.total_bars
        )?;
        writeln!(
            out,
            "{:<17} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "MINUTE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME", "VWAP"
        )?;
        writeln!(out, "{}", "-".repeat(85))?;

        for (bar, vwap) in frame.bars.iter().zip(&frame.vwap) {
            let marker = if bar.is_bullish() {
                '+'
            } else if bar.is_bearish() {
                '-'
            } else {
                ' '
            };
            let vwap = vwap.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
            writeln!(
                out,
                "{:<17} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10} {:>10} {marker}",
                bar.bucket_start.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
                vwap,
            )?;
        }

        out.flush()
    }

    fn draw_stdout(&self, frame: &Frame) {
        if let Err(e) = self.draw(&mut std::io::stdout().lock(), frame) {
            debug!(error = %e, "failed to draw frame");
        }
    }
}

impl Renderer for TableRenderer {
    fn render(&mut self, frame: &Frame) {
        if self.interactive {
            self.draw_stdout(frame);
        }
    }

    fn finish(&mut self, frame: &Frame) {
        self.draw_stdout(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn test_draw_table() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        let frame = Frame::from_bars(
            vec![
                Bar::new(start, 10.0, 12.0, 9.0, 11.0, 1000),
                Bar::new(start + TimeDelta::minutes(1), 11.0, 11.0, 10.0, 10.5, 0),
            ],
            60,
        );
        let renderer = TableRenderer {
            title: "SPY".to_string(),
            interactive: false,
        };

        let mut out = Vec::new();
        renderer.draw(&mut out, &frame).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "SPY (2 of 2 bars)");
        assert!(lines[2].starts_with("MINUTE"));
        assert!(lines[4].ends_with("10.50 +"));
        assert!(lines[5].contains("10.50"));
        assert!(lines[5].ends_with('-'));
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.ndjson");
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();

        write_output(
            &[Bar::new(start, 1.0, 1.0, 1.0, 1.0, 1)],
            &path,
            Format::Ndjson,
        )
        .unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
