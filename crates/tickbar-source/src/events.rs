//! Replay of raw trade events from newline-delimited JSON.

use std::path::Path;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tickbar_types::RawEvent;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::SourceError;

/// Boxed buffered reader over a file or stdin.
pub type EventInput = Box<dyn AsyncBufRead + Send + Unpin>;

/// Configuration for replaying recorded events as a live source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayConfig {
    /// Delay inserted before each event, emulating a live feed.
    pub throttle: Option<Duration>,
}

impl ReplayConfig {
    /// Sets the delay inserted before each event.
    #[must_use]
    pub const fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = Some(throttle);
        self
    }
}

/// Opens an event input. A path of `-` reads from stdin.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub async fn open_events(path: &Path) -> Result<EventInput, SourceError> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }

    let file = File::open(path).await.map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

struct ReadState<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

/// Creates an async stream of raw events, one JSON object per line.
///
/// Blank lines and lines starting with `#` are ignored. A line that is not
/// valid UTF-8 or not a JSON object yields [`SourceError::Decode`] and
/// reading continues with the next line. The stream ends at end of input or
/// after the first I/O error.
pub fn event_stream<R>(
    reader: R,
    config: ReplayConfig,
) -> impl Stream<Item = Result<RawEvent, SourceError>>
where
    R: AsyncBufRead + Unpin,
{
    let state = ReadState {
        reader,
        buf: Vec::new(),
        line: 0,
        done: false,
    };

    stream::unfold(state, move |mut state| async move {
        if state.done {
            return None;
        }

        loop {
            state.line += 1;
            state.buf.clear();
            match state.reader.read_until(b'\n', &mut state.buf).await {
                Ok(0) => return None,
                Ok(_) => {
                    let bytes = state.buf.trim_ascii();
                    if bytes.is_empty() || bytes.starts_with(b"#") {
                        continue;
                    }
                    if let Some(delay) = config.throttle {
                        tokio::time::sleep(delay).await;
                    }
                    let event = RawEvent::from_json_slice(bytes).map_err(|source| {
                        SourceError::Decode {
                            line: state.line,
                            source,
                        }
                    });
                    return Some((event, state));
                }
                Err(e) => {
                    state.done = true;
                    return Some((Err(SourceError::Io(e)), state));
                }
            }
        }
    })
}

/// Creates a stream of raw events that skips undecodable lines.
///
/// This is useful for long-running sessions where one corrupt record should
/// not end the feed. Skipped lines are logged.
pub fn event_stream_resilient<R>(reader: R, config: ReplayConfig) -> impl Stream<Item = RawEvent>
where
    R: AsyncBufRead + Unpin,
{
    event_stream(reader, config).filter_map(|item| async move {
        match item {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "skipping unreadable event");
                None
            }
        }
    })
}
