//! Session lifecycle: seed, ingest, render.

use std::time::Duration;

use futures::{Stream, StreamExt};
use tickbar_aggregate::{Applied, BarSeries, SharedSeries, TickAggregator, seed};
use tickbar_source::{PriceHistory, SourceError};
use tickbar_types::{RawEvent, TickRecord};
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::{Frame, Renderer, Result, SessionConfig};

/// Counters collected while a session ingests events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Events read from the source, including dropped ones.
    pub events: u64,
    /// Ticks that opened a new bar.
    pub created: u64,
    /// Ticks folded into an existing bar.
    pub updated: u64,
    /// Well-formed ticks without price or size.
    pub skipped_partial: u64,
    /// Events dropped because they could not be parsed.
    pub malformed: u64,
    /// Events for a symbol other than the session's.
    pub other_symbol: u64,
}

impl SessionStats {
    /// Returns the number of ticks that changed the series.
    #[must_use]
    pub const fn applied(&self) -> u64 {
        self.created + self.updated
    }

    const fn record(&mut self, applied: Applied) {
        match applied {
            Applied::Created(_) => self.created += 1,
            Applied::Updated(_) => self.updated += 1,
            Applied::Skipped(_) => self.skipped_partial += 1,
        }
    }
}

/// Final state of a finished session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Ingest counters.
    pub stats: SessionStats,
    /// The bar series as it stood when the source was exhausted.
    pub series: BarSeries,
}

/// One aggregation session over a single event source.
///
/// The session owns the live series. Ingest happens on the caller's task;
/// rendering, when requested, runs on a separate task that only reads
/// snapshots.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    series: SharedSeries,
}

impl Session {
    /// Creates a session with an empty series.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let aggregator = TickAggregator::new(config.close_policy);
        Self {
            series: SharedSeries::new(BarSeries::new(), aggregator),
            config,
        }
    }

    /// Creates a session whose series is seeded from price history.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::History`](crate::SessionError::History) if the
    /// history is empty and the configuration requires a non-empty seed.
    pub fn seeded(config: SessionConfig, history: PriceHistory) -> Result<Self> {
        match (config.symbol.as_deref(), history.symbol.as_deref()) {
            (Some(wanted), Some(found)) if wanted != found => {
                warn!(wanted, found, "price history is for a different symbol");
            }
            _ => {}
        }
        if history.empty {
            debug!("price history reports no candles");
        }

        let series = seed(history, config.history)?;
        let aggregator = TickAggregator::new(config.close_policy);
        Ok(Self {
            series: SharedSeries::new(series, aggregator),
            config,
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a handle to the live series.
    #[must_use]
    pub const fn series(&self) -> &SharedSeries {
        &self.series
    }

    /// Parses one raw event and applies it to the series.
    ///
    /// Malformed events and events for other symbols are counted in `stats`
    /// and dropped. Returns the aggregation outcome for applied ticks.
    pub fn ingest(&self, event: &RawEvent, stats: &mut SessionStats) -> Option<Applied> {
        stats.events += 1;

        let tick = match TickRecord::from_raw(event) {
            Ok(tick) => tick,
            Err(e) => {
                warn!(error = %e, "dropping malformed event");
                stats.malformed += 1;
                return None;
            }
        };

        if !self.config.accepts(&tick.symbol) {
            trace!(symbol = %tick.symbol, "ignoring event for another symbol");
            stats.other_symbol += 1;
            return None;
        }

        let applied = self.series.apply(&tick);
        debug!(symbol = %tick.symbol, trade_time = %tick.trade_time, ?applied, "tick applied");
        stats.record(applied);
        Some(applied)
    }

    /// Ingests every event from `events` until the stream ends.
    ///
    /// Lines that fail to decode are counted as malformed and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Source`](crate::SessionError::Source) on any
    /// other source error; events ingested before it remain in the series.
    pub async fn ingest_all<S>(&self, events: S) -> Result<SessionStats>
    where
        S: Stream<Item = std::result::Result<RawEvent, SourceError>>,
    {
        let mut events = std::pin::pin!(events);
        let mut stats = SessionStats::default();

        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    self.ingest(&event, &mut stats);
                }
                Err(SourceError::Decode { line, source }) => {
                    warn!(line, error = %source, "dropping undecodable event");
                    stats.events += 1;
                    stats.malformed += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(stats)
    }

    /// Ingests `events` without rendering and returns the final series.
    ///
    /// # Errors
    ///
    /// See [`ingest_all`](Self::ingest_all).
    pub async fn replay<S>(self, events: S) -> Result<SessionReport>
    where
        S: Stream<Item = std::result::Result<RawEvent, SourceError>>,
    {
        self.log_start();
        let stats = self.ingest_all(events).await?;
        Ok(self.finish(stats))
    }

    /// Ingests `events` while `renderer` draws the trailing window every
    /// render interval.
    ///
    /// The renderer receives one last frame after the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or the render task panics.
    pub async fn run<S, R>(self, events: S, renderer: R) -> Result<SessionReport>
    where
        S: Stream<Item = std::result::Result<RawEvent, SourceError>>,
        R: Renderer,
    {
        self.log_start();

        let (stop_tx, stop_rx) = oneshot::channel();
        let render = tokio::spawn(render_loop(
            self.series.clone(),
            self.config.render_interval,
            self.config.window,
            renderer,
            stop_rx,
        ));

        let outcome = self.ingest_all(events).await;
        // The render task also stops if the sender is dropped.
        let _ = stop_tx.send(());
        render.await?;

        Ok(self.finish(outcome?))
    }

    fn log_start(&self) {
        info!(
            symbol = self.config.symbol.as_deref().unwrap_or("*"),
            policy = %self.series.aggregator().policy(),
            seeded_bars = self.series.len(),
            "session started"
        );
    }

    fn finish(self, stats: SessionStats) -> SessionReport {
        info!(
            events = stats.events,
            created = stats.created,
            updated = stats.updated,
            skipped_partial = stats.skipped_partial,
            malformed = stats.malformed,
            other_symbol = stats.other_symbol,
            bars = self.series.len(),
            "session finished"
        );

        SessionReport {
            stats,
            series: self.series.into_series(),
        }
    }
}

async fn render_loop<R: Renderer>(
    series: SharedSeries,
    period: Duration,
    window: usize,
    mut renderer: R,
    mut stop: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => renderer.render(&Frame::capture(&series, window)),
            _ = &mut stop => break,
        }
    }

    renderer.finish(&Frame::capture(&series, window));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionError;
    use chrono::{DateTime, TimeZone, Utc};
    use futures::stream;
    use tickbar_aggregate::{Bar, ClosePolicy, SeedMode};
    use tickbar_types::{Candle, Field};
    use tokio::sync::mpsc;

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 14, minute, second).unwrap()
    }

    fn trade(symbol: &str, time: DateTime<Utc>, price: f64, size: u64) -> RawEvent {
        RawEvent::new()
            .with(Field::Symbol, symbol)
            .with(Field::TradeTime, time.timestamp_millis())
            .with(Field::Price, price)
            .with(Field::Size, size)
    }

    fn history() -> PriceHistory {
        PriceHistory {
            symbol: Some("SPY".to_string()),
            empty: false,
            candles: vec![Candle::new(at(30, 0), 10.0, 12.0, 9.0, 11.0, 1000)],
        }
    }

    fn source(
        events: Vec<RawEvent>,
    ) -> impl Stream<Item = std::result::Result<RawEvent, SourceError>> {
        stream::iter(events.into_iter().map(Ok))
    }

    #[tokio::test]
    async fn test_live_tick_updates_seeded_bar() {
        let session = Session::seeded(SessionConfig::new(), history()).unwrap();

        let report = session
            .replay(source(vec![trade("SPY", at(30, 45), 13.0, 5)]))
            .await
            .unwrap();

        assert_eq!(report.stats.updated, 1);
        assert_eq!(
            report.series.get(&at(30, 0)),
            Some(&Bar::new(at(30, 0), 10.0, 13.0, 9.0, 13.0, 1005))
        );
    }

    #[tokio::test]
    async fn test_counts_every_outcome() {
        let session = Session::new(SessionConfig::new().with_symbol("SPY"));
        let missing_symbol = RawEvent::new().with(Field::TradeTime, at(31, 0).timestamp_millis());
        let no_size = RawEvent::new()
            .with(Field::Symbol, "SPY")
            .with(Field::TradeTime, at(31, 5).timestamp_millis())
            .with(Field::Price, 11.0);

        let report = session
            .replay(source(vec![
                trade("SPY", at(31, 0), 10.0, 1),
                trade("SPY", at(31, 30), 10.5, 2),
                trade("QQQ", at(31, 30), 400.0, 2),
                missing_symbol,
                no_size,
                trade("SPY", at(32, 0), 10.25, 3),
            ]))
            .await
            .unwrap();

        assert_eq!(
            report.stats,
            SessionStats {
                events: 6,
                created: 2,
                updated: 1,
                skipped_partial: 1,
                malformed: 1,
                other_symbol: 1,
            }
        );
        assert_eq!(report.stats.applied(), 3);
        assert_eq!(report.series.len(), 2);
    }

    #[tokio::test]
    async fn test_decode_error_is_skipped() {
        let session = Session::new(SessionConfig::new());
        let decode = serde_json::from_str::<RawEvent>("[1]").unwrap_err();
        let events = stream::iter(vec![
            Err(SourceError::Decode {
                line: 1,
                source: decode,
            }),
            Ok(trade("SPY", at(30, 1), 10.0, 1)),
        ]);

        let report = session.replay(events).await.unwrap();
        assert_eq!(report.stats.malformed, 1);
        assert_eq!(report.stats.created, 1);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let feed: &[u8] = b"{\"key\":\"SPY\",\"1\":1640000000000,\"2\":470.1,\"3\":1}\n\
{\"key\":\"SPY\xff\",\"1\":1640000001000,\"2\":470.2,\"3\":1}\n\
{\"key\":\"SPY\",\"1\":1640000002000,\"2\":470.3,\"3\":2}\n";
        let session = Session::new(SessionConfig::new());

        let report = session
            .replay(tickbar_source::event_stream(
                feed,
                tickbar_source::ReplayConfig::default(),
            ))
            .await
            .unwrap();

        assert_eq!(report.stats.events, 3);
        assert_eq!(report.stats.malformed, 1);
        assert_eq!(report.series.last().unwrap().volume, 3);
    }

    #[tokio::test]
    async fn test_io_error_ends_session() {
        let session = Session::new(SessionConfig::new());
        let events = stream::iter(vec![
            Ok(trade("SPY", at(30, 1), 10.0, 1)),
            Err(SourceError::Io(std::io::Error::other("disconnected"))),
        ]);

        let result = session.clone().replay(events).await;
        assert!(matches!(result, Err(SessionError::Source(_))));
        // Ticks before the failure stay applied.
        assert_eq!(session.series().len(), 1);
    }

    #[test]
    fn test_require_history() {
        let config = SessionConfig::new().with_history(SeedMode::RequireNonEmpty);

        let result = Session::seeded(config.clone(), PriceHistory::default());
        assert!(matches!(result, Err(SessionError::History(_))));

        let session = Session::seeded(config, history()).unwrap();
        assert_eq!(session.series().len(), 1);
    }

    #[test]
    fn test_close_policy_from_config() {
        let session = Session::new(SessionConfig::new().with_close_policy(ClosePolicy::Sequence));
        assert_eq!(session.series().aggregator().policy(), ClosePolicy::Sequence);
    }

    #[tokio::test]
    async fn test_run_renders_final_frame() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let renderer = move |frame: &Frame| {
            let _ = tx.send(frame.clone());
        };

        let session = Session::seeded(
            SessionConfig::new()
                .with_window(2)
                .with_render_interval(Duration::from_millis(50)),
            history(),
        )
        .unwrap();

        let report = session
            .run(
                source(vec![
                    trade("SPY", at(31, 0), 11.0, 10),
                    trade("SPY", at(32, 0), 12.0, 10),
                ]),
                renderer,
            )
            .await
            .unwrap();

        let mut frames = Vec::new();
        while let Some(frame) = rx.recv().await {
            frames.push(frame);
        }

        let last = frames.last().unwrap();
        assert_eq!(last.total_bars, 3);
        assert_eq!(last.bars.len(), 2);
        assert_eq!(last.bars, report.series.window(2));
        assert!(last.vwap.iter().all(Option::is_some));
    }
}
