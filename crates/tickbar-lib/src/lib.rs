//! Incremental aggregation of trade ticks into one-minute OHLCV bars.
//!
//! This is a facade crate that re-exports functionality from the tickbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use tickbar_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let history = PriceHistory::load("spy.json".as_ref()).await?;
//!     let session = Session::seeded(SessionConfig::new().with_symbol("SPY"), history)?;
//!
//!     let input = open_events("timesale.ndjson".as_ref()).await?;
//!     let report = session
//!         .run(event_stream(input, ReplayConfig::default()), |frame: &Frame| {
//!             println!("{} bars", frame.total_bars);
//!         })
//!         .await?;
//!
//!     println!("applied {} ticks", report.stats.applied());
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbar_types::*;

// Re-export the aggregation engine
pub use tickbar_aggregate::{
    Applied, Bar, BarSeries, ClosePolicy, ClosePolicyParseError, DuplicateBucket, SeedMode,
    SharedSeries, SkipReason, TickAggregator, apply, bucket, cumulative_vwap, is_bucket_aligned,
    seed,
};

// Re-export event and history sources
#[cfg(feature = "source")]
pub use tickbar_source::{
    EventInput, PriceHistory, ReplayConfig, SourceError, event_stream, event_stream_resilient,
    open_events,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbar_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, write_bars,
};

// Re-export sessions
#[cfg(feature = "session")]
pub use tickbar_session::{
    Frame, Renderer, Session, SessionConfig, SessionError, SessionReport, SessionStats,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbar_types::{
        Candle, EmptyHistoryError, MalformedEventError, RawEvent, Result, TickRecord,
        TickbarError,
    };

    pub use tickbar_aggregate::{
        Applied, Bar, BarSeries, ClosePolicy, SeedMode, SharedSeries, TickAggregator, apply,
        bucket, seed,
    };

    #[cfg(feature = "source")]
    pub use tickbar_source::{PriceHistory, ReplayConfig, event_stream, open_events};

    #[cfg(feature = "format")]
    pub use tickbar_format::{Formatter, OutputFormat, write_bars};

    #[cfg(feature = "session")]
    pub use tickbar_session::{Frame, Renderer, Session, SessionConfig};
}
