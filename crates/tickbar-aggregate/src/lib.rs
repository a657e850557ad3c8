//! Incremental tick-to-OHLCV bar aggregation for tickbar.
//!
//! This crate provides the aggregation engine:
//!
//! - [`bucket`] - Maps a trade time to the start of its one-minute bucket
//! - [`Bar`] - OHLCV aggregate for one bucket
//! - [`BarSeries`] - Ordered, key-unique collection of bars
//! - [`TickAggregator`] - Applies tick records to a series
//! - [`seed`] - Builds the initial series from historical candles
//! - [`SharedSeries`] - Lock-guarded series shared by a producer and readers
//! - [`cumulative_vwap`] - VWAP overlay over a series snapshot

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;
mod bucket;
mod seed;
mod series;
mod shared;
mod vwap;

pub use aggregator::{
    Applied, ClosePolicy, ClosePolicyParseError, SkipReason, TickAggregator, apply,
};
pub use bar::Bar;
pub use bucket::{bucket, is_bucket_aligned};
pub use seed::{SeedMode, seed};
pub use series::{BarSeries, DuplicateBucket};
pub use shared::SharedSeries;
pub use vwap::cumulative_vwap;
