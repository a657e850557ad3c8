//! Event source and historical loader adapters for tickbar.
//!
//! This crate feeds the aggregation engine from local inputs:
//!
//! - [`event_stream`] - Async stream of raw events from newline-delimited JSON
//! - [`event_stream_resilient`] - Same, skipping lines that fail to decode
//! - [`open_events`] - Opens a file (or stdin) as an event input
//! - [`PriceHistory`] - Historical candle document used to seed a series

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod events;
mod history;

pub use error::SourceError;
pub use events::{EventInput, ReplayConfig, event_stream, event_stream_resilient, open_events};
pub use history::PriceHistory;
