//! Core types for the tickbar tick-to-bar aggregation engine.
//!
//! This crate provides the fundamental data structures used throughout tickbar:
//!
//! - [`TickRecord`] - One parsed trade event with optional price, size and sequence
//! - [`RawEvent`] - Raw field mapping as delivered by an event source
//! - [`Field`] - Identifiers of the fields carried by a raw event
//! - [`Candle`] - Finalized historical OHLCV candle used to seed a series
//! - [`MalformedEventError`], [`EmptyHistoryError`], [`TickbarError`] - Error taxonomy

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candle;
mod error;
mod tick;

pub use candle::Candle;
pub use error::{EmptyHistoryError, MalformedEventError, Result, TickbarError};
pub use tick::{Field, RawEvent, TickRecord};
