//! Bar series export formatters for tickbar.
//!
//! This crate provides formatters for writing OHLCV bars to various output
//! formats:
//!
//! - [`CsvFormatter`] - CSV (or TSV) format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`write_bars`] - Dispatches on an [`OutputFormat`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat, write_bars};
pub use json::{JsonFormatter, JsonStyle};
