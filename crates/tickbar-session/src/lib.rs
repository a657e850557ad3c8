//! Live aggregation sessions for tickbar.
//!
//! This crate wires the aggregation engine to its inputs and outputs:
//!
//! - [`SessionConfig`] - Symbol filter, close policy and render settings
//! - [`Session`] - Seeds a series and folds raw events into it
//! - [`Renderer`] - Receives periodic [`Frame`]s of the trailing window
//! - [`SessionStats`] - Counters reported when a session finishes

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod render;
mod session;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use render::{Frame, Renderer};
pub use session::{Session, SessionReport, SessionStats};
