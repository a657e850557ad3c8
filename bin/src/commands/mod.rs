//! CLI command implementations.

pub(crate) mod aggregate;
pub(crate) mod stream;

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use tickbar_lib::prelude::*;

use crate::InputArgs;

/// Loads the optional price history and seeds a session from it.
pub(crate) async fn open_session(input: &InputArgs, config: SessionConfig) -> Result<Session> {
    let mut history = match &input.history {
        Some(path) => PriceHistory::load(path)
            .await
            .with_context(|| format!("Failed to load price history from {}", path.display()))?,
        None => PriceHistory::default(),
    };

    if let Some(minutes) = input.lookback_minutes {
        history = history.since(Utc::now() - TimeDelta::minutes(i64::from(minutes)));
    }

    Session::seeded(config, history).context("Failed to seed bar series")
}
