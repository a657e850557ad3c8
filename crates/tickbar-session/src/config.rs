//! Session configuration.

use std::time::Duration;

use tickbar_aggregate::{ClosePolicy, SeedMode};

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Only events for this symbol are aggregated. `None` accepts every symbol.
    pub symbol: Option<String>,
    /// How out-of-order ticks affect open and close.
    pub close_policy: ClosePolicy,
    /// Time between two renders of the trailing window.
    pub render_interval: Duration,
    /// Number of most recent bars handed to the renderer.
    pub window: usize,
    /// Whether an empty history is acceptable.
    pub history: SeedMode,
}

impl SessionConfig {
    /// Default render interval.
    pub const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(1000);

    /// Shortest render interval accepted; shorter values are raised to it.
    pub const MIN_RENDER_INTERVAL: Duration = Duration::from_millis(50);

    /// Default number of bars in the trailing window.
    pub const DEFAULT_WINDOW: usize = 60;

    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the session to one symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the close policy.
    #[must_use]
    pub const fn with_close_policy(mut self, policy: ClosePolicy) -> Self {
        self.close_policy = policy;
        self
    }

    /// Sets the render interval, raised to [`Self::MIN_RENDER_INTERVAL`] if shorter.
    #[must_use]
    pub fn with_render_interval(mut self, interval: Duration) -> Self {
        self.render_interval = interval.max(Self::MIN_RENDER_INTERVAL);
        self
    }

    /// Sets the trailing window length. Zero is treated as one bar.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Sets whether an empty history is acceptable.
    #[must_use]
    pub const fn with_history(mut self, mode: SeedMode) -> Self {
        self.history = mode;
        self
    }

    /// Returns true if events for `symbol` belong to this session.
    #[must_use]
    pub fn accepts(&self, symbol: &str) -> bool {
        self.symbol.as_deref().is_none_or(|wanted| wanted == symbol)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbol: None,
            close_policy: ClosePolicy::default(),
            render_interval: Self::DEFAULT_RENDER_INTERVAL,
            window: Self::DEFAULT_WINDOW,
            history: SeedMode::default(),
        }
    }
}
