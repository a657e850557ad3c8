//! Snapshots handed to renderers.

use tickbar_aggregate::{Bar, SharedSeries, cumulative_vwap};

/// Read-only view of the trailing window at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Most recent bars, oldest first.
    pub bars: Vec<Bar>,
    /// Cumulative VWAP at each bar in `bars`, computed over the whole series.
    pub vwap: Vec<Option<f64>>,
    /// Number of bars in the whole series.
    pub total_bars: usize,
}

impl Frame {
    /// Captures the `window` most recent bars from a shared series.
    ///
    /// The VWAP is accumulated from the first bar of the series, not from
    /// the first bar of the window.
    #[must_use]
    pub fn capture(series: &SharedSeries, window: usize) -> Self {
        Self::from_bars(series.snapshot(), window)
    }

    /// Builds a frame from a full, ordered series snapshot.
    #[must_use]
    pub fn from_bars(mut bars: Vec<Bar>, window: usize) -> Self {
        let total_bars = bars.len();
        let mut vwap = cumulative_vwap(&bars);

        let skip = total_bars.saturating_sub(window);
        bars.drain(..skip);
        vwap.drain(..skip);

        Self {
            bars,
            vwap,
            total_bars,
        }
    }

    /// Returns the most recent bar with its VWAP.
    #[must_use]
    pub fn latest(&self) -> Option<(&Bar, Option<f64>)> {
        self.bars
            .last()
            .map(|bar| (bar, self.vwap.last().copied().flatten()))
    }

    /// Returns true if the frame holds no bars.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Draws frames of the trailing window.
///
/// A renderer runs on its own task and only ever sees owned snapshots; it
/// never holds a lock on the live series.
pub trait Renderer: Send + 'static {
    /// Draws one periodic frame.
    fn render(&mut self, frame: &Frame);

    /// Draws the final frame after the event source is exhausted.
    fn finish(&mut self, frame: &Frame) {
        self.render(frame);
    }
}

impl<F> Renderer for F
where
    F: FnMut(&Frame) + Send + 'static,
{
    fn render(&mut self, frame: &Frame) {
        self(frame);
    }
}
