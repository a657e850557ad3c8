//! Volume-weighted average price overlay.

use crate::Bar;

/// Computes the running VWAP of bar midpoints.
///
/// Entry `i` is `Σ(midpoint·volume) / Σvolume` over `bars[..=i]`, or `None`
/// while no volume has traded yet.
#[must_use]
pub fn cumulative_vwap(bars: &[Bar]) -> Vec<Option<f64>> {
    let mut notional = 0.0;
    let mut volume = 0.0;

    bars.iter()
        .map(|bar| {
            let v = bar.volume as f64;
            notional += bar.midpoint() * v;
            volume += v;
            if volume > 0.0 {
                Some(notional / volume)
            } else {
                None
            }
        })
        .collect()
}
