//! Adaptive low-pass filtering for landmark and pose streams.
//!
//! This module provides the temporal smoothing primitives that remove
//! per-frame jitter from landmark positions, the head pose matrix, and the
//! face scale while keeping latency low during fast motion.

/// Frequency-adaptive low-pass filter (one-euro style)
pub mod one_euro;

/// Per-channel filter bank covering landmarks, pose matrix, and scale
pub mod bank;

pub use bank::FilterBank;
pub use one_euro::OneEuroFilter;

/// Convert a cutoff frequency and elapsed time into an exponential
/// smoothing coefficient. Smaller cutoffs yield stronger smoothing.
#[must_use]
pub(crate) fn smoothing_factor(elapsed_secs: f32, cutoff_hz: f32) -> f32 {
    let r = 2.0 * std::f32::consts::PI * cutoff_hz * elapsed_secs;
    r / (r + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_factor_bounds() {
        // Always in (0, 1) for positive inputs
        let a = smoothing_factor(1.0 / 60.0, 1.0);
        assert!(a > 0.0 && a < 1.0);

        // Higher cutoff weighs the raw sample more heavily
        let fast = smoothing_factor(1.0 / 60.0, 30.0);
        assert!(fast > a);
    }
}
