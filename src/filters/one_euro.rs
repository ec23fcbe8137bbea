use super::smoothing_factor;
use crate::constants::DERIVATIVE_CUTOFF;

/// Per-channel filter state: last smoothed value, last smoothed derivative,
/// and the timestamp of the last accepted sample.
#[derive(Debug, Clone, Copy)]
struct ChannelState {
    value: f32,
    derivative: f32,
    timestamp: f64,
}

/// Frequency-adaptive low-pass filter (one-euro style).
///
/// The effective cutoff frequency rises with the smoothed rate of change of
/// the signal: near-still input is smoothed aggressively, fast motion passes
/// through with little lag. The first sample seeds the state and is returned
/// unchanged.
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    min_cutoff: f32,
    beta: f32,
    state: Option<ChannelState>,
}

impl OneEuroFilter {
    /// Create a new filter.
    ///
    /// # Panics
    ///
    /// Panics if `min_cutoff` is not positive or `beta` is negative.
    #[must_use]
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        assert!(
            min_cutoff > 0.0 && min_cutoff.is_finite(),
            "Cutoff frequency must be positive"
        );
        assert!(beta >= 0.0 && beta.is_finite(), "Beta must be non-negative");
        Self {
            min_cutoff,
            beta,
            state: None,
        }
    }

    /// Filter one sample taken at `timestamp` seconds.
    ///
    /// Non-finite input and non-advancing timestamps return the last
    /// smoothed value without touching the running state, so a single bad
    /// sample cannot corrupt the derivative estimate.
    pub fn filter(&mut self, timestamp: f64, raw: f32) -> f32 {
        if !raw.is_finite() || !timestamp.is_finite() {
            return self.state.map_or(raw, |s| s.value);
        }

        let Some(state) = self.state else {
            self.state = Some(ChannelState {
                value: raw,
                derivative: 0.0,
                timestamp,
            });
            return raw;
        };

        let elapsed = (timestamp - state.timestamp) as f32;
        if elapsed <= 0.0 {
            return state.value;
        }

        let raw_derivative = (raw - state.value) / elapsed;
        let derivative_alpha = smoothing_factor(elapsed, DERIVATIVE_CUTOFF);
        let derivative =
            derivative_alpha * raw_derivative + (1.0 - derivative_alpha) * state.derivative;

        let cutoff = self.min_cutoff + self.beta * derivative.abs();
        let alpha = smoothing_factor(elapsed, cutoff);
        let value = alpha * raw + (1.0 - alpha) * state.value;
        if !value.is_finite() || !derivative.is_finite() {
            return state.value;
        }

        self.state = Some(ChannelState {
            value,
            derivative,
            timestamp,
        });

        value
    }

    /// Clear all state; the next sample passes through unchanged
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Whether the filter has seen a sample since construction or reset
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }
}
