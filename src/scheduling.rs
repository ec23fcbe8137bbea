//! Frame-cadence scheduling.
//!
//! The tracker defers pacing to the host's display-refresh primitive, which
//! it reaches through [`TickSource`]. [`IntervalTicker`] is the default
//! stand-in for environments without a display link: a fixed-rate tokio
//! timer.

use crate::Result;

/// Display-synchronized scheduling primitive.
///
/// `wait` resolves when the next cycle should begin. An error means the
/// host scheduler failed; the tracker logs it and stops advancing rather
/// than propagating.
pub trait TickSource {
    fn wait(&mut self) -> impl std::future::Future<Output = Result<()>>;
}

/// Fixed-rate tick source backed by a tokio interval.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: tokio::time::Interval,
}

impl IntervalTicker {
    /// Create a ticker firing `fps` times per second.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is zero.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        assert!(fps > 0, "Tick rate must be greater than 0");
        let period = std::time::Duration::from_secs_f64(1.0 / f64::from(fps));
        let mut interval = tokio::time::interval(period);
        // A stalled detector should not cause a burst of catch-up cycles.
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl TickSource for IntervalTicker {
    async fn wait(&mut self) -> Result<()> {
        self.interval.tick().await;
        Ok(())
    }
}
