//! The per-frame tracking loop.
//!
//! [`FaceTracker`] owns the whole stabilization state for one tracked face
//! stream: the adaptive filter bank, the stabilized result cache, and the
//! run flag. Each cycle runs detect → estimate → filter → publish in
//! sequence on a single task, so detector calls never overlap and the
//! shared state is only ever touched from one execution path.

use crate::boundary::{
    FaceDetector, FramePreprocessor, FrameSource, GeometryConsumer, HorizontalMirror,
    PoseEstimator, UpdateSink,
};
use crate::config::TrackerConfig;
use crate::filters::FilterBank;
use crate::scheduling::TickSource;
use crate::transform;
use crate::types::{PoseMatrix, ResultCache, StabilizedEstimate, TrackingUpdate};
use crate::{Error, Result};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cooperative stop handle for a running tracker.
///
/// Stopping is cooperative: an in-flight cycle completes its work, but no
/// follow-up cycle is scheduled.
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    active: Arc<AtomicBool>,
}

impl TrackerHandle {
    /// Request the loop to stop at the next cycle boundary
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether the loop is currently running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Stabilizes a per-frame landmark and head-pose stream.
pub struct FaceTracker<D, E> {
    config: TrackerConfig,
    detector: D,
    estimator: E,
    preprocessor: Box<dyn FramePreprocessor>,
    bank: FilterBank,
    cache: ResultCache,
    active: Arc<AtomicBool>,
    epoch: Instant,
    update_sink: Box<dyn UpdateSink>,
    geometry_consumers: Vec<Box<dyn GeometryConsumer>>,
}

impl<D: FaceDetector, E: PoseEstimator> FaceTracker<D, E> {
    /// Create a tracker with the given collaborators and update sink.
    pub fn new(
        config: TrackerConfig,
        detector: D,
        estimator: E,
        update_sink: impl UpdateSink + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let bank = FilterBank::new(config.landmark_count, config.min_cutoff, config.beta);
        Ok(Self {
            config,
            detector,
            estimator,
            preprocessor: Box::new(HorizontalMirror),
            bank,
            cache: ResultCache::new(),
            active: Arc::new(AtomicBool::new(false)),
            epoch: Instant::now(),
            update_sink: Box::new(update_sink),
            geometry_consumers: Vec::new(),
        })
    }

    /// Replace the default frame pre-processor
    pub fn set_preprocessor(&mut self, preprocessor: impl FramePreprocessor + 'static) {
        self.preprocessor = Box::new(preprocessor);
    }

    /// Register a consumer of unfiltered per-frame metric landmarks
    pub fn add_geometry_consumer(&mut self, consumer: impl GeometryConsumer + 'static) {
        self.geometry_consumers.push(Box::new(consumer));
    }

    /// Handle for stopping the loop from outside the running task
    #[must_use]
    pub fn handle(&self) -> TrackerHandle {
        TrackerHandle {
            active: Arc::clone(&self.active),
        }
    }

    /// Whether a stabilized face is currently cached
    #[must_use]
    pub fn has_face(&self) -> bool {
        self.cache.has_face()
    }

    /// The latest stabilized estimate, if any
    #[must_use]
    pub fn latest_estimate(&self) -> Option<&StabilizedEstimate> {
        self.cache.get()
    }

    /// Compose the anchor transform for one stabilized landmark.
    ///
    /// Valid only while a stabilized face is cached; callable any number of
    /// times per published frame.
    pub fn anchor_transform(&self, landmark_index: usize) -> Result<PoseMatrix> {
        let estimate = self.cache.get().ok_or(Error::NoActiveFace)?;
        let offset = estimate.metric_landmarks.get(landmark_index).ok_or(
            Error::LandmarkOutOfRange {
                index: landmark_index,
                count: estimate.metric_landmarks.len(),
            },
        )?;

        Ok(transform::anchor_transform(
            &estimate.face_matrix,
            estimate.face_scale,
            *offset,
        ))
    }

    /// Run detect → estimate → filter → publish cycles until stopped.
    ///
    /// A no-op when the loop is already running, so duplicate concurrent
    /// cycles cannot be started. Returns after [`TrackerHandle::stop`] takes
    /// effect or the tick source fails; collaborator errors never terminate
    /// the loop.
    pub async fn run(
        &mut self,
        frames: &mut impl FrameSource,
        ticker: &mut impl TickSource,
    ) -> Result<()> {
        if self.active.swap(true, Ordering::SeqCst) {
            debug!("Tracker already running, ignoring start request");
            return Ok(());
        }

        info!(
            "Face tracker started ({} landmarks, min_cutoff={}, beta={})",
            self.config.landmark_count, self.config.min_cutoff, self.config.beta
        );

        while self.active.load(Ordering::SeqCst) {
            self.cycle(frames).await;

            if !self.active.load(Ordering::SeqCst) {
                break;
            }
            if let Err(e) = ticker.wait().await {
                error!("Frame scheduling failed, halting loop: {e}");
                break;
            }
        }

        self.active.store(false, Ordering::SeqCst);
        info!("Face tracker stopped");
        Ok(())
    }

    /// One detect → estimate → filter → publish pass.
    ///
    /// Collaborator failures and degenerate frames are contained here; the
    /// cache and filter bank are either updated together or not at all.
    async fn cycle(&mut self, frames: &mut impl FrameSource) {
        let Some(frame) = frames.next_frame() else {
            debug!("No capture frame available, skipping cycle");
            return;
        };
        let frame = self.preprocessor.process(frame, self.config.mirror_input);

        let faces = match self.detector.detect(&frame).await {
            Ok(faces) => faces,
            Err(e) => {
                warn!("Detection failed, skipping cycle: {e}");
                return;
            }
        };

        // Only the first detected face is tracked.
        let Some(raw_landmarks) = faces.into_iter().next() else {
            self.cache.clear();
            self.bank.reset_all();
            self.update_sink.on_update(&TrackingUpdate::NoFace);
            return;
        };

        let estimate = match self.estimator.estimate(&raw_landmarks) {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!("Pose estimation failed, skipping cycle: {e}");
                return;
            }
        };

        // An unsolvable pose is transient: drop the frame without touching
        // the cache or filter state, and keep tracking next cycle.
        let Some(face_matrix) = estimate.face_matrix else {
            debug!("Degenerate pose, dropping frame");
            return;
        };
        if estimate.metric_landmarks.len() != self.bank.landmark_count() {
            warn!(
                "Estimator returned {} landmarks, expected {}; dropping frame",
                estimate.metric_landmarks.len(),
                self.bank.landmark_count()
            );
            return;
        }

        let timestamp = self.epoch.elapsed().as_secs_f64();
        let stabilized = self.bank.filter_estimate(
            timestamp,
            &estimate.metric_landmarks,
            &face_matrix,
            estimate.face_scale,
        );
        self.cache.store(stabilized.clone());

        // Geometry gets the raw per-frame landmarks; smoothing stabilizes
        // displayed pose, not mesh shape.
        for consumer in &mut self.geometry_consumers {
            consumer.update_positions(&estimate.metric_landmarks);
        }

        self.update_sink.on_update(&TrackingUpdate::Face(stabilized));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EstimateResult, Point3};
    use image::RgbImage;

    struct NeverDetector;

    impl FaceDetector for NeverDetector {
        async fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Vec<Point3>>> {
            Ok(Vec::new())
        }
    }

    struct IdentityEstimator;

    impl PoseEstimator for IdentityEstimator {
        fn estimate(&mut self, raw_landmarks: &[Point3]) -> Result<EstimateResult> {
            Ok(EstimateResult {
                metric_landmarks: raw_landmarks.to_vec(),
                face_matrix: Some(crate::constants::IDENTITY_MATRIX),
                face_scale: 1.0,
            })
        }
    }

    fn tracker() -> FaceTracker<NeverDetector, IdentityEstimator> {
        let config = TrackerConfig {
            landmark_count: 4,
            ..TrackerConfig::default()
        };
        FaceTracker::new(config, NeverDetector, IdentityEstimator, |_: &TrackingUpdate| {})
            .unwrap()
    }

    #[test]
    fn test_anchor_transform_requires_cached_face() {
        let tracker = tracker();
        assert!(!tracker.has_face());
        assert!(matches!(
            tracker.anchor_transform(0),
            Err(Error::NoActiveFace)
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TrackerConfig {
            min_cutoff: -1.0,
            ..TrackerConfig::default()
        };
        let result = FaceTracker::new(
            config,
            NeverDetector,
            IdentityEstimator,
            |_: &TrackingUpdate| {},
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_handle_reflects_run_state() {
        let tracker = tracker();
        let handle = tracker.handle();
        assert!(!handle.is_running());
        handle.stop();
        assert!(!handle.is_running());
    }
}
