//! Boundary traits for the external collaborators of the tracking pipeline:
//! frame capture, landmark detection, pose estimation, frame pre-processing,
//! and the downstream update/geometry consumers.
//!
//! Detection is the only suspending operation; everything else is synchronous
//! from the tracker's perspective.

use crate::types::{EstimateResult, Point3, TrackingUpdate};
use crate::Result;
use image::RgbImage;

/// Supplies the current capture frame once per cycle.
///
/// Returning `None` (a dropped or not-yet-ready frame) skips the cycle; the
/// loop simply tries again on the next tick.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<RgbImage>;
}

/// External landmark detector.
///
/// Returns zero or more detected faces, each as a full set of raw landmark
/// coordinates. May suspend; the tracker never overlaps two calls.
pub trait FaceDetector {
    fn detect(
        &mut self,
        frame: &RgbImage,
    ) -> impl std::future::Future<Output = Result<Vec<Vec<Point3>>>>;
}

/// External geometric pose estimator: raw landmarks in, metric landmarks
/// plus pose-matrix-or-absent plus scale out.
pub trait PoseEstimator {
    fn estimate(&mut self, raw_landmarks: &[Point3]) -> Result<EstimateResult>;
}

/// Optional frame pre-processing applied before detection.
pub trait FramePreprocessor {
    fn process(&mut self, frame: RgbImage, mirror: bool) -> RgbImage;
}

/// Default pre-processor: horizontal flip when mirroring is requested,
/// passthrough otherwise. Matches the canonical facing convention for
/// front-facing capture sources.
#[derive(Debug, Default)]
pub struct HorizontalMirror;

impl FramePreprocessor for HorizontalMirror {
    fn process(&mut self, mut frame: RgbImage, mirror: bool) -> RgbImage {
        if mirror {
            image::imageops::flip_horizontal_in_place(&mut frame);
        }
        frame
    }
}

/// Callback contract for per-cycle publication to the renderer.
pub trait UpdateSink {
    fn on_update(&mut self, update: &TrackingUpdate);
}

impl<F: FnMut(&TrackingUpdate)> UpdateSink for F {
    fn on_update(&mut self, update: &TrackingUpdate) {
        self(update);
    }
}

/// Consumer of unfiltered per-frame metric landmarks, e.g. a face mesh
/// builder. Smoothing is for stabilizing displayed pose, not mesh shape, so
/// these always receive the raw estimator output.
pub trait GeometryConsumer {
    fn update_positions(&mut self, metric_landmarks: &[Point3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_horizontal_mirror_flips_when_requested() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([255, 0, 0]));
        frame.put_pixel(1, 0, Rgb([0, 255, 0]));

        let mut preprocessor = HorizontalMirror;
        let flipped = preprocessor.process(frame.clone(), true);
        assert_eq!(flipped.get_pixel(0, 0), &Rgb([0, 255, 0]));
        assert_eq!(flipped.get_pixel(1, 0), &Rgb([255, 0, 0]));

        let untouched = preprocessor.process(frame.clone(), false);
        assert_eq!(untouched.get_pixel(0, 0), frame.get_pixel(0, 0));
    }

    #[test]
    fn test_closures_are_update_sinks() {
        let mut count = 0;
        {
            let mut sink = |_update: &TrackingUpdate| count += 1;
            sink.on_update(&TrackingUpdate::NoFace);
            sink.on_update(&TrackingUpdate::NoFace);
        }
        assert_eq!(count, 2);
    }
}
