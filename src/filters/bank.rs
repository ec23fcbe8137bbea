use super::OneEuroFilter;
use crate::constants::POSE_MATRIX_ELEMENTS;
use crate::types::{Point3, PoseMatrix, StabilizedEstimate};

/// One adaptive filter per signal channel: three scalars per landmark, one
/// per pose matrix element, and one for the uniform scale.
///
/// Channels hold their own temporal state, so the bank needs nothing beyond
/// the raw estimate and its timestamp. Resets always cover the whole bank;
/// mixing stale and fresh temporal baselines across channels would smear a
/// tracking gap into a visible snap-then-glide artifact.
#[derive(Debug)]
pub struct FilterBank {
    landmark_channels: Vec<OneEuroFilter>,
    pose_channels: Vec<OneEuroFilter>,
    scale_channel: OneEuroFilter,
    landmark_count: usize,
}

impl FilterBank {
    /// Create a bank covering `landmark_count` landmarks.
    ///
    /// # Panics
    ///
    /// Panics if `landmark_count` is zero or the filter parameters are out
    /// of range.
    #[must_use]
    pub fn new(landmark_count: usize, min_cutoff: f32, beta: f32) -> Self {
        assert!(landmark_count > 0, "Landmark count must be greater than 0");

        let prototype = OneEuroFilter::new(min_cutoff, beta);
        Self {
            landmark_channels: vec![prototype.clone(); landmark_count * 3],
            pose_channels: vec![prototype.clone(); POSE_MATRIX_ELEMENTS],
            scale_channel: prototype,
            landmark_count,
        }
    }

    /// Number of landmarks this bank was sized for
    #[must_use]
    pub fn landmark_count(&self) -> usize {
        self.landmark_count
    }

    /// Filter one raw estimate componentwise.
    ///
    /// # Panics
    ///
    /// Panics if `landmarks` does not match the configured landmark count;
    /// callers are expected to reject mismatched estimates beforehand.
    pub fn filter_estimate(
        &mut self,
        timestamp: f64,
        landmarks: &[Point3],
        matrix: &PoseMatrix,
        scale: f32,
    ) -> StabilizedEstimate {
        assert_eq!(
            landmarks.len(),
            self.landmark_count,
            "Landmark count does not match filter bank size"
        );

        let metric_landmarks = landmarks
            .iter()
            .zip(self.landmark_channels.chunks_exact_mut(3))
            .map(|(point, channels)| Point3 {
                x: channels[0].filter(timestamp, point.x),
                y: channels[1].filter(timestamp, point.y),
                z: channels[2].filter(timestamp, point.z),
            })
            .collect();

        let mut face_matrix = [0.0f32; POSE_MATRIX_ELEMENTS];
        for (out, (raw, channel)) in face_matrix
            .iter_mut()
            .zip(matrix.iter().zip(self.pose_channels.iter_mut()))
        {
            *out = channel.filter(timestamp, *raw);
        }

        StabilizedEstimate {
            metric_landmarks,
            face_matrix,
            face_scale: self.scale_channel.filter(timestamp, scale),
        }
    }

    /// Reset every channel as a group; the next estimate passes through
    /// unchanged, starting a fresh temporal baseline.
    pub fn reset_all(&mut self) {
        for channel in &mut self.landmark_channels {
            channel.reset();
        }
        for channel in &mut self.pose_channels {
            channel.reset();
        }
        self.scale_channel.reset();
    }

    /// Whether any channel has seeded state
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.scale_channel.is_initialized()
            || self.landmark_channels.iter().any(OneEuroFilter::is_initialized)
            || self.pose_channels.iter().any(OneEuroFilter::is_initialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IDENTITY_MATRIX;

    const DT: f64 = 1.0 / 60.0;

    fn landmarks(offset: f32) -> Vec<Point3> {
        (0..4)
            .map(|i| Point3::new(i as f32 + offset, -offset, offset * 2.0))
            .collect()
    }

    #[test]
    fn test_channel_count_invariant() {
        let bank = FilterBank::new(4, 1.0, 0.0);
        assert_eq!(bank.landmark_count(), 4);
        assert_eq!(bank.landmark_channels.len(), 12);
        assert_eq!(bank.pose_channels.len(), 16);
    }

    #[test]
    fn test_first_estimate_passes_through() {
        let mut bank = FilterBank::new(4, 1.0, 0.0);
        let raw = landmarks(0.5);
        let out = bank.filter_estimate(0.0, &raw, &IDENTITY_MATRIX, 2.0);

        assert_eq!(out.metric_landmarks, raw);
        assert_eq!(out.face_matrix, IDENTITY_MATRIX);
        assert_eq!(out.face_scale, 2.0);
        assert!(bank.is_seeded());
    }

    #[test]
    fn test_second_estimate_is_smoothed() {
        let mut bank = FilterBank::new(4, 1.0, 0.0);
        bank.filter_estimate(0.0, &landmarks(0.0), &IDENTITY_MATRIX, 1.0);
        let out = bank.filter_estimate(DT, &landmarks(1.0), &IDENTITY_MATRIX, 3.0);

        // Filtered values land strictly between the two raw samples
        assert!(out.metric_landmarks[0].x > 0.0 && out.metric_landmarks[0].x < 1.0);
        assert!(out.face_scale > 1.0 && out.face_scale < 3.0);
        // Constant matrix channels stay put
        assert_eq!(out.face_matrix, IDENTITY_MATRIX);
    }

    #[test]
    fn test_reset_all_restores_passthrough() {
        let mut bank = FilterBank::new(4, 1.0, 0.0);
        bank.filter_estimate(0.0, &landmarks(0.0), &IDENTITY_MATRIX, 1.0);
        bank.filter_estimate(DT, &landmarks(5.0), &IDENTITY_MATRIX, 2.0);

        bank.reset_all();
        assert!(!bank.is_seeded());

        let raw = landmarks(9.0);
        let out = bank.filter_estimate(1.0, &raw, &IDENTITY_MATRIX, 7.0);
        assert_eq!(out.metric_landmarks, raw);
        assert_eq!(out.face_scale, 7.0);
    }

    #[test]
    #[should_panic(expected = "Landmark count does not match filter bank size")]
    fn test_mismatched_landmark_count_panics() {
        let mut bank = FilterBank::new(8, 1.0, 0.0);
        let _ = bank.filter_estimate(0.0, &landmarks(0.0), &IDENTITY_MATRIX, 1.0);
    }

    #[test]
    #[should_panic(expected = "Landmark count must be greater than 0")]
    fn test_zero_landmark_count_panics() {
        let _ = FilterBank::new(0, 1.0, 0.0);
    }
}
