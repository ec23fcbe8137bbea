//! Core data model: landmarks, pose matrices, estimate results, and the
//! stabilized result cache.

/// A single 3D facial landmark in metric (real-world-scale) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Row-major 4x4 transform expressing head orientation and position.
///
/// Replaced wholesale on every update; never mutated in place by consumers.
pub type PoseMatrix = [f32; 16];

/// Raw per-frame output of the external pose estimator.
///
/// `face_matrix` is `None` when the solver could not produce a usable pose
/// for this frame (a degenerate detection, treated as transient).
#[derive(Debug, Clone)]
pub struct EstimateResult {
    /// Metric landmarks, one per canonical landmark index
    pub metric_landmarks: Vec<Point3>,
    /// Head pose matrix, absent on a degenerate frame
    pub face_matrix: Option<PoseMatrix>,
    /// Uniform scale factor paired with the pose matrix
    pub face_scale: f32,
}

/// A fully filtered estimate: landmarks, pose matrix, and scale.
///
/// Unlike [`EstimateResult`] the matrix is unconditionally present, so a
/// cached value is always consistent across all three fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizedEstimate {
    /// Filtered metric landmarks
    pub metric_landmarks: Vec<Point3>,
    /// Filtered head pose matrix
    pub face_matrix: PoseMatrix,
    /// Filtered uniform scale factor
    pub face_scale: f32,
}

/// Per-cycle notification published to the registered update sink.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingUpdate {
    /// A face was detected and stabilized this cycle
    Face(StabilizedEstimate),
    /// No face was detected this cycle; filter state has been reset
    NoFace,
}

impl TrackingUpdate {
    /// Whether a face was present this cycle
    #[must_use]
    pub fn has_face(&self) -> bool {
        matches!(self, Self::Face(_))
    }

    /// The stabilized estimate, if a face was present
    #[must_use]
    pub fn estimate(&self) -> Option<&StabilizedEstimate> {
        match self {
            Self::Face(estimate) => Some(estimate),
            Self::NoFace => None,
        }
    }
}

/// Holds the most recent stabilized estimate, or nothing when no face has
/// been stabilized since the last tracking gap.
#[derive(Debug, Default)]
pub struct ResultCache {
    current: Option<StabilizedEstimate>,
}

impl ResultCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached estimate
    pub fn store(&mut self, estimate: StabilizedEstimate) {
        self.current = Some(estimate);
    }

    /// Drop the cached estimate; the next stabilized frame starts fresh
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The cached estimate, if any
    #[must_use]
    pub fn get(&self) -> Option<&StabilizedEstimate> {
        self.current.as_ref()
    }

    /// Whether a stabilized face is currently cached
    #[must_use]
    pub fn has_face(&self) -> bool {
        self.current.is_some()
    }
}
