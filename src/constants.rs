//! Constants used throughout the library

/// Number of canonical metric facial landmarks
pub const CANONICAL_LANDMARK_COUNT: usize = 468;

/// Number of elements in a row-major 4x4 pose matrix
pub const POSE_MATRIX_ELEMENTS: usize = 16;

/// Default baseline cutoff frequency for the adaptive filter (Hz)
pub const DEFAULT_MIN_CUTOFF: f32 = 1.0;

/// Default speed coefficient for the adaptive filter
pub const DEFAULT_BETA: f32 = 0.05;

/// Cutoff frequency used for the nested derivative filter (Hz)
pub const DERIVATIVE_CUTOFF: f32 = 1.0;

/// Default display refresh cadence assumed by the interval tick source
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Row-major 4x4 identity matrix
pub const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];
