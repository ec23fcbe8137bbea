//! Anchor transform composition.
//!
//! Builds the per-landmark 4x4 matrix that places an external object at a
//! stabilized landmark while orienting and scaling it with the head:
//! `head pose ∘ translate(offset) ∘ scale(s)` collapsed into one matrix.

use crate::types::{Point3, PoseMatrix};

/// Compose an anchor transform from a stabilized pose matrix, scale factor,
/// and landmark offset.
///
/// The offset is rotated into head-pose space and added to the existing
/// translation column; the rotation basis entries are then scaled uniformly.
/// Pure and side-effect-free.
#[must_use]
pub fn anchor_transform(face_matrix: &PoseMatrix, scale: f32, offset: Point3) -> PoseMatrix {
    let mut out = *face_matrix;

    // Translation first: it reads the unscaled basis rows.
    for row in 0..3 {
        let base = row * 4;
        out[base + 3] = face_matrix[base] * offset.x
            + face_matrix[base + 1] * offset.y
            + face_matrix[base + 2] * offset.z
            + face_matrix[base + 3];
    }

    for row in 0..4 {
        let base = row * 4;
        out[base] *= scale;
        out[base + 1] *= scale;
        out[base + 2] *= scale;
    }

    out
}
