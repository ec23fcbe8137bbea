//! Temporal stabilization of facial landmark and head-pose streams.
//!
//! This library turns the noisy, per-frame output of an external facial
//! landmark detector and pose estimator into a temporally smooth signal
//! suitable for driving a 3D object anchored to a face (e.g. an AR overlay).
//! It provides:
//! - A frequency-adaptive one-euro filter bank over landmark positions, the
//!   head pose matrix, and the face scale
//! - A cooperative frame loop that serializes detection calls and handles
//!   no-face and degenerate-pose frames
//! - Per-landmark anchor-transform composition respecting global head pose
//!
//! The pipeline per cycle: pull frame → detect → estimate → filter →
//! publish. Detection and estimation are reached through boundary traits;
//! this crate never touches a camera or a model directly.
//!
//! # Examples
//!
//! ```no_run
//! use face_anchor::boundary::{FaceDetector, FrameSource, PoseEstimator};
//! use face_anchor::config::TrackerConfig;
//! use face_anchor::scheduling::IntervalTicker;
//! use face_anchor::tracker::FaceTracker;
//! use face_anchor::types::TrackingUpdate;
//!
//! # async fn run(
//! #     detector: impl FaceDetector,
//! #     estimator: impl PoseEstimator,
//! #     mut camera: impl FrameSource,
//! # ) -> face_anchor::Result<()> {
//! let config = TrackerConfig {
//!     min_cutoff: 1.0,
//!     beta: 0.05,
//!     mirror_input: true,
//!     ..TrackerConfig::default()
//! };
//!
//! let mut tracker = FaceTracker::new(config, detector, estimator, |update: &TrackingUpdate| {
//!     if let Some(estimate) = update.estimate() {
//!         // Hand the stabilized pose to the renderer
//!         let _ = estimate.face_matrix;
//!     }
//! })?;
//!
//! // Stop the loop from elsewhere via the handle
//! let handle = tracker.handle();
//!
//! let mut ticker = IntervalTicker::new(60);
//! tracker.run(&mut camera, &mut ticker).await?;
//!
//! // While a face is cached, anchor transforms are available per landmark
//! if tracker.has_face() {
//!     let nose_anchor = tracker.anchor_transform(4)?;
//! }
//! # drop(handle);
//! # Ok(())
//! # }
//! ```

/// Boundary traits for external collaborators (detector, estimator, sinks)
pub mod boundary;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Error types and result handling
pub mod error;

/// Adaptive filtering primitives and the per-channel filter bank
pub mod filters;

/// Frame-cadence scheduling primitives
pub mod scheduling;

/// The per-frame tracking loop and stop handle
pub mod tracker;

/// Anchor transform composition
pub mod transform;

/// Core data model: landmarks, matrices, estimates, tracking updates
pub mod types;

pub use error::{Error, Result};
