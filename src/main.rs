//! Demo driver: runs the stabilization pipeline against a synthetic
//! detector that produces noisy circular head motion, and prints the
//! stabilized pose alongside the raw input.

use anyhow::Result;
use clap::Parser;
use face_anchor::boundary::{FaceDetector, FrameSource, PoseEstimator};
use face_anchor::config::TrackerConfig;
use face_anchor::scheduling::IntervalTicker;
use face_anchor::tracker::FaceTracker;
use face_anchor::types::{EstimateResult, Point3, TrackingUpdate};
use image::RgbImage;
use log::info;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Baseline cutoff frequency in Hz (lower = smoother)
    #[arg(long, default_value = "1.0")]
    min_cutoff: f32,

    /// Speed coefficient (higher = more responsive)
    #[arg(long, default_value = "0.05")]
    beta: f32,

    /// Mirror input frames horizontally
    #[arg(short, long)]
    mirror: bool,

    /// Number of cycles to run before stopping
    #[arg(short, long, default_value = "120")]
    cycles: u64,

    /// Frame cadence in cycles per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Landmark count for the synthetic face
const DEMO_LANDMARKS: usize = 16;

/// Always has a frame ready; content is irrelevant to the synthetic detector.
struct BlankCamera;

impl FrameSource for BlankCamera {
    fn next_frame(&mut self) -> Option<RgbImage> {
        Some(RgbImage::new(64, 64))
    }
}

/// Simulates a face orbiting slowly with per-frame jitter layered on top.
struct SyntheticDetector {
    frame: u64,
}

impl SyntheticDetector {
    fn new() -> Self {
        Self { frame: 0 }
    }

    // Deterministic wobble standing in for sensor noise.
    fn jitter(&self, salt: u64) -> f32 {
        let phase = (self.frame.wrapping_mul(7919).wrapping_add(salt * 104_729)) as f32;
        (phase * 0.173).sin() * 0.004
    }
}

impl FaceDetector for SyntheticDetector {
    async fn detect(&mut self, _frame: &RgbImage) -> face_anchor::Result<Vec<Vec<Point3>>> {
        self.frame += 1;
        let t = self.frame as f32 * 0.02;
        let center = Point3::new(t.cos() * 0.1, t.sin() * 0.08, -0.4);

        let landmarks = (0..DEMO_LANDMARKS as u64)
            .map(|i| {
                let spread = i as f32 * 0.01;
                Point3::new(
                    center.x + spread + self.jitter(i * 3),
                    center.y - spread + self.jitter(i * 3 + 1),
                    center.z + self.jitter(i * 3 + 2),
                )
            })
            .collect();

        Ok(vec![landmarks])
    }
}

/// Passes landmarks through as metric coordinates and derives the pose
/// matrix from their centroid.
struct CentroidEstimator;

impl PoseEstimator for CentroidEstimator {
    fn estimate(&mut self, raw_landmarks: &[Point3]) -> face_anchor::Result<EstimateResult> {
        let n = raw_landmarks.len() as f32;
        let (cx, cy, cz) = raw_landmarks.iter().fold((0.0, 0.0, 0.0), |acc, p| {
            (acc.0 + p.x / n, acc.1 + p.y / n, acc.2 + p.z / n)
        });

        let mut matrix = face_anchor::constants::IDENTITY_MATRIX;
        matrix[3] = cx;
        matrix[7] = cy;
        matrix[11] = cz;

        Ok(EstimateResult {
            metric_landmarks: raw_landmarks.to_vec(),
            face_matrix: Some(matrix),
            face_scale: 1.0,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face anchor stabilization demo");

    let config = if let Some(path) = &args.config {
        info!("Loading configuration from: {path}");
        TrackerConfig::from_file(path)?
    } else {
        TrackerConfig {
            min_cutoff: args.min_cutoff,
            beta: args.beta,
            mirror_input: args.mirror,
            landmark_count: DEMO_LANDMARKS,
            target_fps: args.fps,
        }
    };

    let remaining = Rc::new(Cell::new(args.cycles));
    let sink_remaining = Rc::clone(&remaining);

    let mut tracker = FaceTracker::new(
        config,
        SyntheticDetector::new(),
        CentroidEstimator,
        move |update: &TrackingUpdate| match update.estimate() {
            Some(estimate) => {
                println!(
                    "face: translation=({:+.4}, {:+.4}, {:+.4}) scale={:.3}",
                    estimate.face_matrix[3],
                    estimate.face_matrix[7],
                    estimate.face_matrix[11],
                    estimate.face_scale,
                );
                sink_remaining.set(sink_remaining.get().saturating_sub(1));
            }
            None => println!("no face"),
        },
    )?;

    let handle = tracker.handle();
    let stop_check = Rc::clone(&remaining);

    // Run the loop and a watcher on the same single-threaded task set.
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let watcher = tokio::task::spawn_local(async move {
                while stop_check.get() > 0 {
                    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                }
                handle.stop();
            });

            let mut camera = BlankCamera;
            let mut ticker = IntervalTicker::new(args.fps);
            tracker.run(&mut camera, &mut ticker).await?;
            watcher.await.ok();

            // The stabilized cache stays queryable after the loop stops.
            if tracker.has_face() {
                let anchor = tracker.anchor_transform(0)?;
                info!(
                    "anchor transform for landmark 0: translation=({:+.4}, {:+.4}, {:+.4})",
                    anchor[3], anchor[7], anchor[11]
                );
            }

            Ok::<(), anyhow::Error>(())
        })
        .await?;

    Ok(())
}
