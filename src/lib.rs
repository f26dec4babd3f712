//! Body-gesture game controller core.
//!
//! This library turns a noisy stream of body-landmark coordinates into
//! debounced, single-press game actions for a runner-style game:
//!
//! 1. A pose source yields named landmarks with visibility confidence
//! 2. A smoother averages a short rolling window to suppress jitter
//! 3. A calibrator freezes a neutral-pose reference from the first frames
//! 4. The gesture classifier evaluates edge-triggered, cooldown-gated
//!    predicates (JUMP / SLIDE / LEFT / RIGHT) and emits at most one
//!    discrete event per frame
//!
//! Camera capture, the landmark model, and OS keystroke injection are
//! external collaborators behind the [`app::PoseSource`] and
//! [`dispatch::ActionDispatcher`] traits.
//!
//! # Examples
//!
//! ```
//! use gesture_control::classifier::{GestureClassifier, GestureLabel};
//! use gesture_control::config::GestureConfig;
//! use gesture_control::landmarks::{BodyPart, Landmark, PoseFrame};
//! use std::time::Instant;
//!
//! let mut classifier = GestureClassifier::new(GestureConfig::default());
//!
//! let mut frame = PoseFrame::new();
//! frame.insert(BodyPart::LeftWrist, Landmark::new(0.40, 0.55, 0.0, 0.9));
//! frame.insert(BodyPart::RightWrist, Landmark::new(0.60, 0.55, 0.0, 0.9));
//! frame.insert(BodyPart::LeftShoulder, Landmark::new(0.45, 0.30, 0.0, 0.95));
//! frame.insert(BodyPart::RightShoulder, Landmark::new(0.55, 0.30, 0.0, 0.95));
//! frame.insert(BodyPart::LeftHip, Landmark::new(0.46, 0.60, 0.0, 0.95));
//! frame.insert(BodyPart::RightHip, Landmark::new(0.54, 0.60, 0.0, 0.95));
//!
//! let (label, _angle) = classifier.classify(&frame, Instant::now());
//! assert_eq!(label, GestureLabel::Calibrating);
//! ```

/// Body landmark types shared across the pipeline
pub mod landmarks;

/// Temporal smoothing of landmark snapshots
pub mod smoother;

/// Neutral-pose calibration
pub mod calibrator;

/// Gesture classification state machine
pub mod classifier;

/// Action mapping and the keystroke dispatch seam
pub mod dispatch;

/// JSONL pose-frame replay source
pub mod replay;

/// Worker loop and shared control surface
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
