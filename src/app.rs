//! Worker loop wiring a pose source, the classifier, and an action
//! dispatcher together.
//!
//! One frame is fully processed before the next is pulled, so the classifier
//! state needs no internal locking. The latest result is published into a
//! shared status cell that a presentation path may read at its own cadence;
//! external commands (stop, resets, config updates) are flags observed at
//! the top of each iteration.

use crate::classifier::{GestureClassifier, GestureCounters, GestureLabel};
use crate::config::GestureConfig;
use crate::constants::FPS_WINDOW;
use crate::dispatch::{Action, ActionDispatcher};
use crate::landmarks::PoseFrame;
use crate::Result;
use log::{info, warn};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// One pull from a pose source
#[derive(Debug)]
pub enum PoseSample {
    /// The model located a body in this frame
    Detected(PoseFrame),
    /// A frame was captured but no body was found
    NotDetected,
}

/// Pull-based producer of per-frame pose landmarks.
///
/// Implementations block on frame capture as needed; the worker loop calls
/// this once per iteration. `Ok(None)` signals a finite source (recording,
/// video file) running out of frames.
pub trait PoseSource: Send {
    /// Produce the next captured frame, or `None` once exhausted
    fn next_sample(&mut self) -> Result<Option<PoseSample>>;
}

impl<S: PoseSource + ?Sized> PoseSource for Box<S> {
    fn next_sample(&mut self) -> Result<Option<PoseSample>> {
        (**self).next_sample()
    }
}

/// Latest classifier output, published for display
#[derive(Debug, Clone, Copy)]
pub struct GestureStatus {
    /// Label of the most recent frame
    pub label: GestureLabel,
    /// Body-bend angle in whole degrees
    pub body_angle: i32,
    /// Per-kind firing counts
    pub counters: GestureCounters,
    /// Processing throughput over the recent frame window
    pub fps: f64,
    /// Frames processed since the loop started
    pub frames: u64,
}

impl Default for GestureStatus {
    fn default() -> Self {
        Self {
            label: GestureLabel::Idle,
            body_angle: 0,
            counters: GestureCounters::default(),
            fps: 0.0,
            frames: 0,
        }
    }
}

/// State shared between the worker loop and the control/presentation side
struct SharedState {
    status: Mutex<GestureStatus>,
    config: Mutex<GestureConfig>,
    stop: AtomicBool,
    reset_calibration: AtomicBool,
    reset_counters: AtomicBool,
}

/// Cloneable handle for observing and steering a running [`GestureApp`].
///
/// Reads never block the processing path for longer than one status copy.
#[derive(Clone)]
pub struct ControlHandle {
    shared: Arc<SharedState>,
}

impl ControlHandle {
    /// Snapshot of the latest published status
    #[must_use]
    pub fn status(&self) -> GestureStatus {
        *self.shared.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current thresholds
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        *self.shared.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the live thresholds; picked up on the next frame
    pub fn set_config(&self, config: GestureConfig) {
        *self.shared.config.lock().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Ask the worker loop to stop after the in-flight frame
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
    }

    /// Discard the neutral reference and smoothing history on the next frame
    pub fn reset_calibration(&self) {
        self.shared.reset_calibration.store(true, Ordering::SeqCst);
    }

    /// Zero the gesture counters on the next frame
    pub fn reset_counters(&self) {
        self.shared.reset_counters.store(true, Ordering::SeqCst);
    }
}

/// Sequential gesture-processing worker
pub struct GestureApp<S: PoseSource, D: ActionDispatcher> {
    source: S,
    dispatcher: D,
    classifier: GestureClassifier,
    shared: Arc<SharedState>,
    frame_times: VecDeque<f64>,
    frames: u64,
}

impl<S: PoseSource, D: ActionDispatcher> GestureApp<S, D> {
    /// Create a new worker over a pose source and dispatcher
    pub fn new(source: S, dispatcher: D, config: GestureConfig) -> Self {
        Self {
            source,
            dispatcher,
            classifier: GestureClassifier::new(config),
            shared: Arc::new(SharedState {
                status: Mutex::new(GestureStatus::default()),
                config: Mutex::new(config),
                stop: AtomicBool::new(false),
                reset_calibration: AtomicBool::new(false),
                reset_counters: AtomicBool::new(false),
            }),
            frame_times: VecDeque::with_capacity(FPS_WINDOW),
            frames: 0,
        }
    }

    /// Handle for observing and steering this worker from other threads
    #[must_use]
    pub fn handle(&self) -> ControlHandle {
        ControlHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Run until the source is exhausted or [`ControlHandle::stop`] is called.
    ///
    /// Classification failures are absorbed per frame by the classifier; the
    /// only errors that end the loop come from the pose source itself.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting gesture processing loop");

        loop {
            if self.shared.stop.load(Ordering::SeqCst) {
                info!("Stop requested");
                break;
            }
            self.apply_commands();

            let started = Instant::now();
            let sample = match self.source.next_sample()? {
                Some(sample) => sample,
                None => {
                    info!("Pose source exhausted");
                    break;
                }
            };

            let (label, body_angle) = match sample {
                PoseSample::Detected(frame) => self.classifier.classify(&frame, started),
                // No body in the frame: report idle, leave all state alone
                PoseSample::NotDetected => (GestureLabel::Idle, 0.0),
            };

            if let Some(kind) = label.fired_kind() {
                let action = Action::from(kind);
                // A failed key-send must not undo the firing
                if let Err(e) = self.dispatcher.dispatch(action) {
                    warn!("Failed to dispatch {}: {}", action, e);
                }
            }

            self.frames += 1;
            self.publish_status(label, body_angle, started.elapsed().as_secs_f64());
        }

        info!("Gesture processing loop stopped");
        Ok(())
    }

    /// Observe pending commands and the live config at a frame boundary
    fn apply_commands(&mut self) {
        if self.shared.reset_calibration.swap(false, Ordering::SeqCst) {
            info!("Resetting calibration");
            self.classifier.reset_calibration();
        }
        if self.shared.reset_counters.swap(false, Ordering::SeqCst) {
            info!("Resetting gesture counters");
            self.classifier.reset_counters();
        }
        let config = *self.shared.config.lock().unwrap_or_else(PoisonError::into_inner);
        self.classifier.set_config(config);
    }

    fn publish_status(&mut self, label: GestureLabel, body_angle: f64, frame_time: f64) {
        if self.frame_times.len() >= FPS_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        let mean = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
        let fps = if mean > 0.0 { 1.0 / mean } else { 0.0 };

        *self.shared.status.lock().unwrap_or_else(PoisonError::into_inner) = GestureStatus {
            label,
            body_angle: body_angle.round() as i32,
            counters: self.classifier.counters(),
            fps,
            frames: self.frames,
        };
    }
}
