//! Helper builders and test doubles shared by the integration tests

use gesture_control::classifier::{GestureClassifier, GestureLabel};
use gesture_control::constants::{CALIBRATION_SAMPLES, CORE_VISIBILITY_MIN};
use gesture_control::dispatch::{Action, ActionDispatcher};
use gesture_control::landmarks::{BodyPart, Landmark, PoseFrame};
use gesture_control::{Error, Result};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Neutral body-center used by all builders
pub const CENTER_X: f64 = 0.50;

/// Shoulder line of the standing pose
pub const SHOULDER_Y: f64 = 0.30;

/// Hip line of the standing pose (torso length 0.30)
pub const HIP_Y: f64 = 0.60;

/// Frame step used when advancing the synthetic clock (~30 fps)
pub const FRAME_STEP: Duration = Duration::from_millis(33);

fn body_frame(center_x: f64, wrist_y: f64, hip_y: f64, hip_z: f64, core_visibility: f64) -> PoseFrame {
    let mut frame = PoseFrame::new();
    frame.insert(BodyPart::LeftWrist, Landmark::new(center_x - 0.10, wrist_y, 0.0, 0.9));
    frame.insert(BodyPart::RightWrist, Landmark::new(center_x + 0.10, wrist_y, 0.0, 0.9));
    frame.insert(
        BodyPart::LeftShoulder,
        Landmark::new(center_x - 0.05, SHOULDER_Y, 0.0, core_visibility),
    );
    frame.insert(
        BodyPart::RightShoulder,
        Landmark::new(center_x + 0.05, SHOULDER_Y, 0.0, core_visibility),
    );
    frame.insert(BodyPart::LeftHip, Landmark::new(center_x - 0.04, hip_y, hip_z, core_visibility));
    frame.insert(BodyPart::RightHip, Landmark::new(center_x + 0.04, hip_y, hip_z, core_visibility));
    frame
}

/// Person standing upright at `center_x`, no gesture in progress
pub fn neutral_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.55, HIP_Y, 0.0, 0.95)
}

/// Both wrists raised well above the shoulder line
pub fn jump_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.05, HIP_Y, 0.0, 0.95)
}

/// Both wrists dropped well below the hip line
pub fn hands_down_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.85, HIP_Y, 0.0, 0.95)
}

/// Torso compressed: shoulder-hip distance 0.20 vs the neutral 0.30
pub fn crouch_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.45, 0.50, 0.0, 0.95)
}

/// Hips pushed back in depth, bending the body ~27 degrees forward
pub fn bent_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.55, HIP_Y, 0.15, 0.95)
}

/// Torso landmarks present but below the visibility cutoff
pub fn occluded_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.55, HIP_Y, 0.0, 0.1)
}

/// Bent pose with the torso visibility sitting exactly on the cutoff
pub fn barely_visible_bent_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.55, HIP_Y, 0.15, CORE_VISIBILITY_MIN)
}

/// Wrists up and torso bent at the same time
pub fn jump_and_slide_frame(center_x: f64) -> PoseFrame {
    body_frame(center_x, 0.05, HIP_Y, 0.15, 0.95)
}

/// Drive the classifier through a full calibration phase at `CENTER_X`.
///
/// Asserts the CALIBRATING label on every accumulating frame and returns the
/// clock position after the quota-completing frame (which already classifies
/// normally).
pub fn calibrate(classifier: &mut GestureClassifier, start: Instant) -> Instant {
    let mut now = start;
    let mut frames = 0;
    while !classifier.is_calibrated() {
        let (label, _) = classifier.classify(&neutral_frame(CENTER_X), now);
        now += FRAME_STEP;
        frames += 1;
        assert!(frames <= CALIBRATION_SAMPLES, "calibration did not complete within the quota");
        if !classifier.is_calibrated() {
            assert_eq!(label, GestureLabel::Calibrating, "frame {frames}");
        } else {
            assert_eq!(label, GestureLabel::Idle);
        }
    }
    now
}

/// Feed the same frame repeatedly until a gesture fires.
///
/// Returns the label that fired and the clock position after the firing
/// frame. Panics if nothing fires within `max_frames` (smoothing needs a few
/// frames to catch up with a new pose).
pub fn drive_until_fired(
    classifier: &mut GestureClassifier,
    frame: &PoseFrame,
    start: Instant,
    max_frames: usize,
) -> (GestureLabel, Instant) {
    let mut now = start;
    for _ in 0..max_frames {
        let (label, _) = classifier.classify(frame, now);
        now += FRAME_STEP;
        if label.fired_kind().is_some() {
            return (label, now);
        }
        assert_eq!(label, GestureLabel::Idle);
    }
    panic!("no gesture fired within {max_frames} frames");
}

/// Feed the same frame repeatedly, asserting IDLE every time
pub fn drive_idle(classifier: &mut GestureClassifier, frame: &PoseFrame, start: Instant, frames: usize) -> Instant {
    let mut now = start;
    for i in 0..frames {
        let (label, _) = classifier.classify(frame, now);
        assert_eq!(label, GestureLabel::Idle, "frame {}", i + 1);
        now += FRAME_STEP;
    }
    now
}

/// Dispatcher that records every action it receives
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, action: Action) -> Result<()> {
        self.actions.lock().unwrap().push(action);
        Ok(())
    }
}

/// Dispatcher that fails every send
pub struct FailingDispatcher;

impl ActionDispatcher for FailingDispatcher {
    fn dispatch(&mut self, action: Action) -> Result<()> {
        Err(Error::Dispatch(format!("refusing to send {action}")))
    }
}
