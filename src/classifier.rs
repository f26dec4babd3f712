//! Gesture classification state machine.
//!
//! Converts the per-frame landmark stream into discrete, single-press game
//! events. Each gesture kind is edge-triggered: it fires once when its
//! predicate transitions from unsatisfied to satisfied and cannot fire again
//! until the body returns to a non-triggering pose. A cooldown clock shared
//! across all kinds rate-limits firings globally.

use crate::calibrator::Calibrator;
use crate::config::GestureConfig;
use crate::constants::{ANGLE_VERTICAL_EPSILON, COMPRESSION_RATIO, CORE_VISIBILITY_MIN, WRIST_VISIBILITY_MIN};
use crate::landmarks::{BodyPart, Landmark, LandmarkSnapshot, PoseFrame};
use crate::smoother::LandmarkSmoother;
use crate::Result;
use log::{debug, warn};
use std::fmt;
use std::time::Instant;

/// The four discrete game actions a body gesture can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Both wrists raised above the shoulder line
    Jump,
    /// One wrist dropped below the hips, or the body bent or crouched
    Slide,
    /// Body leaning left of the calibrated neutral
    Left,
    /// Body leaning right of the calibrated neutral
    Right,
}

impl GestureKind {
    /// Detection precedence, first match wins
    pub const ALL: [GestureKind; 4] = [GestureKind::Jump, GestureKind::Slide, GestureKind::Left, GestureKind::Right];

    fn index(self) -> usize {
        match self {
            GestureKind::Jump => 0,
            GestureKind::Slide => 1,
            GestureKind::Left => 2,
            GestureKind::Right => 3,
        }
    }
}

/// Per-kind edge-trigger state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FireState {
    /// Predicate may fire on its next satisfied frame
    Armed,
    /// Predicate is being held; suppressed until it releases
    Fired,
}

/// Classifier output label, exactly one per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureLabel {
    /// Jump fired this frame
    Jump,
    /// Slide fired this frame
    Slide,
    /// Left fired this frame
    Left,
    /// Right fired this frame
    Right,
    /// No gesture fired
    Idle,
    /// Still collecting neutral-pose samples
    Calibrating,
    /// Landmark extraction or arithmetic failed this frame
    Error,
}

impl GestureLabel {
    /// Display name, matching the on-screen labels
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Jump => "JUMP",
            GestureLabel::Slide => "SLIDE",
            GestureLabel::Left => "LEFT",
            GestureLabel::Right => "RIGHT",
            GestureLabel::Idle => "IDLE",
            GestureLabel::Calibrating => "CALIBRATING",
            GestureLabel::Error => "ERROR",
        }
    }

    /// The gesture kind that fired, if this label represents a firing
    #[must_use]
    pub fn fired_kind(&self) -> Option<GestureKind> {
        match self {
            GestureLabel::Jump => Some(GestureKind::Jump),
            GestureLabel::Slide => Some(GestureKind::Slide),
            GestureLabel::Left => Some(GestureKind::Left),
            GestureLabel::Right => Some(GestureKind::Right),
            _ => None,
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GestureKind> for GestureLabel {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Jump => GestureLabel::Jump,
            GestureKind::Slide => GestureLabel::Slide,
            GestureKind::Left => GestureLabel::Left,
            GestureKind::Right => GestureLabel::Right,
        }
    }
}

/// Firings per gesture kind since the last counter reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureCounters {
    /// Jump firings
    pub jump: u64,
    /// Slide firings
    pub slide: u64,
    /// Left firings
    pub left: u64,
    /// Right firings
    pub right: u64,
}

impl GestureCounters {
    /// Count for one kind
    #[must_use]
    pub fn get(&self, kind: GestureKind) -> u64 {
        match kind {
            GestureKind::Jump => self.jump,
            GestureKind::Slide => self.slide,
            GestureKind::Left => self.left,
            GestureKind::Right => self.right,
        }
    }

    fn increment(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::Jump => self.jump += 1,
            GestureKind::Slide => self.slide += 1,
            GestureKind::Left => self.left += 1,
            GestureKind::Right => self.right += 1,
        }
    }
}

/// Per-frame measurements derived from the raw landmarks
struct FrameGeometry {
    smoothed: LandmarkSnapshot,
    shoulder_hip_distance: f64,
    body_angle: f64,
    raw_left_wrist: Landmark,
    raw_right_wrist: Landmark,
}

/// Edge-triggered, cooldown-gated gesture state machine
pub struct GestureClassifier {
    config: GestureConfig,
    smoother: LandmarkSmoother,
    calibrator: Calibrator,
    states: [FireState; 4],
    last_fire: Option<Instant>,
    counters: GestureCounters,
}

impl GestureClassifier {
    /// Create a classifier with the given thresholds
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            smoother: LandmarkSmoother::default(),
            calibrator: Calibrator::default(),
            states: [FireState::Armed; 4],
            last_fire: None,
            counters: GestureCounters::default(),
        }
    }

    /// Replace the live thresholds; takes effect on the next frame
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Current thresholds
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// True once the neutral reference has been established
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    /// Per-kind firing counts
    #[must_use]
    pub fn counters(&self) -> GestureCounters {
        self.counters
    }

    /// Zero all firing counts
    pub fn reset_counters(&mut self) {
        self.counters = GestureCounters::default();
    }

    /// Discard the neutral reference and smoothing history, forcing a fresh
    /// calibration phase
    pub fn reset_calibration(&mut self) {
        self.calibrator.reset();
        self.smoother.reset();
    }

    /// Classify one frame of raw landmarks.
    ///
    /// Returns exactly one label plus the continuous body-bend angle in
    /// degrees. Any failure inside extraction or arithmetic is contained
    /// here and reported as [`GestureLabel::Error`] with angle 0 so the
    /// surrounding loop can continue with the next frame.
    pub fn classify(&mut self, frame: &PoseFrame, now: Instant) -> (GestureLabel, f64) {
        match self.classify_frame(frame, now) {
            Ok(result) => result,
            Err(e) => {
                warn!("Gesture detection error: {}", e);
                (GestureLabel::Error, 0.0)
            }
        }
    }

    fn classify_frame(&mut self, frame: &PoseFrame, now: Instant) -> Result<(GestureLabel, f64)> {
        let left_wrist = frame.get(BodyPart::LeftWrist)?;
        let right_wrist = frame.get(BodyPart::RightWrist)?;
        let left_shoulder = frame.get(BodyPart::LeftShoulder)?;
        let right_shoulder = frame.get(BodyPart::RightShoulder)?;
        let left_hip = frame.get(BodyPart::LeftHip)?;
        let right_hip = frame.get(BodyPart::RightHip)?;

        // Occlusion of the torso means we can no longer trust any predicate.
        // Re-arm everything so stale Fired flags cannot block detection once
        // the person reappears.
        if left_shoulder.visibility < CORE_VISIBILITY_MIN
            || right_shoulder.visibility < CORE_VISIBILITY_MIN
            || left_hip.visibility < CORE_VISIBILITY_MIN
            || right_hip.visibility < CORE_VISIBILITY_MIN
        {
            debug!("Pose lost, re-arming all gestures");
            self.states = [FireState::Armed; 4];
            return Ok((GestureLabel::Idle, 0.0));
        }

        let geometry = self.measure(left_wrist, right_wrist, left_shoulder, right_shoulder, left_hip, right_hip);

        let Some(neutral) = self.calibrator.reference() else {
            return Ok((GestureLabel::Calibrating, geometry.body_angle));
        };

        for kind in GestureKind::ALL {
            let detected = match kind {
                GestureKind::Jump => self.jump_detected(&geometry),
                GestureKind::Slide => self.slide_detected(&geometry, neutral.shoulder_hip_distance),
                GestureKind::Left => geometry.smoothed.shoulder_center.x < neutral.center_x - self.config.tilt_sensitivity,
                GestureKind::Right => geometry.smoothed.shoulder_center.x > neutral.center_x + self.config.tilt_sensitivity,
            };

            if detected {
                if self.states[kind.index()] == FireState::Armed && self.cooldown_elapsed(now) {
                    self.states[kind.index()] = FireState::Fired;
                    self.last_fire = Some(now);
                    self.counters.increment(kind);
                    debug!("{} fired", GestureLabel::from(kind));
                    // First match wins; later kinds keep their flags as-is
                    return Ok((kind.into(), geometry.body_angle));
                }
            } else {
                // Predicate released, re-arm regardless of cooldown
                self.states[kind.index()] = FireState::Armed;
            }
        }

        Ok((GestureLabel::Idle, geometry.body_angle))
    }

    /// Derive centers, torso distance, and the smoothed snapshot; feed the
    /// calibrator while the neutral reference is still accumulating
    fn measure(
        &mut self,
        left_wrist: Landmark,
        right_wrist: Landmark,
        left_shoulder: Landmark,
        right_shoulder: Landmark,
        left_hip: Landmark,
        right_hip: Landmark,
    ) -> FrameGeometry {
        let shoulder_center_y = (left_shoulder.y + right_shoulder.y) / 2.0;
        let shoulder_center_z = (left_shoulder.z + right_shoulder.z) / 2.0;
        let hip_center_y = (left_hip.y + right_hip.y) / 2.0;
        let hip_center_z = (left_hip.z + right_hip.z) / 2.0;
        let body_center_x = (left_shoulder.x + right_shoulder.x) / 2.0;

        // Torso length in the (y, z) plane
        let shoulder_hip_distance =
            ((shoulder_center_y - hip_center_y).powi(2) + (shoulder_center_z - hip_center_z).powi(2)).sqrt();

        let body_angle = body_bend_angle(shoulder_center_y, hip_center_y, shoulder_center_z, hip_center_z);

        let snapshot = LandmarkSnapshot {
            left_wrist,
            right_wrist,
            shoulder_center: Landmark::new(body_center_x, shoulder_center_y, shoulder_center_z, 1.0),
            hip: Landmark::new(body_center_x, hip_center_y, hip_center_z, 1.0),
        };
        let smoothed = self.smoother.smooth(snapshot);

        // The calibrator sees the smoothed center but the raw per-frame
        // torso distance
        if !self.calibrator.is_calibrated() {
            self.calibrator.observe(smoothed.shoulder_center.x, shoulder_hip_distance);
        }

        FrameGeometry {
            smoothed,
            shoulder_hip_distance,
            body_angle,
            raw_left_wrist: left_wrist,
            raw_right_wrist: right_wrist,
        }
    }

    /// Both wrists above the shoulder line (smaller y is higher on screen),
    /// with both wrists confidently tracked
    fn jump_detected(&self, geometry: &FrameGeometry) -> bool {
        let shoulder_y = geometry.smoothed.shoulder_center.y;
        geometry.smoothed.left_wrist.y < shoulder_y - self.config.jump_threshold
            && geometry.smoothed.right_wrist.y < shoulder_y - self.config.jump_threshold
            && geometry.raw_left_wrist.is_visible(WRIST_VISIBILITY_MIN)
            && geometry.raw_right_wrist.is_visible(WRIST_VISIBILITY_MIN)
    }

    /// Any of: one wrist below the hip line, body bent forward, or torso
    /// compressed relative to the calibrated neutral
    fn slide_detected(&self, geometry: &FrameGeometry, neutral_distance: f64) -> bool {
        let hip_y = geometry.smoothed.hip.y;

        let left_hand_down = geometry.raw_left_wrist.is_visible(WRIST_VISIBILITY_MIN)
            && geometry.smoothed.left_wrist.y > hip_y + self.config.slide_single_hand_threshold;
        let right_hand_down = geometry.raw_right_wrist.is_visible(WRIST_VISIBILITY_MIN)
            && geometry.smoothed.right_wrist.y > hip_y + self.config.slide_single_hand_threshold;

        let body_bent = geometry.body_angle > self.config.slide_body_angle;
        let body_compressed = geometry.shoulder_hip_distance / neutral_distance < COMPRESSION_RATIO;

        left_hand_down || right_hand_down || body_bent || body_compressed
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) => now.duration_since(last).as_secs_f64() >= self.config.cooldown_time,
            None => true,
        }
    }
}

/// Forward-bend angle in degrees from the torso's depth-to-vertical ratio.
/// Degenerate when the shoulders and hips are nearly level vertically.
#[must_use]
pub fn body_bend_angle(shoulder_y: f64, hip_y: f64, shoulder_z: f64, hip_z: f64) -> f64 {
    let vertical_dist = (hip_y - shoulder_y).abs();
    let depth_dist = (hip_z - shoulder_z).abs();

    if vertical_dist > ANGLE_VERTICAL_EPSILON {
        (depth_dist / vertical_dist).atan().to_degrees()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_bend_angle() {
        // 45 degrees: equal depth and vertical separation
        let angle = body_bend_angle(0.3, 0.6, 0.0, 0.3);
        assert!((angle - 45.0).abs() < 1e-9);

        // Upright: no depth separation
        assert_eq!(body_bend_angle(0.3, 0.6, 0.1, 0.1), 0.0);

        // Degenerate vertical separation
        assert_eq!(body_bend_angle(0.5, 0.505, 0.0, 0.9), 0.0);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(GestureLabel::Jump.to_string(), "JUMP");
        assert_eq!(GestureLabel::Calibrating.to_string(), "CALIBRATING");
    }

    #[test]
    fn test_counters() {
        let mut counters = GestureCounters::default();
        counters.increment(GestureKind::Slide);
        counters.increment(GestureKind::Slide);
        counters.increment(GestureKind::Right);
        assert_eq!(counters.get(GestureKind::Slide), 2);
        assert_eq!(counters.get(GestureKind::Right), 1);
        assert_eq!(counters.get(GestureKind::Jump), 0);
    }

    #[test]
    fn test_precedence_order() {
        assert_eq!(
            GestureKind::ALL,
            [GestureKind::Jump, GestureKind::Slide, GestureKind::Left, GestureKind::Right]
        );
    }

    #[test]
    fn test_error_on_missing_landmarks() {
        let mut classifier = GestureClassifier::new(GestureConfig::default());
        let (label, angle) = classifier.classify(&PoseFrame::new(), Instant::now());
        assert_eq!(label, GestureLabel::Error);
        assert_eq!(angle, 0.0);
    }
}
