//! Body landmark types shared across the detection pipeline.
//!
//! A pose source produces one [`PoseFrame`] per captured frame: a collection
//! of named joints, each with normalized image coordinates and a visibility
//! confidence. The classifier condenses a frame into a four-key
//! [`LandmarkSnapshot`] before smoothing.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single tracked body joint: estimated 3D position plus confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized to the frame width
    pub x: f64,
    /// Vertical position, normalized to the frame height (grows downward)
    pub y: f64,
    /// Depth relative to the body center
    #[serde(default)]
    pub z: f64,
    /// Detection confidence in [0, 1]
    pub visibility: f64,
}

impl Landmark {
    /// Create a new landmark
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// Confidence gate: true when the landmark is confidently located
    #[must_use]
    pub fn is_visible(&self, min_visibility: f64) -> bool {
        self.visibility > min_visibility
    }

    /// Check that all coordinates are finite
    fn validate(&self, part: BodyPart) -> Result<()> {
        if self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.visibility.is_finite() {
            Ok(())
        } else {
            Err(Error::MalformedLandmark(format!("non-finite coordinates for {part}")))
        }
    }
}

/// Anatomical names of the joints the classifier requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    LeftWrist,
    RightWrist,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
}

impl BodyPart {
    /// All joints the classifier extracts from a frame
    pub const REQUIRED: [BodyPart; 6] = [
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftHip,
        BodyPart::RightHip,
    ];

    /// Snake-case name, matching the replay serialization
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::LeftWrist => "left_wrist",
            BodyPart::RightWrist => "right_wrist",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One frame's worth of named landmarks from the pose source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseFrame {
    landmarks: HashMap<BodyPart, Landmark>,
}

impl PoseFrame {
    /// Create an empty frame
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a landmark
    pub fn insert(&mut self, part: BodyPart, landmark: Landmark) {
        self.landmarks.insert(part, landmark);
    }

    /// Fetch a required landmark, validating its coordinates
    pub fn get(&self, part: BodyPart) -> Result<Landmark> {
        let landmark = self
            .landmarks
            .get(&part)
            .copied()
            .ok_or_else(|| Error::MissingLandmark(part.name().to_string()))?;
        landmark.validate(part)?;
        Ok(landmark)
    }

    /// Number of landmarks in the frame
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// True when the frame carries no landmarks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// The four derived keys fed through the smoother each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSnapshot {
    /// Raw left wrist
    pub left_wrist: Landmark,
    /// Raw right wrist
    pub right_wrist: Landmark,
    /// Midpoint of the two shoulders
    pub shoulder_center: Landmark,
    /// Midpoint of the two hips
    pub hip: Landmark,
}
