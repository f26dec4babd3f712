//! Configuration management for the gesture controller

use crate::constants::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_JUMP_THRESHOLD, DEFAULT_SLIDE_BODY_ANGLE, DEFAULT_SLIDE_SINGLE_HAND_THRESHOLD,
    DEFAULT_TILT_SENSITIVITY,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Live-tunable detection thresholds.
///
/// All values are plain floats adjusted by a human operator at runtime; the
/// worker re-reads them once per frame, so updates take effect on the next
/// frame without any further synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// How far (normalized units) both wrists must rise above the shoulder
    /// line to count as a jump
    pub jump_threshold: f64,

    /// How far a single wrist must drop below the hip line to count as a
    /// slide
    pub slide_single_hand_threshold: f64,

    /// Forward-bend angle in degrees that counts as a slide
    pub slide_body_angle: f64,

    /// Horizontal shoulder-center offset from neutral that counts as a lean
    pub tilt_sensitivity: f64,

    /// Minimum seconds between any two gesture firings
    pub cooldown_time: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            slide_single_hand_threshold: DEFAULT_SLIDE_SINGLE_HAND_THRESHOLD,
            slide_body_angle: DEFAULT_SLIDE_BODY_ANGLE,
            tilt_sensitivity: DEFAULT_TILT_SENSITIVITY,
            cooldown_time: DEFAULT_COOLDOWN_SECS,
        }
    }
}

impl GestureConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration against the supported tuning ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.05..=0.30).contains(&self.jump_threshold) {
            return Err(Error::ConfigError(
                "Jump threshold must be between 0.05 and 0.30".to_string(),
            ));
        }
        if !(0.05..=0.25).contains(&self.slide_single_hand_threshold) {
            return Err(Error::ConfigError(
                "Single-hand slide threshold must be between 0.05 and 0.25".to_string(),
            ));
        }
        if !(10.0..=45.0).contains(&self.slide_body_angle) {
            return Err(Error::ConfigError(
                "Slide body angle must be between 10 and 45 degrees".to_string(),
            ));
        }
        if !(0.03..=0.15).contains(&self.tilt_sensitivity) {
            return Err(Error::ConfigError(
                "Tilt sensitivity must be between 0.03 and 0.15".to_string(),
            ));
        }
        if !(0.3..=1.0).contains(&self.cooldown_time) {
            return Err(Error::ConfigError(
                "Cooldown must be between 0.3 and 1.0 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Controller Configuration

# Normalized distance both wrists must rise above the shoulders for JUMP
jump_threshold: 0.15

# Normalized distance one wrist must drop below the hips for SLIDE
slide_single_hand_threshold: 0.12

# Forward-bend angle (degrees) that also triggers SLIDE
slide_body_angle: 20.0

# Shoulder-center offset from the calibrated neutral for LEFT/RIGHT
tilt_sensitivity: 0.08

# Minimum seconds between any two firings
cooldown_time: 0.5
"#;
