//! Neutral-pose calibration.
//!
//! The lean and crouch predicates need a per-person zero reference: where the
//! body center sits when standing still, and how tall the torso reads from
//! the camera. The calibrator averages the first batch of frames into that
//! reference and then freezes it until an explicit reset.

use crate::constants::CALIBRATION_SAMPLES;

/// Frozen neutral-pose reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralReference {
    /// Baseline horizontal body-center position
    pub center_x: f64,
    /// Baseline shoulder-to-hip distance in the (y, z) plane
    pub shoulder_hip_distance: f64,
}

/// Accumulates neutral-pose samples and freezes their mean
pub struct Calibrator {
    required_samples: usize,
    samples: Vec<(f64, f64)>,
    reference: Option<NeutralReference>,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(CALIBRATION_SAMPLES)
    }
}

impl Calibrator {
    /// Create a calibrator that freezes after `required_samples` observations
    ///
    /// # Panics
    /// Panics if `required_samples` is zero.
    #[must_use]
    pub fn new(required_samples: usize) -> Self {
        assert!(required_samples > 0, "Sample count must be greater than 0");
        Self {
            required_samples,
            samples: Vec::with_capacity(required_samples),
            reference: None,
        }
    }

    /// Record one neutral-pose observation.
    ///
    /// Once calibrated this is a no-op; the reference never drifts with
    /// later frames. The transition happens exactly on the observation that
    /// completes the sample quota.
    pub fn observe(&mut self, center_x: f64, shoulder_hip_distance: f64) {
        if self.reference.is_some() {
            return;
        }

        self.samples.push((center_x, shoulder_hip_distance));
        if self.samples.len() >= self.required_samples {
            let n = self.samples.len() as f64;
            let (sum_x, sum_d) = self
                .samples
                .iter()
                .fold((0.0, 0.0), |acc, &(x, d)| (acc.0 + x, acc.1 + d));
            self.reference = Some(NeutralReference {
                center_x: sum_x / n,
                shoulder_hip_distance: sum_d / n,
            });
            self.samples.clear();
        }
    }

    /// True once the neutral reference has been frozen
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.reference.is_some()
    }

    /// The frozen reference, if calibration has completed
    #[must_use]
    pub fn reference(&self) -> Option<NeutralReference> {
        self.reference
    }

    /// Samples accumulated so far in the current calibration round
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Clear the reference and restart accumulation
    pub fn reset(&mut self) {
        self.reference = None;
        self.samples.clear();
    }
}
