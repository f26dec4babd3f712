//! Temporal smoothing of landmark snapshots.
//!
//! Raw landmark positions jitter frame to frame. The smoother keeps a short
//! FIFO window of recent snapshots and returns the per-axis moving average,
//! which stops single-frame noise from tripping the gesture predicates.

use crate::constants::{SMOOTHING_MIN_SAMPLES, SMOOTHING_WINDOW};
use crate::landmarks::{Landmark, LandmarkSnapshot};
use std::collections::VecDeque;

/// Moving-average smoother over landmark snapshots
pub struct LandmarkSmoother {
    window_size: usize,
    min_samples: usize,
    window: VecDeque<LandmarkSnapshot>,
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_WINDOW, SMOOTHING_MIN_SAMPLES)
    }
}

impl LandmarkSmoother {
    /// Create a new smoother
    ///
    /// # Panics
    /// Panics if `window_size` is zero or smaller than `min_samples`.
    #[must_use]
    pub fn new(window_size: usize, min_samples: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        assert!(min_samples <= window_size, "Minimum samples cannot exceed window size");
        Self {
            window_size,
            min_samples,
            window: VecDeque::with_capacity(window_size),
        }
    }

    /// Record a snapshot and return the jitter-reduced estimate.
    ///
    /// With fewer than the minimum number of samples the input is returned
    /// unchanged; averaging over one or two frames would just bias the
    /// earliest readings. Visibility is never averaged, it always reflects
    /// the latest snapshot.
    pub fn smooth(&mut self, snapshot: LandmarkSnapshot) -> LandmarkSnapshot {
        if self.window.len() >= self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(snapshot);

        if self.window.len() < self.min_samples {
            return snapshot;
        }

        LandmarkSnapshot {
            left_wrist: self.averaged(|s| s.left_wrist, snapshot.left_wrist),
            right_wrist: self.averaged(|s| s.right_wrist, snapshot.right_wrist),
            shoulder_center: self.averaged(|s| s.shoulder_center, snapshot.shoulder_center),
            hip: self.averaged(|s| s.hip, snapshot.hip),
        }
    }

    /// Drop all accumulated history
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Number of snapshots currently buffered
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True when no history has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Mean position of one landmark key across the window
    fn averaged(&self, pick: fn(&LandmarkSnapshot) -> Landmark, latest: Landmark) -> Landmark {
        let n = self.window.len() as f64;
        let (sx, sy, sz) = self
            .window
            .iter()
            .map(pick)
            .fold((0.0, 0.0, 0.0), |acc, lm| (acc.0 + lm.x, acc.1 + lm.y, acc.2 + lm.z));

        Landmark {
            x: sx / n,
            y: sy / n,
            z: sz / n,
            visibility: latest.visibility,
        }
    }
}
