//! Constants used throughout the application

/// Default wrist-above-shoulder margin for jump detection
pub const DEFAULT_JUMP_THRESHOLD: f64 = 0.15;

/// Default wrist-below-hip margin for single-hand slide detection
pub const DEFAULT_SLIDE_SINGLE_HAND_THRESHOLD: f64 = 0.12;

/// Default forward-bend angle (degrees) for slide detection
pub const DEFAULT_SLIDE_BODY_ANGLE: f64 = 20.0;

/// Default horizontal shoulder-center offset for lean detection
pub const DEFAULT_TILT_SENSITIVITY: f64 = 0.08;

/// Default minimum interval between any two gesture firings (seconds)
pub const DEFAULT_COOLDOWN_SECS: f64 = 0.5;

/// Smoothing window capacity (frames)
pub const SMOOTHING_WINDOW: usize = 7;

/// Minimum samples before smoothing takes effect
pub const SMOOTHING_MIN_SAMPLES: usize = 3;

/// Calibration samples required to freeze the neutral reference
pub const CALIBRATION_SAMPLES: usize = 30;

/// Visibility below which a core (shoulder/hip) landmark counts as lost
pub const CORE_VISIBILITY_MIN: f64 = 0.3;

/// Visibility a wrist must exceed to participate in a predicate
pub const WRIST_VISIBILITY_MIN: f64 = 0.4;

/// Torso compression ratio below which the body counts as crouched
pub const COMPRESSION_RATIO: f64 = 0.85;

/// Vertical separation below which the body angle is degenerate
pub const ANGLE_VERTICAL_EPSILON: f64 = 0.01;

/// Frame-time samples used for the FPS estimate
pub const FPS_WINDOW: usize = 30;
