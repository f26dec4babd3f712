//! Action dispatch seam.
//!
//! A fired gesture maps to one symbolic arrow-key action, pressed and
//! immediately released. The actual keystroke injection into the OS lives
//! behind [`ActionDispatcher`]; this crate only ships logging and no-op
//! implementations. Dispatch failures never feed back into classification:
//! a gesture still counts as fired even when the key-send fails.

use crate::classifier::GestureKind;
use crate::Result;
use log::info;
use std::fmt;

/// Symbolic key action emitted for a fired gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Arrow up (jump)
    Up,
    /// Arrow down (slide)
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
}

impl Action {
    /// Key name as understood by the downstream key injector
    #[must_use]
    pub fn key_name(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

impl From<GestureKind> for Action {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Jump => Action::Up,
            GestureKind::Slide => Action::Down,
            GestureKind::Left => Action::Left,
            GestureKind::Right => Action::Right,
        }
    }
}

/// Sink for fired actions; one press-then-release per call
pub trait ActionDispatcher: Send {
    /// Send one action to its destination
    fn dispatch(&mut self, action: Action) -> Result<()>;
}

/// Dispatcher that only logs the would-be keystroke
pub struct LogDispatcher;

impl ActionDispatcher for LogDispatcher {
    fn dispatch(&mut self, action: Action) -> Result<()> {
        info!("Pressing key: {}", action);
        Ok(())
    }
}

/// Dispatcher that discards every action
pub struct NullDispatcher;

impl ActionDispatcher for NullDispatcher {
    fn dispatch(&mut self, _action: Action) -> Result<()> {
        Ok(())
    }
}
