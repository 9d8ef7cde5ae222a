//! Pursuit modes and the frightened timer.

use std::fmt;
use std::time::Duration;

/// What a hunter is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PursuitMode {
    #[default]
    Chase,
    /// Vulnerable for a limited time. Targeting is unchanged.
    Frightened,
    /// Taken down, heading home at return speed.
    ReturningToBase,
}

impl PursuitMode {
    /// Whether the hunter shows as frightened. True while returning too.
    pub fn is_frightened(self) -> bool {
        !matches!(self, PursuitMode::Chase)
    }
}

impl fmt::Display for PursuitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PursuitMode::Chase => "chase",
            PursuitMode::Frightened => "frightened",
            PursuitMode::ReturningToBase => "returning to base",
        };
        f.write_str(name)
    }
}

/// The mode state machine. Time is the owning hunter's clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ModeState {
    mode: PursuitMode,
    /// Frightened deadline.
    until: Option<Duration>,
}

impl ModeState {
    pub(crate) fn mode(self) -> PursuitMode {
        self.mode
    }

    /// Enter (or extend) Frightened until `now + duration`. Ignored while
    /// returning to base.
    pub(crate) fn frighten(&mut self, now: Duration, duration: Duration) -> bool {
        if self.mode == PursuitMode::ReturningToBase {
            return false;
        }
        self.mode = PursuitMode::Frightened;
        self.until = Some(now.saturating_add(duration));
        true
    }

    /// Frightened → ReturningToBase. Ignored in any other mode.
    pub(crate) fn take_down(&mut self) -> bool {
        if self.mode != PursuitMode::Frightened {
            return false;
        }
        self.mode = PursuitMode::ReturningToBase;
        self.until = None;
        true
    }

    /// Expire Frightened once its deadline has passed.
    pub(crate) fn expire(&mut self, now: Duration) -> bool {
        match (self.mode, self.until) {
            (PursuitMode::Frightened, Some(until)) if now >= until => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    /// Time left in Frightened.
    pub(crate) fn remaining(self, now: Duration) -> Option<Duration> {
        match self.mode {
            PursuitMode::Frightened => self.until.map(|u| u.saturating_sub(now)),
            _ => None,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
