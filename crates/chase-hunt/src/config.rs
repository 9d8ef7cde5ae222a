//! Hunter and pack configuration.
//!
//! The numeric defaults are policy constants carried over from the classic
//! game. They are kept at their literal values and exposed here so callers
//! can tune them.

use std::fmt;
use std::time::Duration;

use chase_core::{Maze, Point};

use crate::strategy::Strategy;

/// Errors reported by [`PackConfig::validate`] and [`Tuning::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The roster has no hunters.
    EmptyRoster,
    /// A hunter's normal speed is zero, negative or not finite.
    InvalidSpeed { hunter: usize, speed: f32 },
    /// A hunter's return speed is zero, negative or not finite.
    InvalidReturnSpeed { hunter: usize, speed: f32 },
    /// A partner index does not name another hunter of the roster.
    InvalidPartner { hunter: usize, partner: usize },
    /// `frightened_min` exceeds `frightened_max`.
    InvertedFrightenedRange { min: Duration, max: Duration },
    /// The retreat radius is negative or not finite.
    InvalidRetreatRadius(f64),
    /// The tile-center tolerance is negative or not finite.
    InvalidCenterTolerance(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoster => write!(f, "config: no hunters configured"),
            Self::InvalidSpeed { hunter, speed } => {
                write!(f, "config: hunter {hunter} has invalid speed {speed}")
            }
            Self::InvalidReturnSpeed { hunter, speed } => {
                write!(f, "config: hunter {hunter} has invalid return speed {speed}")
            }
            Self::InvalidPartner { hunter, partner } => {
                write!(f, "config: hunter {hunter} has invalid partner {partner}")
            }
            Self::InvertedFrightenedRange { min, max } => write!(
                f,
                "config: frightened range {}ms..{}ms is inverted",
                min.as_millis(),
                max.as_millis()
            ),
            Self::InvalidRetreatRadius(r) => write!(f, "config: invalid retreat radius {r}"),
            Self::InvalidCenterTolerance(t) => {
                write!(f, "config: invalid center tolerance {t}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Timing and distance knobs shared by every hunter of a pack.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    /// Conditional retreat triggers at or under this tile distance.
    pub retreat_radius: f64,
    pub frightened_min: Duration,
    pub frightened_max: Duration,
    /// Quiet period after a tunnel wrap.
    pub wrap_cooldown: Duration,
    /// Without movement for this long, a hunter forces a greedy step.
    pub idle_window: Duration,
    /// Distance in pixels, per axis, within which a hunter counts as
    /// centered on its tile.
    pub center_tolerance: f32,
    /// Retreat corner. `None` means `(1, height - 2)`.
    pub home_corner: Option<Point>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            retreat_radius: 6.0,
            frightened_min: Duration::from_secs(5),
            frightened_max: Duration::from_secs(8),
            wrap_cooldown: Duration::from_millis(60),
            idle_window: Duration::from_millis(300),
            center_tolerance: 1.0,
            home_corner: None,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frightened_min > self.frightened_max {
            return Err(ConfigError::InvertedFrightenedRange {
                min: self.frightened_min,
                max: self.frightened_max,
            });
        }
        if !self.retreat_radius.is_finite() || self.retreat_radius < 0.0 {
            return Err(ConfigError::InvalidRetreatRadius(self.retreat_radius));
        }
        if !self.center_tolerance.is_finite() || self.center_tolerance < 0.0 {
            return Err(ConfigError::InvalidCenterTolerance(self.center_tolerance));
        }
        Ok(())
    }

    /// The retreat corner for `maze`, inside its bounds.
    pub fn home_corner_for(&self, maze: &Maze) -> Point {
        self.home_corner
            .unwrap_or_else(|| Point::new(1, maze.height() - 2))
            .clamp(maze.bounds())
    }
}

/// Per-hunter settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HunterConfig {
    pub name: String,
    pub strategy: Strategy,
    /// Cell values marking this hunter's possible spawn tiles.
    pub spawn_markers: Vec<i32>,
    /// Normal speed in pixels per tick.
    pub speed: f32,
    /// Speed while returning to base.
    pub return_speed: f32,
    /// Roster index of the partner used by [`Strategy::Flank`].
    pub partner: Option<usize>,
}

impl HunterConfig {
    /// A hunter with default speeds and no partner.
    pub fn new(name: impl Into<String>, strategy: Strategy, spawn_marker: i32) -> Self {
        Self {
            name: name.into(),
            strategy,
            spawn_markers: vec![spawn_marker],
            speed: 1.1,
            return_speed: 5.0,
            partner: None,
        }
    }

    /// Set the partner hunter.
    pub fn with_partner(mut self, partner: usize) -> Self {
        self.partner = Some(partner);
        self
    }

    /// The classic four-hunter roster, spawning on markers 5 to 8.
    pub fn classic() -> Vec<Self> {
        vec![
            Self::new("red", Strategy::Aggressive, 5),
            Self::new("blue", Strategy::Flank, 6).with_partner(0),
            Self::new("orange", Strategy::ConditionalRetreat, 7),
            Self::new("pink", Strategy::Ambush, 8),
        ]
    }
}

/// A whole pack: its hunters, shared tuning and random seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackConfig {
    pub hunters: Vec<HunterConfig>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tuning: Tuning,
    /// Seed for spawn choice and frightened durations. `None` draws one
    /// from the OS.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl PackConfig {
    /// The classic roster with default tuning.
    pub fn classic() -> Self {
        Self {
            hunters: HunterConfig::classic(),
            tuning: Tuning::default(),
            seed: None,
        }
    }

    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hunters.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (i, h) in self.hunters.iter().enumerate() {
            if !h.speed.is_finite() || h.speed <= 0.0 {
                return Err(ConfigError::InvalidSpeed {
                    hunter: i,
                    speed: h.speed,
                });
            }
            if !h.return_speed.is_finite() || h.return_speed <= 0.0 {
                return Err(ConfigError::InvalidReturnSpeed {
                    hunter: i,
                    speed: h.return_speed,
                });
            }
            if let Some(p) = h.partner {
                if p == i || p >= self.hunters.len() {
                    return Err(ConfigError::InvalidPartner {
                        hunter: i,
                        partner: p,
                    });
                }
            }
        }
        self.tuning.validate()
    }
}
