//! Pursuit AI for hunters in a grid maze.
//!
//! A [`Pack`] owns the shared [`Navigation`] snapshot and every [`Hunter`].
//! Each tick, after the pursued agent has moved, the pack applies queued
//! [`ModeTrigger`]s and then advances the hunters in roster order. A hunter
//! turns its [`Strategy`] goal into a heading at tile centers, degrading
//! through the planner's [`FALLBACK_CHAIN`] when the goal is out of reach.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use chase_core::{Maze, Point};
//! use chase_hunt::{Navigation, Pack, PackConfig, PursuedState};
//!
//! let maze = Maze::parse("#######\n#5....#\n#######", 16)?;
//! let nav = Navigation::new(maze);
//! let mut config = PackConfig::classic();
//! config.hunters.truncate(1);
//! let mut pack = Pack::new(&config, nav)?;
//! let pursued = PursuedState::at_tile(pack.navigation().maze(), Point::new(5, 1), Point::ZERO);
//! pack.tick(&pursued, Duration::from_millis(16));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod events;
pub mod hunter;
pub mod mode;
pub mod nav;
pub mod pack;
pub mod planner;
pub mod pursued;
pub mod strategy;

pub use config::{ConfigError, HunterConfig, PackConfig, Tuning};
pub use events::{ModeTrigger, Target, TriggerQueue};
pub use hunter::Hunter;
pub use mode::PursuitMode;
pub use nav::Navigation;
pub use pack::Pack;
pub use planner::{Attempt, FALLBACK_CHAIN, Plan};
pub use pursued::{Pursued, PursuedState, Sighting};
pub use strategy::{Goal, PursuitContext, Strategy};
