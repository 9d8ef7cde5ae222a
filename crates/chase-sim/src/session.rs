use std::collections::BTreeSet;
use std::time::Duration;

use chase_core::{Cell, Maze, Point};
use chase_hunt::{
    ConfigError, ModeTrigger, Navigation, Pack, PackConfig, Pursued, PursuitMode, Target,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::walker::Walker;

pub const DT: Duration = Duration::from_millis(16);
const WALKER_START: Point = Point::new(10, 13);
const WALKER_SPEED: f32 = 1.25;
/// Hunters speed up by this factor on every level, up to `MAX_SPEED`.
const LEVEL_SPEEDUP: f32 = 1.05;
const MAX_SPEED: f32 = 1.6;

/// One run of the demo: a pack, the walker it chases, and the score.
pub struct Session {
    maze: Maze,
    pack: Pack,
    walker: Walker,
    /// Power pellets not yet eaten this level.
    power: BTreeSet<Point>,
    level: u32,
    lives_lost: u32,
    take_downs: u32,
}

impl Session {
    pub fn new(maze: Maze, config: &PackConfig) -> Result<Self, ConfigError> {
        let pack = Pack::new(config, Navigation::new(maze.clone()))?;
        let rng = SmallRng::seed_from_u64(pack.seed().rotate_left(32));
        let walker = Walker::new(&maze, WALKER_START, WALKER_SPEED, rng);
        Ok(Self {
            power: power_pellets(&maze),
            maze,
            pack,
            walker,
            level: 1,
            lives_lost: 0,
            take_downs: 0,
        })
    }

    /// Run `ticks` frames, logging a summary every `summary_every`.
    pub fn run(&mut self, ticks: u64, summary_every: u64) {
        info!(seed = self.pack.seed(), ticks, "starting pursuit");
        for _ in 0..ticks {
            self.step();
            if self.pack.ticks() % summary_every == 0 {
                self.summary();
            }
        }
        info!(
            ticks = self.pack.ticks(),
            level = self.level,
            lives_lost = self.lives_lost,
            take_downs = self.take_downs,
            "done"
        );
    }

    fn step(&mut self) {
        self.walker.advance(&self.maze);
        let tile = self.walker.tile(&self.maze);
        if self.power.remove(&tile) {
            info!(tick = self.pack.ticks(), %tile, "power pellet eaten");
            self.pack.request(Target::All, ModeTrigger::EnterFrightened);
        }
        self.pack.tick(&self.walker, DT);
        self.collide();
        if self.power.is_empty() {
            self.next_level();
        }
    }

    fn collide(&mut self) {
        let reach = self.maze.half_tile();
        let pos = self.walker.position();
        let touching: Vec<(usize, PursuitMode)> = self
            .pack
            .hunters()
            .iter()
            .enumerate()
            .filter(|(_, h)| h.position().distance(pos) < reach)
            .map(|(i, h)| (i, h.mode()))
            .collect();

        let mut caught = false;
        for (i, mode) in touching {
            match mode {
                PursuitMode::Frightened => {
                    self.take_downs += 1;
                    debug!(hunter = i, "hunter taken down");
                    self.pack.request(Target::Hunter(i), ModeTrigger::TakeDown);
                }
                PursuitMode::Chase => caught = true,
                PursuitMode::ReturningToBase => {}
            }
        }
        if caught {
            self.lives_lost += 1;
            info!(tick = self.pack.ticks(), lives_lost = self.lives_lost, "walker caught");
            self.pack.request(Target::All, ModeTrigger::ResetToSpawn);
            self.walker.reset(&self.maze);
        }
    }

    /// Refill the pellets, rebuild the navigation snapshot and speed the
    /// hunters up.
    fn next_level(&mut self) {
        self.level += 1;
        self.power = power_pellets(&self.maze);
        self.pack.on_maze_changed(Navigation::new(self.maze.clone()));
        self.walker.reset(&self.maze);
        for i in 0..self.pack.hunters().len() {
            if let Some(h) = self.pack.hunter_mut(i) {
                let speed = (h.base_speed() * LEVEL_SPEEDUP).min(MAX_SPEED);
                h.set_base_speed(speed);
            }
        }
        info!(level = self.level, "level up");
    }

    fn summary(&self) {
        let frightened = self.pack.hunters().iter().filter(|h| h.is_frightened()).count();
        info!(
            tick = self.pack.ticks(),
            level = self.level,
            lives_lost = self.lives_lost,
            take_downs = self.take_downs,
            frightened,
            "summary"
        );
        for h in self.pack.hunters() {
            debug!(
                hunter = h.name(),
                strategy = %h.strategy(),
                tile = %h.tile(),
                mode = %h.mode(),
                attempt = ?h.last_attempt(),
                "hunter"
            );
        }
    }
}

fn power_pellets(maze: &Maze) -> BTreeSet<Point> {
    maze.find(&[Cell::POWER.value()]).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Maze {
        Maze::classic(16).unwrap()
    }

    #[test]
    fn walker_starts_on_floor() {
        let maze = classic();
        assert!(maze.is_walkable(WALKER_START));
        assert_eq!(power_pellets(&maze).len(), 2);
    }

    #[test]
    fn session_runs() {
        let mut s = Session::new(classic(), &PackConfig::classic().with_seed(99)).unwrap();
        s.run(2000, 500);
        assert_eq!(s.pack.ticks(), 2000);
        for h in s.pack.hunters() {
            assert!(s.maze.is_walkable(h.tile()));
        }
    }
}
