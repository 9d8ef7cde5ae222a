//! A single hunter.
//!
//! Hunters move continuously in pixel space but only make decisions on tile
//! centers, and only replan at graph nodes (or when the way ahead turns out
//! to be blocked). Every tick runs the same fixed sequence:
//!
//! 1. replan at once if the pursued agent changed tile while this hunter
//!    chases from a node tile;
//! 2. a stopped hunter off a tile center heads for the nearest node;
//! 3. on a tile center: snap, remember the tile as safe, and replan at nodes;
//! 4. advance, stopping exactly on the next tile center, or replan through
//!    the fallback chain when a wall is ahead;
//! 5. wrap through the tunnel;
//! 6. force a greedy step when idle too long;
//! 7. undo any move that ended inside a wall;
//! 8. run the mode timers.

use std::time::Duration;

use chase_core::{Maze, PixelPoint, Point};
use chase_paths::{NavGraph, SearchRange};
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::config::{HunterConfig, Tuning};
use crate::mode::{ModeState, PursuitMode};
use crate::nav::Navigation;
use crate::planner::{self, Attempt, Query};
use crate::pursued::Sighting;
use crate::strategy::{Goal, PursuitContext, Strategy};

/// An autonomous agent chasing the pursued one through the maze.
#[derive(Debug, Clone)]
pub struct Hunter {
    name: String,
    strategy: Strategy,
    partner: Option<usize>,
    spawn_markers: Vec<i32>,
    tuning: Tuning,

    nav: Navigation,
    /// `nav`'s graph with the spawn tile added, used while returning.
    return_graph: NavGraph,
    search: SearchRange,
    rng: SmallRng,

    spawn: Point,
    pos: PixelPoint,
    heading: Point,
    base_speed: f32,
    return_speed: f32,
    speed: f32,
    mode: ModeState,

    /// Next node of the current route.
    target_node: Option<Point>,
    route: Vec<Point>,
    last_attempt: Option<Attempt>,
    last_safe: Point,
    last_pursued_tile: Option<Point>,
    /// Nearest node of the home corner, resolved on first retreat.
    home_node: Option<Point>,

    clock: Duration,
    wrap_ready_at: Duration,
    last_move_at: Duration,
}

impl Hunter {
    /// Create a hunter standing on the center of one of its spawn tiles.
    ///
    /// The spawn tile is drawn with `rng` among the walkable tiles carrying
    /// one of the configured markers; without any, the grid center is used.
    pub fn new(config: &HunterConfig, tuning: &Tuning, nav: &Navigation, mut rng: SmallRng) -> Self {
        let maze = nav.maze();
        let spawn = pick_spawn(maze, &config.spawn_markers, &mut rng, &config.name);
        log::debug!("{}: {} hunter spawns at {}", config.name, config.strategy, spawn);
        Self {
            name: config.name.clone(),
            strategy: config.strategy,
            partner: config.partner,
            spawn_markers: config.spawn_markers.clone(),
            tuning: tuning.clone(),
            nav: nav.clone(),
            return_graph: nav.graph().with_waypoint(maze, spawn),
            search: SearchRange::new(maze.bounds()),
            rng,
            spawn,
            pos: maze.tile_center(spawn),
            heading: Point::ZERO,
            base_speed: config.speed,
            return_speed: config.return_speed,
            speed: config.speed,
            mode: ModeState::default(),
            target_node: None,
            route: Vec::new(),
            last_attempt: None,
            last_safe: spawn,
            last_pursued_tile: None,
            home_node: None,
            clock: Duration::ZERO,
            wrap_ready_at: Duration::ZERO,
            last_move_at: Duration::ZERO,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Roster index of the flank partner.
    pub fn partner(&self) -> Option<usize> {
        self.partner
    }

    /// Pixel position.
    pub fn position(&self) -> PixelPoint {
        self.pos
    }

    /// Unit heading, zero when stopped.
    pub fn heading(&self) -> Point {
        self.heading
    }

    /// Tile under the hunter.
    pub fn tile(&self) -> Point {
        self.nav.maze().tile_of(self.pos)
    }

    pub fn mode(&self) -> PursuitMode {
        self.mode.mode()
    }

    /// True while frightened and while returning to base.
    pub fn is_frightened(&self) -> bool {
        self.mode.mode().is_frightened()
    }

    pub fn spawn(&self) -> Point {
        self.spawn
    }

    /// Current speed in pixels per tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Next node of the current route, if the last plan was a graph route.
    pub fn target_node(&self) -> Option<Point> {
        self.target_node
    }

    /// Route of the last plan: graph nodes for a shortest path, otherwise
    /// the single hop taken.
    pub fn route(&self) -> &[Point] {
        &self.route
    }

    /// Which fallback produced the last plan.
    pub fn last_attempt(&self) -> Option<Attempt> {
        self.last_attempt
    }

    /// Time left before Frightened expires.
    pub fn frightened_remaining(&self) -> Option<Duration> {
        self.mode.remaining(self.clock)
    }

    /// Time accumulated over all ticks.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    // -----------------------------------------------------------------------
    // Triggers
    // -----------------------------------------------------------------------

    /// Become frightened for a random duration within the tuned range.
    /// Ignored while returning to base.
    pub fn enter_frightened(&mut self) {
        let duration = self.sample_frightened();
        if self.mode.frighten(self.clock, duration) {
            log::debug!("{}: frightened for {}ms", self.name, duration.as_millis());
        } else {
            log::debug!("{}: fright ignored while {}", self.name, self.mode.mode());
        }
    }

    /// Caught while frightened: head home at return speed. Ignored in any
    /// other mode.
    pub fn take_down_and_return_to_base(&mut self) {
        if !self.mode.take_down() {
            log::debug!("{}: take-down ignored while {}", self.name, self.mode.mode());
            return;
        }
        self.speed = self.return_speed;
        self.target_node = None;
        self.route.clear();
        log::debug!("{}: taken down, returning to {}", self.name, self.spawn);
    }

    /// Back to the spawn tile center, stopped, chasing at normal speed.
    pub fn reset_to_spawn(&mut self) {
        self.pos = self.nav.maze().tile_center(self.spawn);
        self.heading = Point::ZERO;
        self.speed = self.base_speed;
        self.mode.reset();
        self.target_node = None;
        self.route.clear();
        self.last_attempt = None;
        self.last_safe = self.spawn;
        self.wrap_ready_at = self.clock;
        self.last_move_at = self.clock;
    }

    /// Adopt a new maze layout: new spawn tile, graphs and caches, then
    /// reset to spawn.
    pub fn on_maze_changed(&mut self, nav: &Navigation) {
        let maze = nav.maze();
        self.nav = nav.clone();
        self.search.set_range(maze.bounds());
        self.spawn = pick_spawn(maze, &self.spawn_markers, &mut self.rng, &self.name);
        self.return_graph = nav.graph().with_waypoint(maze, self.spawn);
        self.home_node = None;
        self.last_pursued_tile = None;
        self.reset_to_spawn();
        log::debug!("{}: new maze, spawn at {}", self.name, self.spawn);
    }

    /// Change the normal speed. Takes effect at once unless returning to
    /// base.
    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_speed = speed;
        if self.mode.mode() != PursuitMode::ReturningToBase {
            self.speed = speed;
        }
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance by one tick of length `dt`. Call after the pursued agent has
    /// moved.
    pub fn tick(&mut self, sighting: &Sighting, dt: Duration) {
        self.clock += dt;
        let nav = self.nav.clone();
        let maze = nav.maze();

        if self.last_pursued_tile != Some(sighting.pursued_tile) {
            self.last_pursued_tile = Some(sighting.pursued_tile);
            if self.mode.mode() == PursuitMode::Chase && nav.graph().is_node(self.tile()) {
                self.replan(&nav, sighting);
            }
        }

        if self.heading.is_zero() && !self.at_center(maze) {
            self.head_for_nearest_node(&nav, sighting);
        }

        if self.at_center(maze) {
            let tile = self.tile();
            self.pos = maze.tile_center(tile);
            if maze.is_walkable(tile) {
                self.last_safe = tile;
            }
            if self.finish_return(maze) {
                return;
            }
            let at_node = graph_for(self.mode.mode(), &self.return_graph, &nav).is_node(tile);
            if at_node || self.target_node == Some(tile) {
                self.replan(&nav, sighting);
            } else if self.heading.is_zero() {
                self.head_for_nearest_node(&nav, sighting);
            }
        }

        self.advance(&nav, sighting);
        self.wrap(maze);
        self.idle_guard(&nav, sighting);
        self.validity_guard(&nav, sighting);

        if self.mode.expire(self.clock) {
            log::debug!("{}: no longer frightened", self.name);
        }
        self.finish_return(maze);
    }

    /// On a tile center. A hunter already moving away from the center does
    /// not count, so slow hunters do not decide twice on one tile.
    fn at_center(&self, maze: &Maze) -> bool {
        let off = maze.center_offset(self.pos);
        let tol = self.tuning.center_tolerance;
        if off.x.abs() > tol || off.y.abs() > tol {
            return false;
        }
        off.along(self.heading) <= 0.0
    }

    /// Raw goal tile for the current mode.
    fn goal_tile(&self, maze: &Maze, sighting: &Sighting) -> Point {
        match self.mode.mode() {
            PursuitMode::ReturningToBase => self.spawn,
            _ => self.strategy_goal(maze, sighting).tile(),
        }
    }

    fn strategy_goal(&self, maze: &Maze, sighting: &Sighting) -> Goal {
        let ctx = PursuitContext {
            own_tile: self.tile(),
            pursued_tile: sighting.pursued_tile,
            pursued_heading: sighting.pursued_heading,
            partner_tile: sighting.partner_tile,
            bounds: maze.bounds(),
            home_corner: self.tuning.home_corner_for(maze),
            retreat_radius: self.tuning.retreat_radius,
        };
        self.strategy.goal(&ctx)
    }

    /// Pick a new heading through the fallback chain.
    fn replan(&mut self, nav: &Navigation, sighting: &Sighting) {
        let maze = nav.maze();
        let from = self.tile();
        let mode = self.mode.mode();
        let (goal_node, goal_tile) = match mode {
            PursuitMode::ReturningToBase => (Some(self.spawn), self.spawn),
            _ => match self.strategy_goal(maze, sighting) {
                Goal::Chase(tile) => (self.search.nearest_node(maze, nav.graph(), tile), tile),
                Goal::Home(tile) => {
                    if self.home_node.is_none() {
                        self.home_node = self.search.nearest_node(maze, nav.graph(), tile);
                    }
                    (self.home_node, tile)
                }
            },
        };

        let query = Query {
            maze,
            graph: graph_for(mode, &self.return_graph, nav),
            from,
            goal_node,
            goal_tile,
        };
        match planner::plan(&mut self.search, &query) {
            Some(plan) => {
                log::debug!(
                    "{}: {} from {} toward {}, next {} by {}",
                    self.name,
                    mode,
                    from,
                    goal_tile,
                    plan.next,
                    plan.attempt
                );
                self.heading = planner::heading_toward(maze, from, plan.next);
                self.target_node = (plan.attempt == Attempt::ShortestPath).then_some(plan.next);
                self.last_attempt = Some(plan.attempt);
                self.route = plan.route;
            }
            None => {
                log::warn!("{}: no way out of {}", self.name, from);
                self.heading = Point::ZERO;
                self.target_node = None;
                self.last_attempt = None;
                self.route.clear();
            }
        }
    }

    /// Step toward the nearest node, or greedily toward the goal when no
    /// node can be reached.
    fn head_for_nearest_node(&mut self, nav: &Navigation, sighting: &Sighting) {
        let maze = nav.maze();
        let from = self.tile();
        let graph = graph_for(self.mode.mode(), &self.return_graph, nav);
        let next = self
            .search
            .first_step_to_nearest_node(maze, graph, from)
            .or_else(|| planner::greedy_step(maze, from, self.goal_tile(maze, sighting)));
        self.steer(maze, from, next);
    }

    fn steer(&mut self, maze: &Maze, from: Point, next: Option<Point>) {
        self.heading = next.map_or(Point::ZERO, |n| planner::heading_toward(maze, from, n));
    }

    /// Move along the heading, stopping exactly on a tile center that lies
    /// within reach.
    fn advance(&mut self, nav: &Navigation, sighting: &Sighting) {
        if self.heading.is_zero() {
            return;
        }
        let maze = nav.maze();
        let tile = self.tile();
        let center = maze.tile_center(tile);
        let ahead = (center - self.pos).along(self.heading);
        if ahead > 0.0 && ahead < self.speed {
            self.pos = center;
            self.last_move_at = self.clock;
            return;
        }

        let next = self.pos.advanced(self.heading, self.speed);
        if maze.tile_of(next) != tile && !maze.is_walkable(maze.step(tile, self.heading)) {
            log::trace!("{}: wall ahead of {}", self.name, tile);
            self.pos = center;
            self.heading = Point::ZERO;
            self.replan(nav, sighting);
            return;
        }
        self.pos = next;
        self.last_move_at = self.clock;
        self.ease_to_axis(maze);
    }

    /// Pull the axis across the heading toward the corridor center.
    fn ease_to_axis(&mut self, maze: &Maze) {
        let center = maze.tile_center(self.tile());
        let step = (self.speed * 0.5).clamp(0.4, 1.0);
        if self.heading.x != 0 {
            self.pos.y = ease(self.pos.y, center.y, step);
        } else if self.heading.y != 0 {
            self.pos.x = ease(self.pos.x, center.x, step);
        }
    }

    fn wrap(&mut self, maze: &Maze) {
        if self.clock < self.wrap_ready_at {
            return;
        }
        if let Some(p) = maze.wrap_pixel(self.pos, self.heading) {
            log::trace!("{}: wrapped from {} to {}", self.name, self.pos, p);
            self.pos = p;
            self.wrap_ready_at = self.clock.saturating_add(self.tuning.wrap_cooldown);
        }
    }

    fn idle_guard(&mut self, nav: &Navigation, sighting: &Sighting) {
        if self.clock.saturating_sub(self.last_move_at) <= self.tuning.idle_window {
            return;
        }
        let maze = nav.maze();
        let from = self.tile();
        let next = planner::greedy_step(maze, from, self.goal_tile(maze, sighting));
        log::debug!("{}: idle at {}, forcing a greedy step", self.name, from);
        self.steer(maze, from, next);
        self.target_node = None;
        self.last_move_at = self.clock;
    }

    fn validity_guard(&mut self, nav: &Navigation, sighting: &Sighting) {
        let maze = nav.maze();
        let tile = self.tile();
        if maze.is_walkable(tile) {
            return;
        }
        log::warn!(
            "{}: overshot into {}, back to {}",
            self.name,
            tile,
            self.last_safe
        );
        self.pos = maze.tile_center(self.last_safe);
        self.heading = Point::ZERO;
        self.target_node = None;
        self.replan(nav, sighting);
    }

    /// End the return trip on the spawn tile center.
    fn finish_return(&mut self, maze: &Maze) -> bool {
        if self.mode.mode() != PursuitMode::ReturningToBase
            || self.tile() != self.spawn
            || !self.at_center(maze)
        {
            return false;
        }
        log::debug!("{}: back at base", self.name);
        self.reset_to_spawn();
        true
    }

    fn sample_frightened(&mut self) -> Duration {
        let lo = millis(self.tuning.frightened_min);
        let hi = millis(self.tuning.frightened_max);
        if lo >= hi {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(self.rng.random_range(lo..=hi))
    }
}

/// The graph a hunter in `mode` navigates by.
fn graph_for<'a>(mode: PursuitMode, return_graph: &'a NavGraph, nav: &'a Navigation) -> &'a NavGraph {
    match mode {
        PursuitMode::ReturningToBase => return_graph,
        _ => nav.graph(),
    }
}

fn pick_spawn(maze: &Maze, markers: &[i32], rng: &mut SmallRng, name: &str) -> Point {
    let tiles: Vec<Point> = maze
        .find(markers)
        .into_iter()
        .filter(|&p| maze.is_walkable(p))
        .collect();
    if let Some(&p) = tiles.choose(rng) {
        return p;
    }
    let center = maze.bounds().center();
    log::warn!("{name}: no spawn marker {markers:?} in maze, falling back to {center}");
    if maze.is_walkable(center) {
        return center;
    }
    maze.bounds()
        .iter()
        .find(|&p| maze.is_walkable(p))
        .unwrap_or(center)
}

fn ease(v: f32, target: f32, step: f32) -> f32 {
    let d = target - v;
    if d.abs() <= 1.0 {
        target
    } else {
        v + d.signum() * d.abs().min(step)
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    /// A ring around a block, with a tunnel on row 3 and spawn marker 5.
    const YARD: &str = "\
#########
#.......#
#.#####.#
...5.....
#.#####.#
#.......#
#########";

    fn yard() -> Navigation {
        Navigation::new(
            Maze::parse(YARD, 10)
                .unwrap()
                .with_tunnel_row(3)
                .unwrap(),
        )
    }

    fn hunter(nav: &Navigation, strategy: Strategy) -> Hunter {
        let cfg = HunterConfig::new("test", strategy, 5);
        Hunter::new(&cfg, &Tuning::default(), nav, SmallRng::seed_from_u64(1))
    }

    fn sighting(tile: Point, heading: Point) -> Sighting {
        Sighting {
            pursued_tile: tile,
            pursued_heading: heading,
            partner_tile: None,
        }
    }

    const DT: Duration = Duration::from_millis(16);

    #[test]
    fn spawns_on_marker_center() {
        let nav = yard();
        let h = hunter(&nav, Strategy::Aggressive);
        assert_eq!(h.spawn(), Point::new(3, 3));
        assert_eq!(h.position(), PixelPoint::new(35.0, 35.0));
        assert_eq!(h.mode(), PursuitMode::Chase);
        assert!(!h.is_frightened());
        assert_eq!(h.heading(), Point::ZERO);
    }

    #[test]
    fn missing_marker_falls_back_to_center() {
        let nav = yard();
        let cfg = HunterConfig::new("lost", Strategy::Aggressive, 9);
        let h = Hunter::new(&cfg, &Tuning::default(), &nav, SmallRng::seed_from_u64(1));
        assert_eq!(h.spawn(), Point::new(4, 3));
    }

    #[test]
    fn first_tick_heads_for_nearest_node() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        // (1, 3) is two tiles away, (7, 3) four.
        h.tick(&sighting(Point::new(7, 3), Point::ZERO), DT);
        assert_eq!(h.heading(), Point::LEFT);
        assert!(h.position().x < 35.0);
        assert_eq!(h.target_node(), None);
    }

    #[test]
    fn stays_walkable_and_reaches_target() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        let target = Point::new(7, 5);
        let s = sighting(target, Point::ZERO);
        let mut reached = false;
        for _ in 0..400 {
            h.tick(&s, DT);
            assert!(nav.maze().is_walkable(h.tile()), "off the maze at {}", h.tile());
            reached |= h.tile() == target;
        }
        assert!(reached);
    }

    #[test]
    fn wraps_through_the_tunnel() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        // The pursued agent sits just past the left edge: the tunnel is
        // the short way round.
        let s = sighting(Point::new(8, 3), Point::ZERO);
        let mut crossed = false;
        let mut prev = h.tile();
        for _ in 0..200 {
            h.tick(&s, DT);
            let t = h.tile();
            crossed |= prev == Point::new(0, 3) && t == Point::new(8, 3);
            prev = t;
            assert!(nav.maze().is_walkable(t));
        }
        assert!(crossed);
    }

    #[test]
    fn frightened_expires_within_range() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        let s = sighting(Point::new(7, 1), Point::ZERO);
        h.enter_frightened();
        assert_eq!(h.mode(), PursuitMode::Frightened);
        let left = h.frightened_remaining().unwrap();
        assert!(left >= Duration::from_secs(5) && left <= Duration::from_secs(8));
        let mut elapsed = Duration::ZERO;
        while h.mode() == PursuitMode::Frightened {
            h.tick(&s, DT);
            elapsed += DT;
            assert!(elapsed <= Duration::from_secs(8) + DT);
        }
        assert!(elapsed >= Duration::from_secs(5));
        assert_eq!(h.mode(), PursuitMode::Chase);
    }

    #[test]
    fn take_down_requires_fright() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        h.take_down_and_return_to_base();
        assert_eq!(h.mode(), PursuitMode::Chase);
        h.enter_frightened();
        h.take_down_and_return_to_base();
        assert_eq!(h.mode(), PursuitMode::ReturningToBase);
        assert!(h.is_frightened());
        assert_eq!(h.speed(), 5.0);
        h.enter_frightened();
        assert_eq!(h.mode(), PursuitMode::ReturningToBase);
    }

    #[test]
    fn returns_home_and_resets() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        let s = sighting(Point::new(7, 5), Point::ZERO);
        for _ in 0..150 {
            h.tick(&s, DT);
        }
        assert_ne!(h.tile(), h.spawn());
        h.enter_frightened();
        h.take_down_and_return_to_base();
        let mut ticks = 0;
        while h.mode() == PursuitMode::ReturningToBase {
            h.tick(&s, DT);
            assert!(nav.maze().is_walkable(h.tile()));
            ticks += 1;
            assert!(ticks < 500, "never made it home");
        }
        assert_eq!(h.mode(), PursuitMode::Chase);
        assert_eq!(h.position(), nav.maze().tile_center(h.spawn()));
        assert_eq!(h.speed(), h.base_speed());
        assert!(!h.is_frightened());
    }

    #[test]
    fn return_graph_holds_spawn() {
        let nav = yard();
        let h = hunter(&nav, Strategy::Aggressive);
        assert!(!nav.graph().is_node(h.spawn()));
        assert!(h.return_graph.is_node(h.spawn()));
    }

    #[test]
    fn retreat_caches_home_node() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::ConditionalRetreat);
        // Pursued right next to the hunter: retreat once on a node.
        let s = sighting(Point::new(4, 3), Point::ZERO);
        for _ in 0..40 {
            h.tick(&s, DT);
        }
        assert_eq!(h.home_node, Some(Point::new(1, 5)));
        h.on_maze_changed(&yard());
        assert_eq!(h.home_node, None);
    }

    #[test]
    fn base_speed_changes() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        h.set_base_speed(1.3);
        assert_eq!(h.speed(), 1.3);
        h.enter_frightened();
        h.take_down_and_return_to_base();
        h.set_base_speed(1.5);
        assert_eq!(h.speed(), 5.0);
        h.reset_to_spawn();
        assert_eq!(h.speed(), 1.5);
    }

    #[test]
    fn slow_hunter_still_moves() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        h.set_base_speed(0.5);
        let target = Point::new(7, 1);
        let s = sighting(target, Point::ZERO);
        let mut reached = false;
        for _ in 0..600 {
            h.tick(&s, DT);
            assert!(nav.maze().is_walkable(h.tile()));
            reached |= h.tile() == target;
        }
        assert!(reached);
    }

    #[test]
    fn wall_overshoot_restores_last_safe_tile() {
        let nav = yard();
        let mut h = hunter(&nav, Strategy::Aggressive);
        let s = sighting(Point::new(7, 1), Point::ZERO);
        h.last_safe = Point::new(2, 3);
        h.pos = PixelPoint::new(25.0, 22.0);
        assert!(!nav.maze().is_walkable(h.tile()));
        h.validity_guard(&nav, &s);
        assert_eq!(h.position(), PixelPoint::new(25.0, 35.0));
        assert_eq!(h.tile(), Point::new(2, 3));
        assert!(!h.heading().is_zero());

        h.pos = PixelPoint::new(25.0, 22.0);
        h.heading = Point::ZERO;
        h.tick(&s, DT);
        assert!(nav.maze().is_walkable(h.tile()));
    }

    #[test]
    fn idle_hunter_takes_greedy_step() {
        let nav = yard();
        let s = sighting(Point::new(7, 3), Point::ZERO);

        let mut h = hunter(&nav, Strategy::Aggressive);
        h.clock = Duration::from_millis(100);
        h.idle_guard(&nav, &s);
        assert_eq!(h.heading(), Point::ZERO);

        h.clock = Duration::from_millis(1000);
        h.idle_guard(&nav, &s);
        assert_eq!(h.heading(), Point::RIGHT);
        assert_eq!(h.last_move_at, h.clock);
        assert_eq!(h.target_node(), None);
    }

    /// On node tile (1, 3), just past its center and heading right.
    fn past_junction(nav: &Navigation) -> Hunter {
        let mut h = hunter(nav, Strategy::Aggressive);
        h.pos = PixelPoint::new(17.0, 35.0);
        h.heading = Point::RIGHT;
        h.last_pursued_tile = Some(Point::new(7, 3));
        h
    }

    #[test]
    fn pursued_tile_change_replans_on_node() {
        let nav = yard();
        let mut h = past_junction(&nav);
        h.tick(&sighting(Point::new(1, 1), Point::ZERO), DT);
        assert_eq!(h.heading(), Point::UP);
        assert_eq!(h.last_attempt(), Some(Attempt::ShortestPath));
        assert_eq!(h.route(), &[Point::new(1, 3), Point::new(1, 1)]);
        assert_eq!(h.target_node(), Some(Point::new(1, 1)));
    }

    #[test]
    fn frightened_hunter_waits_for_center() {
        let nav = yard();
        let mut h = past_junction(&nav);
        h.enter_frightened();
        h.tick(&sighting(Point::new(1, 1), Point::ZERO), DT);
        assert_eq!(h.heading(), Point::RIGHT);
        assert_eq!(h.last_attempt(), None);
        assert_eq!(h.last_pursued_tile, Some(Point::new(1, 1)));
    }

    #[test]
    fn huge_wrap_cooldown_saturates() {
        let nav = yard();
        let tuning = Tuning {
            wrap_cooldown: Duration::MAX,
            ..Tuning::default()
        };
        let cfg = HunterConfig::new("test", Strategy::Aggressive, 5);
        let mut h = Hunter::new(&cfg, &tuning, &nav, SmallRng::seed_from_u64(1));
        h.clock = Duration::from_secs(1);
        h.pos = PixelPoint::new(3.0, 35.0);
        h.heading = Point::LEFT;
        h.wrap(nav.maze());
        assert_eq!(h.tile(), Point::new(8, 3));
        assert_eq!(h.wrap_ready_at, Duration::MAX);
    }
}
