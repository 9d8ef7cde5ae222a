//! The roster of hunters sharing one maze.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, PackConfig};
use crate::events::{ModeTrigger, Target, TriggerQueue};
use crate::hunter::Hunter;
use crate::nav::Navigation;
use crate::pursued::{Pursued, Sighting};

/// All hunters of a level, updated together once per tick.
///
/// Mode changes requested with [`Pack::request`] are applied at the start
/// of the next [`Pack::tick`], before any hunter moves. Hunters then tick in
/// roster order, so a Flank hunter sees its partner's tile as of this tick
/// when the partner comes first in the roster.
#[derive(Debug)]
pub struct Pack {
    nav: Navigation,
    hunters: Vec<Hunter>,
    triggers: TriggerQueue,
    seed: u64,
    ticks: u64,
}

impl Pack {
    /// Validate `config` and spawn its hunters on `nav`.
    pub fn new(config: &PackConfig, nav: Navigation) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let hunters = config
            .hunters
            .iter()
            .enumerate()
            .map(|(i, hc)| {
                let rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
                Hunter::new(hc, &config.tuning, &nav, rng)
            })
            .collect();
        log::debug!("pack of {} hunters, seed {seed}", config.hunters.len());
        Ok(Self {
            nav,
            hunters,
            triggers: TriggerQueue::new(),
            seed,
            ticks: 0,
        })
    }

    /// Queue a mode change for the next tick.
    pub fn request(&mut self, target: Target, trigger: ModeTrigger) {
        self.triggers.push(trigger, target);
    }

    /// Apply pending triggers, then advance every hunter by `dt`. Call
    /// after the pursued agent has moved for this frame.
    pub fn tick<P: Pursued + ?Sized>(&mut self, pursued: &P, dt: Duration) {
        self.apply_triggers();
        let sighting = Sighting::of(self.nav.maze(), pursued);
        for i in 0..self.hunters.len() {
            let partner_tile = self.hunters[i]
                .partner()
                .and_then(|p| self.hunters.get(p))
                .map(Hunter::tile);
            self.hunters[i].tick(&sighting.with_partner(partner_tile), dt);
        }
        self.ticks += 1;
    }

    fn apply_triggers(&mut self) {
        while let Some((trigger, target)) = self.triggers.pop() {
            match target {
                Target::All => self.hunters.iter_mut().for_each(|h| apply(h, trigger)),
                Target::Hunter(i) => match self.hunters.get_mut(i) {
                    Some(h) => apply(h, trigger),
                    None => log::warn!("{trigger:?} for unknown hunter {i}"),
                },
            }
        }
    }

    /// Switch every hunter to a new maze layout. Pending triggers are
    /// dropped.
    pub fn on_maze_changed(&mut self, nav: Navigation) {
        if !self.triggers.is_empty() {
            log::debug!("dropping {} pending triggers", self.triggers.len());
        }
        self.triggers.clear();
        for h in &mut self.hunters {
            h.on_maze_changed(&nav);
        }
        self.nav = nav;
    }

    pub fn hunters(&self) -> &[Hunter] {
        &self.hunters
    }

    pub fn hunter(&self, i: usize) -> Option<&Hunter> {
        self.hunters.get(i)
    }

    pub fn hunter_mut(&mut self, i: usize) -> Option<&mut Hunter> {
        self.hunters.get_mut(i)
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    /// Triggers waiting for the next tick.
    pub fn pending_triggers(&self) -> usize {
        self.triggers.len()
    }

    /// Seed the hunters' generators were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn apply(h: &mut Hunter, trigger: ModeTrigger) {
    match trigger {
        ModeTrigger::EnterFrightened => h.enter_frightened(),
        ModeTrigger::TakeDown => h.take_down_and_return_to_base(),
        ModeTrigger::ResetToSpawn => h.reset_to_spawn(),
    }
}

#[cfg(test)]
mod tests {
    use chase_core::{Maze, Point};

    use super::*;
    use crate::mode::PursuitMode;
    use crate::pursued::PursuedState;

    const DT: Duration = Duration::from_millis(16);

    fn classic() -> Navigation {
        Navigation::new(Maze::classic(16).unwrap())
    }

    fn pack(seed: u64) -> Pack {
        Pack::new(&PackConfig::classic().with_seed(seed), classic()).unwrap()
    }

    /// Back and forth along the bottom corridor, one tile every 8 ticks.
    fn pursued(maze: &Maze, tick: u64) -> PursuedState {
        let step = (tick / 8) % 36;
        let (x, heading) = if step < 18 {
            (1 + step as i32, Point::RIGHT)
        } else {
            (19 - (step as i32 - 18), Point::LEFT)
        };
        PursuedState::at_tile(maze, Point::new(x, 13), heading)
    }

    fn run(pack: &mut Pack, ticks: u64) {
        for _ in 0..ticks {
            let p = pursued(pack.navigation().maze(), pack.ticks());
            pack.tick(&p, DT);
        }
    }

    #[test]
    fn spawns_on_markers() {
        let pack = pack(7);
        let maze = pack.navigation().maze();
        assert_eq!(pack.hunters().len(), 4);
        for (h, marker) in pack.hunters().iter().zip(5..) {
            assert_eq!(maze.at(h.spawn()).map(i32::from), Some(marker));
            assert_eq!(h.position(), maze.tile_center(h.spawn()));
        }
    }

    #[test]
    fn rejects_bad_config() {
        let mut cfg = PackConfig::classic();
        cfg.hunters.clear();
        assert_eq!(Pack::new(&cfg, classic()).err(), Some(ConfigError::EmptyRoster));
    }

    #[test]
    fn always_walkable() {
        let mut pack = pack(42);
        for t in 0..3000u64 {
            match t {
                500 => pack.request(Target::All, ModeTrigger::EnterFrightened),
                600 => pack.request(Target::Hunter(1), ModeTrigger::TakeDown),
                1500 => pack.request(Target::All, ModeTrigger::ResetToSpawn),
                _ => {}
            }
            let p = pursued(pack.navigation().maze(), t);
            pack.tick(&p, DT);
            let maze = pack.navigation().maze();
            for h in pack.hunters() {
                assert!(
                    maze.is_walkable(h.tile()),
                    "{} off the maze at {} on tick {t}",
                    h.name(),
                    h.tile()
                );
            }
        }
    }

    #[test]
    fn hunters_leave_spawn() {
        let mut pack = pack(3);
        run(&mut pack, 600);
        assert!(pack.hunters().iter().any(|h| h.tile() != h.spawn()));
    }

    #[test]
    fn triggers_wait_for_next_tick() {
        let mut pack = pack(1);
        run(&mut pack, 10);
        pack.request(Target::All, ModeTrigger::EnterFrightened);
        assert_eq!(pack.pending_triggers(), 1);
        assert!(pack.hunters().iter().all(|h| h.mode() == PursuitMode::Chase));
        run(&mut pack, 1);
        assert_eq!(pack.pending_triggers(), 0);
        assert!(pack.hunters().iter().all(Hunter::is_frightened));
    }

    #[test]
    fn frightened_expires_in_range() {
        let mut pack = pack(9);
        pack.request(Target::All, ModeTrigger::EnterFrightened);
        run(&mut pack, 1);
        // The first tick applies the trigger before advancing the clock.
        let start = pack.hunters()[0].clock() - DT;
        let mut expired = vec![None; pack.hunters().len()];
        while expired.iter().any(Option::is_none) {
            run(&mut pack, 1);
            for (i, h) in pack.hunters().iter().enumerate() {
                if expired[i].is_none() && h.mode() == PursuitMode::Chase {
                    expired[i] = Some(h.clock() - start);
                }
            }
            assert!(pack.hunters()[0].clock() - start <= Duration::from_secs(9));
        }
        for e in expired.into_iter().flatten() {
            assert!(e >= Duration::from_secs(5), "expired after {e:?}");
            assert!(e <= Duration::from_secs(8) + DT, "expired after {e:?}");
        }
    }

    #[test]
    fn take_down_returns_to_base() {
        let mut pack = pack(5);
        run(&mut pack, 200);
        // Same batch: the fright is applied first.
        pack.request(Target::Hunter(0), ModeTrigger::TakeDown);
        pack.request(Target::Hunter(0), ModeTrigger::EnterFrightened);
        run(&mut pack, 1);
        let h = &pack.hunters()[0];
        assert_eq!(h.mode(), PursuitMode::ReturningToBase);
        assert!(h.is_frightened());
        assert_eq!(h.speed(), 5.0);
        assert_eq!(pack.hunters()[1].mode(), PursuitMode::Chase);

        let mut ticks = 0;
        while pack.hunters()[0].mode() == PursuitMode::ReturningToBase {
            run(&mut pack, 1);
            ticks += 1;
            assert!(ticks < 1000, "hunter 0 never reached its spawn");
        }
        let h = &pack.hunters()[0];
        let maze = pack.navigation().maze();
        assert_eq!(h.mode(), PursuitMode::Chase);
        assert_eq!(h.position(), maze.tile_center(h.spawn()));
        assert_eq!(h.speed(), h.base_speed());
    }

    #[test]
    fn reset_sends_everyone_home() {
        let mut pack = pack(11);
        run(&mut pack, 300);
        pack.request(Target::All, ModeTrigger::EnterFrightened);
        pack.request(Target::All, ModeTrigger::ResetToSpawn);
        run(&mut pack, 1);
        // Reset comes last and clears the fright; each hunter has since
        // moved at most one tick away from its spawn center.
        let maze = pack.navigation().maze();
        for h in pack.hunters() {
            assert_eq!(h.mode(), PursuitMode::Chase);
            assert!(h.position().distance(maze.tile_center(h.spawn())) <= h.speed() + 1e-3);
        }
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut pack = pack(2);
        pack.request(Target::Hunter(9), ModeTrigger::EnterFrightened);
        run(&mut pack, 1);
        assert!(pack.hunters().iter().all(|h| !h.is_frightened()));
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let mut a = pack(1234);
        let mut b = pack(1234);
        for t in 0..800u64 {
            if t == 300 {
                a.request(Target::All, ModeTrigger::EnterFrightened);
                b.request(Target::All, ModeTrigger::EnterFrightened);
            }
            run(&mut a, 1);
            run(&mut b, 1);
            for (ha, hb) in a.hunters().iter().zip(b.hunters()) {
                assert_eq!(ha.position(), hb.position());
                assert_eq!(ha.mode(), hb.mode());
            }
        }
    }

    #[test]
    fn maze_change_drops_triggers_and_respawns() {
        let mut pack = pack(8);
        run(&mut pack, 100);
        pack.request(Target::All, ModeTrigger::EnterFrightened);
        let nav = classic();
        pack.on_maze_changed(nav.clone());
        assert_eq!(pack.pending_triggers(), 0);
        assert!(pack.navigation().ptr_eq(&nav));
        for h in pack.hunters() {
            assert_eq!(h.position(), nav.maze().tile_center(h.spawn()));
            assert_eq!(h.heading(), Point::ZERO);
        }
        run(&mut pack, 1);
        assert!(pack.hunters().iter().all(|h| !h.is_frightened()));
    }
}
