//! Goal selection: where a hunter wants to be, given what it sees.

use chase_core::{Point, Range};
use chase_paths::euclidean;

/// Everything a strategy may look at when picking a goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitContext {
    /// The hunter's own tile.
    pub own_tile: Point,
    pub pursued_tile: Point,
    /// Unit heading of the pursued agent (zero when standing still).
    pub pursued_heading: Point,
    /// Current tile of the partner hunter, if one is assigned.
    pub partner_tile: Option<Point>,
    /// Grid bounds every goal is clamped into.
    pub bounds: Range,
    /// Retreat target of [`Strategy::ConditionalRetreat`].
    pub home_corner: Point,
    /// Inclusive distance, in tiles, under which a conditional retreat
    /// falls back to the home corner.
    pub retreat_radius: f64,
}

/// A goal tile, clamped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Head for a tile derived from the pursued agent.
    Chase(Point),
    /// Head for the fixed home corner. Its nearest node never changes for a
    /// given maze, so hunters cache it.
    Home(Point),
}

impl Goal {
    /// The raw goal tile.
    pub fn tile(self) -> Point {
        match self {
            Goal::Chase(p) | Goal::Home(p) => p,
        }
    }
}

/// The four target-selection heuristics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Aim at the pursued agent's tile.
    #[default]
    Aggressive,
    /// Aim four tiles ahead of the pursued agent.
    Ambush,
    /// Aim at the point mirroring the partner through the tile two ahead of
    /// the pursued agent. Without a partner this is [`Aggressive`](Self::Aggressive).
    Flank,
    /// Chase from afar, retreat to the home corner when close.
    ConditionalRetreat,
}

impl Strategy {
    /// Compute this strategy's goal. The result always lies inside
    /// `ctx.bounds`.
    pub fn goal(self, ctx: &PursuitContext) -> Goal {
        let clamp = |p: Point| p.clamp(ctx.bounds);
        let aggressive = Goal::Chase(clamp(ctx.pursued_tile));
        match self {
            Strategy::Aggressive => aggressive,
            Strategy::Ambush => Goal::Chase(clamp(ctx.pursued_tile + ctx.pursued_heading * 4)),
            Strategy::Flank => match ctx.partner_tile {
                Some(partner) => {
                    let ahead = clamp(ctx.pursued_tile + ctx.pursued_heading * 2);
                    Goal::Chase(clamp(ahead * 2 - partner))
                }
                None => aggressive,
            },
            Strategy::ConditionalRetreat => {
                if euclidean(ctx.own_tile, ctx.pursued_tile) <= ctx.retreat_radius {
                    Goal::Home(clamp(ctx.home_corner))
                } else {
                    aggressive
                }
            }
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Ambush => "ambush",
            Strategy::Flank => "flank",
            Strategy::ConditionalRetreat => "conditional retreat",
        };
        f.write_str(name)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn strategy_round_trip() {
        for s in [
            Strategy::Aggressive,
            Strategy::Ambush,
            Strategy::Flank,
            Strategy::ConditionalRetreat,
        ] {
            let json = serde_json::to_string(&s).unwrap();
            let back: Strategy = serde_json::from_str(&json).unwrap();
            assert_eq!(s, back);
        }
    }
}
