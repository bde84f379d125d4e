//! Spawn planning: side, role, trajectory and timing for one enemy.
//!
//! Everything here is pure over an `Rng`, so a seeded generator replays a
//! whole wave exactly.

use bevy::prelude::*;
use rand::Rng;

use crate::common::geometry;
use crate::common::registry::{Role, Side};
use crate::common::tunables::Tunables;

/// Self-balancing rare event.
///
/// Each roll draws uniformly from `[0, base + misses]`, rounds, and hits when
/// the result reaches `threshold`. Every miss widens the range, so a long
/// dry spell makes the next hit more likely; a hit resets the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RareEventStreak {
    pub base: u32,
    pub threshold: u32,
    pub misses: u32,
}

impl RareEventStreak {
    pub fn new(base: u32, threshold: u32) -> Self {
        Self { base, threshold, misses: 0 }
    }

    /// Upper bound of the next draw.
    #[inline]
    pub fn ceiling(&self) -> f32 {
        self.base.saturating_add(self.misses) as f32
    }

    /// Score a draw taken from `[0, ceiling()]` and update the streak.
    pub fn settle(&mut self, draw: f32) -> bool {
        let hit = draw.round() >= self.threshold as f32;
        if hit {
            self.misses = 0;
        } else {
            self.misses = self.misses.saturating_add(1);
        }
        hit
    }

    pub fn roll(&mut self, rng: &mut impl Rng) -> bool {
        let draw = uniform(rng, 0.0, self.ceiling());
        self.settle(draw)
    }
}

/// Uniform draw from `[lo, hi]`; a collapsed or inverted range yields `lo`.
pub fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub role: Role,
    pub side: Side,
    pub start: Vec2,
    pub destination: Vec2,
    pub travel_secs: f32,
}

/// Plan the next enemy. Advances both streaks.
pub fn plan_spawn(
    tunables: &Tunables,
    left: &mut RareEventStreak,
    ranger: &mut RareEventStreak,
    player: Vec2,
    rng: &mut impl Rng,
) -> SpawnPlan {
    let half = tunables.enemy_half();
    let arena = tunables.arena;

    let y = uniform(rng, half.y, arena.y - half.y);
    let side = if left.roll(rng) { Side::Left } else { Side::Right };
    let role = if ranger.roll(rng) { Role::Ranger } else { Role::Grunt };

    let start = match side {
        Side::Left => Vec2::new(-half.x, y),
        Side::Right => Vec2::new(arena.x + half.x, y),
    };

    let (lo, hi) = tunables.travel_secs;
    let travel_secs = uniform(rng, lo, hi);
    let wander = uniform(rng, -tunables.grunt_deviation, tunables.grunt_deviation);

    let destination = match role {
        Role::Ranger => geometry::point_short_of(start, player, tunables.ranger_sight_radius),
        Role::Grunt => {
            let far_x = match side {
                Side::Left => arena.x + half.x,
                Side::Right => -half.x,
            };
            let y = (y + wander).clamp(half.x, (arena.y - half.x).max(half.x));
            Vec2::new(far_x, y)
        }
    };

    SpawnPlan { role, side, start, destination, travel_secs }
}
