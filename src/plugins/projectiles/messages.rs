//! Buffered projectile requests.
//!
//! Producers (player touch, ranger fire loops) only write intent here. The
//! spawner is the single consumer that turns requests into entities.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    Player,
    Enemy,
}

/// Fire from `origin` toward `target`. The projectile overshoots `target`
/// and flies its full reach.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub kind: ProjectileKind,
    pub origin: Vec2,
    pub target: Vec2,
}
