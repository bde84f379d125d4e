//! Enemy registry: the authoritative list of live enemies.
//!
//! Each entry pairs an enemy body with its notification marker. Lookups scan
//! linearly by body handle; a round holds tens of enemies at most.
//!
//! Absent handles are an expected race (an enemy can be killed and reach its
//! waypoint in the same frame), so removal reports `NotFound` instead of
//! panicking and callers treat it as a no-op.

use bevy::prelude::*;
use thiserror::Error;

use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EnemyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Grunt,
    Ranger,
}

/// Edge an enemy spawned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Ranged stand-off parameters. Only rangers have them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reach {
    pub sight_radius: f32,
    pub danger_close_radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub target: Entity,
    pub marker: Entity,
    pub role: Role,
    pub facing: Side,
    pub reach: Option<Reach>,
    pub hp: u32,
    pub distance_to_player: f32,
}

impl Enemy {
    /// A fresh enemy with role-dependent stats. The id is assigned on insert.
    pub fn new(
        target: Entity,
        marker: Entity,
        role: Role,
        facing: Side,
        distance_to_player: f32,
        tunables: &Tunables,
    ) -> Self {
        let (hp, reach) = match role {
            Role::Grunt => (tunables.grunt_hp, None),
            Role::Ranger => (
                tunables.ranger_hp,
                Some(Reach {
                    sight_radius: tunables.ranger_sight_radius,
                    danger_close_radius: tunables.ranger_danger_close_radius,
                }),
            ),
        };

        Self {
            id: EnemyId::default(),
            target,
            marker,
            role,
            facing,
            reach,
            hp,
            distance_to_player,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no live enemy owns entity {0}")]
    NotFound(Entity),
}

#[derive(Debug, Default, Clone)]
pub struct EnemyRegistry {
    enemies: Vec<Enemy>,
    next_id: u64,
}

impl EnemyRegistry {
    pub fn insert(&mut self, mut enemy: Enemy) -> EnemyId {
        self.next_id += 1;
        enemy.id = EnemyId(self.next_id);
        self.enemies.push(enemy);
        EnemyId(self.next_id)
    }

    /// Index of the enemy whose body is `target`.
    pub fn find(&self, target: Entity) -> Option<usize> {
        self.enemies.iter().position(|e| e.target == target)
    }

    pub fn get(&self, target: Entity) -> Option<&Enemy> {
        self.find(target).map(|i| &self.enemies[i])
    }

    pub fn get_mut(&mut self, target: Entity) -> Option<&mut Enemy> {
        self.find(target).map(|i| &mut self.enemies[i])
    }

    pub fn contains(&self, target: Entity) -> bool {
        self.find(target).is_some()
    }

    /// Remove by index. Panics on an out-of-range index like `Vec::remove`;
    /// use [`Self::remove`] when the index came from an earlier lookup that
    /// may be stale.
    pub fn remove_at(&mut self, index: usize) -> Enemy {
        self.enemies.remove(index)
    }

    /// Remove the enemy whose body is `target`.
    pub fn remove(&mut self, target: Entity) -> Result<Enemy, RegistryError> {
        let index = self.find(target).ok_or(RegistryError::NotFound(target))?;
        Ok(self.remove_at(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    /// In-place traversal. Entries can be edited, not added or removed.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
