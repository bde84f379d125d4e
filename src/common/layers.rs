//! Collision layers.
//!
//! `PhysicsLayer` assigns each variant its own bit (`1 << index`), so the
//! variants double as the disjoint contact categories. Declaration order
//! matters: contact pairs are normalized by comparing `to_bits()`, and the
//! enemy must sort before player projectiles, the player before enemy
//! projectiles.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Enemy,
    PlayerProjectile,
    Player,
    EnemyProjectile,
}

impl Layer {
    /// Gameplay categories, in bit order.
    pub const CATEGORIES: [Layer; 4] = [
        Layer::Enemy,
        Layer::PlayerProjectile,
        Layer::Player,
        Layer::EnemyProjectile,
    ];

    /// The gameplay category a collider belongs to, if any.
    pub fn category_of(layers: &CollisionLayers) -> Option<Layer> {
        Self::CATEGORIES
            .into_iter()
            .find(|layer| layers.memberships.has_all(*layer))
    }

    pub fn enemy() -> CollisionLayers {
        CollisionLayers::new(Layer::Enemy, [Layer::PlayerProjectile])
    }

    /// The player only ever reacts to enemy fire; it never touches enemies or
    /// its own projectiles.
    pub fn player() -> CollisionLayers {
        CollisionLayers::new(Layer::Player, [Layer::EnemyProjectile])
    }

    pub fn player_projectile() -> CollisionLayers {
        CollisionLayers::new(Layer::PlayerProjectile, [Layer::Enemy])
    }

    pub fn enemy_projectile() -> CollisionLayers {
        CollisionLayers::new(Layer::EnemyProjectile, [Layer::Player])
    }
}
