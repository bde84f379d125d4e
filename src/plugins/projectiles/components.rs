use bevy::prelude::*;

use super::messages::ProjectileKind;

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub kind: ProjectileKind,
}
