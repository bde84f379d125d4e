//! Player plugin.
//!
//! The player holds the centre of the arena for the whole round. It never
//! moves; it only fires (projectiles plugin) and absorbs enemy fire
//! (collision resolver). Its body is kinematic so contacts are reported
//! without the player being pushed around.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::Screen, tunables::Tunables};

#[derive(Component)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::InGame), spawn);
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let size = tunables.player_size;

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(size)),
            ..default()
        },
        Transform::from_translation(tunables.player_post().extend(1.0)),
        RigidBody::Kinematic,
        Collider::circle(size * 0.5),
        Layer::player(),
        LinearVelocity::ZERO,
        DespawnOnExit(Screen::InGame),
    ));
}
