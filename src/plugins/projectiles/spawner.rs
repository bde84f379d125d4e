//! Spawn consumer: turn projectile requests into flying entities.
//!
//! Every projectile flies `projectile_reach` along its aim over a fixed
//! flight time, far enough to leave the arena, then expires. Hits are not
//! checked here; they arrive later as collision messages.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::geometry;
use crate::common::layers::Layer;
use crate::common::state::Screen;
use crate::common::tunables::Tunables;
use crate::plugins::motion::{Arrival, Arrived, Travel};

use super::components::Projectile;
use super::messages::{ProjectileKind, SpawnProjectileRequest};

pub fn spawn_requested_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut reader: MessageReader<SpawnProjectileRequest>,
) {
    for req in reader.read() {
        let Some(destination) = geometry::project(req.origin, req.target, tunables.projectile_reach) else {
            // Aim point on top of the shooter: no direction to fire in.
            debug!("dropped {:?} shot with no direction", req.kind);
            continue;
        };

        let (travel, vel) = Travel::between(
            req.origin,
            destination,
            tunables.projectile_flight_secs,
            Arrival::Expire,
        );

        let (name, color, layers) = match req.kind {
            ProjectileKind::Player => ("PlayerProjectile", Color::srgb(1.0, 0.85, 0.3), Layer::player_projectile()),
            ProjectileKind::Enemy => ("EnemyProjectile", Color::srgb(0.3, 0.8, 0.4), Layer::enemy_projectile()),
        };

        commands.spawn((
            Name::new(name),
            Projectile { kind: req.kind },
            Sprite {
                color,
                custom_size: Some(Vec2::splat(tunables.projectile_radius * 2.0)),
                ..default()
            },
            Transform::from_translation(req.origin.extend(2.0)),
            RigidBody::Dynamic,
            Collider::circle(tunables.projectile_radius),
            // Sensors carry no mass of their own.
            Sensor,
            Mass(1.0),
            layers,
            travel,
            vel,
            // Opt-in collision events: Avian only emits CollisionStart/End if one collider has this marker.
            CollisionEventsEnabled,
            DespawnOnExit(Screen::InGame),
        ));
    }
}

/// Projectiles that flew their full reach without hitting anything.
pub fn expire_projectiles(
    mut commands: Commands,
    mut arrivals: MessageReader<Arrived>,
    q_projectiles: Query<(), With<Projectile>>,
) {
    for ev in arrivals.read() {
        if ev.arrival == Arrival::Expire && q_projectiles.contains(ev.entity) {
            commands.entity(ev.entity).despawn();
        }
    }
}
