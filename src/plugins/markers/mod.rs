//! Notification markers: a small radar square per enemy.
//!
//! Each marker sits on the ring of radius `marker_offset` around the player,
//! pointing at its enemy, and grows as the enemy closes in:
//!
//! ```text
//! anchor = player + normalize(enemy - player) * marker_offset
//! size   = min(max_size, base_size * (reference_distance / distance))
//! ```
//!
//! Markers are decoration. They never collide and never own gameplay state;
//! the registry entry owns the marker handle and releases it with the enemy.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::geometry;
use crate::common::state::{GameState, Screen};
use crate::common::tunables::Tunables;
use crate::plugins::enemies::EnemyBody;
use crate::plugins::player::Player;

#[derive(Component, Debug, Clone, Copy)]
pub struct NotificationMarker {
    pub enemy: Entity,
}

/// Redraw cadence for every marker.
#[derive(Resource, Debug)]
pub struct MarkerClock(pub Timer);

impl MarkerClock {
    pub fn new(tunables: &Tunables) -> Self {
        Self(Timer::from_seconds(tunables.marker_period, TimerMode::Repeating))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPose {
    pub anchor: Vec2,
    pub size: f32,
}

/// Inverse-distance size, capped. An enemy on top of the player gets the cap.
pub fn marker_size(distance: f32, tunables: &Tunables) -> f32 {
    if distance <= 0.0 {
        return tunables.marker_max_size;
    }
    let size = tunables.marker_base_size * (tunables.marker_reference_distance / distance);
    size.min(tunables.marker_max_size)
}

pub fn marker_pose(player: Vec2, enemy: Vec2, tunables: &Tunables) -> MarkerPose {
    let anchor = geometry::direction(player, enemy)
        .map_or(player, |dir| player + dir * tunables.marker_offset);
    MarkerPose {
        anchor,
        size: marker_size(geometry::distance(player, enemy), tunables),
    }
}

pub fn plugin(app: &mut App) {
    let clock = MarkerClock::new(app.world().resource::<Tunables>());
    app.insert_resource(clock)
        .add_systems(OnEnter(Screen::InGame), reset_clock)
        .add_systems(Update, sync_markers.run_if(in_state(Screen::InGame)));
}

fn reset_clock(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(MarkerClock::new(&tunables));
}

/// Spawn the marker for `enemy`. The sprite is a unit square scaled to size.
pub fn spawn_marker(commands: &mut Commands, enemy: Entity, pose: MarkerPose) -> Entity {
    commands
        .spawn((
            Name::new("NotificationMarker"),
            NotificationMarker { enemy },
            Sprite {
                color: Color::srgb(0.9, 0.1, 0.1),
                custom_size: Some(Vec2::ONE),
                ..default()
            },
            Transform::from_translation(pose.anchor.extend(5.0)).with_scale(Vec3::splat(pose.size)),
            DespawnOnExit(Screen::InGame),
        ))
        .id()
}

/// Recompute each enemy's distance and move its marker.
pub fn sync_markers(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut clock: ResMut<MarkerClock>,
    mut state: ResMut<GameState>,
    q_player: Query<&Transform, (With<Player>, Without<NotificationMarker>)>,
    q_enemies: Query<&Transform, (With<EnemyBody>, Without<NotificationMarker>)>,
    mut q_markers: Query<&mut Transform, (With<NotificationMarker>, Without<Player>, Without<EnemyBody>)>,
) {
    clock.0.tick(time.delta());
    if !clock.0.just_finished() {
        return;
    }

    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player = player_tf.translation.truncate();

    for enemy in state.registry.iter_mut() {
        let Ok(enemy_tf) = q_enemies.get(enemy.target) else {
            debug!("marker sync: enemy {} has no body", enemy.target);
            continue;
        };
        let pos = enemy_tf.translation.truncate();
        enemy.distance_to_player = geometry::distance(player, pos);

        let pose = marker_pose(player, pos, &tunables);
        let Ok(mut marker_tf) = q_markers.get_mut(enemy.marker) else {
            debug!("marker sync: marker {} missing", enemy.marker);
            continue;
        };
        marker_tf.translation.x = pose.anchor.x;
        marker_tf.translation.y = pose.anchor.y;
        marker_tf.scale = Vec3::splat(pose.size);
    }
}
