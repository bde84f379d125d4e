//! Lighting plugin (Firefly) (render-only).
//!
//! A warm light on the player, and every enemy body casts a shadow.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::Screen;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::EnemyBody;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(Screen::InGame), setup)
        .add_systems(Update, occlude_enemies.run_if(in_state(Screen::InGame)));
}

fn setup(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            range: tunables.arena.x * 0.6,
            ..default()
        },
        Transform::from_translation(tunables.player_post().extend(10.0)),
        DespawnOnExit(Screen::InGame),
    ));
}

fn occlude_enemies(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q_new: Query<Entity, Added<EnemyBody>>,
) {
    let radius = tunables.enemy_half().min_element();
    for e in &q_new {
        commands.entity(e).insert(Occluder2d::circle(radius));
    }
}
