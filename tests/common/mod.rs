//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `edge_siege::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed manual step, so every run is the same.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use edge_siege::common::state::GameState;
use edge_siege::common::tunables::Tunables;
use edge_siege::plugins::enemies::spawn::SpawnPlan;
use edge_siege::plugins::enemies::spawn_enemy;

pub const FRAME_SECS: f32 = 0.02;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

/// Headless app with preset tunables (core keeps them).
pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(FRAME_SECS)));
    app.insert_resource(tunables);

    edge_siege::game::configure_headless(&mut app);
    // `App::run` does this before the first update; tests drive `update` directly.
    app.finish();
    app.cleanup();
    app.update();
    app
}

/// Tunables that never spawn on their own.
pub fn quiet_tunables() -> Tunables {
    Tunables {
        spawn_period: 10_000.0,
        ..default()
    }
}

/// Run frames until roughly `secs` of game time have passed.
pub fn advance(app: &mut App, secs: f32) {
    let frames = (secs / FRAME_SECS).ceil() as usize;
    for _ in 0..frames {
        app.update();
    }
}

/// Spawn one enemy through the real spawn path.
pub fn spawn_planned(app: &mut App, plan: SpawnPlan) -> Entity {
    let entity = app
        .world_mut()
        .run_system_once(
            move |mut commands: Commands, tunables: Res<Tunables>, mut state: ResMut<GameState>| {
                let player = tunables.player_post();
                spawn_enemy(&mut commands, &tunables, &mut state, player, &plan)
            },
        )
        .expect("spawn system failed");
    app.world_mut().flush();
    entity
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}

pub fn label(app: &mut App, which: edge_siege::plugins::hud::HudLabel) -> String {
    app.world_mut()
        .query::<(&edge_siege::plugins::hud::HudLabel, &Text)>()
        .iter(app.world())
        .find(|(l, _)| **l == which)
        .map(|(_, t)| t.0.clone())
        .expect("label missing")
}
