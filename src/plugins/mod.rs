//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod enemies;
pub mod flow;
pub mod hud;
pub mod markers;
pub mod motion;
pub mod physics;
pub mod player;
pub mod projectiles;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    motion::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    markers::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    hud::plugin(app);
    flow::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
