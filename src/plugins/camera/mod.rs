//! Camera plugin (render-only).
//!
//! The arena is fixed and fits the window, so the camera never moves. It sits
//! over the arena centre, which puts the bottom-left arena corner at the
//! bottom-left of the viewport.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera at arena * 0.5
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::Screen;
use crate::common::tunables::Tunables;

/// The one camera used for viewport -> world conversion.
#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::InGame), spawn_camera)
        .add_systems(OnEnter(Screen::GameOver), spawn_overlay_camera);
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        FireflyConfig::default(),
        Transform::from_translation(tunables.player_post().extend(999.0)),
        DespawnOnExit(Screen::InGame),
    ));
}

/// UI needs a camera while the banner is up.
fn spawn_overlay_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("OverlayCamera"),
        Camera2d,
        DespawnOnExit(Screen::GameOver),
    ));
}
