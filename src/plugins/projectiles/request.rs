use bevy::ecs::message::MessageWriter;
use bevy::input::touch::Touches;
use bevy::prelude::*;

use crate::plugins::camera::MainCamera;
use crate::plugins::player::Player;

use super::messages::{ProjectileKind, SpawnProjectileRequest};

/// The viewport point of this frame's release, if any.
///
/// A lifted touch wins over the mouse; the first touch is the primary one.
pub fn release_point(touch: Option<Vec2>, mouse_released: bool, cursor: Option<Vec2>) -> Option<Vec2> {
    touch.or(if mouse_released { cursor } else { None })
}

/// Producer: on touch end (or left mouse release) aim from the player at the
/// release point and write a SpawnProjectileRequest message.
pub fn request_player_shots(
    touches: Option<Res<Touches>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    q_player: Query<&Transform, With<Player>>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    let touch = touches
        .as_ref()
        .and_then(|t| t.iter_just_released().next().map(|touch| touch.position()));
    let mouse_released = buttons
        .as_ref()
        .is_some_and(|b| b.just_released(MouseButton::Left));
    if touch.is_none() && !mouse_released {
        return;
    }

    let cursor = windows.single().ok().and_then(|w| w.cursor_position());
    let Some(point) = release_point(touch, mouse_released, cursor) else {
        debug!("release without a position");
        return;
    };

    let player_tf = match q_player.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single Player Transform: {e:?}"); return; }
    };

    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single MainCamera: {e:?}"); return; }
    };

    let target = match camera.viewport_to_world_2d(camera_tf, point) {
        Ok(p) => p,
        Err(e) => { debug!("viewport_to_world_2d failed: {e:?}"); return; }
    };

    writer.write(SpawnProjectileRequest {
        kind: ProjectileKind::Player,
        origin: player_tf.translation.truncate(),
        target,
    });
}
