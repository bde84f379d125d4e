//! Projectiles plugin: message-based producer -> consumer spawning plus
//! contact resolution.
//!
//! # Data flow
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: request_player_shots                                       │
//!│      - reads: touch / left mouse release, MainCamera, Player Transform    │
//!│      - writes: SpawnProjectileRequest { kind: Player }                    │
//!│                                                                           │
//!│  (B) Consumer: spawn_requested_projectiles                                │
//!│      - reads: SpawnProjectileRequest (player + ranger fire loops)         │
//!│      - spawns: sensor body with Travel { arrival: Expire }                │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) advance_travel -> Arrived { Expire } -> expire_projectiles           │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (Avian)                        │
//!│  (E) process_projectile_contacts                                          │
//!│      - normalizes the pair, resolve_contact -> Effects                    │
//!│      - GameState::apply_all, then despawn + optional GameOver             │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never spawn directly. Ranger fire loops live in the enemies
//! plugin and only enqueue requests here.

pub mod collision;
pub mod components;
pub mod messages;
pub mod request;
pub mod spawner;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::Screen;
use crate::plugins::motion;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<messages::SpawnProjectileRequest>();

        // Update-phase pipeline: request -> spawn
        app.add_systems(
            Update,
            (
                request::request_player_shots,
                spawner::spawn_requested_projectiles.after(request::request_player_shots),
            )
                .run_if(in_state(Screen::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            spawner::expire_projectiles
                .after(motion::advance_travel)
                .run_if(in_state(Screen::InGame)),
        );

        // Fixed collision pipeline
        app.add_systems(
            FixedPostUpdate,
            collision::process_projectile_contacts
                .after(CollisionEventSystems)
                .run_if(in_state(Screen::InGame)),
        );
    }
}
