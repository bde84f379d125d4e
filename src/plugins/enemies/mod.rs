//! Enemies plugin: spawn director, arrival rules and ranger fire loops.
//!
//! ---------------------------
//! LIFECYCLE
//! ---------------------------
//! ```text
//! Update:       run_spawn_director  -> body + marker + registry entry
//! FixedUpdate:  advance_travel      -> Arrived { Breach | HoldAndFire }
//!               handle_enemy_arrivals
//!                 Breach      -> resolve_breach -> GameState::apply_all
//!                 HoldAndFire -> insert FireLoop, first shot
//!               ranger_fire         -> SpawnProjectileRequest every period
//! FixedPostUpdate: projectile collisions (projectiles plugin)
//! ```
//!
//! Every follow-up names its enemy by `Entity` and is checked against the
//! registry when it runs. The registry entry, not the entity, is the proof an
//! enemy is alive: once the kill path or the breach path removes it, the other
//! path finds nothing and does nothing.
//!
//! Removal despawns the body, which drops its `Travel` and `FireLoop`. That is
//! the cancellation mechanism; rangers have no other way to stop shooting.

pub mod spawn;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::geometry;
use crate::common::layers::Layer;
use crate::common::registry::{Enemy, Role};
use crate::common::state::{Effect, GameOver, GameState, Removal, Screen};
use crate::common::tunables::Tunables;
use crate::plugins::flow::settle;
use crate::plugins::markers::{self, marker_pose};
use crate::plugins::motion::{self, Arrival, Arrived, Travel};
use crate::plugins::player::Player;
use crate::plugins::projectiles::messages::{ProjectileKind, SpawnProjectileRequest};

use spawn::{plan_spawn, RareEventStreak, SpawnPlan};

/// Marker for an enemy's physics body.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyBody;

/// Repeating shot timer, present once a ranger holds its stand-off point.
#[derive(Component, Debug, Clone)]
pub struct FireLoop(pub Timer);

/// Spawn cadence plus the two anti-starvation streaks.
#[derive(Resource, Debug, Clone)]
pub struct SpawnDirector {
    pub clock: Timer,
    pub left: RareEventStreak,
    pub ranger: RareEventStreak,
}

impl SpawnDirector {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            clock: Timer::from_seconds(tunables.spawn_period, TimerMode::Repeating),
            left: RareEventStreak::new(tunables.left_roll_base, tunables.left_roll_base),
            ranger: RareEventStreak::new(tunables.ranger_roll_base, tunables.ranger_threshold),
        }
    }
}

#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

pub fn plugin(app: &mut App) {
    let director = SpawnDirector::new(app.world().resource::<Tunables>());
    app.insert_resource(director)
        .init_resource::<SpawnRng>()
        .add_systems(OnEnter(Screen::InGame), reset_director);

    app.add_systems(
        Update,
        run_spawn_director.run_if(in_state(Screen::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        (handle_enemy_arrivals, ranger_fire)
            .chain()
            .after(motion::advance_travel)
            .run_if(in_state(Screen::InGame)),
    );
}

fn reset_director(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(SpawnDirector::new(&tunables));
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

pub fn run_spawn_director(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut director: ResMut<SpawnDirector>,
    mut rng: ResMut<SpawnRng>,
    mut state: ResMut<GameState>,
    q_player: Query<&Transform, With<Player>>,
    mut commands: Commands,
) {
    let SpawnDirector { clock, left, ranger } = &mut *director;

    clock.tick(time.delta());
    let due = clock.times_finished_this_tick();
    if due == 0 {
        return;
    }

    let Ok(player_tf) = q_player.single() else {
        debug!("spawn skipped: no player");
        return;
    };
    let player = player_tf.translation.truncate();

    for _ in 0..due {
        let plan = plan_spawn(&tunables, left, ranger, player, &mut rng.0);
        spawn_enemy(&mut commands, &tunables, &mut state, player, &plan);
    }
}

/// Spawn the body and its marker, and register them as one enemy.
pub fn spawn_enemy(
    commands: &mut Commands,
    tunables: &Tunables,
    state: &mut GameState,
    player: Vec2,
    plan: &SpawnPlan,
) -> Entity {
    let (name, color, arrival) = match plan.role {
        Role::Grunt => ("Grunt", Color::srgb(0.9, 0.25, 0.25), Arrival::Breach),
        Role::Ranger => ("Ranger", Color::srgb(0.6, 0.3, 0.9), Arrival::HoldAndFire),
    };
    let (travel, vel) = Travel::between(plan.start, plan.destination, plan.travel_secs, arrival);
    let size = tunables.enemy_size;

    let body = commands
        .spawn((
            Name::new(name),
            EnemyBody,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(plan.start.extend(1.0)),
            RigidBody::Kinematic,
            Collider::rectangle(size.x, size.y),
            Layer::enemy(),
            travel,
            vel,
            DespawnOnExit(Screen::InGame),
        ))
        .id();

    let marker = markers::spawn_marker(commands, body, marker_pose(player, plan.start, tunables));
    let distance = geometry::distance(player, plan.start);
    let id = state
        .registry
        .insert(Enemy::new(body, marker, plan.role, plan.side, distance, tunables));

    info!(
        "spawned {name} #{} from {:?} heading to {:?} over {:.2}s",
        id.0, plan.side, plan.destination, plan.travel_secs
    );
    body
}

// -----------------------------------------------------------------------------
// Arrival rules
// -----------------------------------------------------------------------------

/// Loss path: the enemy crossed the arena unintercepted.
///
/// Resolves to nothing when the enemy is no longer registered (it was killed
/// while the arrival was in flight).
pub fn resolve_breach(target: Entity, state: &GameState, tunables: &Tunables) -> Vec<Effect> {
    if !state.registry.contains(target) {
        debug!("breach ignored, enemy {target} already gone");
        return Vec::new();
    }
    vec![
        Effect::RemoveEnemy { target, cause: Removal::Breached },
        Effect::DamagePlayer { amount: tunables.breach_damage },
    ]
}

pub fn handle_enemy_arrivals(
    mut arrivals: MessageReader<Arrived>,
    tunables: Res<Tunables>,
    mut state: ResMut<GameState>,
    q_bodies: Query<&Transform, With<EnemyBody>>,
    q_player: Query<&Transform, With<Player>>,
    mut commands: Commands,
    mut shots: MessageWriter<SpawnProjectileRequest>,
    mut game_over: MessageWriter<GameOver>,
) {
    for ev in arrivals.read() {
        match ev.arrival {
            Arrival::Breach => {
                let effects = resolve_breach(ev.entity, &state, &tunables);
                let aftermath = state.apply_all(effects);
                settle(&mut commands, aftermath, &mut game_over);
            }
            Arrival::HoldAndFire => {
                if !state.registry.contains(ev.entity) {
                    continue;
                }
                commands.entity(ev.entity).insert(FireLoop(Timer::from_seconds(
                    tunables.ranger_fire_period,
                    TimerMode::Repeating,
                )));

                // First shot goes out on arrival, then once per period.
                let (Ok(body_tf), Ok(player_tf)) = (q_bodies.get(ev.entity), q_player.single()) else {
                    continue;
                };
                shots.write(SpawnProjectileRequest {
                    kind: ProjectileKind::Enemy,
                    origin: body_tf.translation.truncate(),
                    target: player_tf.translation.truncate(),
                });
            }
            Arrival::Expire => {}
        }
    }
}

pub fn ranger_fire(
    time: Res<Time<Fixed>>,
    mut q_rangers: Query<(&Transform, &mut FireLoop), With<EnemyBody>>,
    q_player: Query<&Transform, (With<Player>, Without<EnemyBody>)>,
    mut shots: MessageWriter<SpawnProjectileRequest>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let target = player_tf.translation.truncate();

    for (tf, mut fire) in &mut q_rangers {
        fire.0.tick(time.delta());
        for _ in 0..fire.0.times_finished_this_tick() {
            shots.write(SpawnProjectileRequest {
                kind: ProjectileKind::Enemy,
                origin: tf.translation.truncate(),
                target,
            });
        }
    }
}

#[cfg(test)]
mod tests;
