//! Unit tests for the enemies module.
//!
//! Submodule tests so they can reach the spawn planner and arrival rules
//! directly. Randomized properties use a seeded `StdRng`, so every case is
//! reproducible.

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::common::registry::Side;
use crate::common::test_utils::{drain_messages, fixed_time_with_delta, run_system_once, time_with_delta};
use crate::plugins::markers::NotificationMarker;

const PLAYER: Vec2 = Vec2::new(640.0, 360.0);

// -----------------------------------------------------------------------------
// Streak rolls
// -----------------------------------------------------------------------------

#[test]
fn streak_ceiling_grows_with_every_miss_and_resets_on_hit() {
    let mut left = RareEventStreak::new(15, 15);
    assert_eq!(left.ceiling(), 15.0);

    for _ in 0..14 {
        assert!(!left.settle(3.0));
    }
    assert_eq!(left.misses, 14);
    assert_eq!(left.ceiling(), 29.0);

    // 14.5 rounds up to the threshold.
    assert!(left.settle(14.5));
    assert_eq!(left.misses, 0);
    assert_eq!(left.ceiling(), 15.0);
}

#[test]
fn long_dry_spell_makes_a_left_spawn_markedly_more_likely() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let fresh = RareEventStreak::new(15, 15);
    let starved = RareEventStreak { misses: 14, ..fresh };

    let trials = 20_000;
    let hits = |streak: RareEventStreak, rng: &mut StdRng| {
        (0..trials).filter(|_| streak.clone().roll(rng)).count() as f32 / trials as f32
    };

    let p_fresh = hits(fresh, &mut rng);
    let p_starved = hits(starved, &mut rng);

    // Analytically 0.5/15 ~ 0.033 and 14.5/29 = 0.5.
    assert!(p_fresh < 0.06, "fresh odds {p_fresh}");
    assert!(p_starved > 0.4, "starved odds {p_starved}");
}

#[test]
fn uniform_handles_collapsed_range() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(spawn::uniform(&mut rng, 5.0, 5.0), 5.0);
    assert_eq!(spawn::uniform(&mut rng, 5.0, 1.0), 5.0);
    for _ in 0..1000 {
        let v = spawn::uniform(&mut rng, -60.0, 60.0);
        assert!((-60.0..=60.0).contains(&v));
    }
}

// -----------------------------------------------------------------------------
// Spawn plans
// -----------------------------------------------------------------------------

#[test]
fn plans_respect_edges_clamps_and_timing() {
    let tunables = Tunables::default();
    let mut director = SpawnDirector::new(&tunables);
    let mut rng = StdRng::seed_from_u64(0xDEAD_BEEF);
    let half = tunables.enemy_half();
    let arena = tunables.arena;

    let mut saw = (false, false, false, false);
    for _ in 0..5000 {
        let plan = plan_spawn(&tunables, &mut director.left, &mut director.ranger, PLAYER, &mut rng);

        assert!(plan.start.y >= half.y && plan.start.y <= arena.y - half.y);
        assert!(plan.travel_secs >= 1.5 && plan.travel_secs <= 10.0);

        match plan.side {
            Side::Left => {
                assert_eq!(plan.start.x, -half.x);
                saw.0 = true;
            }
            Side::Right => {
                assert_eq!(plan.start.x, arena.x + half.x);
                saw.1 = true;
            }
        }

        match plan.role {
            Role::Grunt => {
                saw.2 = true;
                let far_x = if plan.side == Side::Left { arena.x + half.x } else { -half.x };
                assert_eq!(plan.destination.x, far_x);
                assert!(plan.destination.y >= half.x && plan.destination.y <= arena.y - half.x);
                assert!((plan.destination.y - plan.start.y).abs() <= tunables.grunt_deviation + 1e-3);
            }
            Role::Ranger => {
                saw.3 = true;
                let d = geometry::distance(plan.destination, PLAYER);
                assert!((d - tunables.ranger_sight_radius).abs() < 1e-2);
            }
        }
    }

    assert!(saw.0 && saw.1 && saw.2 && saw.3, "all sides and roles should occur: {saw:?}");
}

#[test]
fn same_seed_replays_the_same_wave() {
    let tunables = Tunables::default();
    let plans = |seed| {
        let mut director = SpawnDirector::new(&tunables);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| plan_spawn(&tunables, &mut director.left, &mut director.ranger, PLAYER, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(plans(42), plans(42));
}

// -----------------------------------------------------------------------------
// ECS/system tests
// -----------------------------------------------------------------------------

fn base_world() -> World {
    let mut world = World::new();
    let tunables = Tunables::default();
    world.insert_resource(GameState::new(&tunables));
    world.insert_resource(SpawnDirector::new(&tunables));
    world.insert_resource(SpawnRng(StdRng::seed_from_u64(7)));
    world.insert_resource(tunables);
    world.init_resource::<Messages<Arrived>>();
    world.init_resource::<Messages<SpawnProjectileRequest>>();
    world.init_resource::<Messages<GameOver>>();
    world.spawn((Player, Transform::from_translation(PLAYER.extend(1.0))));
    world
}

fn spawn_planned(world: &mut World, role: Role) -> Entity {
    let plan = SpawnPlan {
        role,
        side: Side::Right,
        start: Vec2::new(1300.0, 360.0),
        destination: Vec2::new(-20.0, 360.0),
        travel_secs: 2.0,
    };
    run_system_once(
        world,
        move |mut commands: Commands, tunables: Res<Tunables>, mut state: ResMut<GameState>| {
            spawn_enemy(&mut commands, &tunables, &mut state, PLAYER, &plan)
        },
    )
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

#[test]
fn spawn_enemy_pairs_body_with_one_marker() {
    let mut world = base_world();
    let body = spawn_planned(&mut world, Role::Ranger);

    let state = world.resource::<GameState>();
    let enemy = state.registry.get(body).unwrap().clone();
    assert_eq!(enemy.role, Role::Ranger);
    assert_eq!(enemy.hp, 3);
    assert!((enemy.distance_to_player - 660.0).abs() < 1e-3);

    assert!(world.get::<EnemyBody>(body).is_some());
    assert!(world.get::<Travel>(body).is_some());
    assert_eq!(world.get::<NotificationMarker>(enemy.marker).unwrap().enemy, body);
    assert_eq!(count::<NotificationMarker>(&mut world), 1);
}

#[test]
fn director_spawns_once_per_period() {
    let mut world = base_world();
    world.insert_resource(time_with_delta(0.4));
    run_system_once(&mut world, run_spawn_director);
    assert_eq!(world.resource::<GameState>().live_enemies(), 0);

    world.insert_resource(time_with_delta(0.6));
    run_system_once(&mut world, run_spawn_director);
    assert_eq!(world.resource::<GameState>().live_enemies(), 1);

    world.insert_resource(time_with_delta(2.0));
    run_system_once(&mut world, run_spawn_director);
    assert_eq!(world.resource::<GameState>().live_enemies(), 3);

    // One marker per registered enemy, no strays.
    assert_eq!(count::<EnemyBody>(&mut world), 3);
    assert_eq!(count::<NotificationMarker>(&mut world), 3);
}

#[test]
fn grunt_breach_damages_player_without_credit() {
    let mut world = base_world();
    let body = spawn_planned(&mut world, Role::Grunt);
    let marker = world.resource::<GameState>().registry.get(body).unwrap().marker;

    world.write_message(Arrived { entity: body, arrival: Arrival::Breach });
    run_system_once(&mut world, handle_enemy_arrivals);

    let state = world.resource::<GameState>();
    assert_eq!(state.health, 99);
    assert_eq!(state.kills, 0);
    assert_eq!(state.live_enemies(), 0);
    assert!(world.get_entity(body).is_err());
    assert!(world.get_entity(marker).is_err());
}

#[test]
fn breach_after_kill_is_a_no_op() {
    let mut world = base_world();
    let body = spawn_planned(&mut world, Role::Grunt);

    let aftermath = world
        .resource_mut::<GameState>()
        .apply_all([Effect::RemoveEnemy { target: body, cause: Removal::Killed }]);
    assert_eq!(aftermath.despawn.len(), 2);

    world.write_message(Arrived { entity: body, arrival: Arrival::Breach });
    run_system_once(&mut world, handle_enemy_arrivals);

    let state = world.resource::<GameState>();
    assert_eq!(state.health, 100);
    assert_eq!(state.kills, 1);
}

#[test]
fn last_breach_requests_loss_once() {
    let mut world = base_world();
    world.resource_mut::<GameState>().health = 1;
    let a = spawn_planned(&mut world, Role::Grunt);
    let b = spawn_planned(&mut world, Role::Grunt);

    world.write_message(Arrived { entity: a, arrival: Arrival::Breach });
    world.write_message(Arrived { entity: b, arrival: Arrival::Breach });
    run_system_once(&mut world, handle_enemy_arrivals);

    assert_eq!(world.resource::<GameState>().health, 0);
    let requests = drain_messages::<GameOver>(&mut world);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].outcome, crate::common::state::Outcome::Lost);
}

#[test]
fn ranger_hold_starts_fire_loop_with_immediate_shot() {
    let mut world = base_world();
    let body = spawn_planned(&mut world, Role::Ranger);

    world.write_message(Arrived { entity: body, arrival: Arrival::HoldAndFire });
    run_system_once(&mut world, handle_enemy_arrivals);

    assert!(world.get::<FireLoop>(body).is_some());
    let shots = drain_messages::<SpawnProjectileRequest>(&mut world);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].kind, ProjectileKind::Enemy);
    assert_eq!(shots[0].target, PLAYER);
}

#[test]
fn hold_for_unregistered_ranger_does_nothing() {
    let mut world = base_world();
    let stray = world.spawn((EnemyBody, Transform::default())).id();

    world.write_message(Arrived { entity: stray, arrival: Arrival::HoldAndFire });
    run_system_once(&mut world, handle_enemy_arrivals);

    assert!(world.get::<FireLoop>(stray).is_none());
    assert!(drain_messages::<SpawnProjectileRequest>(&mut world).is_empty());
}

#[test]
fn fire_loop_shoots_once_per_period() {
    let mut world = base_world();
    world.spawn((
        EnemyBody,
        Transform::from_xyz(100.0, 100.0, 1.0),
        FireLoop(Timer::from_seconds(2.0, TimerMode::Repeating)),
    ));

    world.insert_resource(fixed_time_with_delta(1.0));
    run_system_once(&mut world, ranger_fire);
    assert!(drain_messages::<SpawnProjectileRequest>(&mut world).is_empty());

    world.insert_resource(fixed_time_with_delta(1.0));
    run_system_once(&mut world, ranger_fire);
    let shots = drain_messages::<SpawnProjectileRequest>(&mut world);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].origin, Vec2::new(100.0, 100.0));
}
