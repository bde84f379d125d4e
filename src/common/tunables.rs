//! Tunable gameplay constants.
//!
//! The arena uses screen-style coordinates: the origin is the bottom-left
//! corner and the playfield spans `[0, arena.x] x [0, arena.y]`. Enemies spawn
//! just beyond the left and right edges.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub arena: Vec2,

    pub player_size: f32,
    pub starting_health: u32,

    pub enemy_size: Vec2,
    pub grunt_hp: u32,
    pub ranger_hp: u32,
    pub ranger_sight_radius: f32,
    pub ranger_danger_close_radius: f32,
    pub ranger_fire_period: f32,

    pub spawn_period: f32,
    /// Left spawns fire when the rounded roll in `[0, base + streak]` reaches `base`.
    pub left_roll_base: u32,
    pub ranger_roll_base: u32,
    pub ranger_threshold: u32,
    pub travel_secs: (f32, f32),
    /// Half-width of the vertical wander applied to grunt destinations.
    pub grunt_deviation: f32,

    pub projectile_radius: f32,
    pub projectile_reach: f32,
    pub projectile_flight_secs: f32,
    pub breach_damage: u32,
    pub projectile_damage: u32,

    pub marker_period: f32,
    pub marker_offset: f32,
    pub marker_base_size: f32,
    pub marker_reference_distance: f32,
    pub marker_max_size: f32,

    pub kill_goal: Option<u32>,
    pub game_over_hold_secs: f32,
}

impl Tunables {
    #[inline]
    pub fn enemy_half(&self) -> Vec2 {
        self.enemy_size * 0.5
    }

    /// Where the player stands for the whole round.
    #[inline]
    pub fn player_post(&self) -> Vec2 {
        self.arena * 0.5
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            arena: Vec2::new(1280.0, 720.0),

            player_size: 26.0,
            starting_health: 100,

            enemy_size: Vec2::splat(32.0),
            grunt_hp: 1,
            ranger_hp: 3,
            ranger_sight_radius: 200.0,
            ranger_danger_close_radius: 10.0,
            ranger_fire_period: 2.0,

            spawn_period: 1.0,
            left_roll_base: 15,
            ranger_roll_base: 20,
            ranger_threshold: 19,
            travel_secs: (1.5, 10.0),
            grunt_deviation: 60.0,

            projectile_radius: 4.0,
            projectile_reach: 2000.0,
            projectile_flight_secs: 1.5,
            breach_damage: 1,
            projectile_damage: 1,

            marker_period: 0.1,
            marker_offset: 50.0,
            marker_base_size: 15.0,
            marker_reference_distance: 100.0,
            marker_max_size: 10.0,

            kill_goal: None,
            game_over_hold_secs: 3.0,
        }
    }
}
