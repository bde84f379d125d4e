//! Timed travel: move to a destination over a fixed duration, then report.
//!
//! This is the scheduling primitive every mover shares. A `Travel` carries the
//! follow-up to run on arrival as data (`Arrival`), never as a closure, so the
//! follow-up is resolved by entity id when it fires. Despawning the entity
//! drops its `Travel`, which cancels the pending follow-up.
//!
//! ```text
//! FixedUpdate: advance_travel
//!   - ticks Travel timers
//!   - on finish: snap to destination, stop, remove Travel, write Arrived
//! FixedUpdate (after): consumers read Arrived and match on `arrival`
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::Screen;

/// What a mover does once it reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Enemy slipped past the player: loss path.
    Breach,
    /// Ranger reached its stand-off point and starts shooting.
    HoldAndFire,
    /// Projectile flight is over.
    Expire,
}

#[derive(Component, Debug, Clone)]
pub struct Travel {
    pub destination: Vec2,
    pub timer: Timer,
    pub arrival: Arrival,
}

impl Travel {
    /// Travel plus the constant velocity that covers `start -> destination`
    /// in `secs`.
    pub fn between(start: Vec2, destination: Vec2, secs: f32, arrival: Arrival) -> (Self, LinearVelocity) {
        let secs = secs.max(f32::EPSILON);
        (
            Self {
                destination,
                timer: Timer::from_seconds(secs, TimerMode::Once),
                arrival,
            },
            LinearVelocity((destination - start) / secs),
        )
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrived {
    pub entity: Entity,
    pub arrival: Arrival,
}

pub fn plugin(app: &mut App) {
    app.add_message::<Arrived>().add_systems(
        FixedUpdate,
        advance_travel.run_if(in_state(Screen::InGame)),
    );
}

pub fn advance_travel(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Travel, &mut Transform, &mut LinearVelocity)>,
    mut arrived: MessageWriter<Arrived>,
) {
    for (e, mut travel, mut tf, mut vel) in &mut q {
        travel.timer.tick(time.delta());
        if !travel.timer.is_finished() {
            continue;
        }

        tf.translation.x = travel.destination.x;
        tf.translation.y = travel.destination.y;
        vel.0 = Vec2::ZERO;

        commands.entity(e).remove::<Travel>();
        arrived.write(Arrived { entity: e, arrival: travel.arrival });
    }
}
