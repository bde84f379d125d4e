//! Screen state machine and the per-round game state.
//!
//! `GameState` is the single owner of round facts: player health, kills, the
//! enemy registry and the outcome latch. Rules never touch it directly from
//! engine callbacks; they produce [`Effect`]s and the caller applies them
//! here, which keeps every mutation path idempotent and testable without a
//! running engine.

use bevy::prelude::*;

use crate::common::registry::EnemyRegistry;
use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum Screen {
    #[default]
    InGame,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Request to leave the round, carrying the win/loss flag.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub outcome: Outcome,
}

/// Why an enemy left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Killed,
    /// Reached its far waypoint without being intercepted.
    Breached,
}

/// A single state change produced by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ConsumeProjectile(Entity),
    WoundEnemy { target: Entity },
    RemoveEnemy { target: Entity, cause: Removal },
    DamagePlayer { amount: u32 },
}

/// What the engine side still has to do after effects were applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Aftermath {
    pub despawn: Vec<Entity>,
    pub outcome: Option<Outcome>,
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub health: u32,
    pub kills: u32,
    pub registry: EnemyRegistry,
    kill_goal: Option<u32>,
    outcome: Option<Outcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Tunables::default())
    }
}

impl GameState {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            health: tunables.starting_health,
            kills: 0,
            registry: EnemyRegistry::default(),
            kill_goal: tunables.kill_goal,
            outcome: None,
        }
    }

    #[inline]
    pub fn live_enemies(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Latch the round outcome. Only the first call wins.
    fn conclude(&mut self, outcome: Outcome) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Saturating damage. Returns `Lost` exactly once, on the hit that takes
    /// health to zero.
    pub fn damage_player(&mut self, amount: u32) -> Option<Outcome> {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.conclude(Outcome::Lost)
        } else {
            None
        }
    }

    pub fn apply(&mut self, effect: Effect, out: &mut Aftermath) {
        match effect {
            Effect::ConsumeProjectile(projectile) => out.despawn.push(projectile),
            Effect::WoundEnemy { target } => match self.registry.get_mut(target) {
                Some(enemy) => enemy.hp = enemy.hp.saturating_sub(1),
                None => debug!("wound ignored, enemy {target} already gone"),
            },
            Effect::RemoveEnemy { target, cause } => match self.registry.remove(target) {
                Ok(enemy) => {
                    out.despawn.extend([enemy.target, enemy.marker]);
                    if cause == Removal::Killed {
                        self.kills += 1;
                        info!("enemy #{} killed, {} kills", enemy.id.0, self.kills);
                        if self.kill_goal.is_some_and(|goal| self.kills >= goal) {
                            out.outcome = out.outcome.or(self.conclude(Outcome::Won));
                        }
                    }
                }
                Err(err) => debug!("removal ignored: {err}"),
            },
            Effect::DamagePlayer { amount } => {
                out.outcome = out.outcome.or(self.damage_player(amount));
            }
        }
    }

    pub fn apply_all(&mut self, effects: impl IntoIterator<Item = Effect>) -> Aftermath {
        let mut out = Aftermath::default();
        for effect in effects {
            self.apply(effect, &mut out);
        }
        out
    }
}
