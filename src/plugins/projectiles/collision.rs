//! Contact resolution for projectiles.
//!
//! Avian reports each started contact once, in whichever order it found the
//! pair. We normalize the pair by category bit, dispatch to a pure rule that
//! returns [`Effect`]s, and hand those to `GameState`. Nothing here mutates
//! the world directly except through the resulting `Aftermath`.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::state::{Effect, GameOver, GameState, Removal};
use crate::common::tunables::Tunables;
use crate::plugins::flow::settle;

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// One side of a contact: its gameplay category and owning entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactBody {
    pub layer: Layer,
    pub entity: Entity,
}

/// Put the side with the lower category bit first.
#[inline]
pub fn order_pair(a: ContactBody, b: ContactBody) -> (ContactBody, ContactBody) {
    if a.layer.to_bits() < b.layer.to_bits() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Rules for a started contact. Pairs outside the two hit rules resolve to
/// nothing.
pub fn resolve_contact(
    a: ContactBody,
    b: ContactBody,
    state: &GameState,
    tunables: &Tunables,
) -> Vec<Effect> {
    let (first, second) = order_pair(a, b);

    match (first.layer, second.layer) {
        (Layer::Enemy, Layer::PlayerProjectile) => {
            let Some(enemy) = state.registry.get(first.entity) else {
                // Already removed this frame; the projectile flies on.
                debug!("hit on unregistered enemy {}", first.entity);
                return Vec::new();
            };
            let projectile = Effect::ConsumeProjectile(second.entity);
            if enemy.hp <= 1 {
                vec![
                    projectile,
                    Effect::RemoveEnemy {
                        target: first.entity,
                        cause: Removal::Killed,
                    },
                ]
            } else {
                vec![projectile, Effect::WoundEnemy { target: first.entity }]
            }
        }
        (Layer::Player, Layer::EnemyProjectile) => vec![
            Effect::DamagePlayer {
                amount: tunables.projectile_damage,
            },
            Effect::ConsumeProjectile(second.entity),
        ],
        _ => Vec::new(),
    }
}

pub fn process_projectile_contacts(
    mut started: MessageReader<CollisionStart>,
    q_layers: Query<&CollisionLayers>,
    tunables: Res<Tunables>,
    mut state: ResMut<GameState>,
    mut commands: Commands,
    mut game_over: MessageWriter<GameOver>,
    // Projectiles consumed earlier in this batch
    mut spent: Local<HashSet<Entity>>,
) {
    spent.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let (Ok(l1), Ok(l2)) = (q_layers.get(t1.collider), q_layers.get(t2.collider)) else {
            continue;
        };
        let (Some(c1), Some(c2)) = (Layer::category_of(l1), Layer::category_of(l2)) else {
            continue;
        };

        let a = ContactBody { layer: c1, entity: t1.gameplay_owner() };
        let b = ContactBody { layer: c2, entity: t2.gameplay_owner() };
        if spent.contains(&a.entity) || spent.contains(&b.entity) {
            continue;
        }

        let effects = resolve_contact(a, b, &state, &tunables);
        for effect in &effects {
            if let Effect::ConsumeProjectile(projectile) = effect {
                spent.insert(*projectile);
            }
        }

        let aftermath = state.apply_all(effects);
        settle(&mut commands, aftermath, &mut game_over);
    }
}
