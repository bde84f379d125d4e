//! HUD: live enemy count, kills and health.
//!
//! Labels are plain UI text. They only redraw when `GameState` changes, in
//! `PostUpdate` so every rule that ran this frame is already reflected.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::{GameState, Screen};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLabel {
    EnemyCount,
    Kills,
    Health,
}

impl HudLabel {
    pub const ALL: [HudLabel; 3] = [HudLabel::EnemyCount, HudLabel::Kills, HudLabel::Health];

    pub fn render(self, state: &GameState) -> String {
        match self {
            HudLabel::EnemyCount => format!("Enemies: {}", state.live_enemies()),
            HudLabel::Kills => format!("Kills: {}", state.kills),
            HudLabel::Health => format!("Health: {}", state.health),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::InGame), spawn_hud).add_systems(
        PostUpdate,
        refresh_hud
            .run_if(in_state(Screen::InGame))
            .run_if(resource_changed::<GameState>),
    );
}

fn spawn_hud(mut commands: Commands, state: Res<GameState>) {
    commands
        .spawn((
            Name::new("Hud"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            DespawnOnExit(Screen::InGame),
        ))
        .with_children(|parent| {
            for label in HudLabel::ALL {
                parent.spawn((
                    label,
                    Text::new(label.render(&state)),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });
}

pub fn refresh_hud(state: Res<GameState>, mut q_labels: Query<(&HudLabel, &mut Text)>) {
    for (label, mut text) in &mut q_labels {
        let next = label.render(&state);
        if text.0 != next {
            text.0 = next;
        }
    }
}
