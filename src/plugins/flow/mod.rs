//! Round flow: applying rule aftermath, the game-over screen, and restart.
//!
//! ```text
//! rules -> settle(Aftermath) -> despawn + GameOver { outcome }
//! Update (InGame):     enter_game_over  -> LastOutcome, NextState(GameOver)
//! OnEnter(GameOver):   show_banner      -> "You Won!" / "You Lose"
//! Update (GameOver):   hold_then_restart -> NextState(InGame) after the hold
//! OnEnter(InGame):     reset_round      -> fresh GameState
//! ```
//!
//! Everything spawned during a round is scoped to `Screen::InGame`, so leaving
//! the screen is the whole cleanup.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::{Aftermath, GameOver, GameState, Outcome, Screen};
use crate::common::tunables::Tunables;

/// Outcome of the round that just ended.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastOutcome(pub Outcome);

/// Time left on the game-over screen.
#[derive(Resource, Debug)]
pub struct GameOverHold(pub Timer);

#[derive(Component)]
pub struct OutcomeBanner;

pub fn plugin(app: &mut App) {
    app.add_message::<GameOver>()
        .add_systems(OnEnter(Screen::InGame), reset_round)
        .add_systems(OnEnter(Screen::GameOver), show_banner)
        .add_systems(Update, enter_game_over.run_if(in_state(Screen::InGame)))
        .add_systems(Update, hold_then_restart.run_if(in_state(Screen::GameOver)));
}

/// Finish what the rules decided: despawn released entities and request the
/// terminal transition if one was reached.
pub fn settle(commands: &mut Commands, aftermath: Aftermath, game_over: &mut MessageWriter<GameOver>) {
    for entity in aftermath.despawn {
        commands.entity(entity).try_despawn();
    }
    if let Some(outcome) = aftermath.outcome {
        info!("round over: {outcome:?}");
        game_over.write(GameOver { outcome });
    }
}

fn reset_round(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(GameState::new(&tunables));
    commands.remove_resource::<LastOutcome>();
}

pub fn enter_game_over(
    mut requests: MessageReader<GameOver>,
    mut commands: Commands,
    mut next: ResMut<NextState<Screen>>,
) {
    // GameState latches the outcome, so at most one request arrives per round.
    let Some(request) = requests.read().last() else {
        return;
    };
    commands.insert_resource(LastOutcome(request.outcome));
    next.set(Screen::GameOver);
}

pub fn banner_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "You Won!",
        Outcome::Lost => "You Lose",
    }
}

fn show_banner(mut commands: Commands, tunables: Res<Tunables>, outcome: Option<Res<LastOutcome>>) {
    let text = outcome.map_or("Game Over", |o| banner_text(o.0));

    commands.insert_resource(GameOverHold(Timer::from_seconds(
        tunables.game_over_hold_secs,
        TimerMode::Once,
    )));

    commands.spawn((
        Name::new("OutcomeBanner"),
        OutcomeBanner,
        Text::new(text),
        TextFont {
            font_size: 64.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(45.0),
            left: Val::Percent(40.0),
            ..default()
        },
        DespawnOnExit(Screen::GameOver),
    ));
}

pub fn hold_then_restart(
    time: Res<Time>,
    mut hold: ResMut<GameOverHold>,
    mut next: ResMut<NextState<Screen>>,
) {
    hold.0.tick(time.delta());
    if hold.0.just_finished() {
        next.set(Screen::InGame);
    }
}
