//! Game state machine and full-screen UI: main menu, win and lose overlays.
//!
//! ## States
//!
//! | State     | Description                                   |
//! |-----------|-----------------------------------------------|
//! | `Menu`    | Initial state; splash screen shown            |
//! | `Playing` | Simulation running; all gameplay systems active |
//! | `Win`     | Touchdown succeeded; score overlay shown      |
//! | `Lose`    | Vehicle crashed; crash overlay shown          |
//!
//! `Menu` is only ever shown at startup — restarting from `Win`/`Lose` goes
//! straight back to `Playing` through the same session reset.  Quitting is
//! available from every state (Q key, quit buttons, window close) and always
//! exits cleanly.

use crate::score::{HighScore, SessionScore};
use crate::vehicle::VehicleMode;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every gameplay system runs under `.run_if(in_state(GameState::Playing))`,
/// so the simulation is fully inactive on the menu and result screens.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Main-menu splash screen; shown on startup.
    #[default]
    Menu,
    /// Active descent.
    Playing,
    /// Touchdown within tolerance; session resolved.
    Win,
    /// Crashed; session resolved.
    Lose,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the main-menu UI; entire tree is despawned on `OnExit(Menu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags the "Fly Lander" button (single-stage mode).
#[derive(Component)]
pub struct MenuLanderButton;

/// Tags the "Catch Booster" button (multi-stage mode).
#[derive(Component)]
pub struct MenuBoosterButton;

/// Tags every "Quit" button (menu and result overlays).
#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of a win/lose overlay; despawned when the state is left.
#[derive(Component)]
pub struct ResultOverlayRoot;

/// Tags the "Play Again" button on the result overlays.
#[derive(Component)]
pub struct PlayAgainButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the menu and result-screen UI, and the global quit
/// key.  Must be added before any plugin that calls
/// `.run_if(in_state(GameState::…))` so the state is registered first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<VehicleMode>()
            .add_systems(OnEnter(GameState::Menu), setup_main_menu)
            .add_systems(OnExit(GameState::Menu), cleanup_main_menu)
            .add_systems(
                Update,
                (menu_button_system, menu_keyboard_system).run_if(in_state(GameState::Menu)),
            )
            .add_systems(OnEnter(GameState::Win), setup_win_overlay)
            .add_systems(OnEnter(GameState::Lose), setup_lose_overlay)
            .add_systems(OnExit(GameState::Win), cleanup_result_overlay)
            .add_systems(OnExit(GameState::Lose), cleanup_result_overlay)
            .add_systems(
                Update,
                result_overlay_system
                    .run_if(in_state(GameState::Win).or(in_state(GameState::Lose))),
            )
            .add_systems(Update, quit_key_system);
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn start_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
fn start_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
fn start_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
fn booster_bg() -> Color {
    Color::srgb(0.07, 0.18, 0.38)
}
fn booster_border() -> Color {
    Color::srgb(0.20, 0.45, 0.85)
}
fn booster_text() -> Color {
    Color::srgb(0.70, 0.85, 1.0)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
fn hint_color() -> Color {
    Color::srgb(0.28, 0.28, 0.35)
}
fn win_color() -> Color {
    Color::srgb(0.30, 1.0, 0.40)
}
fn lose_color() -> Color {
    Color::srgb(1.0, 0.22, 0.22)
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Spawn one standard menu button with a centred label.
fn menu_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    bg: Color,
    border: Color,
    text: Color,
    marker: impl Bundle,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(260.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

// ── OnEnter(Menu): spawn UI ───────────────────────────────────────────────────

/// Spawn the full-screen main-menu overlay: title, controls blurb, the two
/// vehicle-mode start buttons, quit, and the loaded high score.
pub fn setup_main_menu(mut commands: Commands, high: Res<HighScore>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("RETROBURN"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Bring it down in one piece"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 32.0);

            for line in [
                "UP/W thrust · LEFT/RIGHT or A/D rotate",
                "SPACE emergency boost (booster only)",
                "Touch down slow and level on the pad",
            ] {
                root.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                    TextColor(subtitle_color()),
                ));
            }

            spacer(root, 32.0);

            menu_button(
                root,
                "FLY LANDER",
                start_bg(),
                start_border(),
                start_text(),
                MenuLanderButton,
            );
            spacer(root, 14.0);
            menu_button(
                root,
                "CATCH BOOSTER",
                booster_bg(),
                booster_border(),
                booster_text(),
                MenuBoosterButton,
            );
            spacer(root, 14.0);
            menu_button(root, "QUIT", quit_bg(), quit_border(), quit_text(), MenuQuitButton);

            spacer(root, 32.0);

            root.spawn((
                Text::new(format!("High Score: {}", high.0)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 20.0);

            root.spawn((
                Text::new("SPACE to launch  ·  Q to quit"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Recursively despawn all main-menu entities.
pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (Menu only) ────────────────────────────────────────────────────────

/// Handle the two start buttons and the quit button.
///
/// Starting selects the [`VehicleMode`] the button represents and transitions
/// to `Playing`, which triggers the session reset.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    lander_query: Query<&Interaction, (Changed<Interaction>, With<MenuLanderButton>)>,
    booster_query: Query<&Interaction, (Changed<Interaction>, With<MenuBoosterButton>)>,
    quit_query: Query<&Interaction, (Changed<Interaction>, With<MenuQuitButton>)>,
    mut mode: ResMut<VehicleMode>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if lander_query.iter().any(|i| *i == Interaction::Pressed) {
        *mode = VehicleMode::SingleStage;
        next_state.set(GameState::Playing);
    }
    if booster_query.iter().any(|i| *i == Interaction::Pressed) {
        *mode = VehicleMode::MultiStage;
        next_state.set(GameState::Playing);
    }
    if quit_query.iter().any(|i| *i == Interaction::Pressed) {
        exit.write(bevy::app::AppExit::Success);
    }
}

/// Keyboard path: SPACE launches with the currently selected mode; 1/2 pick
/// the mode explicitly.
pub fn menu_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<VehicleMode>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Digit1) {
        *mode = VehicleMode::SingleStage;
    }
    if keys.just_pressed(KeyCode::Digit2) {
        *mode = VehicleMode::MultiStage;
    }
    if keys.just_pressed(KeyCode::Space) {
        next_state.set(GameState::Playing);
    }
}

// ── Result overlays ───────────────────────────────────────────────────────────

fn result_overlay(
    commands: &mut Commands,
    headline: &str,
    headline_color: Color,
    score_line: String,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(300),
            ResultOverlayRoot,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new(headline),
                TextFont {
                    font_size: 46.0,
                    ..default()
                },
                TextColor(headline_color),
            ));

            spacer(overlay, 14.0);

            overlay.spawn((
                Text::new(score_line),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(overlay, 28.0);

            menu_button(
                overlay,
                "PLAY AGAIN",
                start_bg(),
                start_border(),
                start_text(),
                PlayAgainButton,
            );
            spacer(overlay, 14.0);
            menu_button(overlay, "QUIT", quit_bg(), quit_border(), quit_text(), MenuQuitButton);

            spacer(overlay, 20.0);

            overlay.spawn((
                Text::new("R to fly again  ·  Q to quit"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Spawn the success overlay with the session score.
pub fn setup_win_overlay(mut commands: Commands, score: Res<SessionScore>) {
    result_overlay(
        &mut commands,
        "TOUCHDOWN CONFIRMED",
        win_color(),
        format!("Score: {}", score.0),
    );
}

/// Spawn the crash overlay with the final score.
pub fn setup_lose_overlay(mut commands: Commands, score: Res<SessionScore>) {
    result_overlay(
        &mut commands,
        "CRASH",
        lose_color(),
        format!("Final Score: {}", score.0),
    );
}

/// Recursively despawn the result overlay.
pub fn cleanup_result_overlay(
    mut commands: Commands,
    query: Query<Entity, With<ResultOverlayRoot>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Play Again (button or R key) and Quit on the result overlays.
///
/// Restarting goes straight back to `Playing` — the menu is never re-entered.
#[allow(clippy::type_complexity)]
pub fn result_overlay_system(
    play_query: Query<&Interaction, (Changed<Interaction>, With<PlayAgainButton>)>,
    quit_query: Query<&Interaction, (Changed<Interaction>, With<MenuQuitButton>)>,
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    let wants_restart = keys.just_pressed(KeyCode::KeyR)
        || play_query.iter().any(|i| *i == Interaction::Pressed);

    if wants_restart {
        next_state.set(GameState::Playing);
        return;
    }

    if quit_query.iter().any(|i| *i == Interaction::Pressed) {
        exit.write(bevy::app::AppExit::Success);
    }
}

// ── Global quit key ───────────────────────────────────────────────────────────

/// Q quits from any state; the high score is persisted by the exit hook.
pub fn quit_key_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyQ) {
        exit.write(bevy::app::AppExit::Success);
    }
}
