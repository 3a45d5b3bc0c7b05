//! Headless unit tests for the [`GameState`] state machine.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no audio —
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `Menu`.
//! 2. A `NextState` request transitions `Menu` → `Playing` (the start key).
//! 3. `Playing` persists across frames with no new transition request.
//! 4. `Playing` → `Win` → `Playing` restart path skips the menu.
//! 5. `Playing` → `Lose` → `Playing` restart path skips the menu.
//! 6. `insert_state` can force-start directly in `Playing`.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use retroburn::menu::GameState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via `init_state`.
///
/// `MinimalPlugins` provides the required scheduling infrastructure.
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update(); // StateTransition fires before Update
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `Menu`.
#[test]
fn default_state_is_menu() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(current_state(&app), GameState::Menu, "initial state must be Menu");
}

/// Requesting `Playing` via `NextState` transitions the state on the next
/// `StateTransition` pass — the start-key path.
#[test]
fn start_transitions_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update();

    set_state(&mut app, GameState::Playing);

    assert_eq!(current_state(&app), GameState::Playing);
}

/// `Playing` persists across additional frames — no accidental reversion.
#[test]
fn playing_state_persists_across_frames() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);

    for _ in 0..5 {
        app.update();
    }

    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "Playing must remain stable without a new transition"
    );
}

/// A resolved session restarts straight into `Playing`; the menu is never
/// re-entered.
#[test]
fn win_restart_returns_to_playing() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);
    set_state(&mut app, GameState::Win);
    assert_eq!(current_state(&app), GameState::Win);

    set_state(&mut app, GameState::Playing);
    assert_eq!(current_state(&app), GameState::Playing);
}

/// Same restart contract from the crash screen.
#[test]
fn lose_restart_returns_to_playing() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);
    set_state(&mut app, GameState::Lose);
    assert_eq!(current_state(&app), GameState::Lose);

    set_state(&mut app, GameState::Playing);
    assert_eq!(current_state(&app), GameState::Playing);
}

/// `insert_state` can force the initial state to `Playing` directly, which is
/// what the simulation's own tests use to skip the menu.
#[test]
fn insert_state_starts_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();

    assert_eq!(
        current_state(&app),
        GameState::Playing,
        "insert_state(Playing) must start directly in Playing"
    );
}
