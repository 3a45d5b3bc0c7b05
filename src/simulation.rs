//! Simulation plugin: the fixed-tick gameplay pipeline and session reset.
//!
//! Every gameplay-mutating system runs in `FixedUpdate` (60 Hz) in one
//! explicitly chained sequence, so each tick is strictly sequential:
//!
//! 1. [`intent_clear_system`] — wipe last tick's input snapshot
//! 2. [`keyboard_to_intent_system`] — snapshot held keys
//! 3. [`apply_control_intent_system`] — thrust / rotation / boost / fuel
//! 4. [`kinematics_system`] — gravity, wind, position advance
//! 5. [`touchdown_evaluator_system`] — ground contact → win/lose
//! 6. [`catch_zone_system`] — cosmetic tower arms (multi-stage)
//! 7. [`survival_score_system`] — +1 per tick, including the resolving tick
//! 8. [`exhaust_emitter_system`] — thrust exhaust particles
//!
//! The whole chain is gated on `Playing` **and** the touchdown latch, so a
//! frame that happens to run several fixed steps cannot tick the session past
//! its resolution while the state transition is still pending.

use crate::config::TuningConfig;
use crate::landing::{
    catch_zone_system, session_unresolved, touchdown_evaluator_system, TouchdownLatch,
    TouchdownMessage,
};
use crate::level::{LevelCounter, LevelParams};
use crate::menu::GameState;
use crate::particles::exhaust_emitter_system;
use crate::rendering::world_gizmo_system;
use crate::score::{survival_score_system, SessionScore};
use crate::terrain::{CatchTower, LandingPad, Terrain};
use crate::vehicle::{
    apply_control_intent_system, despawn_vehicle_system, intent_clear_system,
    keyboard_to_intent_system, kinematics_system, spawn_vehicle, ControlIntent, ThrustState,
};
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlIntent>()
            .init_resource::<ThrustState>()
            .init_resource::<TouchdownLatch>()
            .init_resource::<LevelCounter>()
            .init_resource::<LevelParams>()
            .init_resource::<Terrain>()
            .init_resource::<LandingPad>()
            .init_resource::<CatchTower>()
            .add_message::<TouchdownMessage>()
            .add_systems(
                OnEnter(GameState::Playing),
                (reset_session_system, spawn_vehicle).chain(),
            )
            .add_systems(OnExit(GameState::Playing), despawn_vehicle_system)
            .add_systems(
                FixedUpdate,
                (
                    intent_clear_system,
                    keyboard_to_intent_system,
                    apply_control_intent_system,
                    kinematics_system,
                    touchdown_evaluator_system,
                    catch_zone_system,
                    survival_score_system,
                    exhaust_emitter_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing).and(session_unresolved)),
            )
            .add_systems(
                Update,
                world_gizmo_system.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Rebuild the per-session world on every entry into `Playing`.
///
/// Both `Menu → Playing` and the `Win|Lose → Playing` restart land here:
/// level parameters are re-derived from the (possibly advanced) counter, the
/// terrain is re-rolled, the pad and tower snap back to their configured
/// geometry, and the score, latch, and input snapshot are zeroed.  The
/// vehicle itself is spawned by [`spawn_vehicle`] immediately after.
#[allow(clippy::too_many_arguments)]
pub fn reset_session_system(
    config: Res<TuningConfig>,
    level: Res<LevelCounter>,
    mut params: ResMut<LevelParams>,
    mut terrain: ResMut<Terrain>,
    mut pad: ResMut<LandingPad>,
    mut tower: ResMut<CatchTower>,
    mut score: ResMut<SessionScore>,
    mut latch: ResMut<TouchdownLatch>,
    mut intent: ResMut<ControlIntent>,
    mut thrust: ResMut<ThrustState>,
) {
    *params = LevelParams::for_level(level.0, &config);
    terrain.regenerate(&config, &mut rand::thread_rng());
    *pad = LandingPad::from_config(&config);
    *tower = CatchTower::from_config(&config);
    score.0 = 0;
    latch.0 = false;
    *intent = ControlIntent::default();
    thrust.active = false;

    info!(
        "Session reset: level {}, gravity {:.2}/tick, wind {:.2}/tick, fuel {:.0}",
        level.0, params.gravity, params.wind, params.starting_fuel
    );
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Vehicle, VehicleMode};
    use bevy::state::app::StatesPlugin;

    /// Build an app running the whole gameplay chain in `Update` (one update
    /// = one tick), with no window, renderer, or real keyboard.
    fn build_sim_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.insert_state(GameState::Playing);
        app.insert_resource(TuningConfig::default());
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<ControlIntent>();
        app.init_resource::<ThrustState>();
        app.init_resource::<TouchdownLatch>();
        app.init_resource::<LevelCounter>();
        app.init_resource::<LevelParams>();
        app.init_resource::<Terrain>();
        app.init_resource::<LandingPad>();
        app.init_resource::<CatchTower>();
        app.init_resource::<SessionScore>();
        app.init_resource::<VehicleMode>();
        app.add_message::<TouchdownMessage>();
        app.add_systems(
            OnEnter(GameState::Playing),
            (reset_session_system, spawn_vehicle).chain(),
        );
        app.add_systems(OnExit(GameState::Playing), despawn_vehicle_system);
        app.add_systems(
            Update,
            (
                intent_clear_system,
                keyboard_to_intent_system,
                apply_control_intent_system,
                kinematics_system,
                touchdown_evaluator_system,
                catch_zone_system,
                survival_score_system,
            )
                .chain()
                .run_if(in_state(GameState::Playing).and(session_unresolved)),
        );
        app
    }

    fn current_state(app: &App) -> GameState {
        app.world().resource::<State<GameState>>().get().clone()
    }

    /// A full unpowered descent from the spawn point must resolve the
    /// session: gravity alone brings the vehicle down way over the velocity
    /// tolerance, so the run ends in `Lose` with survival score accumulated.
    #[test]
    fn unpowered_descent_resolves_to_lose() {
        let mut app = build_sim_app();

        let mut ticks = 0;
        while current_state(&app) != GameState::Lose {
            app.update();
            ticks += 1;
            assert!(ticks < 2000, "descent must resolve within 2000 ticks");
        }

        assert!(app.world().resource::<TouchdownLatch>().0);
        let score = app.world().resource::<SessionScore>().0;
        assert!(score > 0, "survival ticks must have accumulated, got {score}");

        // OnExit(Playing) removes the vehicle.
        let mut query = app.world_mut().query::<&Vehicle>();
        assert_eq!(query.iter(app.world()).count(), 0);
    }

    /// The session reset re-derives level parameters and zeroes the score
    /// and latch.
    #[test]
    fn reset_rebuilds_the_session_world() {
        let mut app = build_sim_app();
        app.update(); // OnEnter(Playing) runs

        assert_eq!(
            *app.world().resource::<LevelParams>(),
            LevelParams::for_level(1, &TuningConfig::default())
        );
        assert!(!app.world().resource::<Terrain>().points.is_empty());
        assert!(!app.world().resource::<TouchdownLatch>().0);

        let mut query = app.world_mut().query::<&Vehicle>();
        let vehicle = query.single(app.world()).expect("vehicle spawned");
        assert_eq!(vehicle.fuel, 2000.0, "level 1 fills the tank");
    }

    /// Restarting from `Lose` re-enters `Playing` through the same reset:
    /// fresh vehicle, score back to zero.
    #[test]
    fn restart_after_crash_resets_score_and_vehicle() {
        let mut app = build_sim_app();

        let mut ticks = 0;
        while current_state(&app) != GameState::Lose {
            app.update();
            ticks += 1;
            assert!(ticks < 2000);
        }

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Playing);
        app.update();

        assert_eq!(current_state(&app), GameState::Playing);
        // One gameplay tick has already run since the reset zeroed the score.
        assert_eq!(app.world().resource::<SessionScore>().0, 1);
        let mut query = app.world_mut().query::<&Vehicle>();
        assert_eq!(query.iter(app.world()).count(), 1);
    }
}
