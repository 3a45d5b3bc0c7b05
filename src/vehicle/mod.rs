//! Vehicle module: the player body, its input pipeline, and its integrator.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Vehicle` component, `VehicleMode`, `ControlIntent` / `ThrustState` resources |
//! | [`control`] | Intent pipeline: clear → keyboard snapshot → force/fuel application |
//! | [`kinematics`] | Gravity, wind drift, position integration, screen wrap |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::vehicle::*` imports without knowing the sub-module
//! layout.

pub mod control;
pub mod kinematics;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{apply_control_intent_system, intent_clear_system, keyboard_to_intent_system};
pub use kinematics::kinematics_system;
pub use state::{ControlIntent, ThrustState, Vehicle, VehicleMode};

// ── Vehicle spawn ─────────────────────────────────────────────────────────────

use crate::config::TuningConfig;
use crate::level::LevelParams;
use bevy::prelude::*;

/// Spawn the player vehicle at the top-centre of the canvas.
///
/// Runs on every entry into gameplay, after the session reset has derived
/// fresh [`LevelParams`]: the tank is filled from the level's fuel budget and
/// the hull dimensions come from the selected [`VehicleMode`].  The vehicle
/// starts upright with a small downward drift.
pub fn spawn_vehicle(
    mut commands: Commands,
    config: Res<TuningConfig>,
    params: Res<LevelParams>,
    mode: Res<VehicleMode>,
) {
    let (width, height) = mode.dimensions(&config);

    commands.spawn((
        Vehicle {
            velocity: Vec2::new(0.0, -config.initial_descent),
            angle_deg: 0.0,
            fuel: params.starting_fuel,
            width,
            height,
        },
        Transform::from_translation(Vec3::new(0.0, config.spawn_y(), 0.0)),
        Visibility::default(),
    ));

    info!("{} spawned with {:.0} fuel", mode.label(), params.starting_fuel);
}

/// Despawn the vehicle when gameplay ends; the next session spawns a fresh one.
pub fn despawn_vehicle_system(mut commands: Commands, q: Query<Entity, With<Vehicle>>) {
    for entity in q.iter() {
        commands.entity(entity).despawn();
    }
}
