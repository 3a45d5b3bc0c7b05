//! Vehicle input systems.
//!
//! ## Pipeline (runs in order every fixed tick)
//!
//! 1. [`intent_clear_system`] — resets `ControlIntent` to all-off.
//! 2. [`keyboard_to_intent_system`] — snapshots held keys into `ControlIntent`.
//! 3. [`apply_control_intent_system`] — converts intent into velocity, angle,
//!    and fuel changes on the vehicle, and publishes [`ThrustState`].
//!
//! The intent resource makes the force mapping fully testable: tests populate
//! `ControlIntent` directly and run only the apply step.

use super::state::{ControlIntent, ThrustState, Vehicle, VehicleMode};
use crate::config::TuningConfig;
use bevy::prelude::*;

// ── Step 1: Clear ─────────────────────────────────────────────────────────────

/// Reset [`ControlIntent`] to all-off at the start of every tick.
///
/// Must run before any system that writes intent fields so a released key
/// never leaves a stale `true` behind.
pub fn intent_clear_system(mut intent: ResMut<ControlIntent>) {
    *intent = ControlIntent::default();
}

// ── Step 2: Keyboard → Intent ─────────────────────────────────────────────────

/// Snapshot the held directional keys into [`ControlIntent`].
///
/// - **Up / W** → main thrust
/// - **Left / A** → rotate counter-clockwise
/// - **Right / D** → rotate clockwise
/// - **Space** → emergency boost (multi-stage variant only)
///
/// Held semantics: thrust applies every tick the key is down; there is no
/// key-repeat or edge logic here.
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mode: Res<VehicleMode>,
    mut intent: ResMut<ControlIntent>,
) {
    intent.thrust = keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW);
    intent.rotate_left = keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA);
    intent.rotate_right = keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD);
    intent.boost = mode.boost_enabled() && keys.pressed(KeyCode::Space);
}

// ── Step 3: Apply intent → vehicle ────────────────────────────────────────────

/// Convert [`ControlIntent`] into velocity, orientation, and fuel changes.
///
/// This is the **only** system that spends fuel; all input systems only write
/// to `ControlIntent`.
///
/// | Intent field   | Effect (while fuelled)                                       |
/// |----------------|--------------------------------------------------------------|
/// | `thrust`       | `velocity += heading × thrust_power`; fuel − thrust cost     |
/// | `rotate_left`  | `angle −= rotation_step`; fuel − rotation cost               |
/// | `rotate_right` | `angle += rotation_step`; fuel − rotation cost               |
/// | `boost`        | `velocity += heading × boost_power`; fuel − boost cost       |
///
/// The boost fires on **every** tick it is held while fuel exceeds its cost —
/// the original per-tick-drain behavior, kept deliberately.  Fuel is clamped
/// at zero after every deduction and an empty tank disables all four effects.
pub fn apply_control_intent_system(
    intent: Res<ControlIntent>,
    config: Res<TuningConfig>,
    mut thrust_state: ResMut<ThrustState>,
    mut q: Query<&mut Vehicle>,
) {
    let Ok(mut vehicle) = q.single_mut() else {
        return;
    };

    let mut thrusting = false;

    if intent.thrust && vehicle.fuel > 0.0 {
        let heading = vehicle.heading();
        vehicle.velocity += heading * config.thrust_power;
        vehicle.fuel = (vehicle.fuel - config.thrust_fuel_cost).max(0.0);
        thrusting = true;
    }

    if intent.rotate_left && vehicle.fuel > 0.0 {
        vehicle.angle_deg -= config.rotation_step_deg;
        vehicle.fuel = (vehicle.fuel - config.rotation_fuel_cost).max(0.0);
    }
    if intent.rotate_right && vehicle.fuel > 0.0 {
        vehicle.angle_deg += config.rotation_step_deg;
        vehicle.fuel = (vehicle.fuel - config.rotation_fuel_cost).max(0.0);
    }

    if intent.boost && vehicle.fuel > config.boost_fuel_cost {
        let heading = vehicle.heading();
        vehicle.velocity += heading * config.boost_power;
        vehicle.fuel -= config.boost_fuel_cost;
    }

    thrust_state.active = thrusting;
}

// ── Unit tests ────────────────────────────────────────────────────────────────
