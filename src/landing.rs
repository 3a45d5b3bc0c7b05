//! Touchdown evaluation: ground-contact detection, landing classification,
//! and the cosmetic catch-zone check of the multi-stage variant.
//!
//! The evaluator runs once per fixed tick during gameplay and does nothing
//! until the vehicle's lower edge reaches the flat ground line.  The first
//! contact tick resolves the whole session — win or lose — and raises a
//! [`TouchdownMessage`] for the presentation layer (audio cues, explosion
//! burst).  There is no retry-in-place.

use crate::config::TuningConfig;
use crate::level::LevelCounter;
use crate::menu::GameState;
use crate::score::SessionScore;
use crate::terrain::{CatchTower, LandingPad};
use crate::vehicle::{Vehicle, VehicleMode};
use bevy::prelude::*;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Classification of the first ground contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    /// Touched down on the pad within the velocity and angle tolerances.
    Landed,
    /// Hit the ground with any part of the footprint outside the pad.
    CrashedOffPad,
    /// Hit the pad too fast or too tilted.
    CrashedOnPad,
}

impl LandingOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, LandingOutcome::Landed)
    }
}

/// Broadcast once at the resolving tick; consumed by audio cues and the
/// explosion burst spawner.
#[derive(Message, Debug, Clone, Copy)]
pub struct TouchdownMessage {
    pub outcome: LandingOutcome,
    /// Vehicle centre at the moment of contact.
    pub position: Vec2,
}

/// Set on the resolving tick; cleared on session reset.  Gates the whole
/// gameplay pipeline so a frame that runs several fixed steps cannot resolve
/// the session twice before the state transition applies.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TouchdownLatch(pub bool);

/// Run condition: the session has not been resolved yet this tick.
pub fn session_unresolved(latch: Res<TouchdownLatch>) -> bool {
    !latch.0
}

// ── Classification ────────────────────────────────────────────────────────────

/// Classify a ground contact.  Pure function of the vehicle state at the
/// contact tick, so the outcome is deterministic and directly testable.
///
/// 1. The footprint must be fully inside the pad's horizontal extent and the
///    lower edge inside the pad's vertical band; anything else is an off-pad
///    impact.
/// 2. A legal attempt succeeds iff |vy| and |angle| are strictly inside the
///    configured tolerances.
pub fn classify_touchdown(
    pad: &LandingPad,
    center_x: f32,
    bottom_edge: f32,
    half_width: f32,
    vy: f32,
    angle_deg: f32,
    config: &TuningConfig,
) -> LandingOutcome {
    if !pad.contains_footprint(center_x, half_width) || !pad.within_band(bottom_edge) {
        return LandingOutcome::CrashedOffPad;
    }

    if vy.abs() < config.landing_velocity_threshold
        && angle_deg.abs() < config.landing_angle_threshold_deg
    {
        LandingOutcome::Landed
    } else {
        LandingOutcome::CrashedOnPad
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Resolve the session on the first tick the vehicle's lower edge passes the
/// ground line.
///
/// On success: touchdown bonus `floor(fuel × factor) + landing_bonus` is added
/// to the score, the level counter advances (wrapping), and the state machine
/// moves to `Win`.  On any crash the state moves to `Lose`.  Either way a
/// [`TouchdownMessage`] is written exactly once.
pub fn touchdown_evaluator_system(
    config: Res<TuningConfig>,
    pad: Res<LandingPad>,
    mut latch: ResMut<TouchdownLatch>,
    mut level: ResMut<LevelCounter>,
    mut score: ResMut<SessionScore>,
    mut next_state: ResMut<NextState<GameState>>,
    mut touchdowns: MessageWriter<TouchdownMessage>,
    q: Query<(&Transform, &Vehicle)>,
) {
    let Ok((transform, vehicle)) = q.single() else {
        return;
    };

    let bottom = vehicle.bottom_edge(transform.translation.y);
    if bottom > config.ground_line_y() {
        return;
    }

    latch.0 = true;

    let outcome = classify_touchdown(
        &pad,
        transform.translation.x,
        bottom,
        vehicle.half_width(),
        vehicle.velocity.y,
        vehicle.angle_deg,
        &config,
    );

    match outcome {
        LandingOutcome::Landed => {
            let bonus =
                (vehicle.fuel * config.fuel_bonus_factor).floor() as u32 + config.landing_bonus;
            score.0 += bonus;
            level.advance();
            next_state.set(GameState::Win);
            info!(
                "Touchdown: +{bonus} points, next level {}",
                level.0
            );
        }
        LandingOutcome::CrashedOffPad | LandingOutcome::CrashedOnPad => {
            next_state.set(GameState::Lose);
            info!(
                "Crash ({outcome:?}) at vy {:.2}, angle {:.1}°",
                vehicle.velocity.y, vehicle.angle_deg
            );
        }
    }

    touchdowns.write(TouchdownMessage {
        outcome,
        position: transform.translation.truncate(),
    });
}

/// Multi-stage only: extend the tower's catch arms while the booster hovers
/// inside the catch zone, slow and nearly upright.  Cosmetic signal, not a
/// win condition.
pub fn catch_zone_system(
    mode: Res<VehicleMode>,
    config: Res<TuningConfig>,
    mut tower: ResMut<CatchTower>,
    q: Query<(&Transform, &Vehicle)>,
) {
    if *mode != VehicleMode::MultiStage {
        return;
    }

    let Ok((transform, vehicle)) = q.single() else {
        tower.arms_extended = false;
        return;
    };

    tower.arms_extended = tower.zone.contains(transform.translation.truncate())
        && vehicle.velocity.y.abs() < config.catch_velocity_threshold
        && vehicle.angle_deg.abs() < config.catch_angle_threshold_deg;
}

// ── Unit tests ────────────────────────────────────────────────────────────────
