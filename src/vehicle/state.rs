//! Vehicle components and resources.
//!
//! All ECS components and Bevy resources that describe the player vehicle
//! live here.  Systems that mutate this state are in the sibling modules:
//! - [`super::control`] — input intent + force application
//! - [`super::kinematics`] — gravity, wind, position integration

use crate::config::TuningConfig;
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// The player vehicle's simulation state.
///
/// Position lives in the entity's `Transform`; everything the per-tick
/// integrator touches is here.  The orientation angle is degrees and
/// deliberately unbounded — there is no wraparound, matching the arcade
/// behavior the landing tolerance check is tuned against.
#[derive(Component, Debug, Clone)]
pub struct Vehicle {
    /// World-space velocity (units/tick).
    pub velocity: Vec2,
    /// Orientation in degrees; 0 = upright, positive tilts right.
    pub angle_deg: f32,
    /// Remaining fuel; clamped to ≥ 0, never negative.
    pub fuel: f32,
    /// Footprint width (world units).
    pub width: f32,
    /// Footprint height (world units).
    pub height: f32,
}

impl Vehicle {
    /// Unit heading vector for the current orientation.
    ///
    /// Angle 0 points straight up; positive angles lean the heading to the
    /// right (`sin`/`cos` of the degree value).
    pub fn heading(&self) -> Vec2 {
        let rad = self.angle_deg.to_radians();
        Vec2::new(rad.sin(), rad.cos())
    }

    /// World-space y of the vehicle's lower edge for a given centre y.
    pub fn bottom_edge(&self, center_y: f32) -> f32 {
        center_y - self.height * 0.5
    }

    /// Half the footprint width, as used by the pad containment check.
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Which vehicle variant the session flies.
///
/// One polymorphic vehicle parameterized by mode replaces the original's two
/// near-duplicate ship classes; the kinematics and input pipelines are shared
/// and only dimensions, the boost key, and the catch tower differ.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleMode {
    /// Classic lander: wide squat hull, no emergency boost.
    #[default]
    SingleStage,
    /// Returning booster: tall narrow hull, emergency boost enabled, catch
    /// tower present.
    MultiStage,
}

impl VehicleMode {
    /// Footprint (width, height) for this variant.
    pub fn dimensions(self, config: &TuningConfig) -> (f32, f32) {
        match self {
            VehicleMode::SingleStage => (config.lander_width, config.lander_height),
            VehicleMode::MultiStage => (config.booster_width, config.booster_height),
        }
    }

    /// Whether the emergency-boost key does anything in this variant.
    pub fn boost_enabled(self) -> bool {
        matches!(self, VehicleMode::MultiStage)
    }

    /// Menu / HUD label.
    pub fn label(self) -> &'static str {
        match self {
            VehicleMode::SingleStage => "LANDER",
            VehicleMode::MultiStage => "BOOSTER",
        }
    }
}

/// Per-tick snapshot of the held directional keys.
///
/// Cleared and re-filled at the top of every fixed tick (held-key semantics,
/// no edge detection).  The **input abstraction layer**: only
/// `keyboard_to_intent_system` writes from the real keyboard, so tests can
/// populate this resource directly and run the apply step in isolation.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlIntent {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub boost: bool,
}

/// Whether main thrust actually fired this tick (held **and** fuelled).
///
/// Published by the intent-apply step; consumed by the exhaust emitter and
/// the audio thrust-loop edge detector.  This is the current-tick fact only —
/// the previous-tick state lives with the audio cue component, keeping
/// presentation bookkeeping out of the simulation.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ThrustState {
    pub active: bool,
}
