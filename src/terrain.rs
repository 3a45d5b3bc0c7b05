//! Static world geometry: ground silhouette, landing pad, and catch tower.
//!
//! The silhouette is rendering-only — collision uses the flat ground line
//! from [`TuningConfig::ground_line_y`].  The pad and catch zone carry the
//! containment helpers the landing evaluator and tower systems query.

use crate::config::TuningConfig;
use bevy::prelude::*;
use rand::Rng;

// ── Terrain silhouette ────────────────────────────────────────────────────────

/// Ordered ground silhouette points, left to right across the canvas.
///
/// Regenerated with fresh randomness on every session reset.  Drawn as a
/// polyline; the vehicle never collides with it.
#[derive(Resource, Debug, Clone, Default)]
pub struct Terrain {
    pub points: Vec<Vec2>,
}

impl Terrain {
    /// Resample the silhouette: one point every `terrain_step` units, jittered
    /// vertically around the ground line.
    pub fn regenerate(&mut self, config: &TuningConfig, rng: &mut impl Rng) {
        let half_width = config.half_width();
        let ground = config.ground_line_y();
        let steps = (config.canvas_width / config.terrain_step).ceil() as i32;

        self.points.clear();
        for i in 0..=steps {
            let x = -half_width + i as f32 * config.terrain_step;
            let y = ground + rng.gen_range(-config.terrain_jitter..=config.terrain_jitter);
            self.points.push(Vec2::new(x.min(half_width), y));
        }
    }
}

// ── Landing pad ───────────────────────────────────────────────────────────────

/// The designated rectangular landing target.
///
/// The top surface sits exactly on the ground line, so the legal touchdown
/// band `[top − height, top]` contains the first tick at which the evaluator
/// fires for any within-tolerance descent.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LandingPad {
    pub center_x: f32,
    pub top_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for LandingPad {
    fn default() -> Self {
        let config = TuningConfig::default();
        Self::from_config(&config)
    }
}

impl LandingPad {
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            center_x: 0.0,
            top_y: config.ground_line_y(),
            width: config.pad_width,
            height: config.pad_height,
        }
    }

    pub fn left(&self) -> f32 {
        self.center_x - self.width * 0.5
    }

    pub fn right(&self) -> f32 {
        self.center_x + self.width * 0.5
    }

    /// True when the whole vehicle footprint lies inside the pad's horizontal
    /// extent.  Edges count as inside.
    pub fn contains_footprint(&self, center_x: f32, half_width: f32) -> bool {
        center_x - half_width >= self.left() && center_x + half_width <= self.right()
    }

    /// True when `bottom_edge` lies inside the pad's vertical band.
    pub fn within_band(&self, bottom_edge: f32) -> bool {
        bottom_edge <= self.top_y && bottom_edge >= self.top_y - self.height
    }
}

// ── Catch tower (multi-stage variant) ─────────────────────────────────────────

/// Tolerance region near the tower that gates the cosmetic arm extension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchZone {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl CatchZone {
    pub fn contains(&self, pos: Vec2) -> bool {
        (pos.x - self.center.x).abs() < self.half_width
            && (pos.y - self.center.y).abs() < self.half_height
    }
}

/// Fixed tower structure with extendable catch arms.
///
/// `arms_extended` is a purely cosmetic signal re-evaluated every tick of the
/// multi-stage variant; it is not a win condition.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CatchTower {
    pub base_x: f32,
    pub base_y: f32,
    pub height: f32,
    pub arm_length: f32,
    pub zone: CatchZone,
    pub arms_extended: bool,
}

impl Default for CatchTower {
    fn default() -> Self {
        Self::from_config(&TuningConfig::default())
    }
}

impl CatchTower {
    pub fn from_config(config: &TuningConfig) -> Self {
        let base_x = config.tower_offset_x;
        let base_y = config.ground_line_y();
        Self {
            base_x,
            base_y,
            height: config.tower_height,
            arm_length: config.catch_arm_length,
            zone: CatchZone {
                center: Vec2::new(base_x, base_y + config.catch_zone_lift),
                half_width: config.catch_zone_half_width,
                half_height: config.catch_zone_half_height,
            },
            arms_extended: false,
        }
    }
}
