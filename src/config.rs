//! Runtime gameplay configuration loaded from `assets/tuning.toml`.
//!
//! [`TuningConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_tuning_config`] reads
//! `assets/tuning.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<TuningConfig>` to any system parameter list and read values
//! with `config.gravity`, `config.thrust_power`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `TuningConfig::default()`.

use crate::constants::*;
use crate::error::{validate_gravity, validate_thrust_power};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable physics and gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/tuning.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    // ── Canvas / World ───────────────────────────────────────────────────────
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ground_margin: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub thrust_power: f32,
    pub rotation_step_deg: f32,
    pub boost_power: f32,

    // ── Fuel ─────────────────────────────────────────────────────────────────
    pub max_fuel: f32,
    pub thrust_fuel_cost: f32,
    pub rotation_fuel_cost: f32,
    pub boost_fuel_cost: f32,

    // ── Landing ──────────────────────────────────────────────────────────────
    pub landing_velocity_threshold: f32,
    pub landing_angle_threshold_deg: f32,
    pub pad_width: f32,
    pub pad_height: f32,

    // ── Vehicle ──────────────────────────────────────────────────────────────
    pub lander_width: f32,
    pub lander_height: f32,
    pub booster_width: f32,
    pub booster_height: f32,
    pub spawn_drop: f32,
    pub initial_descent: f32,

    // ── Catch Tower ──────────────────────────────────────────────────────────
    pub tower_offset_x: f32,
    pub tower_height: f32,
    pub catch_arm_length: f32,
    pub catch_zone_half_width: f32,
    pub catch_zone_half_height: f32,
    pub catch_zone_lift: f32,
    pub catch_velocity_threshold: f32,
    pub catch_angle_threshold_deg: f32,

    // ── Terrain ──────────────────────────────────────────────────────────────
    pub terrain_step: f32,
    pub terrain_jitter: f32,

    // ── Particles ────────────────────────────────────────────────────────────
    pub max_particles: usize,
    pub exhaust_particles_per_tick: u32,
    pub exhaust_particle_lifetime: f32,
    pub explosion_particle_count: u32,
    pub explosion_particle_lifetime: f32,

    // ── Scoring / Levels ─────────────────────────────────────────────────────
    pub landing_bonus: u32,
    pub fuel_bonus_factor: f32,
    pub level_gravity_scale: [f32; 4],
    pub level_wind: [f32; 4],
    pub level_fuel_fraction: [f32; 4],
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            // Canvas / World
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_margin: GROUND_MARGIN,
            // Physics
            gravity: GRAVITY,
            thrust_power: THRUST_POWER,
            rotation_step_deg: ROTATION_STEP_DEG,
            boost_power: BOOST_POWER,
            // Fuel
            max_fuel: MAX_FUEL,
            thrust_fuel_cost: THRUST_FUEL_COST,
            rotation_fuel_cost: ROTATION_FUEL_COST,
            boost_fuel_cost: BOOST_FUEL_COST,
            // Landing
            landing_velocity_threshold: LANDING_VELOCITY_THRESHOLD,
            landing_angle_threshold_deg: LANDING_ANGLE_THRESHOLD_DEG,
            pad_width: PAD_WIDTH,
            pad_height: PAD_HEIGHT,
            // Vehicle
            lander_width: LANDER_WIDTH,
            lander_height: LANDER_HEIGHT,
            booster_width: BOOSTER_WIDTH,
            booster_height: BOOSTER_HEIGHT,
            spawn_drop: SPAWN_DROP,
            initial_descent: INITIAL_DESCENT,
            // Catch Tower
            tower_offset_x: TOWER_OFFSET_X,
            tower_height: TOWER_HEIGHT,
            catch_arm_length: CATCH_ARM_LENGTH,
            catch_zone_half_width: CATCH_ZONE_HALF_WIDTH,
            catch_zone_half_height: CATCH_ZONE_HALF_HEIGHT,
            catch_zone_lift: CATCH_ZONE_LIFT,
            catch_velocity_threshold: CATCH_VELOCITY_THRESHOLD,
            catch_angle_threshold_deg: CATCH_ANGLE_THRESHOLD_DEG,
            // Terrain
            terrain_step: TERRAIN_STEP,
            terrain_jitter: TERRAIN_JITTER,
            // Particles
            max_particles: MAX_PARTICLES,
            exhaust_particles_per_tick: EXHAUST_PARTICLES_PER_TICK,
            exhaust_particle_lifetime: EXHAUST_PARTICLE_LIFETIME,
            explosion_particle_count: EXPLOSION_PARTICLE_COUNT,
            explosion_particle_lifetime: EXPLOSION_PARTICLE_LIFETIME,
            // Scoring / Levels
            landing_bonus: LANDING_BONUS,
            fuel_bonus_factor: FUEL_BONUS_FACTOR,
            level_gravity_scale: LEVEL_GRAVITY_SCALE,
            level_wind: LEVEL_WIND,
            level_fuel_fraction: LEVEL_FUEL_FRACTION,
        }
    }
}

impl TuningConfig {
    /// World-space y of the flat collision line.
    pub fn ground_line_y(&self) -> f32 {
        self.ground_margin - self.canvas_height * 0.5
    }

    /// World-space y at which the vehicle spawns.
    pub fn spawn_y(&self) -> f32 {
        self.canvas_height * 0.5 - self.spawn_drop
    }

    /// Half the canvas width; the x-extent at which the vehicle wraps.
    pub fn half_width(&self) -> f32 {
        self.canvas_width * 0.5
    }
}

/// Startup system: attempt to load `assets/tuning.toml` and overwrite the
/// `TuningConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the game.  A missing file is silently ignored (defaults
/// are already in place from `insert_resource`).
pub fn load_tuning_config(mut config: ResMut<TuningConfig>) {
    let path = "assets/tuning.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<TuningConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded tuning config from {path}");
            }
            Err(e) => {
                warn!("Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("No {path} found; using compiled defaults");
        }
    }

    if let Err(e) = validate_gravity(config.gravity) {
        warn!("{e}");
    }
    if let Err(e) = validate_thrust_power(config.thrust_power, config.gravity) {
        warn!("{e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = TuningConfig::default();
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.thrust_power, THRUST_POWER);
        assert_eq!(config.max_fuel, MAX_FUEL);
        assert_eq!(config.pad_width, PAD_WIDTH);
        assert_eq!(config.level_wind, LEVEL_WIND);
    }

    #[test]
    fn ground_line_sits_above_bottom_edge() {
        let config = TuningConfig::default();
        assert_eq!(config.ground_line_y(), -300.0);
        assert_eq!(config.spawn_y(), 350.0);
    }

    /// A partial TOML overrides only the named keys; everything else keeps
    /// its compiled default.
    #[test]
    fn partial_toml_overrides_named_keys_only() {
        let loaded: TuningConfig = toml::from_str("gravity = 0.5\npad_width = 140.0\n")
            .expect("partial config must parse");
        assert_eq!(loaded.gravity, 0.5);
        assert_eq!(loaded.pad_width, 140.0);
        assert_eq!(loaded.thrust_power, THRUST_POWER);
        assert_eq!(loaded.max_fuel, MAX_FUEL);
    }
}
