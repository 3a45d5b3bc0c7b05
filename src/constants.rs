//! Centralised physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::TuningConfig`] mirrors these values and can override any
//! subset at runtime from `assets/tuning.toml`.
//!
//! Velocities and accelerations are expressed **per tick** (the simulation
//! runs a fixed 60 Hz tick), not per second.  Angles are degrees.

// ── Canvas / World ────────────────────────────────────────────────────────────

/// Logical canvas width (world units).  The camera shows the full canvas;
/// world x spans `±CANVAS_WIDTH / 2`.
pub const CANVAS_WIDTH: f32 = 1200.0;

/// Logical canvas height (world units).  World y spans `±CANVAS_HEIGHT / 2`.
pub const CANVAS_HEIGHT: f32 = 800.0;

/// Height of the ground band above the bottom edge of the canvas.
///
/// The flat collision line sits at `GROUND_MARGIN - CANVAS_HEIGHT / 2`
/// (y = −300 at defaults).  Terrain silhouette jitter stays within
/// `±TERRAIN_JITTER` of this line.
pub const GROUND_MARGIN: f32 = 100.0;

/// Fixed simulation tick rate (Hz).
pub const TICK_RATE_HZ: f64 = 60.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Base downward acceleration per tick, before the level multiplier.
///
/// Deliberately low for a floaty, space-like feel.  Level 4 runs at 2× this.
pub const GRAVITY: f32 = 0.2;

/// Velocity added along the vehicle's heading per tick of held main thrust.
///
/// Must comfortably exceed level-4 gravity (0.4/tick) or the hardest level
/// becomes unwinnable.
pub const THRUST_POWER: f32 = 0.8;

/// Degrees of rotation per tick of held left/right input.
pub const ROTATION_STEP_DEG: f32 = 2.0;

/// One-tick velocity impulse of the emergency boost (multi-stage vehicle).
pub const BOOST_POWER: f32 = 3.0;

// ── Fuel ──────────────────────────────────────────────────────────────────────

/// Tank capacity at level 1.  Higher levels start with a fraction of this.
pub const MAX_FUEL: f32 = 2000.0;

/// Fuel burned per tick of main thrust.
pub const THRUST_FUEL_COST: f32 = 1.0;

/// Fuel burned per tick of rotation thrust (each direction).
pub const ROTATION_FUEL_COST: f32 = 0.5;

/// Fuel burned by one emergency-boost tick.  The boost only fires while the
/// tank holds strictly more than this amount.
pub const BOOST_FUEL_COST: f32 = 50.0;

// ── Landing Tolerances ────────────────────────────────────────────────────────

/// Maximum |vertical velocity| (units/tick) at ground contact for a landing
/// to count as a touchdown rather than a crash.
pub const LANDING_VELOCITY_THRESHOLD: f32 = 3.0;

/// Maximum |orientation angle| (degrees) at ground contact for a touchdown.
pub const LANDING_ANGLE_THRESHOLD_DEG: f32 = 10.0;

// ── Landing Pad ───────────────────────────────────────────────────────────────

/// Horizontal extent of the landing pad.
pub const PAD_WIDTH: f32 = 100.0;

/// Vertical thickness of the pad slab.  The legal touchdown band is the pad's
/// top surface minus this thickness; it must exceed
/// `LANDING_VELOCITY_THRESHOLD` or within-tolerance descents could tunnel
/// past the band in a single tick.
pub const PAD_HEIGHT: f32 = 10.0;

// ── Vehicle Dimensions ────────────────────────────────────────────────────────

/// Single-stage lander footprint.
pub const LANDER_WIDTH: f32 = 20.0;
pub const LANDER_HEIGHT: f32 = 40.0;

/// Multi-stage booster footprint: tall and narrow, much harder to keep
/// upright inside the angle tolerance.
pub const BOOSTER_WIDTH: f32 = 9.0;
pub const BOOSTER_HEIGHT: f32 = 70.0;

// ── Session Start ─────────────────────────────────────────────────────────────

/// Spawn height below the top edge of the canvas.
pub const SPAWN_DROP: f32 = 50.0;

/// Initial downward speed at spawn (units/tick).
pub const INITIAL_DESCENT: f32 = 2.0;

// ── Catch Tower (multi-stage) ────────────────────────────────────────────────

/// Horizontal offset of the catch tower from the canvas centre.
pub const TOWER_OFFSET_X: f32 = 200.0;

/// Tower structure height above the ground line.
pub const TOWER_HEIGHT: f32 = 143.0;

/// Length of the catch arms drawn at the tower top.
pub const CATCH_ARM_LENGTH: f32 = 25.0;

/// Catch-zone half extents around the zone centre.
pub const CATCH_ZONE_HALF_WIDTH: f32 = 15.0;
pub const CATCH_ZONE_HALF_HEIGHT: f32 = 10.0;

/// Height of the catch-zone centre above the ground line.
pub const CATCH_ZONE_LIFT: f32 = 20.0;

/// |vy| below which the tower considers the booster catchable.
pub const CATCH_VELOCITY_THRESHOLD: f32 = 2.0;

/// |angle| (degrees) below which the tower considers the booster catchable.
pub const CATCH_ANGLE_THRESHOLD_DEG: f32 = 5.0;

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Horizontal spacing between silhouette sample points.
pub const TERRAIN_STEP: f32 = 50.0;

/// Maximum vertical deviation of a silhouette point from the ground line.
pub const TERRAIN_JITTER: f32 = 20.0;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Hard cap on live particle entities.  When a burst would exceed it, the
/// oldest particles are evicted first.  Bounds memory in long sessions even
/// if emission briefly outpaces lifetime pruning.
pub const MAX_PARTICLES: usize = 512;

/// Exhaust particles emitted per tick of active thrust.
pub const EXHAUST_PARTICLES_PER_TICK: u32 = 5;

/// Exhaust particle lifetime (ticks).
pub const EXHAUST_PARTICLE_LIFETIME: f32 = 20.0;

/// Particles in the crash explosion burst.
pub const EXPLOSION_PARTICLE_COUNT: u32 = 50;

/// Explosion particle lifetime (ticks).
pub const EXPLOSION_PARTICLE_LIFETIME: f32 = 60.0;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Flat bonus awarded on a successful touchdown.
pub const LANDING_BONUS: u32 = 1000;

/// Remaining fuel is multiplied by this and floored into the touchdown bonus.
pub const FUEL_BONUS_FACTOR: f32 = 0.1;

// ── Levels ────────────────────────────────────────────────────────────────────

/// Number of difficulty levels; the counter wraps back to 1 past this.
pub const MAX_LEVEL: u32 = 4;

/// Per-level gravity multiplier applied to [`GRAVITY`], indexed by level − 1.
pub const LEVEL_GRAVITY_SCALE: [f32; 4] = [1.0, 1.2, 1.5, 2.0];

/// Per-level constant lateral wind (units/tick), indexed by level − 1.
pub const LEVEL_WIND: [f32; 4] = [0.0, 0.05, 0.1, 0.15];

/// Per-level starting-fuel fraction of [`MAX_FUEL`], indexed by level − 1.
pub const LEVEL_FUEL_FRACTION: [f32; 4] = [1.0, 0.8, 0.6, 0.4];
