//! Difficulty levels: the wrapping level counter and per-level parameters.
//!
//! A session's gravity, wind, and starting fuel are derived from the current
//! level every time gameplay is (re)entered.  The counter advances on each
//! successful touchdown and wraps back to level 1 after the final level.

use crate::config::TuningConfig;
use crate::constants::{GRAVITY, LEVEL_FUEL_FRACTION, LEVEL_GRAVITY_SCALE, LEVEL_WIND, MAX_FUEL, MAX_LEVEL};
use bevy::prelude::*;

/// Current difficulty level, 1..=[`MAX_LEVEL`].
///
/// Persists across session resets (a crash retries the same level); only a
/// successful touchdown advances it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCounter(pub u32);

impl Default for LevelCounter {
    fn default() -> Self {
        Self(1)
    }
}

impl LevelCounter {
    /// Advance to the next level, wrapping past [`MAX_LEVEL`] back to 1.
    pub fn advance(&mut self) {
        self.0 += 1;
        if self.0 > MAX_LEVEL {
            self.0 = 1;
        }
    }
}

/// Immutable physics parameters of the level being played.
///
/// Re-derived from [`LevelCounter`] and [`TuningConfig`] on every entry into
/// gameplay; never mutated mid-session.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Constant lateral velocity added per tick.
    pub wind: f32,
    /// Tank contents at spawn.
    pub starting_fuel: f32,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY * LEVEL_GRAVITY_SCALE[0],
            wind: LEVEL_WIND[0],
            starting_fuel: MAX_FUEL * LEVEL_FUEL_FRACTION[0],
        }
    }
}

impl LevelParams {
    /// Derive the parameters for `level` (1..=[`MAX_LEVEL`]).
    ///
    /// Out-of-range values clamp to the hardest tier, mirroring the counter's
    /// wrap contract — in practice the counter never leaves 1..=4.
    pub fn for_level(level: u32, config: &TuningConfig) -> Self {
        let idx = (level.clamp(1, MAX_LEVEL) - 1) as usize;
        Self {
            gravity: config.gravity * config.level_gravity_scale[idx],
            wind: config.level_wind[idx],
            starting_fuel: config.max_fuel * config.level_fuel_fraction[idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_wraps_after_final_level() {
        let mut level = LevelCounter::default();
        assert_eq!(level.0, 1);
        for expected in [2, 3, 4, 1, 2] {
            level.advance();
            assert_eq!(level.0, expected);
        }
    }

    #[test]
    fn counter_never_exceeds_max_level() {
        let mut level = LevelCounter::default();
        for _ in 0..100 {
            level.advance();
            assert!(level.0 >= 1 && level.0 <= MAX_LEVEL);
        }
    }

    #[test]
    fn level_one_uses_base_values() {
        let params = LevelParams::for_level(1, &TuningConfig::default());
        assert_eq!(params.gravity, GRAVITY);
        assert_eq!(params.wind, 0.0);
        assert_eq!(params.starting_fuel, MAX_FUEL);
    }

    #[test]
    fn difficulty_rises_monotonically() {
        let config = TuningConfig::default();
        let tiers: Vec<LevelParams> = (1..=4).map(|l| LevelParams::for_level(l, &config)).collect();
        for pair in tiers.windows(2) {
            assert!(pair[1].gravity > pair[0].gravity);
            assert!(pair[1].wind > pair[0].wind);
            assert!(pair[1].starting_fuel < pair[0].starting_fuel);
        }
    }

    #[test]
    fn hardest_tier_matches_table() {
        let params = LevelParams::for_level(4, &TuningConfig::default());
        assert!((params.gravity - GRAVITY * 2.0).abs() < 1e-6);
        assert!((params.wind - 0.15).abs() < 1e-6);
        assert!((params.starting_fuel - MAX_FUEL * 0.4).abs() < 1e-3);
    }
}
