//! Game-specific error types.
//!
//! The error surface of this game is deliberately tiny: the only fallible
//! operations are the high-score write and constant validation.  Everything
//! else (missing sound files, missing or corrupt tuning/score files) degrades
//! to a logged warning and a default value rather than an error.

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// Writing the high-score file failed.  Callers log this and move on;
    /// losing a high-score update is not gameplay-critical.
    ScoreStoreWrite {
        /// Path of the store that could not be written.
        path: String,
        /// Human-readable cause (I/O or serialization).
        reason: String,
    },

    /// A tuning value is outside its safe operating range.
    /// Returned by validation helpers; the config loader downgrades it to a
    /// warning rather than aborting.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ScoreStoreWrite { path, reason } => {
                write!(f, "failed to write high-score store '{}': {}", path, reason)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `gravity` is outside its validated safe range.
///
/// Zero or negative gravity makes descent optional; values above 1.0/tick
/// outrun the thrust budget on every level.
pub fn validate_gravity(value: f32) -> GameResult<()> {
    if value <= 0.0 || value > 1.0 {
        Err(GameError::UnsafeConstant {
            name: "gravity",
            value,
            safe_range: "(0.0, 1.0]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `thrust_power` cannot overcome level-4 gravity
/// (the highest multiplier is 2×).
pub fn validate_thrust_power(value: f32, gravity: f32) -> GameResult<()> {
    if value <= gravity * 2.0 {
        Err(GameError::UnsafeConstant {
            name: "thrust_power",
            value,
            safe_range: "(2 × gravity, ∞)",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants_pass_validation() {
        assert!(validate_gravity(crate::constants::GRAVITY).is_ok());
        assert!(
            validate_thrust_power(crate::constants::THRUST_POWER, crate::constants::GRAVITY)
                .is_ok()
        );
    }

    #[test]
    fn unwinnable_thrust_is_rejected() {
        let err = validate_thrust_power(0.3, 0.2).unwrap_err();
        assert!(matches!(err, GameError::UnsafeConstant { name: "thrust_power", .. }));
    }

    #[test]
    fn non_positive_gravity_is_rejected() {
        assert!(validate_gravity(0.0).is_err());
        assert!(validate_gravity(-0.2).is_err());
    }
}
