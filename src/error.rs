//! Error types for configuration loading and field algebra.
//!
//! Aperture evaluation itself is total: degenerate parameters produce
//! degenerate (zero-area) masks rather than errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApertureError {
    /// A metrology constant is outside its physical range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Two fields combined pointwise were sampled on grids of different size.
    #[error("field length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("failed to parse aperture config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type ApertureResult<T> = Result<T, ApertureError>;

/// Require `value > 0` and finite.
pub(crate) fn check_positive(name: &'static str, value: f64) -> ApertureResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ApertureError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}

/// Require `0 < value < 1`.
pub(crate) fn check_ratio(name: &'static str, value: f64) -> ApertureResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ApertureError::InvalidParameter {
            name,
            value,
            reason: "must lie in (0, 1)",
        })
    }
}

/// Require `value >= 0` and finite.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> ApertureResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ApertureError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative and finite",
        })
    }
}
