//! Error types for arena construction and configuration.
//!
//! Detection and resolution never fail; everything here is raised once,
//! when bodies, the boundary, or settings are created.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("circle radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f32 },

    #[error("box extents must be positive and finite, got {width} x {height}")]
    InvalidExtents { width: f32, height: f32 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("a body of size {size} does not fit inside a {width} x {height} boundary")]
    SpawnDoesNotFit { size: f32, width: f32, height: f32 },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reject NaN and infinities in a named input.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Reject vectors with a NaN or infinite component.
pub(crate) fn ensure_finite_vec(field: &'static str, value: glam::Vec2) -> Result<glam::Vec2> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = ConfigError::InvalidRadius { radius: -2.0 };
        assert!(err.to_string().contains("-2"));

        let err = ConfigError::InvalidSetting {
            field: "circle_count",
            reason: "too many".into(),
        };
        assert_eq!(err.to_string(), "invalid setting `circle_count`: too many");
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5).unwrap(), 1.5);
        assert!(matches!(
            ensure_finite("x", f32::NAN),
            Err(ConfigError::NonFinite { field: "x" })
        ));
    }
}
