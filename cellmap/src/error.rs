use crate::model::PointId;
use thiserror::Error;

/// Failures reported by the strict API and by config validation.
///
/// The silent API (`add_point`, `remove_point`, ...) never returns these; it
/// absorbs the same conditions as no-ops.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DiagramError {
    /// Width or height is non-finite, non-positive or too large.
    #[error("bounds must be finite and in (0, {max}], got {width}x{height}")]
    InvalidBounds { width: f32, height: f32, max: f32 },
    /// A numeric parameter is NaN or infinite.
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },
    /// A finite numeric parameter lies outside its accepted range.
    #[error("parameter '{param}' out of range [{min}, {max}], got {got}")]
    OutOfRange { param: &'static str, min: f32, max: f32, got: f32 },
    /// The id was never issued or has already been removed.
    #[error("unknown point id {0}")]
    UnknownPoint(PointId),
    /// The store already holds the maximum number of points, or every point
    /// id has been handed out.
    #[error("point limit of {0} reached")]
    TooManyPoints(usize),
    /// A config field other than the bounds is out of range, or the config
    /// document could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl DiagramError {
    /// Stable machine-readable code used by host bindings.
    pub fn code(&self) -> &'static str {
        match self {
            DiagramError::InvalidBounds { .. } => "out_of_range",
            DiagramError::NonFinite { .. } => "non_finite",
            DiagramError::OutOfRange { .. } => "out_of_range",
            DiagramError::UnknownPoint(_) => "invalid_id",
            DiagramError::TooManyPoints(_) => "limit",
            DiagramError::InvalidConfig(_) => "invalid_config",
        }
    }
}
