use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The drawing surface has no area, so depth scaling would divide by zero.
    #[error("surface has no drawable area ({width}x{height})")]
    EmptySurface { width: f64, height: f64 },
    #[error("per-frame depth step must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("star {index} has {field}={value} outside the field")]
    StarOutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
    },
}
