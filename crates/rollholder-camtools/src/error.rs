//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for roll holder parameter
//! validation, sheet layout bookkeeping and cut file generation.

use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The sheet composer was driven out of order.
    #[error("Layout error: {0}")]
    Layout(String),

    /// A generated outline failed its geometric consistency check.
    #[error("Geometry error: {0}")]
    GeometryError(String),

    /// Cut file generation failed.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Errors related to roll holder parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A length is zero, negative or not finite.
    #[error("Parameter '{name}' must be a positive length, got {value}")]
    NonPositive { name: String, value: f32 },

    /// A parameter value violates a geometric constraint.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ParameterError {
    /// Name of the offending parameter.
    pub fn parameter(&self) -> &str {
        match self {
            Self::NonPositive { name, .. } | Self::InvalidValue { name, .. } => name,
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
