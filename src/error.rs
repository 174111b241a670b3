//! Errors raised by the simulation core

use thiserror::Error;

use crate::geometry::Vector;
use crate::sim::VectorField;

/// Contract violations at a constructive boundary, plus config load failures.
///
/// None of these are retried; callers propagate them with `?`.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("{field} {value} is not a finite vector")]
    InvalidVector { field: VectorField, value: Vector },

    #[error("size {value} has a negative component")]
    NegativeSize { value: Vector },

    #[error("time step {0} is not a finite non-negative number")]
    InvalidTimeStep(f32),

    #[error("symbol table parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("symbol key {0:?} must be exactly one character")]
    UnknownSymbol(String),
}
