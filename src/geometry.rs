//! 2D vector primitive for tile-space positions, sizes and velocities
//!
//! One unit is one grid cell. `x` grows to the right, `y` grows downward
//! (row index), matching the layout of a level plan.

use std::fmt;
use std::ops::{Add, Mul};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::VectorField;

/// Immutable pair of real numbers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(pub Vec2);

impl Vector {
    pub const ZERO: Self = Self(Vec2::ZERO);
    pub const ONE: Self = Self(Vec2::ONE);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    /// Scale both components by `factor` (negative factors flip direction)
    #[inline]
    pub fn times(self, factor: f32) -> Vector {
        Self(self.0 * factor)
    }

    /// True when both components are finite real numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Check that this vector can stand in for `field`
    pub fn validated(self, field: VectorField) -> Result<Self, SimError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(SimError::InvalidVector { field, value: self })
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<(f32, f32)> for Vector {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}
