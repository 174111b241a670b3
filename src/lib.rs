//! Tile Platformer - world model and collision core for a 2D tile-grid platformer
//!
//! Core modules:
//! - `geometry`: 2D vector primitive
//! - `sim`: Entities, terrain queries, behaviors and level building
//! - `levels`: Bundled level plans

pub mod error;
pub mod geometry;
pub mod levels;
pub mod sim;

pub use error::SimError;
pub use geometry::Vector;

/// Game configuration constants
pub mod consts {
    use crate::geometry::Vector;

    /// Longest sub-step `advance` will take (fraction of a second)
    pub const MAX_STEP: f32 = 0.05;
    /// Maximum sub-steps per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 240;
    /// Grace period after the outcome is decided, in seconds of sim time.
    /// `World::advance_finish_delay` takes the step's `dt`, not a tick count.
    pub const FINISH_DELAY: f32 = 1.0;

    /// Player box relative to its plan cell
    pub const PLAYER_OFFSET: Vector = Vector::new(0.0, -0.5);
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);

    /// Coin box, centered in its cell
    pub const COIN_OFFSET: Vector = Vector::new(0.2, 0.1);
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    /// Coin bob speed (radians/sec) and height (cells)
    pub const SPRING_SPEED: f32 = 8.0;
    pub const SPRING_AMPLITUDE: f32 = 0.07;

    pub const FIREBALL_SIZE: Vector = Vector::new(1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);
}
