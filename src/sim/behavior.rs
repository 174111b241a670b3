//! Per-kind behaviors
//!
//! Fireballs share one state machine parameterized by a `ProjectileConfig`
//! (initial velocity + what to do on hitting terrain). Coins bob in place on
//! a sine spring. The player has no autonomous behavior; it is moved by the
//! caller.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::world::Grid;
use crate::consts::*;
use crate::error::SimError;
use crate::geometry::Vector;

/// What a projectile does when its next position is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleReaction {
    /// Reverse velocity
    Bounce,
    /// Jump back to the spawn point and keep falling
    Reset,
}

/// Data describing one projectile variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    pub velocity: Vector,
    pub reaction: ObstacleReaction,
}

impl ProjectileConfig {
    pub const HORIZONTAL: Self = Self {
        velocity: HORIZONTAL_FIREBALL_SPEED,
        reaction: ObstacleReaction::Bounce,
    };
    pub const VERTICAL: Self = Self {
        velocity: VERTICAL_FIREBALL_SPEED,
        reaction: ObstacleReaction::Bounce,
    };
    pub const RAIN: Self = Self {
        velocity: FIRE_RAIN_SPEED,
        reaction: ObstacleReaction::Reset,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileState {
    #[default]
    Traveling,
    /// Last step hit terrain and the reaction was applied
    Bounced,
}

/// Fireball state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub reaction: ObstacleReaction,
    /// Spawn position, target of `ObstacleReaction::Reset`
    pub start: Vector,
    pub state: ProjectileState,
}

impl Projectile {
    pub fn new(start: Vector, reaction: ObstacleReaction) -> Self {
        Self {
            reaction,
            start,
            state: ProjectileState::Traveling,
        }
    }

    pub(crate) fn step(
        &mut self,
        pos: &mut Vector,
        speed: &mut Vector,
        size: Vector,
        dt: f32,
        grid: &Grid,
    ) -> Result<(), SimError> {
        let next = next_position(*pos, *speed, dt);

        if grid.obstacle_at(next, size)?.is_some() {
            match self.reaction {
                ObstacleReaction::Bounce => *speed = speed.times(-1.0),
                ObstacleReaction::Reset => *pos = self.start,
            }
            self.state = ProjectileState::Bounced;
        } else {
            *pos = next;
            self.state = ProjectileState::Traveling;
        }
        Ok(())
    }
}

/// Where a box moving at `speed` ends up after `dt`
#[inline]
pub fn next_position(pos: Vector, speed: Vector, dt: f32) -> Vector {
    pos.plus(speed.times(dt))
}

/// Vertical bobbing around a fixed anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spring {
    pub anchor: Vector,
    /// Phase accumulator (radians)
    pub phase: f32,
    pub speed: f32,
    pub amplitude: f32,
}

impl Spring {
    pub fn new(anchor: Vector, phase: f32) -> Self {
        Self {
            anchor,
            phase,
            speed: SPRING_SPEED,
            amplitude: SPRING_AMPLITUDE,
        }
    }

    /// Offset from the anchor at the current phase
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.amplitude)
    }

    pub(crate) fn step(&mut self, pos: &mut Vector, dt: f32) {
        self.phase = (self.phase + self.speed * dt).rem_euclid(TAU);
        *pos = self.anchor.plus(self.offset());
    }
}

/// Per-kind behavior attached to an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    Inert,
    Subject,
    Projectile(Projectile),
    Spring(Spring),
}

impl Behavior {
    pub fn kind(&self) -> EntityKind {
        match self {
            Behavior::Inert => EntityKind::Actor,
            Behavior::Subject => EntityKind::Player,
            Behavior::Projectile(_) => EntityKind::Fireball,
            Behavior::Spring(_) => EntityKind::Coin,
        }
    }
}

impl Entity {
    /// Player standing in the cell at `cell`
    pub fn player(cell: Vector) -> Result<Self, SimError> {
        Self::with_behavior(
            cell.plus(PLAYER_OFFSET),
            PLAYER_SIZE,
            Vector::ZERO,
            Behavior::Subject,
        )
    }

    /// Fireball spawned at `cell`
    pub fn projectile(cell: Vector, config: ProjectileConfig) -> Result<Self, SimError> {
        Self::with_behavior(
            cell,
            FIREBALL_SIZE,
            config.velocity,
            Behavior::Projectile(Projectile::new(cell, config.reaction)),
        )
    }

    /// Coin centered in `cell` with a phase drawn from `rng`
    pub fn coin<R: Rng>(cell: Vector, rng: &mut R) -> Result<Self, SimError> {
        let phase = rng.random_range(0.0..TAU);
        Self::coin_with_phase(cell, phase)
    }

    pub fn coin_with_phase(cell: Vector, phase: f32) -> Result<Self, SimError> {
        let anchor = cell.plus(COIN_OFFSET);
        Self::with_behavior(
            anchor,
            COIN_SIZE,
            Vector::ZERO,
            Behavior::Spring(Spring::new(anchor, phase)),
        )
    }
}
