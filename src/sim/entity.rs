//! Axis-aligned moving boxes
//!
//! Every object in a level (player, fireballs, coins, and the hypothetical
//! boxes used for queries) is an `Entity`: a position, a fixed size and a
//! velocity, plus the behavior that drives it each tick.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::behavior::Behavior;
use super::world::Grid;
use crate::error::SimError;
use crate::geometry::Vector;

/// Names the argument a vector was supplied for (used in errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorField {
    Position,
    Size,
    Velocity,
    Target,
}

impl VectorField {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorField::Position => "position",
            VectorField::Size => "size",
            VectorField::Velocity => "velocity",
            VectorField::Target => "target",
        }
    }
}

impl fmt::Display for VectorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of an entity inside a `World`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Id carried by boxes that were never registered with a world
    pub const UNASSIGNED: EntityId = EntityId(0);

    pub fn is_assigned(&self) -> bool {
        *self != Self::UNASSIGNED
    }
}

/// Behavioral category, used for dispatch and contact matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Plain box with no behavior (query probes)
    Actor,
    Player,
    Fireball,
    Coin,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Actor => "actor",
            EntityKind::Player => "player",
            EntityKind::Fireball => "fireball",
            EntityKind::Coin => "coin",
        }
    }
}

/// A positioned, sized, moving rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    pos: Vector,
    size: Vector,
    speed: Vector,
    behavior: Behavior,
}

impl Entity {
    /// Plain box with no behavior
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self, SimError> {
        Self::with_behavior(pos, size, speed, Behavior::Inert)
    }

    /// Box driven by `behavior`; fails on the first invalid argument
    pub fn with_behavior(
        pos: Vector,
        size: Vector,
        speed: Vector,
        behavior: Behavior,
    ) -> Result<Self, SimError> {
        let pos = pos.validated(VectorField::Position)?;
        let size = size.validated(VectorField::Size)?;
        if size.x() < 0.0 || size.y() < 0.0 {
            return Err(SimError::NegativeSize { value: size });
        }
        let speed = speed.validated(VectorField::Velocity)?;

        Ok(Self {
            id: EntityId::UNASSIGNED,
            pos,
            size,
            speed,
            behavior,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn kind(&self) -> EntityKind {
        self.behavior.kind()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn pos(&self) -> Vector {
        self.pos
    }

    pub fn size(&self) -> Vector {
        self.size
    }

    pub fn speed(&self) -> Vector {
        self.speed
    }

    /// Move the box (used by whoever drives the player)
    pub fn set_pos(&mut self, pos: Vector) -> Result<(), SimError> {
        self.pos = pos.validated(VectorField::Position)?;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Vector) -> Result<(), SimError> {
        self.speed = speed.validated(VectorField::Velocity)?;
        Ok(())
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x() + self.size.x()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y() + self.size.y()
    }

    /// Same object, either the same reference or the same registered id
    pub fn is_same(&self, other: &Entity) -> bool {
        std::ptr::eq(self, other) || (self.id.is_assigned() && self.id == other.id)
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    pub fn is_intersect(&self, other: &Entity) -> bool {
        if self.is_same(other) {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Advance this entity by `dt` against the level terrain
    pub fn act(&mut self, dt: f32, grid: &Grid) -> Result<(), SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimeStep(dt));
        }

        let Entity {
            pos,
            size,
            speed,
            behavior,
            ..
        } = self;

        match behavior {
            Behavior::Inert | Behavior::Subject => Ok(()),
            Behavior::Projectile(projectile) => projectile.step(pos, speed, *size, dt, grid),
            Behavior::Spring(spring) => {
                spring.step(pos, dt);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_box(x: f32, y: f32) -> Entity {
        Entity::new(Vector::new(x, y), Vector::ONE, Vector::ZERO).unwrap()
    }

    #[test]
    fn test_bounds() {
        let e = Entity::new(Vector::new(1.0, 2.0), Vector::new(0.5, 3.0), Vector::ZERO).unwrap();
        assert_eq!(e.left(), 1.0);
        assert_eq!(e.right(), 1.5);
        assert_eq!(e.top(), 2.0);
        assert_eq!(e.bottom(), 5.0);
        assert_eq!(e.kind(), EntityKind::Actor);
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut e = unit_box(0.0, 0.0);
        e.set_pos(Vector::new(3.0, 4.0)).unwrap();
        assert_eq!(e.right(), 4.0);
        assert_eq!(e.bottom(), 5.0);
    }

    #[test]
    fn test_new_names_invalid_argument() {
        let err = Entity::new(Vector::new(f32::NAN, 0.0), Vector::ONE, Vector::ZERO).unwrap_err();
        assert!(matches!(err, SimError::InvalidVector { field: VectorField::Position, .. }));

        let err = Entity::new(Vector::ZERO, Vector::new(1.0, f32::INFINITY), Vector::ZERO).unwrap_err();
        assert!(matches!(err, SimError::InvalidVector { field: VectorField::Size, .. }));

        let err = Entity::new(Vector::ZERO, Vector::ONE, Vector::new(f32::NAN, 1.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidVector { field: VectorField::Velocity, .. }));

        let err = Entity::new(Vector::ZERO, Vector::new(-1.0, 1.0), Vector::ZERO).unwrap_err();
        assert!(matches!(err, SimError::NegativeSize { .. }));
    }

    #[test]
    fn test_set_speed_rejects_nan() {
        let mut e = unit_box(0.0, 0.0);
        assert!(e.set_speed(Vector::new(f32::NAN, 0.0)).is_err());
        assert_eq!(e.speed(), Vector::ZERO);
    }

    #[test]
    fn test_edge_touch_is_not_intersection() {
        let a = unit_box(0.0, 0.0);
        assert!(!a.is_intersect(&unit_box(1.0, 0.0)));
        assert!(!a.is_intersect(&unit_box(0.0, 1.0)));
        assert!(!a.is_intersect(&unit_box(1.0, 1.0)));
        assert!(a.is_intersect(&unit_box(0.5, 0.5)));
        assert!(!a.is_intersect(&unit_box(5.0, 5.0)));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = Entity::new(Vector::ZERO, Vector::new(4.0, 4.0), Vector::ZERO).unwrap();
        let inner = Entity::new(Vector::new(1.0, 1.0), Vector::ONE, Vector::ZERO).unwrap();
        assert!(outer.is_intersect(&inner));
        assert!(inner.is_intersect(&outer));
    }

    #[test]
    fn test_same_id_is_excluded() {
        let mut a = unit_box(0.0, 0.0);
        a.assign_id(EntityId(7));
        let copy = a.clone();
        assert!(!a.is_intersect(&copy));

        // Unregistered boxes are only "the same" by reference
        let b = unit_box(0.0, 0.0);
        let c = unit_box(0.0, 0.0);
        assert!(b.is_intersect(&c));
    }

    proptest! {
        #[test]
        fn prop_never_intersects_itself(x in -50f32..50.0, y in -50f32..50.0, w in 0.01f32..10.0, h in 0.01f32..10.0) {
            let e = Entity::new(Vector::new(x, y), Vector::new(w, h), Vector::ZERO).unwrap();
            prop_assert!(!e.is_intersect(&e));
        }

        #[test]
        fn prop_positive_overlap_intersects(x in 0f32..10.0, y in 0f32..10.0, overlap in 0.01f32..0.99) {
            let a = unit_box(x, y);
            let b = unit_box(x + 1.0 - overlap, y);
            prop_assert!(a.is_intersect(&b));
            prop_assert!(b.is_intersect(&a));
        }
    }
}
