//! Simulation core
//!
//! Terrain, entities and their per-step rules. Nothing in here renders,
//! reads input or paces time; callers drive it with `tick`/`advance`.

pub mod behavior;
pub mod builder;
pub mod entity;
pub mod tick;
pub mod world;

pub use behavior::{
    Behavior, ObstacleReaction, Projectile, ProjectileConfig, ProjectileState, Spring,
    next_position,
};
pub use builder::{LevelParser, Spawn, Symbol, SymbolTable};
pub use entity::{Entity, EntityId, EntityKind, VectorField};
pub use tick::{advance, tick};
pub use world::{Grid, LevelStatus, Obstacle, TouchKind, World};
