//! Level state: terrain grid, live entities and outcome
//!
//! Terrain never changes after construction. Entities only leave (collected
//! coins); nothing spawns mid-level. The outcome is write-once.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, VectorField};
use crate::consts::FINISH_DELAY;
use crate::error::SimError;
use crate::geometry::Vector;

/// Static terrain label of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Obstacle {
    Wall,
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

/// Outcome of the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelStatus {
    pub fn is_decided(&self) -> bool {
        *self != LevelStatus::InProgress
    }
}

/// What the player ran into: a terrain label or an entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchKind {
    Wall,
    Lava,
    Actor,
    Player,
    Fireball,
    Coin,
}

impl TouchKind {
    /// Touching this ends the level as lost
    pub fn is_hazard(&self) -> bool {
        matches!(self, TouchKind::Lava | TouchKind::Fireball)
    }
}

impl From<Obstacle> for TouchKind {
    fn from(obstacle: Obstacle) -> Self {
        match obstacle {
            Obstacle::Wall => TouchKind::Wall,
            Obstacle::Lava => TouchKind::Lava,
        }
    }
}

impl From<EntityKind> for TouchKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Actor => TouchKind::Actor,
            EntityKind::Player => TouchKind::Player,
            EntityKind::Fireball => TouchKind::Fireball,
            EntityKind::Coin => TouchKind::Coin,
        }
    }
}

impl fmt::Display for TouchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TouchKind::Wall => "wall",
            TouchKind::Lava => "lava",
            TouchKind::Actor => "actor",
            TouchKind::Player => "player",
            TouchKind::Fireball => "fireball",
            TouchKind::Coin => "coin",
        };
        f.write_str(name)
    }
}

/// Static obstacle grid, indexed `[row][column]`
///
/// Rows may be ragged; cells past the end of a short row are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Obstacle>>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<Option<Obstacle>>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Obstacle> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Classify a hypothetical box at `target` with `size`.
    ///
    /// Leaving the left, right or top edge is `Wall`; sinking below the
    /// bottom is `Lava`. Otherwise the covered cells are scanned column by
    /// column (rows inner) and the first labeled cell wins.
    pub fn obstacle_at(&self, target: Vector, size: Vector) -> Result<Option<Obstacle>, SimError> {
        let target = target.validated(VectorField::Target)?;
        let probe = Entity::new(target, size, Vector::ZERO)?;

        if probe.top() < 0.0 || probe.left() < 0.0 || probe.right() > self.width as f32 {
            return Ok(Some(Obstacle::Wall));
        }
        if probe.bottom() > self.height() as f32 {
            return Ok(Some(Obstacle::Lava));
        }

        let cols = probe.left().floor() as usize..probe.right().ceil() as usize;
        let rows = probe.top().floor() as usize..probe.bottom().ceil() as usize;
        for col in cols {
            for row in rows.clone() {
                if let Some(obstacle) = self.get(row, col) {
                    return Ok(Some(obstacle));
                }
            }
        }
        Ok(None)
    }
}

/// A running level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    grid: Grid,
    actors: Vec<Entity>,
    player: Option<EntityId>,
    status: LevelStatus,
    /// Grace period before a decided outcome is reported as finished
    finish_delay: f32,
    next_id: u32,
}

impl World {
    /// Take ownership of the terrain and the initial entities, assigning ids
    pub fn new(grid: Grid, actors: Vec<Entity>) -> Self {
        let mut world = Self {
            grid,
            actors: Vec::with_capacity(actors.len()),
            player: None,
            status: LevelStatus::InProgress,
            finish_delay: FINISH_DELAY,
            next_id: 1,
        };

        for mut actor in actors {
            let id = world.next_entity_id();
            actor.assign_id(id);
            if actor.kind() == EntityKind::Player {
                if world.player.is_none() {
                    world.player = Some(id);
                } else {
                    log::warn!("Extra player entity {:?} ignored as subject", id);
                }
            }
            world.actors.push(actor);
        }

        world
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Live entities in spawn order
    pub fn actors(&self) -> &[Entity] {
        &self.actors
    }

    pub fn actor(&self, id: EntityId) -> Option<&Entity> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    /// Count down the grace period once the outcome is decided.
    ///
    /// `dt` is the step length in seconds, the same value passed to `tick`.
    pub fn advance_finish_delay(&mut self, dt: f32) {
        if self.status.is_decided() {
            self.finish_delay -= dt;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finish_delay < 0.0 && self.status.is_decided()
    }

    /// First live entity overlapping `probe`, excluding `probe` itself
    pub fn actor_at(&self, probe: &Entity) -> Option<&Entity> {
        self.actors.iter().find(|a| a.is_intersect(probe))
    }

    pub fn obstacle_at(&self, target: Vector, size: Vector) -> Result<Option<Obstacle>, SimError> {
        self.grid.obstacle_at(target, size)
    }

    pub fn remove_actor(&mut self, id: EntityId) {
        self.actors.retain(|a| a.id() != id);
    }

    pub fn no_more_actors(&self, kind: EntityKind) -> bool {
        !self.actors.iter().any(|a| a.kind() == kind)
    }

    /// Run every live entity's behavior for one step
    pub fn act_all(&mut self, dt: f32) -> Result<(), SimError> {
        for actor in &mut self.actors {
            actor.act(dt, &self.grid)?;
        }
        Ok(())
    }

    /// Record that the player touched `touched` (optionally a specific entity)
    pub fn player_touched(&mut self, touched: TouchKind, actor: Option<&Entity>) {
        if self.status.is_decided() {
            return;
        }

        if touched.is_hazard() {
            self.status = LevelStatus::Lost;
            log::info!("Level lost (touched {})", touched);
        } else if touched == TouchKind::Coin {
            let Some(coin) = actor.filter(|a| a.kind() == EntityKind::Coin) else {
                return;
            };
            self.remove_actor(coin.id());
            if self.no_more_actors(EntityKind::Coin) {
                self.status = LevelStatus::Won;
                log::info!("Level won (all coins collected)");
            }
        }
    }
}
