//! Level plan decoding
//!
//! A plan is a list of rows; each character is looked up in a `SymbolTable`
//! and becomes either a terrain label, an entity spawn, or empty space.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::behavior::ProjectileConfig;
use super::entity::Entity;
use super::world::{Grid, Obstacle, World};
use crate::error::SimError;
use crate::geometry::Vector;

/// Entity constructor selected by a symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spawn {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
    /// Custom fireball variant
    Projectile(ProjectileConfig),
}

impl Spawn {
    /// Build the entity for the cell at `cell`
    pub fn spawn<R: Rng>(&self, cell: Vector, rng: &mut R) -> Result<Entity, SimError> {
        match self {
            Spawn::Player => Entity::player(cell),
            Spawn::Coin => Entity::coin(cell, rng),
            Spawn::HorizontalFireball => Entity::projectile(cell, ProjectileConfig::HORIZONTAL),
            Spawn::VerticalFireball => Entity::projectile(cell, ProjectileConfig::VERTICAL),
            Spawn::FireRain => Entity::projectile(cell, ProjectileConfig::RAIN),
            Spawn::Projectile(config) => Entity::projectile(cell, *config),
        }
    }
}

/// Meaning of one plan character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Obstacle(Obstacle),
    Actor(Spawn),
}

/// Character → meaning mapping; unmapped characters are empty space
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    symbols: BTreeMap<char, Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
            .with('x', Symbol::Obstacle(Obstacle::Wall))
            .with('!', Symbol::Obstacle(Obstacle::Lava))
            .with('@', Symbol::Actor(Spawn::Player))
            .with('o', Symbol::Actor(Spawn::Coin))
            .with('=', Symbol::Actor(Spawn::HorizontalFireball))
            .with('|', Symbol::Actor(Spawn::VerticalFireball))
            .with('v', Symbol::Actor(Spawn::FireRain))
    }
}

impl SymbolTable {
    /// Empty table
    pub fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    pub fn with(mut self, symbol: char, meaning: Symbol) -> Self {
        self.insert(symbol, meaning);
        self
    }

    pub fn insert(&mut self, symbol: char, meaning: Symbol) {
        self.symbols.insert(symbol, meaning);
    }

    pub fn get(&self, symbol: char) -> Option<&Symbol> {
        self.symbols.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Load from a JSON object keyed by single characters, e.g.
    /// `{"x": {"obstacle": "wall"}, "@": {"actor": "player"}}`
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let raw: BTreeMap<String, Symbol> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (key, meaning) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => table.insert(symbol, meaning),
                _ => return Err(SimError::UnknownSymbol(key)),
            }
        }
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        let raw: BTreeMap<String, &Symbol> = self
            .symbols
            .iter()
            .map(|(symbol, meaning)| (symbol.to_string(), meaning))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }
}

/// Turns plans into worlds using a fixed symbol table
#[derive(Debug, Clone, Default)]
pub struct LevelParser {
    table: SymbolTable,
}

impl LevelParser {
    pub fn new(table: SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<Spawn> {
        match self.table.get(symbol) {
            Some(Symbol::Actor(spawn)) => Some(*spawn),
            _ => None,
        }
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        match self.table.get(symbol) {
            Some(Symbol::Obstacle(obstacle)) => Some(*obstacle),
            _ => None,
        }
    }

    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        let rows = plan
            .iter()
            .map(|line| {
                line.as_ref()
                    .chars()
                    .map(|c| self.obstacle_from_symbol(c))
                    .collect()
            })
            .collect();
        Grid::new(rows)
    }

    /// Spawn one entity per actor symbol; spawns that fail are skipped
    pub fn create_actors<S: AsRef<str>, R: Rng>(&self, plan: &[S], rng: &mut R) -> Vec<Entity> {
        let mut actors = Vec::new();
        for (row, line) in plan.iter().enumerate() {
            for (col, symbol) in line.as_ref().chars().enumerate() {
                let Some(spawn) = self.actor_from_symbol(symbol) else {
                    continue;
                };
                let cell = Vector::new(col as f32, row as f32);
                match spawn.spawn(cell, rng) {
                    Ok(actor) => actors.push(actor),
                    Err(err) => {
                        log::debug!("Skipping {:?} at row {}, col {}: {}", symbol, row, col, err)
                    }
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>, R: Rng>(&self, plan: &[S], rng: &mut R) -> World {
        let grid = self.create_grid(plan);
        let actors = self.create_actors(plan, rng);
        log::info!(
            "Level built: {}x{} grid, {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        World::new(grid, actors)
    }

    /// `parse` with a `Pcg32` seeded from `seed`
    pub fn parse_seeded<S: AsRef<str>>(&self, plan: &[S], seed: u64) -> World {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.parse(plan, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, LevelStatus, ObstacleReaction, TouchKind};

    fn small_parser() -> LevelParser {
        LevelParser::new(
            SymbolTable::new()
                .with('x', Symbol::Obstacle(Obstacle::Wall))
                .with('@', Symbol::Actor(Spawn::Player))
                .with('o', Symbol::Actor(Spawn::Coin)),
        )
    }

    #[test]
    fn test_symbol_lookup() {
        let parser = LevelParser::default();
        assert_eq!(parser.obstacle_from_symbol('x'), Some(Obstacle::Wall));
        assert_eq!(parser.obstacle_from_symbol('!'), Some(Obstacle::Lava));
        assert_eq!(parser.obstacle_from_symbol('@'), None);
        assert_eq!(parser.actor_from_symbol('v'), Some(Spawn::FireRain));
        assert_eq!(parser.actor_from_symbol('x'), None);
        assert_eq!(parser.actor_from_symbol('?'), None);
    }

    #[test]
    fn test_create_grid() {
        let parser = LevelParser::default();
        let grid = parser.create_grid(&["x x", "!", ""]);
        assert_eq!(grid.rows()[0], vec![Some(Obstacle::Wall), None, Some(Obstacle::Wall)]);
        assert_eq!(grid.rows()[1], vec![Some(Obstacle::Lava)]);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn test_end_to_end_collect_only_coin() {
        let world = small_parser().parse_seeded(&["x x", "   ", "@ o"], 7);

        assert_eq!(
            world.grid().rows()[0],
            vec![Some(Obstacle::Wall), None, Some(Obstacle::Wall)]
        );
        assert_eq!(world.status(), LevelStatus::InProgress);
        assert_eq!(world.actors().len(), 2);

        let player = world.player().unwrap();
        assert_eq!(player.pos(), Vector::new(0.0, 1.5));

        let coins: Vec<_> = world
            .actors()
            .iter()
            .filter(|a| a.kind() == EntityKind::Coin)
            .cloned()
            .collect();
        assert_eq!(coins.len(), 1);
        assert!((coins[0].pos().x() - 2.2).abs() < 1e-6);
        assert!((coins[0].pos().y() - 2.1).abs() < 1e-6);

        let mut world = world;
        world.player_touched(TouchKind::Coin, Some(&coins[0]));
        assert_eq!(world.status(), LevelStatus::Won);
        assert!(world.no_more_actors(EntityKind::Coin));
    }

    #[test]
    fn test_invalid_spawn_is_skipped() {
        let broken = ProjectileConfig {
            velocity: Vector::new(f32::NAN, 0.0),
            reaction: ObstacleReaction::Bounce,
        };
        let parser = LevelParser::new(
            SymbolTable::new()
                .with('@', Symbol::Actor(Spawn::Player))
                .with('*', Symbol::Actor(Spawn::Projectile(broken))),
        );
        let world = parser.parse_seeded(&["@ * *"], 1);
        assert_eq!(world.actors().len(), 1);
        assert!(world.no_more_actors(EntityKind::Fireball));
    }

    #[test]
    fn test_same_seed_same_coins() {
        let parser = LevelParser::default();
        let plan = ["o o o"];
        let a = parser.parse_seeded(&plan, 99);
        let b = parser.parse_seeded(&plan, 99);
        let pa: Vec<_> = a.actors().iter().map(|e| format!("{:?}", e.behavior())).collect();
        let pb: Vec<_> = b.actors().iter().map(|e| format!("{:?}", e.behavior())).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_symbol_table_json() {
        let json = r##"{
            "#": {"obstacle": "wall"},
            "~": {"obstacle": "lava"},
            "P": {"actor": "player"},
            ">": {"actor": {"projectile": {"velocity": [1.0, 0.0], "reaction": "bounce"}}}
        }"##;
        let table = SymbolTable::from_json(json).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get('#'), Some(&Symbol::Obstacle(Obstacle::Wall)));
        assert_eq!(
            table.get('>'),
            Some(&Symbol::Actor(Spawn::Projectile(ProjectileConfig {
                velocity: Vector::new(1.0, 0.0),
                reaction: ObstacleReaction::Bounce,
            })))
        );

        let again = SymbolTable::from_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(again, table);
    }

    #[test]
    fn test_symbol_table_json_errors() {
        let err = SymbolTable::from_json(r#"{"xx": {"obstacle": "wall"}}"#).unwrap_err();
        assert!(matches!(err, SimError::UnknownSymbol(ref k) if k == "xx"));

        let err = SymbolTable::from_json(r#"{"x": {"obstacle": "mud"}}"#).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
