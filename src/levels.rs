//! Bundled level plans
//!
//! Decoded with `SymbolTable::default()`: `x` wall, `!` lava, `@` player,
//! `o` coin, `=`/`|` bouncing fireballs, `v` fire rain.

use crate::sim::{LevelParser, World};

pub const LEVELS: [&[&str]; 2] = [
    &[
        "         ",
        "         ",
        "    =    ",
        "       o ",
        "     !xxx",
        " @       ",
        "xxx!     ",
        "         ",
    ],
    &[
        "      v  ",
        "    v    ",
        "  v      ",
        "        o",
        "        x",
        "@   x    ",
        "x        ",
        "         ",
    ],
];

/// Build bundled level `index` (None when out of range)
pub fn build(index: usize, seed: u64) -> Option<World> {
    let plan = LEVELS.get(index)?;
    Some(LevelParser::default().parse_seeded(*plan, seed))
}
