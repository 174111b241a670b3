//! Tile Platformer headless runner
//!
//! Builds each bundled level and simulates it with an idle player, logging
//! the outcome. Rendering and input live outside this crate.

use tile_platformer::levels::{self, LEVELS};
use tile_platformer::sim::advance;

/// Simulated frame length (60 Hz)
const FRAME: f32 = 1.0 / 60.0;
/// Frames to simulate per level before giving up
const MAX_FRAMES: u32 = 60 * 30;

fn main() -> Result<(), tile_platformer::SimError> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Tile Platformer (headless) starting with seed {}", seed);

    for index in 0..LEVELS.len() {
        let Some(mut world) = levels::build(index, seed) else {
            continue;
        };

        let mut frames = 0;
        while !world.is_finished() && frames < MAX_FRAMES {
            advance(&mut world, FRAME)?;
            frames += 1;
        }

        log::info!(
            "Level {}: {:?} after {} frames, {} actors left",
            index + 1,
            world.status(),
            frames,
            world.actors().len()
        );
    }

    Ok(())
}
