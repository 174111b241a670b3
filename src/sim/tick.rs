//! Per-step simulation driver
//!
//! One `tick` moves every entity, then resolves what the player is touching.
//! `advance` splits a frame's elapsed time into bounded sub-steps.

use super::world::{Obstacle, TouchKind, World};
use crate::consts::{MAX_STEP, MAX_SUBSTEPS};
use crate::error::SimError;

/// Advance the world by one step of `dt`
pub fn tick(world: &mut World, dt: f32) -> Result<(), SimError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidTimeStep(dt));
    }

    world.advance_finish_delay(dt);
    world.act_all(dt)?;

    if world.status().is_decided() {
        return Ok(());
    }
    let Some(player) = world.player().cloned() else {
        return Ok(());
    };

    if world.obstacle_at(player.pos(), player.size())? == Some(Obstacle::Lava) {
        world.player_touched(TouchKind::Lava, None);
    }

    if let Some(other) = world.actor_at(&player).cloned() {
        world.player_touched(other.kind().into(), Some(&other));
    }

    Ok(())
}

/// Advance by `elapsed`, in equal sub-steps no longer than `MAX_STEP`.
///
/// At most `MAX_SUBSTEPS` ticks run per call; time beyond that is dropped.
/// Returns the number of ticks run.
pub fn advance(world: &mut World, elapsed: f32) -> Result<u32, SimError> {
    if !elapsed.is_finite() || elapsed < 0.0 {
        return Err(SimError::InvalidTimeStep(elapsed));
    }
    if elapsed == 0.0 {
        return Ok(0);
    }

    let needed = (elapsed / MAX_STEP).ceil().max(1.0);
    let step = elapsed / needed;
    let steps = if needed > MAX_SUBSTEPS as f32 {
        log::debug!(
            "Dropping {:.3}s of sim time past {} sub-steps",
            elapsed - step * MAX_SUBSTEPS as f32,
            MAX_SUBSTEPS
        );
        MAX_SUBSTEPS
    } else {
        needed as u32
    };

    for _ in 0..steps {
        tick(world, step)?;
    }
    Ok(steps)
}
