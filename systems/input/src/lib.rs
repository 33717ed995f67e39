#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input system that applies queued heading changes through the no-reverse
//! gate.

use std::time::Duration;

use serpent_core::{GameError, Velocity};
use serpent_world::{System, World};

/// Pure system that consumes the world's pending direction once per tick.
///
/// The queued slot is cleared whether or not the change applies; a heading
/// that exactly reverses an entity's current velocity is discarded so the
/// snake can never fold back onto its own neck within a single tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct Input;

impl Input {
    /// Creates the input system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl System for Input {
    fn update(&mut self, world: &mut World, _dt: Duration) -> Result<(), GameError> {
        let Some(pending) = world.take_queued_direction() else {
            return Ok(());
        };

        for entity in world.entities_with::<Velocity>() {
            let velocity = world.component_mut::<Velocity>(entity)?;
            if pending != velocity.direction().reversed() {
                velocity.turn(pending);
            }
        }

        Ok(())
    }
}
