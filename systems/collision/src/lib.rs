#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision system that resolves food and self collisions against the
//! post-move snake body and relocates eaten food.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use serpent_core::{EntityId, Event, Food, GameError, GameState, Grid, Position, Score, Snake};
use serpent_world::{System, World};

/// Pure system that runs after movement each tick.
///
/// Food placement draws from a seeded [`ChaCha8Rng`] so a session replays
/// identically for the same seed and command script.
#[derive(Clone, Debug)]
pub struct Collision {
    rng: ChaCha8Rng,
}

impl Collision {
    /// Creates the collision system with a deterministic food-placement
    /// seed.
    #[must_use]
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Moves the entity's food to a cell drawn uniformly from the cells the
    /// snake does not occupy.
    ///
    /// A board with no free cell left ends the game instead of looping for
    /// a placement that cannot exist.
    pub fn respawn_food(&mut self, world: &mut World, entity: EntityId) -> Result<(), GameError> {
        let grid = *world.component::<Grid>(entity)?;
        let snake = world.component::<Snake>(entity)?;

        let capacity = usize::try_from(grid.cell_count()).unwrap_or(0);
        let mut free = Vec::with_capacity(capacity.saturating_sub(snake.len()));
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = Position::new(x, y);
                if !snake.occupies(cell) {
                    free.push(cell);
                }
            }
        }

        if free.is_empty() {
            if world.component_mut::<GameState>(entity)?.end() {
                world.emit(Event::GameOver);
            }
            return Ok(());
        }

        let index = self.rng.gen_range(0..free.len());
        world.component_mut::<Food>(entity)?.relocate(free[index]);
        Ok(())
    }

    fn resolve(&mut self, world: &mut World, entity: EntityId) -> Result<(), GameError> {
        let food_cell = world.component::<Food>(entity)?.position();
        let Some(head) = world.component::<Snake>(entity)?.head() else {
            return Ok(());
        };

        if head == food_cell {
            world.component_mut::<Snake>(entity)?.grow();
            let value = world.component_mut::<Score>(entity)?.increment();
            world.emit(Event::ScoreChanged { value });
            self.respawn_food(world, entity)?;
        }

        let colliding = world.component::<Snake>(entity)?.is_self_colliding();
        if colliding && world.component_mut::<GameState>(entity)?.end() {
            world.emit(Event::GameOver);
        }

        Ok(())
    }
}

impl System for Collision {
    fn update(&mut self, world: &mut World, _dt: Duration) -> Result<(), GameError> {
        for entity in world.entities_with::<Snake>() {
            self.resolve(world, entity)?;
        }

        Ok(())
    }
}
