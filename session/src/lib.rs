#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session wiring for serpent.
//!
//! A [`Session`] owns one world, the fixed Input → Movement → Collision
//! pipeline, and the single game entity with its starting components. The
//! external driver queues heading changes with [`Session::set_direction`]
//! and advances the game one synchronous tick at a time with
//! [`Session::advance`]; observers registered on the session receive the
//! score and game-over notifications drained after each tick.

use std::time::Duration;

use serpent_core::{
    Direction, EntityId, Event, Food, GameError, GameState, Grid, Position, Score, Snake, Velocity,
};
use serpent_system_collision::Collision;
use serpent_system_input::Input;
use serpent_system_movement::Movement;
use serpent_world::{query, World};

/// Logical duration of one tick; current systems pass it through unused.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration parameters required to construct a session.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    width: u32,
    height: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided grid dimensions and
    /// food-placement seed.
    #[must_use]
    pub const fn new(width: u32, height: u32, rng_seed: u64) -> Self {
        Self {
            width,
            height,
            rng_seed,
        }
    }

    /// Number of columns in the playing field.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the playing field.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Seed used for deterministic food placement.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// One running game: a world, its system pipeline, and its game entity.
pub struct Session {
    world: World,
    entity: EntityId,
    score_observers: Vec<Box<dyn FnMut(u32)>>,
    game_over_observers: Vec<Box<dyn FnMut()>>,
}

impl Session {
    /// Builds a world, registers the three systems in fixed order, and
    /// creates the game entity with its starting components.
    ///
    /// The snake starts as a single cell at the grid center heading right;
    /// the food placeholder is immediately replaced by a valid respawn.
    pub fn new(config: Config) -> Result<Self, GameError> {
        if config.width() == 0 || config.height() == 0 {
            return Err(GameError::InvalidGrid {
                width: config.width(),
                height: config.height(),
            });
        }

        let mut world = World::new();
        let entity = world.create_entity();
        world.attach(entity, Grid::new(config.width(), config.height()));
        world.attach(
            entity,
            Snake::with_head(Position::new(config.width() / 2, config.height() / 2)),
        );
        world.attach(entity, Velocity::new(Direction::Right));
        world.attach(entity, Food::at(Position::new(0, 0)));
        world.attach(entity, Score::new());
        world.attach(entity, GameState::new());

        let mut collision = Collision::new(config.rng_seed());
        collision.respawn_food(&mut world, entity)?;

        world.add_system(Box::new(Input::new()));
        world.add_system(Box::new(Movement::new()));
        world.add_system(Box::new(collision));

        Ok(Self {
            world,
            entity,
            score_observers: Vec::new(),
            game_over_observers: Vec::new(),
        })
    }

    /// Queues a heading change for the next tick.
    ///
    /// Repeated calls between ticks overwrite each other; the last value
    /// queued before the tick wins, and a change that would reverse the
    /// current heading is discarded when the tick runs.
    pub fn set_direction(&mut self, direction: Direction) {
        self.world.queue_direction(direction);
    }

    /// Runs one synchronous tick, dispatches pending notifications, and
    /// reports whether the game has ended.
    pub fn advance(&mut self) -> Result<bool, GameError> {
        self.world.update(TICK_INTERVAL)?;

        for event in self.world.drain_events() {
            match event {
                Event::ScoreChanged { value } => {
                    for observer in &mut self.score_observers {
                        observer(value);
                    }
                }
                Event::GameOver => {
                    for observer in &mut self.game_over_observers {
                        observer();
                    }
                }
            }
        }

        self.is_game_over()
    }

    /// Registers an observer invoked with the new value on every score
    /// increment.
    pub fn on_score_changed(&mut self, observer: impl FnMut(u32) + 'static) {
        self.score_observers.push(Box::new(observer));
    }

    /// Registers an observer invoked once when the game ends.
    pub fn on_game_over(&mut self, observer: impl FnMut() + 'static) {
        self.game_over_observers.push(Box::new(observer));
    }

    /// Ordered body cells of the snake, head first.
    pub fn snake_body(&self) -> Result<Vec<Position>, GameError> {
        query::snake_cells(&self.world, self.entity)
    }

    /// Cell currently holding the food pellet.
    pub fn food_position(&self) -> Result<Position, GameError> {
        query::food_cell(&self.world, self.entity)
    }

    /// Current score value.
    pub fn score(&self) -> Result<u32, GameError> {
        query::score_value(&self.world, self.entity)
    }

    /// Reports whether the game reached its terminal state.
    pub fn is_game_over(&self) -> Result<bool, GameError> {
        query::is_game_over(&self.world, self.entity)
    }

    /// Width and height of the playing field.
    pub fn grid_dimensions(&self) -> Result<(u32, u32), GameError> {
        query::grid_dimensions(&self.world, self.entity)
    }
}
