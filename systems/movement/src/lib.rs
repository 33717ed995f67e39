#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that steps each snake one cell along its heading on the
//! toroidal grid.

use std::time::Duration;

use serpent_core::{GameError, Grid, Snake, Velocity};
use serpent_world::{System, World};

/// Pure system that advances snake bodies by one wrapped step per tick.
///
/// Movement is the only place body length changes: the new head is always
/// prepended, and the tail is removed unless pending growth absorbs the
/// step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates the movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl System for Movement {
    fn update(&mut self, world: &mut World, _dt: Duration) -> Result<(), GameError> {
        for entity in world.entities_with::<Snake>() {
            let direction = world.component::<Velocity>(entity)?.direction();
            let grid = *world.component::<Grid>(entity)?;
            let snake = world.component_mut::<Snake>(entity)?;

            let Some(head) = snake.head() else {
                continue;
            };

            snake.advance(grid.step(head, direction));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serpent_core::{
        ComponentKind, Direction, EntityId, GameError, Grid, Position, Snake, Velocity,
    };
    use serpent_world::{System, World};

    use super::Movement;

    fn world_with_snake(head: Position, direction: Direction) -> (World, EntityId) {
        let mut world = World::new();
        let entity = world.create_entity();
        world.attach(entity, Grid::new(5, 5));
        world.attach(entity, Snake::with_head(head));
        world.attach(entity, Velocity::new(direction));
        (world, entity)
    }

    fn body(world: &World, entity: EntityId) -> Vec<Position> {
        world
            .component::<Snake>(entity)
            .expect("snake")
            .cells()
            .collect()
    }

    #[test]
    fn steps_head_one_cell_along_heading() {
        let (mut world, entity) = world_with_snake(Position::new(2, 2), Direction::Right);

        Movement::new()
            .update(&mut world, Duration::ZERO)
            .expect("movement tick");

        assert_eq!(body(&world, entity), vec![Position::new(3, 2)]);
    }

    #[test]
    fn wraps_around_the_grid_edge() {
        let (mut world, entity) = world_with_snake(Position::new(4, 2), Direction::Right);

        Movement::new()
            .update(&mut world, Duration::ZERO)
            .expect("movement tick");

        assert_eq!(body(&world, entity), vec![Position::new(0, 2)]);
    }

    #[test]
    fn consumes_pending_growth_instead_of_tail() {
        let (mut world, entity) = world_with_snake(Position::new(2, 2), Direction::Down);
        world
            .component_mut::<Snake>(entity)
            .expect("snake")
            .grow();

        Movement::new()
            .update(&mut world, Duration::ZERO)
            .expect("movement tick");

        let snake = world.component::<Snake>(entity).expect("snake");
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.growth_pending(), 0);
        assert_eq!(snake.head(), Some(Position::new(2, 3)));
    }

    #[test]
    fn missing_velocity_fails_loudly() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.attach(entity, Grid::new(5, 5));
        world.attach(entity, Snake::with_head(Position::new(2, 2)));

        let outcome = Movement::new().update(&mut world, Duration::ZERO);

        assert_eq!(
            outcome,
            Err(GameError::MissingComponent {
                entity,
                kind: ComponentKind::Velocity,
            })
        );
    }
}
